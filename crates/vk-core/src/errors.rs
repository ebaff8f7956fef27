//! Error types for valkit.
//!
//! Every failure in the library is reported through a single
//! `thiserror`-derived enum.  Three classes matter to callers:
//!
//! * [`Error::Domain`]: a query time is negative or outside a structure's
//!   domain (see [`ensure_domain!`](crate::ensure_domain)).
//! * [`Error::Precondition`]: a required dependency or input is missing or
//!   malformed (see [`ensure!`](crate::ensure)).
//! * [`Error::Postcondition`]: an internal invariant was violated, e.g. a
//!   non-positive discount factor or a product stepped past its schedule
//!   (see [`ensure_post!`](crate::ensure_post)).
//!
//! None of them is retried locally; the current operation is aborted and no
//! partial value is produced.

use thiserror::Error;

/// The top-level error type used throughout valkit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Query outside the domain of the queried object.
    #[error("domain error: {0}")]
    Domain(String),

    /// Postcondition / invariant violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// An operation was requested through an empty handle.
    #[error("null value: {0}")]
    NullValue(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },
}

impl Error {
    /// `true` for [`Error::Domain`].
    pub fn is_domain(&self) -> bool {
        matches!(self, Error::Domain(_))
    }

    /// `true` for [`Error::Precondition`].
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Precondition(_))
    }

    /// `true` for [`Error::Postcondition`].
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::Postcondition(_))
    }
}

/// Shorthand `Result` type used throughout valkit.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use vk_core::{ensure, errors::Error};
/// fn positive(x: f64) -> vk_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Domain(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use vk_core::{ensure_domain, errors::Error};
/// fn check_time(t: f64) -> vk_core::errors::Result<f64> {
///     ensure_domain!(t >= 0.0, "negative time ({t}) given");
///     Ok(t)
/// }
/// assert!(check_time(1.0).is_ok());
/// assert!(matches!(check_time(-1.0), Err(Error::Domain(_))));
/// ```
#[macro_export]
macro_rules! ensure_domain {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Domain(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use vk_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> vk_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

//! # vk-core
//!
//! Core types, traits, and error definitions for valkit.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – type aliases, the error hierarchy, the
//! Observer/Observable pattern, the `Handle` wrapper, `LazyObject`, the
//! option/swap direction enums, and `Settings`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Option and swap direction enums.
pub mod direction;

/// Error types and the `ensure!` / `ensure_domain!` / `ensure_post!`
/// macros.
pub mod errors;

/// Shared observable reference (`Handle<T>`, `RelinkableHandle<T>`).
pub mod handle;

/// Design patterns: observable, lazy_object.
pub mod patterns;

/// Global library settings (evaluation date).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// A discount factor; positive, and above 1 under negative rates.
pub type DiscountFactor = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use direction::{OptionType, SwapType};
pub use errors::{Error, Result};
pub use handle::{Handle, RelinkableHandle};
pub use patterns::lazy_object::{LazyObject, LazyState};
pub use patterns::observable::{Observable, ObservableImpl, Observer};
pub use settings::{ScopedEvaluationDate, Settings};

//! First- and second-derivative operators on a uniform grid.
//!
//! Each operator is a [`TridiagonalOperator`] with a fixed stencil.  The
//! first-derivative operators use the one-sided difference `(−1/h, 1/h)` on
//! both boundary rows, which is exact for linear functions; the
//! second-derivative operator has zero boundary rows.

use super::tridiagonal_operator::TridiagonalOperator;
use std::ops::Deref;
use vk_core::{ensure, Real, Result, Size};

macro_rules! derivative_operator {
    ($(#[$doc:meta])* $name:ident, |$h:ident| first: $first:expr, mid: $mid:expr, last: $last:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(TridiagonalOperator);

        impl $name {
            /// Build the operator for `grid_points` nodes spaced `h` apart.
            ///
            /// # Errors
            /// [`Error::Precondition`](vk_core::Error::Precondition) if
            /// `grid_points < 3` or `h` is not a positive finite number.
            pub fn new(grid_points: Size, h: Real) -> Result<Self> {
                ensure!(h > 0.0 && h.is_finite(), "grid spacing ({h}) must be positive");
                let $h = h;
                let mut op = TridiagonalOperator::new(grid_points)?;
                let (b, c) = $first;
                op.set_first_row(b, c);
                let (l, d, u) = $mid;
                op.set_mid_rows(l, d, u);
                let (a, b) = $last;
                op.set_last_row(a, b);
                Ok(Self(op))
            }

            /// Unwrap into the underlying operator.
            pub fn into_operator(self) -> TridiagonalOperator {
                self.0
            }
        }

        impl Deref for $name {
            type Target = TridiagonalOperator;
            fn deref(&self) -> &TridiagonalOperator {
                &self.0
            }
        }

        impl From<$name> for TridiagonalOperator {
            fn from(op: $name) -> Self {
                op.0
            }
        }
    };
}

derivative_operator!(
    /// Backward first difference `(u_i − u_{i−1}) / h`.
    DMinus,
    |h| first: (-1.0 / h, 1.0 / h),
        mid: (-1.0 / h, 1.0 / h, 0.0),
        last: (-1.0 / h, 1.0 / h)
);

derivative_operator!(
    /// Forward first difference `(u_{i+1} − u_i) / h`.
    DPlus,
    |h| first: (-1.0 / h, 1.0 / h),
        mid: (0.0, -1.0 / h, 1.0 / h),
        last: (-1.0 / h, 1.0 / h)
);

derivative_operator!(
    /// Central first difference `(u_{i+1} − u_{i−1}) / 2h`.
    DZero,
    |h| first: (-1.0 / h, 1.0 / h),
        mid: (-0.5 / h, 0.0, 0.5 / h),
        last: (-1.0 / h, 1.0 / h)
);

derivative_operator!(
    /// Second difference `(u_{i+1} − 2u_i + u_{i−1}) / h²`.
    DPlusDMinus,
    |h| first: (0.0, 0.0),
        mid: (1.0 / (h * h), -2.0 / (h * h), 1.0 / (h * h)),
        last: (0.0, 0.0)
);

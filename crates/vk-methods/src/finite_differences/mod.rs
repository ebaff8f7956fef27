//! Finite-difference operators.
//!
//! * [`TridiagonalOperator`]: tridiagonal matrix with O(n) application and
//!   Thomas-algorithm solver
//! * [`DMinus`], [`DPlus`], [`DZero`], [`DPlusDMinus`]: derivative stencils
//!   on a uniform grid

/// Derivative operators on a uniform grid.
pub mod derivative_operators;

/// Tridiagonal matrix operator.
pub mod tridiagonal_operator;

pub use derivative_operators::{DMinus, DPlus, DPlusDMinus, DZero};
pub use tridiagonal_operator::TridiagonalOperator;

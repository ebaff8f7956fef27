//! # vk-methods
//!
//! Numerical methods for lattice and PDE pricing: tridiagonal
//! finite-difference operators.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Finite-difference operators.
pub mod finite_differences;

pub use finite_differences::{DMinus, DPlus, DPlusDMinus, DZero, TridiagonalOperator};

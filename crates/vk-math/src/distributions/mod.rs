//! Probability distributions.

/// Standard normal distribution.
pub mod normal;

pub use normal::normal_cdf;

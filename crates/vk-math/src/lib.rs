//! # vk-math
//!
//! Numerical building blocks: the standard normal distribution and the Black
//! formula used by closed-form bond-option pricers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Black formula for options on a forward.
pub mod black_formula;

/// Probability distributions.
pub mod distributions;

pub use black_formula::black_formula;
pub use distributions::normal_cdf;

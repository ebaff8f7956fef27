//! Standard normal distribution.
//!
//! The cumulative distribution delegates to the complementary error function
//! from `statrs`, which keeps full double precision in both tails.

use statrs::function::erf::erfc;
use std::f64::consts::FRAC_1_SQRT_2;
use vk_core::Real;

/// The standard normal cumulative distribution `Φ(x)`.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

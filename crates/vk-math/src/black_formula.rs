//! Black (1976) formula for options on a forward.

use crate::distributions::normal_cdf;
use vk_core::{ensure, OptionType, Real, Result};

/// Undiscounted Black price of an option on `forward` with total standard
/// deviation `std_dev` (σ·√T).
///
/// With `d1 = ln(F/K)/s + s/2` and `d2 = d1 − s`:
///
/// ```text
/// call = F·N(d1) − K·N(d2)
/// put  = K·N(−d2) − F·N(−d1)
/// ```
///
/// A zero standard deviation returns the intrinsic value and a zero strike
/// returns the forward (call) or zero (put).
///
/// # Errors
/// [`Error::Precondition`](vk_core::Error::Precondition) for a negative
/// strike or standard deviation, or a non-positive forward.
pub fn black_formula(
    option_type: OptionType,
    strike: Real,
    forward: Real,
    std_dev: Real,
) -> Result<Real> {
    ensure!(std_dev >= 0.0, "std_dev ({std_dev}) must be non-negative");
    ensure!(strike >= 0.0, "strike ({strike}) must be non-negative");
    ensure!(forward > 0.0, "forward ({forward}) must be positive");

    let sign = option_type.sign();
    if std_dev == 0.0 {
        return Ok((sign * (forward - strike)).max(0.0));
    }
    if strike == 0.0 {
        return Ok(match option_type {
            OptionType::Call => forward,
            OptionType::Put => 0.0,
        });
    }

    let d1 = (forward / strike).ln() / std_dev + 0.5 * std_dev;
    let d2 = d1 - std_dev;
    let value = sign * (forward * normal_cdf(sign * d1) - strike * normal_cdf(sign * d2));
    // Rounding can leave a tiny negative value deep out of the money.
    Ok(value.max(0.0))
}

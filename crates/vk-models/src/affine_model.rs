//! One-factor affine short-rate models.
//!
//! In an affine model the zero-coupon bond price is
//!
//! ```text
//! P(t, T) = A(t, T) · exp(−B(t, T) · r(t))
//! ```
//!
//! so bonds and options on bonds have closed forms.  The options are priced
//! with the Black formula on the forward bond price, using the normal
//! volatility of `ln P(T, S)` implied by the model.

use vk_core::{DiscountFactor, OptionType, Real, Result, Time};

/// Below this mean reversion `B(t, T)` is taken as `T − t`.
pub(crate) const MIN_MEAN_REVERSION: Real = 1.0e-8;

/// A short-rate model with closed-form bond and bond-option prices.
pub trait AffineModel: std::fmt::Debug + Send + Sync {
    /// Model discount factor `P(0, t)`.
    fn discount(&self, t: Time) -> Result<DiscountFactor>;

    /// Price at `t` of the zero-coupon bond maturing at `maturity`, given
    /// short rate `rate` at `t`.
    fn discount_bond(&self, t: Time, maturity: Time, rate: Real) -> Result<DiscountFactor>;

    /// Value today of a European option expiring at `maturity` on the
    /// zero-coupon bond maturing at `bond_maturity`, struck at `strike`
    /// (a price per unit of bond notional).
    fn discount_bond_option(
        &self,
        option_type: OptionType,
        strike: Real,
        maturity: Time,
        bond_maturity: Time,
    ) -> Result<Real>;
}

/// `B(t, T) = (1 − e^{−a(T−t)}) / a`.
pub(crate) fn bond_duration(a: Real, t: Time, maturity: Time) -> Real {
    let tau = maturity - t;
    if a < MIN_MEAN_REVERSION {
        tau
    } else {
        (1.0 - (-a * tau).exp()) / a
    }
}

/// Standard deviation of `ln P(T, S)` seen from today, for Gaussian
/// short-rate dynamics with mean reversion `a` and volatility `sigma`.
pub(crate) fn bond_option_std_dev(a: Real, sigma: Real, maturity: Time, bond_maturity: Time) -> Real {
    if maturity.abs() < Real::EPSILON {
        0.0
    } else if a < MIN_MEAN_REVERSION {
        sigma * bond_duration(a, maturity, bond_maturity) * maturity.sqrt()
    } else {
        sigma
            * bond_duration(a, maturity, bond_maturity)
            * (0.5 * (1.0 - (-2.0 * a * maturity).exp()) / a).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn duration_limits() {
        assert_abs_diff_eq!(
            bond_duration(0.1, 0.0, 10.0),
            (1.0 - (-1.0_f64).exp()) / 0.1,
            epsilon = 1e-12
        );
        assert_eq!(bond_duration(0.0, 1.0, 3.5), 2.5);
        assert_abs_diff_eq!(bond_duration(1e-6, 1.0, 3.5), 2.5, epsilon = 1e-5);
    }

    #[test]
    fn std_dev_vanishes_at_expiry() {
        assert_eq!(bond_option_std_dev(0.1, 0.01, 0.0, 1.0), 0.0);
        let small_a = bond_option_std_dev(0.0, 0.01, 1.0, 2.0);
        assert_abs_diff_eq!(small_a, 0.01, epsilon = 1e-15);
        assert!(bond_option_std_dev(0.1, 0.01, 1.0, 2.0) < small_a);
    }
}

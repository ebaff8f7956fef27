//! Vasicek short-rate model.
//!
//! ```text
//! dr = a(b − r) dt + σ dW
//! ```
//!
//! Discount bond price: `P(t,T) = A(t,T) exp(−B(t,T) r(t))` where
//!
//! * `B(t,T) = (1 − e^{−a(T−t)}) / a`
//! * `ln A(t,T) = (B − (T−t))(b − σ²/(2a²)) − σ²B²/(4a)`

use crate::affine_model::{bond_duration, bond_option_std_dev, AffineModel, MIN_MEAN_REVERSION};
use vk_core::{ensure, DiscountFactor, OptionType, Real, Result, Time};
use vk_math::black_formula;

/// Vasicek short-rate model with constant parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vasicek {
    a: Real,
    b: Real,
    sigma: Real,
    r0: Real,
}

impl Vasicek {
    /// Create a model with mean-reversion speed `a`, long-run level `b`,
    /// volatility `sigma` and initial short rate `r0`.
    ///
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) for a negative
    /// or non-finite `a` or `sigma`.
    pub fn new(a: Real, b: Real, sigma: Real, r0: Real) -> Result<Self> {
        ensure!(a.is_finite() && a >= 0.0, "mean reversion ({a}) must be non-negative");
        ensure!(
            sigma.is_finite() && sigma >= 0.0,
            "volatility ({sigma}) must be non-negative"
        );
        Ok(Self { a, b, sigma, r0 })
    }

    /// Mean-reversion speed.
    pub fn a(&self) -> Real {
        self.a
    }

    /// Long-run mean level.
    pub fn b(&self) -> Real {
        self.b
    }

    /// Volatility.
    pub fn sigma(&self) -> Real {
        self.sigma
    }

    /// Initial short rate.
    pub fn r0(&self) -> Real {
        self.r0
    }

    fn log_a(&self, t: Time, maturity: Time) -> Real {
        let tau = maturity - t;
        let sigma2 = self.sigma * self.sigma;
        if self.a < MIN_MEAN_REVERSION {
            // a → 0 limit of the expression below
            sigma2 * tau * tau * tau / 6.0
        } else {
            let bt = bond_duration(self.a, t, maturity);
            (bt - tau) * (self.b - 0.5 * sigma2 / (self.a * self.a))
                - 0.25 * sigma2 * bt * bt / self.a
        }
    }
}

impl AffineModel for Vasicek {
    fn discount(&self, t: Time) -> Result<DiscountFactor> {
        self.discount_bond(0.0, t, self.r0)
    }

    fn discount_bond(&self, t: Time, maturity: Time, rate: Real) -> Result<DiscountFactor> {
        ensure!(maturity >= t, "bond maturity ({maturity}) before t ({t})");
        Ok((self.log_a(t, maturity) - bond_duration(self.a, t, maturity) * rate).exp())
    }

    fn discount_bond_option(
        &self,
        option_type: OptionType,
        strike: Real,
        maturity: Time,
        bond_maturity: Time,
    ) -> Result<Real> {
        ensure!(
            bond_maturity >= maturity,
            "bond maturity ({bond_maturity}) before option maturity ({maturity})"
        );
        let v = bond_option_std_dev(self.a, self.sigma, maturity, bond_maturity);
        let f = self.discount_bond(0.0, bond_maturity, self.r0)?;
        let k = self.discount_bond(0.0, maturity, self.r0)? * strike;
        black_formula(option_type, k, f, v)
    }
}

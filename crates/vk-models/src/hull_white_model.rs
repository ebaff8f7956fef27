//! Hull-White (extended Vasicek) model.
//!
//! ```text
//! dr = (θ(t) − a·r) dt + σ dW
//! ```
//!
//! `θ(t)` is chosen so that the model reproduces the initial yield curve
//! exactly.  Bond prices are
//!
//! ```text
//! P(t,T) = P(0,T)/P(0,t) · exp(B(t,T)·f(0,t) − σ²B(t,T)²(1 − e^{−2at})/(4a) − B(t,T)·r)
//! ```

use crate::affine_model::{bond_duration, bond_option_std_dev, AffineModel};
use std::sync::Arc;
use vk_core::{ensure, DiscountFactor, Handle, OptionType, Real, Result, Time};
use vk_math::black_formula;
use vk_termstructures::YieldTermStructure;

/// Hull-White one-factor model fitted to a yield curve.
///
/// The curve is read through a [`Handle`] on every query, so relinking the
/// handle moves the model along with it.
#[derive(Debug, Clone)]
pub struct HullWhite {
    term_structure: Handle<dyn YieldTermStructure>,
    a: Real,
    sigma: Real,
}

impl HullWhite {
    /// # Errors
    /// [`Error::Precondition`](vk_core::Error::Precondition) for a negative
    /// or non-finite `a` or `sigma`.
    pub fn new(term_structure: Handle<dyn YieldTermStructure>, a: Real, sigma: Real) -> Result<Self> {
        ensure!(a.is_finite() && a >= 0.0, "mean reversion ({a}) must be non-negative");
        ensure!(
            sigma.is_finite() && sigma >= 0.0,
            "volatility ({sigma}) must be non-negative"
        );
        Ok(Self {
            term_structure,
            a,
            sigma,
        })
    }

    /// Mean-reversion speed.
    pub fn a(&self) -> Real {
        self.a
    }

    /// Volatility.
    pub fn sigma(&self) -> Real {
        self.sigma
    }

    /// The handle to the fitted curve.
    pub fn term_structure(&self) -> &Handle<dyn YieldTermStructure> {
        &self.term_structure
    }

    fn curve(&self) -> Result<Arc<dyn YieldTermStructure>> {
        self.term_structure.get()
    }
}

impl AffineModel for HullWhite {
    fn discount(&self, t: Time) -> Result<DiscountFactor> {
        self.curve()?.discount(t, false)
    }

    fn discount_bond(&self, t: Time, maturity: Time, rate: Real) -> Result<DiscountFactor> {
        ensure!(maturity >= t, "bond maturity ({maturity}) before t ({t})");
        let curve = self.curve()?;
        let ratio = curve.discount(maturity, false)? / curve.discount(t, false)?;
        let forward = curve.forward(t, false)?;
        let bt = bond_duration(self.a, t, maturity);
        let temp = self.sigma * bt;
        let log_a = bt * forward - 0.25 * temp * temp * bond_duration(self.a, 0.0, 2.0 * t);
        Ok(ratio * (log_a - bt * rate).exp())
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
        let curve = self.curve()?;
        let v = bond_option_std_dev(self.a, self.sigma, maturity, bond_maturity);
        let f = curve.discount(bond_maturity, false)?;
        let k = curve.discount(maturity, false)? * strike;
        black_formula(option_type, k, f, v)
    }
}

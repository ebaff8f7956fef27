//! `YieldTermStructure`: interest-rate term structures.
//!
//! Any yield curve provides three mutually consistent quantities:
//!
//! * **discount factor** `P(0,t) = exp(−∫₀ᵗ f(s) ds)`
//! * **zero yield** `z(t) = −ln P(0,t) / t` (continuously compounded)
//! * **instantaneous forward** `f(t) = −∂ ln P(0,t) / ∂t`
//!
//! Implementors override the `*_impl` hooks; the public queries add the
//! range check and the positivity check on discount factors.

use crate::term_structure::TermStructure;
use std::sync::Arc;
use vk_core::{ensure, ensure_post, DiscountFactor, ObservableImpl, Rate, Real, Result, Time};
use vk_time::{Date, DayCounter};

/// Time step used when a forward has to be obtained numerically.
const DT: Real = 1.0e-4;

/// A yield (interest-rate) term structure.
///
/// Implementors must override at least one of
/// [`discount_impl`](Self::discount_impl) and
/// [`zero_yield_impl`](Self::zero_yield_impl); the other, and
/// [`forward_impl`](Self::forward_impl), default from it.
pub trait YieldTermStructure: TermStructure {
    /// Discount factor at `t`, without range checks.
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        if t == 0.0 {
            return Ok(1.0);
        }
        Ok((-self.zero_yield_impl(t)? * t).exp())
    }

    /// Continuously-compounded zero yield at `t`, without range checks.
    fn zero_yield_impl(&self, t: Time) -> Result<Rate> {
        if t == 0.0 {
            return self.forward_impl(0.0);
        }
        Ok(-self.discount_impl(t)?.ln() / t)
    }

    /// Instantaneous forward rate at `t`, without range checks.
    ///
    /// Default: central difference of `ln P`.
    fn forward_impl(&self, t: Time) -> Result<Rate> {
        let t1 = (t - DT / 2.0).max(0.0);
        let t2 = t1 + DT;
        let p1 = self.discount_impl(t1)?;
        let p2 = self.discount_impl(t2)?;
        Ok((p1.ln() - p2.ln()) / (t2 - t1))
    }

    /// Discount factor at time `t`.
    ///
    /// # Errors
    /// * [`Error::Domain`](vk_core::Error::Domain) if `t` is outside the curve
    ///   domain.
    /// * [`Error::Postcondition`](vk_core::Error::Postcondition) if the
    ///   computed discount factor is not positive.
    fn discount(&self, t: Time, extrapolate: bool) -> Result<DiscountFactor> {
        self.check_range(t, extrapolate)?;
        let df = self.discount_impl(t)?;
        ensure_post!(df > 0.0, "non-positive discount factor ({df}) at time {t}");
        Ok(df)
    }

    /// Continuously-compounded zero yield at time `t`.
    fn zero_yield(&self, t: Time, extrapolate: bool) -> Result<Rate> {
        self.check_range(t, extrapolate)?;
        self.zero_yield_impl(t)
    }

    /// Instantaneous forward rate at time `t`.
    fn forward(&self, t: Time, extrapolate: bool) -> Result<Rate> {
        self.check_range(t, extrapolate)?;
        self.forward_impl(t)
    }

    /// Discount factor at `date`.
    fn discount_date(&self, date: Date, extrapolate: bool) -> Result<DiscountFactor> {
        self.discount(self.time_from_reference(date), extrapolate)
    }

    /// Zero yield at `date`.
    fn zero_yield_date(&self, date: Date, extrapolate: bool) -> Result<Rate> {
        self.zero_yield(self.time_from_reference(date), extrapolate)
    }

    /// Instantaneous forward at `date`.
    fn forward_date(&self, date: Date, extrapolate: bool) -> Result<Rate> {
        self.forward(self.time_from_reference(date), extrapolate)
    }

    /// Continuously-compounded forward rate between `t1` and `t2`.
    ///
    /// Collapses to the instantaneous forward when the two times coincide.
    fn forward_between(&self, t1: Time, t2: Time, extrapolate: bool) -> Result<Rate> {
        ensure!(t2 >= t1, "forward end time ({t2}) before start time ({t1})");
        if t2 - t1 < DT * 1.0e-4 {
            return self.forward(t1, extrapolate);
        }
        let p1 = self.discount(t1, extrapolate)?;
        let p2 = self.discount(t2, extrapolate)?;
        Ok((p1 / p2).ln() / (t2 - t1))
    }
}

/// Common data shared by the yield-curve implementations.
#[derive(Debug)]
pub struct YieldTermStructureData {
    /// Reference date.
    pub reference_date: Date,
    /// Day counter for time calculations.
    pub day_counter: Arc<dyn DayCounter>,
    /// Dependents of the curve.
    pub observers: ObservableImpl,
}

impl YieldTermStructureData {
    /// Create a new data bundle.
    pub fn new(reference_date: Date, day_counter: impl DayCounter + 'static) -> Self {
        Self {
            reference_date,
            day_counter: Arc::new(day_counter),
            observers: ObservableImpl::new(),
        }
    }
}

//! `ZeroSpreadedTermStructure`: a yield curve shifted by a zero-yield
//! spread.
//!
//! Both the base curve and the spread are held through handles; the
//! spreaded curve observes them and forwards their notifications, so
//! relinking the base curve or moving the spread reaches everything built on
//! top of it.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;
use std::sync::{Arc, Weak};
use vk_core::{
    DiscountFactor, Error, Handle, Observable, ObservableImpl, Observer, Rate, Result, Spread, Time,
};
use vk_quotes::Quote;
use vk_time::{Date, DayCounter};

/// A yield curve equal to a base curve plus a continuously-compounded
/// spread: `z(t) = z_base(t) + s`, `f(t) = f_base(t) + s`,
/// `P(t) = P_base(t)·exp(−s·t)`.
#[derive(Debug)]
pub struct ZeroSpreadedTermStructure {
    base: Handle<dyn YieldTermStructure>,
    spread: Handle<dyn Quote>,
    reference_date: Date,
    day_counter: Arc<dyn DayCounter>,
    observers: ObservableImpl,
}

impl ZeroSpreadedTermStructure {
    /// Spread `base` by the value of the quote behind `spread`.
    ///
    /// Reference date and day counter follow the base curve; the values seen
    /// at construction are used while the base handle is empty.
    ///
    /// # Errors
    /// [`Error::Precondition`] if `base` is empty at construction.
    pub fn new(
        base: Handle<dyn YieldTermStructure>,
        spread: Handle<dyn Quote>,
    ) -> Result<Arc<Self>> {
        let curve = base
            .current()
            .ok_or_else(|| Error::Precondition("null base term structure".into()))?;
        let spreaded = Arc::new(Self {
            reference_date: curve.reference_date(),
            day_counter: curve.day_counter(),
            base,
            spread,
            observers: ObservableImpl::new(),
        });
        let me = Arc::downgrade(&spreaded) as Weak<dyn Observer>;
        spreaded.base.register_observer(me.clone());
        spreaded.spread.register_observer(me);
        Ok(spreaded)
    }

    fn base_curve(&self) -> Result<Arc<dyn YieldTermStructure>> {
        self.base
            .current()
            .ok_or_else(|| Error::Precondition("null base term structure".into()))
    }

    fn spread_value(&self) -> Result<Spread> {
        self.spread
            .current()
            .and_then(|q| q.value())
            .ok_or_else(|| Error::Precondition("null or invalid spread quote".into()))
    }
}

impl Observer for ZeroSpreadedTermStructure {
    fn update(&self) {
        self.observers.notify();
    }
}

impl Observable for ZeroSpreadedTermStructure {
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.observers.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.observers.unregister(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify();
    }
}

impl TermStructure for ZeroSpreadedTermStructure {
    fn reference_date(&self) -> Date {
        self.base
            .current()
            .map_or(self.reference_date, |b| b.reference_date())
    }

    fn day_counter(&self) -> Arc<dyn DayCounter> {
        self.base
            .current()
            .map_or_else(|| Arc::clone(&self.day_counter), |b| b.day_counter())
    }

    fn max_date(&self) -> Date {
        self.base.current().map_or(Date::MAX, |b| b.max_date())
    }

    fn max_time(&self) -> Time {
        self.base.current().map_or(Time::INFINITY, |b| b.max_time())
    }
}

impl YieldTermStructure for ZeroSpreadedTermStructure {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        let df = self.base_curve()?.discount(t, true)?;
        Ok(df * (-self.spread_value()? * t).exp())
    }

    fn zero_yield_impl(&self, t: Time) -> Result<Rate> {
        Ok(self.base_curve()?.zero_yield(t, true)? + self.spread_value()?)
    }

    fn forward_impl(&self, t: Time) -> Result<Rate> {
        Ok(self.base_curve()?.forward(t, true)? + self.spread_value()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat_forward::FlatForward;
    use approx::assert_abs_diff_eq;
    use vk_core::RelinkableHandle;
    use vk_quotes::SimpleQuote;
    use vk_time::Actual365Fixed;

    fn today() -> Date {
        Date::from_ymd(2025, 1, 2).unwrap()
    }

    #[test]
    fn spread_adds_to_base() {
        let base: Arc<dyn YieldTermStructure> = FlatForward::new(today(), 0.03, Actual365Fixed);
        let spread: Arc<dyn Quote> = Arc::new(SimpleQuote::new(0.01));
        let curve = ZeroSpreadedTermStructure::new(Handle::new(base), Handle::new(spread)).unwrap();
        assert_abs_diff_eq!(curve.zero_yield(2.0, false).unwrap(), 0.04, epsilon = 1e-15);
        assert_abs_diff_eq!(curve.forward(2.0, false).unwrap(), 0.04, epsilon = 1e-15);
        assert_abs_diff_eq!(
            curve.discount(2.0, false).unwrap(),
            (-0.08_f64).exp(),
            epsilon = 1e-15
        );
        assert_eq!(curve.reference_date(), today());
    }

    #[test]
    fn follows_relinked_base_and_spread_changes() {
        let first: Arc<dyn YieldTermStructure> = FlatForward::new(today(), 0.03, Actual365Fixed);
        let second: Arc<dyn YieldTermStructure> = FlatForward::new(today(), 0.05, Actual365Fixed);
        let base = RelinkableHandle::new(first);
        let spread = Arc::new(SimpleQuote::new(0.01));
        let curve = ZeroSpreadedTermStructure::new(
            base.handle(),
            Handle::new(Arc::clone(&spread) as Arc<dyn Quote>),
        )
        .unwrap();

        base.link_to(second);
        assert_abs_diff_eq!(curve.zero_yield(1.0, false).unwrap(), 0.06, epsilon = 1e-15);
        spread.set_value(0.02);
        assert_abs_diff_eq!(curve.zero_yield(1.0, false).unwrap(), 0.07, epsilon = 1e-15);
    }

    #[test]
    fn empty_base_is_rejected() {
        let spread: Arc<dyn Quote> = Arc::new(SimpleQuote::new(0.01));
        let err = ZeroSpreadedTermStructure::new(Handle::empty(), Handle::new(spread)).unwrap_err();
        assert!(err.is_precondition());
    }
}

//! `FlatForward`: a yield term structure with a constant forward rate.
//!
//! The rate comes either from a fixed number or from a [`Handle`] to an
//! observable [`Quote`].  In the latter case the curve registers with the
//! handle; a change of the quote value, or a relink of the handle to another
//! quote, marks the cached rate stale and is forwarded to the curve's own
//! observers.  The new rate is read on the next query, never eagerly.

use crate::term_structure::TermStructure;
use crate::yield_term_structure::{YieldTermStructure, YieldTermStructureData};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use vk_core::{
    DiscountFactor, Error, Handle, LazyObject, LazyState, Observable, Observer, Rate, Result, Time,
};
use vk_quotes::{Quote, SimpleQuote};
use vk_time::{Date, DayCounter};

/// A flat (constant), continuously-compounded forward-rate curve.
///
/// `discount(t) = exp(−f·t)` and `zero_yield(t) = forward(t) = f` for every
/// `t ≥ 0`.  The domain is unbounded: `max_date` is [`Date::MAX`] and
/// `max_time` is `+∞`.
#[derive(Debug)]
pub struct FlatForward {
    data: YieldTermStructureData,
    forward: Handle<dyn Quote>,
    lazy: LazyState,
    rate: Mutex<Rate>,
}

impl FlatForward {
    /// Flat curve at a fixed continuously-compounded `rate`.
    pub fn new(
        reference_date: Date,
        rate: Rate,
        day_counter: impl DayCounter + 'static,
    ) -> Arc<Self> {
        let quote: Arc<dyn Quote> = Arc::new(SimpleQuote::new(rate));
        Self::with_quote(reference_date, Handle::new(quote), day_counter)
    }

    /// Flat curve following the value of the quote behind `forward`.
    ///
    /// The curve registers with the handle, so relinking it or changing the
    /// quote value is reflected by the next query.
    pub fn with_quote(
        reference_date: Date,
        forward: Handle<dyn Quote>,
        day_counter: impl DayCounter + 'static,
    ) -> Arc<Self> {
        let curve = Arc::new(Self {
            data: YieldTermStructureData::new(reference_date, day_counter),
            forward,
            lazy: LazyState::new(),
            rate: Mutex::new(0.0),
        });
        curve
            .forward
            .register_observer(Arc::downgrade(&curve) as Weak<dyn Observer>);
        curve
    }

    /// The handle the curve reads its rate from.
    pub fn forward_quote(&self) -> &Handle<dyn Quote> {
        &self.forward
    }

    /// The current flat rate, re-reading the quote if it changed.
    ///
    /// # Errors
    /// [`Error::Precondition`] if the handle is empty or the quote holds no
    /// value.
    pub fn rate(&self) -> Result<Rate> {
        self.calculate()?;
        Ok(*self.cached_rate())
    }

    fn cached_rate(&self) -> MutexGuard<'_, Rate> {
        self.rate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LazyObject for FlatForward {
    fn perform_calculations(&self) -> Result<()> {
        let quote = self
            .forward
            .current()
            .ok_or_else(|| Error::Precondition("null forward-rate quote".into()))?;
        let rate = quote
            .value()
            .ok_or_else(|| Error::Precondition("invalid forward-rate quote".into()))?;
        tracing::trace!(rate, "flat forward rate recalculated");
        *self.cached_rate() = rate;
        Ok(())
    }

    fn lazy_state(&self) -> &LazyState {
        &self.lazy
    }
}

impl Observer for FlatForward {
    fn update(&self) {
        self.lazy.invalidate();
        self.data.observers.notify();
    }
}

impl Observable for FlatForward {
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.data.observers.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.data.observers.unregister(observer);
    }

    fn notify_observers(&self) {
        self.data.observers.notify();
    }
}

impl TermStructure for FlatForward {
    fn reference_date(&self) -> Date {
        self.data.reference_date
    }

    fn day_counter(&self) -> Arc<dyn DayCounter> {
        Arc::clone(&self.data.day_counter)
    }

    fn max_date(&self) -> Date {
        Date::MAX
    }

    fn max_time(&self) -> Time {
        Time::INFINITY
    }
}

impl YieldTermStructure for FlatForward {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        Ok((-self.rate()? * t).exp())
    }

    fn zero_yield_impl(&self, _t: Time) -> Result<Rate> {
        self.rate()
    }

    fn forward_impl(&self, _t: Time) -> Result<Rate> {
        self.rate()
    }
}

//! `Quote` trait and `SimpleQuote` implementation.
//!
//! Quotes are observable: anything built on a quote (a curve, a spread)
//! registers with it and is notified whenever the value changes.

use std::sync::{Mutex, MutexGuard, PoisonError, Weak};
use vk_core::{Observable, ObservableImpl, Observer, Real};

/// A market-observable value.
pub trait Quote: Observable + std::fmt::Debug + Send + Sync {
    /// The current value, or `None` if the quote is not currently set.
    fn value(&self) -> Option<Real>;

    /// Return `true` if the quote currently holds a value.
    fn is_valid(&self) -> bool {
        self.value().is_some()
    }
}

/// A mutable market quote.
///
/// Mutation goes through `&self` so that a quote can be shared behind an
/// `Arc` by every structure observing it.  Setting a value that differs from
/// the current one notifies all registered observers before returning.
#[derive(Debug, Default)]
pub struct SimpleQuote {
    value: Mutex<Option<Real>>,
    observers: ObservableImpl,
}

impl SimpleQuote {
    /// Create a quote with the given value.
    pub fn new(value: Real) -> Self {
        Self {
            value: Mutex::new(Some(value)),
            observers: ObservableImpl::new(),
        }
    }

    /// Create an empty (invalid) quote.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set a new value, returning the difference from the previous one.
    ///
    /// Observers are notified only when the value actually changes.
    pub fn set_value(&self, value: Real) -> Real {
        let previous = self.lock().replace(value);
        let diff = previous.map_or(value, |p| value - p);
        if previous != Some(value) {
            tracing::trace!(value, "quote changed");
            self.observers.notify();
        }
        diff
    }

    /// Clear the value, making the quote invalid.
    pub fn reset(&self) {
        if self.lock().take().is_some() {
            self.observers.notify();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Real>> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Observable for SimpleQuote {
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

impl Quote for SimpleQuote {
    fn value(&self) -> Option<Real> {
        *self.lock()
    }
}

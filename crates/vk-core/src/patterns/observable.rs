//! Observer / Observable pattern.
//!
//! The notification mechanism behind every market-data dependency:
//! * An **Observable** notifies registered **Observer**s whenever it changes
//!   state.
//! * Observers react in `update()`, typically by marking cached results stale
//!   and forwarding the notification to their own observers.
//!
//! Observables hold only `Weak` references, so an observer's lifetime is never
//! extended by the objects it watches.  Registration and notification work
//! through `&self`; the observer list lives behind a `Mutex` so that shared
//! (`Arc`) observables stay `Send + Sync`.

use std::sync::{Arc, Mutex, Weak};

/// An object that can notify interested parties when it changes.
pub trait Observable {
    /// Register an observer to receive future change notifications.
    fn register_observer(&self, observer: Weak<dyn Observer>);

    /// Remove a previously registered observer.
    fn unregister_observer(&self, observer: &Weak<dyn Observer>);

    /// Notify all currently registered observers that this object has changed.
    fn notify_observers(&self);
}

/// An object that reacts to changes in [`Observable`]s it has subscribed to.
pub trait Observer: Send + Sync {
    /// Called by every observable this observer is registered with when that
    /// observable changes state.
    fn update(&self);
}

/// Observer-list bookkeeping, embedded in any type that wants to be
/// [`Observable`].
#[derive(Default)]
pub struct ObservableImpl {
    observers: Mutex<Vec<Weak<dyn Observer>>>,
}

impl std::fmt::Debug for ObservableImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableImpl")
            .field("observers", &self.len())
            .finish()
    }
}

impl ObservableImpl {
    /// Create a new, empty observable implementation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.  Registering the same observer twice is a no-op.
    pub fn register(&self, observer: Weak<dyn Observer>) {
        let mut observers = self.lock();
        if !observers.iter().any(|o| Weak::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Remove an observer (by pointer equality of the `Weak`).
    pub fn unregister(&self, observer: &Weak<dyn Observer>) {
        self.lock().retain(|o| !Weak::ptr_eq(o, observer));
    }

    /// Notify all live observers, pruning dead `Weak` references.
    ///
    /// `update()` is called after the list lock is released, so observers may
    /// register or unregister while being notified.
    pub fn notify(&self) {
        let live: Vec<Arc<dyn Observer>> = {
            let mut observers = self.lock();
            observers.retain(|w| w.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for obs in live {
            obs.update();
        }
    }

    /// Number of registered (possibly dead) observers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` if nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Weak<dyn Observer>>> {
        // A poisoned list is still a valid list of weak pointers.
        self.observers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Observable for ObservableImpl {
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.unregister(observer);
    }

    fn notify_observers(&self) {
        self.notify();
    }
}

//! LazyObject pattern.
//!
//! A `LazyObject` caches an expensive computation and recalculates only when
//! its inputs have changed.  Notification marks the cache stale
//! ([`LazyObject::update`]); the recomputation happens on the next read
//! ([`LazyObject::calculate`]), never eagerly.
//!
//! The bookkeeping lives in [`LazyState`], which uses atomics so that a
//! calculation can be triggered through `&self` while the owning object stays
//! `Send + Sync`.  Recalculations are serialized: a reader arriving while
//! another thread recomputes waits for it instead of reading a half-built
//! cache.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Trait for objects that lazily compute and cache their results.
pub trait LazyObject {
    /// Perform the actual (expensive) calculation and store its results.
    ///
    /// Called by [`calculate`][Self::calculate] when the cache is stale.
    fn perform_calculations(&self) -> crate::errors::Result<()>;

    /// The cache bookkeeping embedded in the implementor.
    fn lazy_state(&self) -> &LazyState;

    /// Ensure results are up-to-date.
    ///
    /// If the cache is stale and the object is not frozen, calls
    /// [`perform_calculations`][Self::perform_calculations].  A failed
    /// calculation leaves the cache stale, so the next call retries.  The
    /// cache only becomes valid once the calculation has returned, and an
    /// invalidation arriving meanwhile keeps it stale.
    ///
    /// `perform_calculations` must not call `calculate` on the same object.
    fn calculate(&self) -> crate::errors::Result<()> {
        let state = self.lazy_state();
        if state.is_calculated() || state.is_frozen() {
            return Ok(());
        }
        let _running = state
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if state.is_calculated() {
            return Ok(());
        }
        let epoch = state.epoch.load(Ordering::Acquire);
        self.perform_calculations()?;
        state.valid_for.store(epoch, Ordering::Release);
        Ok(())
    }

    /// Mark the cached result as stale without triggering a recalculation.
    fn update(&self) {
        self.lazy_state().invalidate();
    }

    /// Prevent automatic recalculation until [`unfreeze`][Self::unfreeze] is
    /// called.
    fn freeze(&self) {
        self.lazy_state().freeze_count.fetch_add(1, Ordering::AcqRel);
    }

    /// Undo one call to [`freeze`][Self::freeze].
    fn unfreeze(&self) {
        let count = &self.lazy_state().freeze_count;
        let _ = count.fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| c.checked_sub(1));
    }

    /// Return `true` if the cache is currently valid.
    fn is_calculated(&self) -> bool {
        self.lazy_state().is_calculated()
    }
}

/// Bookkeeping fields required by [`LazyObject`].
///
/// Embed this in your struct and return it from
/// [`LazyObject::lazy_state`].
///
/// # Example
/// ```
/// use std::sync::Mutex;
/// use vk_core::patterns::lazy_object::{LazyObject, LazyState};
///
/// struct MyLazy {
///     state: LazyState,
///     result: Mutex<f64>,
/// }
///
/// impl LazyObject for MyLazy {
///     fn perform_calculations(&self) -> vk_core::errors::Result<()> {
///         *self.result.lock().unwrap() = 42.0;
///         Ok(())
///     }
///     fn lazy_state(&self) -> &LazyState { &self.state }
/// }
///
/// let obj = MyLazy { state: LazyState::new(), result: Mutex::new(0.0) };
/// obj.calculate().unwrap();
/// assert_eq!(*obj.result.lock().unwrap(), 42.0);
/// ```
#[derive(Debug)]
pub struct LazyState {
    // bumped by every invalidation
    epoch: AtomicU64,
    // epoch the cached result was computed in
    valid_for: AtomicU64,
    freeze_count: AtomicU32,
    running: Mutex<()>,
}

impl Default for LazyState {
    fn default() -> Self {
        Self {
            epoch: AtomicU64::new(1),
            valid_for: AtomicU64::new(0),
            freeze_count: AtomicU32::new(0),
            running: Mutex::new(()),
        }
    }
}

impl LazyState {
    /// Create a new `LazyState` where the cache is initially stale.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the cached result is valid.
    pub fn is_calculated(&self) -> bool {
        self.valid_for.load(Ordering::Acquire) == self.epoch.load(Ordering::Acquire)
    }

    /// `true` while recalculation is deferred.
    pub fn is_frozen(&self) -> bool {
        self.freeze_count.load(Ordering::Acquire) > 0
    }

    /// Mark the cache stale.
    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, Result};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct Counter {
        state: LazyState,
        runs: AtomicU32,
        fail: AtomicBool,
    }

    impl LazyObject for Counter {
        fn perform_calculations(&self) -> Result<()> {
            self.runs.fetch_add(1, Ordering::Relaxed);
            if self.fail.load(Ordering::Relaxed) {
                return Err(Error::Runtime("boom".into()));
            }
            Ok(())
        }
        fn lazy_state(&self) -> &LazyState {
            &self.state
        }
    }

    #[test]
    fn calculates_once_until_updated() {
        let c = Counter::default();
        c.calculate().unwrap();
        c.calculate().unwrap();
        assert_eq!(c.runs.load(Ordering::Relaxed), 1);
        c.update();
        assert!(!c.is_calculated());
        c.calculate().unwrap();
        assert_eq!(c.runs.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn frozen_object_defers() {
        let c = Counter::default();
        c.calculate().unwrap();
        c.freeze();
        c.update();
        c.calculate().unwrap();
        assert_eq!(c.runs.load(Ordering::Relaxed), 1);
        c.unfreeze();
        c.calculate().unwrap();
        assert_eq!(c.runs.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn failure_leaves_cache_stale() {
        let c = Counter::default();
        c.fail.store(true, Ordering::Relaxed);
        assert!(c.calculate().is_err());
        assert!(!c.is_calculated());
        c.fail.store(false, Ordering::Relaxed);
        c.calculate().unwrap();
        assert!(c.is_calculated());
        assert_eq!(c.runs.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn unfreeze_saturates_at_zero() {
        let c = Counter::default();
        c.unfreeze();
        assert!(!c.lazy_state().is_frozen());
    }

    // Publishes its result only after a slow computation.
    #[derive(Default)]
    struct Slow {
        state: LazyState,
        input: AtomicU64,
        result: Mutex<u64>,
        runs: AtomicU32,
    }

    impl Slow {
        fn value(&self) -> u64 {
            self.calculate().unwrap();
            *self.result.lock().unwrap()
        }
    }

    impl LazyObject for Slow {
        fn perform_calculations(&self) -> Result<()> {
            self.runs.fetch_add(1, Ordering::Relaxed);
            let input = self.input.load(Ordering::Acquire);
            thread::sleep(Duration::from_millis(200));
            *self.result.lock().unwrap() = input;
            Ok(())
        }
        fn lazy_state(&self) -> &LazyState {
            &self.state
        }
    }

    #[test]
    fn concurrent_reader_waits_for_running_calculation() {
        let slow = Arc::new(Slow::default());
        slow.input.store(5, Ordering::Release);

        let first = {
            let slow = Arc::clone(&slow);
            thread::spawn(move || slow.value())
        };
        thread::sleep(Duration::from_millis(50));
        let second = slow.value();

        assert_eq!(first.join().unwrap(), 5);
        assert_eq!(second, 5);
        assert_eq!(slow.runs.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn invalidation_during_calculation_keeps_cache_stale() {
        let slow = Arc::new(Slow::default());
        slow.input.store(1, Ordering::Release);

        let running = {
            let slow = Arc::clone(&slow);
            thread::spawn(move || slow.value())
        };
        thread::sleep(Duration::from_millis(50));
        slow.input.store(2, Ordering::Release);
        slow.update();

        assert_eq!(running.join().unwrap(), 1);
        assert!(!slow.is_calculated());
        assert_eq!(slow.value(), 2);
        assert_eq!(slow.runs.load(Ordering::Relaxed), 2);
    }
}

//! `Handle<T>`: a shared, observable, relinkable reference.
//!
//! A handle points at an `Arc<T>` through a shared **link**.  The link
//! observes its current target and forwards every notification to the
//! observers registered with the handle, so dependents register once with the
//! handle and never with the target directly.
//!
//! Relinking (through [`RelinkableHandle::link_to`]) moves the link's own
//! registration from the old target to the new one and then notifies every
//! observer of the link.  All clones of a handle share the same link and see
//! the relinked target immediately.
//!
//! ```text
//!  SimpleQuote ──notify──▶ Link ──notify──▶ FlatForward ──notify──▶ engines
//!                     (relinkable)
//! ```

use crate::errors::{Error, Result};
use crate::patterns::observable::{Observable, ObservableImpl, Observer};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// The shared cell behind every handle.
struct Link<T: ?Sized> {
    target: Mutex<Option<Arc<T>>>,
    observers: ObservableImpl,
}

impl<T: ?Sized> Link<T> {
    fn target(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Observer for Link<T>
where
    T: ?Sized + Observable + Send + Sync + 'static,
{
    fn update(&self) {
        self.observers.notify();
    }
}

/// A shared, possibly-empty, observable reference to a value of type `T`.
///
/// The handle is read-only; relinking goes through a [`RelinkableHandle`]
/// sharing the same link.
pub struct Handle<T: ?Sized> {
    link: Arc<Link<T>>,
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            link: Arc::clone(&self.link),
        }
    }
}

impl<T> Handle<T>
where
    T: ?Sized + Observable + Send + Sync + 'static,
{
    /// Create a handle linked to `target`.
    pub fn new(target: Arc<T>) -> Self {
        let handle = Self::empty();
        handle.relink(Some(target));
        handle
    }

    /// Create an empty handle.
    pub fn empty() -> Self {
        Self {
            link: Arc::new(Link {
                target: Mutex::new(None),
                observers: ObservableImpl::new(),
            }),
        }
    }

    /// Return `true` if the handle is currently not linked to anything.
    pub fn is_empty(&self) -> bool {
        self.link.target().is_none()
    }

    /// Snapshot of the current target, or `None` if the handle is empty.
    pub fn current(&self) -> Option<Arc<T>> {
        self.link.target().clone()
    }

    /// Snapshot of the current target.
    ///
    /// # Errors
    /// [`Error::NullValue`] if the handle is empty.
    pub fn get(&self) -> Result<Arc<T>> {
        self.current()
            .ok_or_else(|| Error::NullValue("empty handle cannot be dereferenced".into()))
    }

    /// `true` if both handles share the same link.
    pub fn same_link(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.link, &other.link)
    }

    fn relink(&self, target: Option<Arc<T>>) {
        let as_observer: Weak<dyn Observer> = Arc::downgrade(&self.link) as Weak<dyn Observer>;
        let previous = {
            let mut guard = self.link.target();
            if let (Some(old), Some(new)) = (guard.as_ref(), target.as_ref()) {
                if Arc::ptr_eq(old, new) {
                    return;
                }
            }
            std::mem::replace(&mut *guard, target.clone())
        };
        if let Some(old) = previous {
            old.unregister_observer(&as_observer);
        }
        if let Some(new) = target.as_ref() {
            new.register_observer(as_observer);
        }
        tracing::debug!(
            linked = target.is_some(),
            observers = self.link.observers.len(),
            "handle relinked"
        );
        self.link.observers.notify();
    }
}

impl<T> Default for Handle<T>
where
    T: ?Sized + Observable + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Observable for Handle<T>
where
    T: ?Sized + Observable + Send + Sync + 'static,
{
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.link.observers.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.link.observers.unregister(observer);
    }

    fn notify_observers(&self) {
        self.link.observers.notify();
    }
}

impl<T: ?Sized> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let linked = self.link.target().is_some();
        f.debug_struct("Handle")
            .field("linked", &linked)
            .field("observers", &self.link.observers.len())
            .finish()
    }
}

/// A [`Handle`] whose target can be replaced at runtime.
///
/// Hand out read-only views with [`handle`](Self::handle); they share the
/// link and follow every relink.
pub struct RelinkableHandle<T: ?Sized> {
    handle: Handle<T>,
}

impl<T: ?Sized> Clone for RelinkableHandle<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
        }
    }
}

impl<T> RelinkableHandle<T>
where
    T: ?Sized + Observable + Send + Sync + 'static,
{
    /// Create a relinkable handle linked to `target`.
    pub fn new(target: Arc<T>) -> Self {
        Self {
            handle: Handle::new(target),
        }
    }

    /// Create an empty relinkable handle.
    pub fn empty() -> Self {
        Self {
            handle: Handle::empty(),
        }
    }

    /// Point the link at `target` and notify every observer of the link.
    ///
    /// Relinking to the object already linked is a no-op.
    pub fn link_to(&self, target: Arc<T>) {
        self.handle.relink(Some(target));
    }

    /// Detach the link from its target and notify observers.
    pub fn unlink(&self) {
        self.handle.relink(None);
    }

    /// A read-only handle sharing this link.
    pub fn handle(&self) -> Handle<T> {
        self.handle.clone()
    }
}

impl<T> Default for RelinkableHandle<T>
where
    T: ?Sized + Observable + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> std::ops::Deref for RelinkableHandle<T> {
    type Target = Handle<T>;

    fn deref(&self) -> &Handle<T> {
        &self.handle
    }
}

impl<T: ?Sized> std::fmt::Debug for RelinkableHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RelinkableHandle").field(&self.handle).finish()
    }
}

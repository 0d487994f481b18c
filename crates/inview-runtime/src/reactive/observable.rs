#![forbid(unsafe_code)]

//! Shared observable value with eager unsubscription.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value in `Rc<RefCell<..>>` for single-threaded
//! shared ownership. Cloning an `Observable` produces another handle to the
//! **same** inner state; any handle can read, write, or subscribe.
//!
//! Subscribers are keyed by a monotonically increasing id. Dropping the
//! [`Subscription`] guard removes the callback from the list eagerly, so no
//! dead entries linger between mutations.
//!
//! # Failure Modes
//!
//! - **Re-entrant `set` from a callback**: permitted. Dispatch runs outside
//!   the interior borrow; a nested `set` simply starts a nested notification
//!   pass. Subscribers observing both passes see the values in call order.
//! - **Unsubscribe during dispatch**: a callback dropped by an *earlier*
//!   callback in the same pass is skipped (liveness is re-checked before
//!   each call).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    version: u64,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// A shared, version-tracked value with change notification.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable holding `value`, at version 0, with no
    /// subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value. Equal values (by `PartialEq`) are a no-op;
    /// otherwise the version increments and subscribers are notified in
    /// registration order with the new value.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Register `callback` to run on every value change.
    ///
    /// The returned guard unsubscribes on drop. Callbacks never fire for the
    /// current value, only for subsequent changes.
    #[must_use]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::new(callback)));
            id
        };
        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Number of mutations that changed the value. Useful for dirty checks.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        // Snapshot outside the borrow so callbacks may freely touch the
        // observable; re-check liveness per callback so unsubscription by an
        // earlier callback suppresses a later one.
        let snapshot: Vec<(u64, Callback<T>)> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(id, cb)| (*id, Rc::clone(cb)))
            .collect();
        for (id, cb) in snapshot {
            let still_live = self
                .inner
                .borrow()
                .subscribers
                .iter()
                .any(|(sid, _)| *sid == id);
            if still_live {
                let value = self.inner.borrow().value.clone();
                cb(&value);
            }
        }
    }
}

/// RAII guard for one subscriber registration.
///
/// Dropping the guard removes the callback immediately.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

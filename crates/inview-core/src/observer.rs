#![forbid(unsafe_code)]

//! Facility traits: the construct/observe/disconnect surface.
//!
//! # Design
//!
//! The watcher is implementable against *any* platform visibility facility
//! offering three operations: construct-with-callback-and-options
//! ([`ObserverFactory::create`]), [`IntersectionObserver::observe`], and
//! [`IntersectionObserver::disconnect`]. Everything here is single-threaded
//! (`Rc`-based); dispatch happens synchronously on whatever event path the
//! facility owns.
//!
//! # Invariants
//!
//! 1. `disconnect()` is idempotent: disconnecting an already-disconnected
//!    observer is a no-op.
//! 2. After `disconnect()`, the observer's callback is never invoked again.
//! 3. The [`ObserverHandle`] passed to a callback shares state with the
//!    observer that dispatched it, so a callback can stop its own future
//!    observation mid-dispatch.

use std::cell::Cell;
use std::rc::Rc;

use crate::entry::IntersectionEntry;
use crate::options::ObserveOptions;

/// Callback invoked by a facility with a batch of intersection reports and
/// a handle to the dispatching observer.
pub type EntryCallback<T> = Rc<dyn Fn(&[IntersectionEntry<T>], &ObserverHandle)>;

/// Shared connected-state handle for one observer registration.
///
/// Clones share the same flag. Facilities keep one clone and check it before
/// every dispatch; callbacks receive another and may call
/// [`disconnect`](Self::disconnect) to stop future observation (the
/// "observe once" pattern).
#[derive(Clone)]
pub struct ObserverHandle {
    connected: Rc<Cell<bool>>,
}

impl ObserverHandle {
    /// A fresh handle in the connected state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connected: Rc::new(Cell::new(true)),
        }
    }

    /// Stop future dispatch for the associated observer. Idempotent.
    pub fn disconnect(&self) {
        self.connected.set(false);
    }

    /// Whether the associated observer is still connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }
}

impl Default for ObserverHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObserverHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverHandle")
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// An active low-level observation resource.
///
/// Owned exclusively by one watcher; never shared. The watcher guarantees
/// `disconnect()` is called on every path that retires the registration
/// (rebind, clear, teardown).
pub trait IntersectionObserver<T> {
    /// Start observing `target`. May be called for multiple targets; the
    /// watcher only ever registers one.
    fn observe(&mut self, target: T);

    /// Release the observation resource. Idempotent.
    fn disconnect(&mut self);

    /// Whether this observer can still dispatch.
    fn is_connected(&self) -> bool;
}

/// Constructs observers bound to a callback and an options value.
///
/// The factory performs no validation on the watcher's behalf: an options
/// record the facility cannot honor (e.g. an unparsable `root_margin`) is
/// surfaced through the facility's own error path, and the affected
/// registration simply never fires.
pub trait ObserverFactory<T> {
    /// Construct a new observer. The returned observer is connected but not
    /// yet observing any target.
    fn create(
        &self,
        callback: EntryCallback<T>,
        options: &ObserveOptions<T>,
    ) -> Box<dyn IntersectionObserver<T>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_starts_connected() {
        let handle = ObserverHandle::new();
        assert!(handle.is_connected());
    }

    #[test]
    fn handle_clones_share_state() {
        let handle = ObserverHandle::new();
        let clone = handle.clone();
        clone.disconnect();
        assert!(!handle.is_connected());
        assert!(!clone.is_connected());
    }

    #[test]
    fn disconnect_is_idempotent() {
        let handle = ObserverHandle::new();
        handle.disconnect();
        handle.disconnect();
        assert!(!handle.is_connected());
    }

    #[test]
    fn debug_reports_state() {
        let handle = ObserverHandle::new();
        assert!(format!("{handle:?}").contains("connected: true"));
    }
}

#![forbid(unsafe_code)]

//! The visibility watcher: one watched element, one observer, no leaks.
//!
//! # Design
//!
//! [`VisibilityWatcher`] binds a single target to a visibility-observation
//! facility and invokes a user callback the moment the target crosses into
//! view. The binding slot is an [`Observable`]`<Option<T>>`; setting it
//! (from the watcher or from any [`slot`](VisibilityWatcher::slot) handle)
//! drives re-registration. The watcher performs no polling — all activity is
//! pushed by the facility.
//!
//! # Invariants
//!
//! 1. At most one active low-level observer exists per watcher at any time.
//! 2. Re-registration always disconnects the old observer *before* creating
//!    the new one, so no event can be attributed to a stale registration.
//! 3. The user callback fires only for entries reporting an intersecting
//!    state; non-intersecting reports are dropped silently.
//! 4. Every path that retires a registration (rebind, clear, options change,
//!    drop) releases the observer resource.
//!
//! # Rebind policy
//!
//! Binding the currently bound target again with unchanged options is a
//! **no-op**: no disconnect, no reconnect. This is the idempotence branch of
//! the contract — equality is by value, so re-deriving an equal target or
//! options record never thrashes the facility. Any *value change* of target
//! or options performs exactly one disconnect-then-observe cycle.
//!
//! # Failure Modes
//!
//! The watcher raises no errors and fails closed: with no bound target no
//! observer exists and the callback never fires. Facility-level setup
//! failures (e.g. an unparsable root margin) stay on the facility's error
//! path; the affected registration is silent and the watcher neither retries
//! nor reports it. A rebind issued from inside the callback (facilities may
//! dispatch the initial report synchronously during registration) is deferred
//! until the in-progress cycle completes, then applied; the latest request
//! wins.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use inview_core::{
    EntryCallback, IntersectionEntry, IntersectionObserver, ObserveOptions, ObserverFactory,
    ObserverHandle,
};

use crate::reactive::{Observable, Subscription};

type IntersectCallback<T> = Rc<dyn Fn(&IntersectionEntry<T>, &ObserverHandle)>;

struct WatchState<T> {
    factory: Rc<dyn ObserverFactory<T>>,
    on_intersect: IntersectCallback<T>,
    options: ObserveOptions<T>,
    observer: Option<Box<dyn IntersectionObserver<T>>>,
    /// A rebind cycle is in progress; nested requests go to `pending`.
    rebinding: bool,
    pending: Option<Option<T>>,
}

/// Binds one watched element to a visibility-observation facility.
///
/// See the module docs for the full contract.
pub struct VisibilityWatcher<T: Clone + PartialEq + 'static> {
    slot: Observable<Option<T>>,
    state: Rc<RefCell<WatchState<T>>>,
    _rebind: Subscription,
}

impl<T: Clone + PartialEq + 'static> VisibilityWatcher<T> {
    /// Create a watcher with default [`ObserveOptions`].
    ///
    /// `on_intersect` runs synchronously within the facility's dispatch,
    /// with the intersecting entry and a handle that can stop future
    /// observation.
    pub fn new(
        factory: impl ObserverFactory<T> + 'static,
        on_intersect: impl Fn(&IntersectionEntry<T>, &ObserverHandle) + 'static,
    ) -> Self {
        Self::with_options(factory, on_intersect, ObserveOptions::default())
    }

    /// Create a watcher with explicit options.
    pub fn with_options(
        factory: impl ObserverFactory<T> + 'static,
        on_intersect: impl Fn(&IntersectionEntry<T>, &ObserverHandle) + 'static,
        options: ObserveOptions<T>,
    ) -> Self {
        let state = Rc::new(RefCell::new(WatchState {
            factory: Rc::new(factory),
            on_intersect: Rc::new(on_intersect),
            options,
            observer: None,
            rebinding: false,
            pending: None,
        }));
        let slot: Observable<Option<T>> = Observable::new(None);

        let rebind_state = Rc::clone(&state);
        let rebind = slot.subscribe(move |target: &Option<T>| {
            Self::rebind(&rebind_state, target.clone());
        });

        Self {
            slot,
            state,
            _rebind: rebind,
        }
    }

    /// Attach (or replace) the watched target.
    ///
    /// Binding the already-bound target is a no-op; see the rebind policy in
    /// the module docs.
    pub fn bind(&self, target: T) {
        self.slot.set(Some(target));
    }

    /// Detach the watched target. The active observer (if any) is
    /// disconnected and nothing replaces it until the next [`bind`].
    ///
    /// [`bind`]: Self::bind
    pub fn clear(&self) {
        self.slot.set(None);
    }

    /// The presently bound target, if any.
    #[must_use]
    pub fn target(&self) -> Option<T> {
        self.slot.get()
    }

    /// A settable handle to the binding slot.
    ///
    /// Setting the slot from any handle is equivalent to calling [`bind`] /
    /// [`clear`] on the watcher, which is how callers thread a "set ref"
    /// capability into code that never sees the watcher itself. After the
    /// watcher is dropped, leftover handles become inert.
    ///
    /// [`bind`]: Self::bind
    /// [`clear`]: Self::clear
    #[must_use]
    pub fn slot(&self) -> Observable<Option<T>> {
        self.slot.clone()
    }

    /// The active options value.
    #[must_use]
    pub fn options(&self) -> ObserveOptions<T> {
        self.state.borrow().options.clone()
    }

    /// Replace the options. A value-different record triggers exactly one
    /// disconnect-then-reconnect cycle against the current target; an equal
    /// record is a no-op.
    pub fn set_options(&self, options: ObserveOptions<T>) {
        let changed = {
            let mut state = self.state.borrow_mut();
            if state.options == options {
                false
            } else {
                state.options = options;
                true
            }
        };
        if changed {
            Self::rebind(&self.state, self.slot.get());
        }
    }

    /// Whether a low-level observer is currently registered.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.state.borrow().observer.is_some()
    }

    /// Disconnect the old observer (if any), then register against `target`
    /// with the current options. `None` tears down without replacement.
    ///
    /// Re-entrant calls (a callback retargeting the watcher while the
    /// facility dispatches synchronously inside `observe`) are queued and
    /// drained once the in-progress cycle has stored its observer, so every
    /// superseded observer is disconnected before its replacement is created.
    fn rebind(state: &Rc<RefCell<WatchState<T>>>, target: Option<T>) {
        {
            let mut st = state.borrow_mut();
            if st.rebinding {
                st.pending = Some(target);
                return;
            }
            st.rebinding = true;
        }
        let mut next = Some(target);
        while let Some(target) = next.take() {
            Self::rebind_once(state, target);
            next = state.borrow_mut().pending.take();
        }
        state.borrow_mut().rebinding = false;
    }

    fn rebind_once(state: &Rc<RefCell<WatchState<T>>>, target: Option<T>) {
        let (factory, on_intersect, options) = {
            let mut st = state.borrow_mut();
            if let Some(mut old) = st.observer.take() {
                old.disconnect();
                trace!("observer disconnected");
            }
            (
                Rc::clone(&st.factory),
                Rc::clone(&st.on_intersect),
                st.options.clone(),
            )
        };

        let Some(target) = target else {
            return;
        };

        // Select this watcher's entry from each delivered batch and forward
        // only intersecting reports.
        let probe = target.clone();
        let callback: EntryCallback<T> = Rc::new(move |entries, handle| {
            if let Some(entry) = entries.iter().find(|e| e.target == probe) {
                if entry.is_intersecting {
                    on_intersect(entry, handle);
                }
            }
        });

        let mut observer = factory.create(callback, &options);
        observer.observe(target);
        state.borrow_mut().observer = Some(observer);
        trace!("observer registered");
    }
}

impl<T: Clone + PartialEq + 'static> Drop for VisibilityWatcher<T> {
    fn drop(&mut self) {
        if let Some(mut observer) = self.state.borrow_mut().observer.take() {
            observer.disconnect();
            trace!("observer disconnected on watcher drop");
        }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + 'static> std::fmt::Debug for VisibilityWatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityWatcher")
            .field("target", &self.slot.get())
            .field("observing", &self.is_observing())
            .finish()
    }
}

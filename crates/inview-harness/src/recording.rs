#![forbid(unsafe_code)]

//! The recording facility double.

use std::cell::RefCell;
use std::rc::Rc;

use inview_core::{
    EntryCallback, IntersectionEntry, IntersectionObserver, ObserveOptions, ObserverFactory,
    ObserverHandle,
};

/// One recorded facility call, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacilityEvent<T> {
    /// An observer was constructed.
    Created,
    /// `observe(target)` was called on an observer.
    Observed(T),
    /// An observer was disconnected (first transition only).
    Disconnected,
}

struct Registration<T> {
    handle: ObserverHandle,
    callback: EntryCallback<T>,
    options: ObserveOptions<T>,
}

struct FacilityState<T> {
    events: Vec<FacilityEvent<T>>,
    registrations: Vec<Registration<T>>,
}

/// In-memory visibility-observation facility recording every lifecycle call.
///
/// Clones share the same log and registrations, so a test can keep one
/// handle while handing another to the watcher under test.
pub struct RecordingFacility<T> {
    inner: Rc<RefCell<FacilityState<T>>>,
}

impl<T> Clone for RecordingFacility<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for RecordingFacility<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordingFacility<T> {
    /// An empty facility with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(FacilityState {
                events: Vec::new(),
                registrations: Vec::new(),
            })),
        }
    }

    /// Number of observers created so far.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.count(|e| matches!(e, FacilityEvent::Created))
    }

    /// Number of observers explicitly disconnected so far.
    #[must_use]
    pub fn disconnected_count(&self) -> usize {
        self.count(|e| matches!(e, FacilityEvent::Disconnected))
    }

    /// Number of registrations whose handle is still connected.
    #[must_use]
    pub fn active_observers(&self) -> usize {
        self.inner
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.handle.is_connected())
            .count()
    }

    /// Assert that every prefix of the event log holds the single-observer
    /// discipline: creates minus disconnects is always 0 or 1.
    #[track_caller]
    pub fn assert_at_most_one_active(&self) {
        let mut balance: i64 = 0;
        for (i, event) in self.inner.borrow().events.iter().enumerate() {
            match event {
                FacilityEvent::Created => balance += 1,
                FacilityEvent::Disconnected => balance -= 1,
                FacilityEvent::Observed(_) => {}
            }
            assert!(
                (0..=1).contains(&balance),
                "observer balance {balance} after event index {i}"
            );
        }
    }

    fn count(&self, pred: impl Fn(&FacilityEvent<T>) -> bool) -> usize {
        self.inner.borrow().events.iter().filter(|e| pred(e)).count()
    }
}

impl<T: Clone> RecordingFacility<T> {
    /// Snapshot of the event log.
    #[must_use]
    pub fn events(&self) -> Vec<FacilityEvent<T>> {
        self.inner.borrow().events.clone()
    }

    /// Options the most recent observer was created with.
    #[must_use]
    pub fn last_options(&self) -> Option<ObserveOptions<T>> {
        self.inner
            .borrow()
            .registrations
            .last()
            .map(|r| r.options.clone())
    }

    /// Dispatch a scripted batch to every connected observer.
    ///
    /// Connectivity is re-checked per observer, so a callback that
    /// disconnects a registration mid-delivery suppresses later dispatch to
    /// it within the same batch.
    pub fn deliver(&self, entries: &[IntersectionEntry<T>]) {
        let snapshot: Vec<(EntryCallback<T>, ObserverHandle)> = self
            .inner
            .borrow()
            .registrations
            .iter()
            .map(|r| (Rc::clone(&r.callback), r.handle.clone()))
            .collect();
        for (callback, handle) in snapshot {
            if handle.is_connected() {
                callback(entries, &handle);
            }
        }
    }
}

impl<T: Clone + 'static> ObserverFactory<T> for RecordingFacility<T> {
    fn create(
        &self,
        callback: EntryCallback<T>,
        options: &ObserveOptions<T>,
    ) -> Box<dyn IntersectionObserver<T>> {
        let handle = ObserverHandle::new();
        {
            let mut state = self.inner.borrow_mut();
            state.events.push(FacilityEvent::Created);
            state.registrations.push(Registration {
                handle: handle.clone(),
                callback,
                options: options.clone(),
            });
        }
        Box::new(RecordedObserver {
            state: Rc::clone(&self.inner),
            handle,
        })
    }
}

struct RecordedObserver<T> {
    state: Rc<RefCell<FacilityState<T>>>,
    handle: ObserverHandle,
}

impl<T> IntersectionObserver<T> for RecordedObserver<T> {
    fn observe(&mut self, target: T) {
        self.state
            .borrow_mut()
            .events
            .push(FacilityEvent::Observed(target));
    }

    fn disconnect(&mut self) {
        if self.handle.is_connected() {
            self.handle.disconnect();
            self.state.borrow_mut().events.push(FacilityEvent::Disconnected);
        }
    }

    fn is_connected(&self) -> bool {
        self.handle.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn noop_callback<T>() -> EntryCallback<T> {
        Rc::new(|_, _| {})
    }

    #[test]
    fn create_observe_disconnect_are_logged_in_order() {
        let facility = RecordingFacility::new();
        let mut observer = facility.create(noop_callback(), &ObserveOptions::default());
        observer.observe("a");
        observer.disconnect();

        assert_eq!(
            facility.events(),
            vec![
                FacilityEvent::Created,
                FacilityEvent::Observed("a"),
                FacilityEvent::Disconnected,
            ]
        );
    }

    #[test]
    fn disconnect_logged_once() {
        let facility: RecordingFacility<u32> = RecordingFacility::new();
        let mut observer = facility.create(noop_callback(), &ObserveOptions::default());
        observer.disconnect();
        observer.disconnect();
        assert_eq!(facility.disconnected_count(), 1);
    }

    #[test]
    fn deliver_reaches_connected_observers_only() {
        let facility = RecordingFacility::new();
        let fired = Rc::new(Cell::new(0u32));

        let f = Rc::clone(&fired);
        let mut live = facility.create(
            Rc::new(move |_: &[IntersectionEntry<&str>], _: &ObserverHandle| {
                f.set(f.get() + 1);
            }),
            &ObserveOptions::default(),
        );
        live.observe("a");

        let f = Rc::clone(&fired);
        let mut dead = facility.create(
            Rc::new(move |_: &[IntersectionEntry<&str>], _: &ObserverHandle| {
                f.set(f.get() + 100);
            }),
            &ObserveOptions::default(),
        );
        dead.disconnect();

        facility.deliver(&[IntersectionEntry::visible("a")]);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn callback_handle_disconnect_silences_future_deliveries() {
        let facility = RecordingFacility::new();
        let fired = Rc::new(Cell::new(0u32));
        let f = Rc::clone(&fired);
        let _observer = facility.create(
            Rc::new(move |_: &[IntersectionEntry<&str>], handle: &ObserverHandle| {
                f.set(f.get() + 1);
                handle.disconnect();
            }),
            &ObserveOptions::default(),
        );

        facility.deliver(&[IntersectionEntry::visible("a")]);
        facility.deliver(&[IntersectionEntry::visible("a")]);
        assert_eq!(fired.get(), 1, "handle disconnect must stop dispatch");
        assert_eq!(facility.active_observers(), 0);
        // Callback-side stop is not an explicit teardown.
        assert_eq!(facility.disconnected_count(), 0);
    }

    #[test]
    fn last_options_tracks_most_recent_create() {
        let facility: RecordingFacility<u32> = RecordingFacility::new();
        let _a = facility.create(noop_callback(), &ObserveOptions::default());
        let opts = ObserveOptions::new().with_threshold(0.75);
        let _b = facility.create(noop_callback(), &opts);
        assert_eq!(facility.last_options(), Some(opts));
    }

    #[test]
    fn balance_assertion_catches_double_create() {
        let facility: RecordingFacility<u32> = RecordingFacility::new();
        let _a = facility.create(noop_callback(), &ObserveOptions::default());
        facility.assert_at_most_one_active();

        let _b = facility.create(noop_callback(), &ObserveOptions::default());
        let caught =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                facility.assert_at_most_one_active();
            }));
        assert!(caught.is_err());
    }
}

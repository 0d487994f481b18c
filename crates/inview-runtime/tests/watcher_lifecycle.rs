//! Observer lifecycle contract tests for `VisibilityWatcher`.
//!
//! Driven end to end through the recording facility double: every test
//! asserts against the ordered facility call log, the dispatch behavior, or
//! both.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use inview_core::{IntersectionEntry, ObserveOptions};
use inview_harness::{FacilityEvent, RecordingFacility};
use inview_runtime::VisibilityWatcher;

#[test]
fn rebind_disconnects_before_observing_new_target() {
    let facility = RecordingFacility::new();
    let watcher = VisibilityWatcher::new(facility.clone(), |_, _| {});

    watcher.bind("a");
    watcher.bind("b");

    assert_eq!(
        facility.events(),
        vec![
            FacilityEvent::Created,
            FacilityEvent::Observed("a"),
            FacilityEvent::Disconnected,
            FacilityEvent::Created,
            FacilityEvent::Observed("b"),
        ]
    );
    facility.assert_at_most_one_active();
}

#[test]
fn non_intersecting_entries_are_dropped() {
    let facility = RecordingFacility::new();
    let fired = Rc::new(Cell::new(0u32));
    let f = Rc::clone(&fired);
    let watcher = VisibilityWatcher::new(facility.clone(), move |_, _| f.set(f.get() + 1));
    watcher.bind("a");

    facility.deliver(&[IntersectionEntry::hidden("a")]);
    assert_eq!(fired.get(), 0);
}

#[test]
fn intersecting_entry_invokes_callback_exactly_once_with_that_entry() {
    let facility = RecordingFacility::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let watcher = VisibilityWatcher::new(facility.clone(), move |entry, _| {
        sink.borrow_mut().push(entry.clone());
    });
    watcher.bind("a");

    let entry = IntersectionEntry::visible("a");
    facility.deliver(std::slice::from_ref(&entry));

    assert_eq!(*seen.borrow(), vec![entry]);
}

#[test]
fn drop_disconnects_active_observer() {
    let facility = RecordingFacility::new();
    let watcher = VisibilityWatcher::new(facility.clone(), |_, _| {});
    watcher.bind("a");
    assert_eq!(facility.active_observers(), 1);

    drop(watcher);
    assert_eq!(facility.active_observers(), 0);
    assert_eq!(facility.created_count(), facility.disconnected_count());
}

#[test]
fn late_deliveries_after_drop_never_reach_callback() {
    let facility = RecordingFacility::new();
    let fired = Rc::new(Cell::new(0u32));
    let f = Rc::clone(&fired);
    let watcher = VisibilityWatcher::new(facility.clone(), move |_, _| f.set(f.get() + 1));
    watcher.bind("a");
    drop(watcher);

    facility.deliver(&[IntersectionEntry::visible("a")]);
    assert_eq!(fired.get(), 0);
}

#[test]
fn slot_set_after_drop_is_inert() {
    let facility = RecordingFacility::new();
    let watcher = VisibilityWatcher::new(facility.clone(), |_, _| {});
    let slot = watcher.slot();
    drop(watcher);

    slot.set(Some("a"));
    assert!(facility.events().is_empty());
}

#[test]
fn options_change_while_bound_cycles_once_against_same_target() {
    let facility = RecordingFacility::new();
    let watcher = VisibilityWatcher::new(facility.clone(), |_, _| {});
    watcher.bind("a");

    watcher.set_options(ObserveOptions::new().with_threshold(0.5));

    assert_eq!(
        facility.events(),
        vec![
            FacilityEvent::Created,
            FacilityEvent::Observed("a"),
            FacilityEvent::Disconnected,
            FacilityEvent::Created,
            FacilityEvent::Observed("a"),
        ]
    );
    assert_eq!(
        facility.last_options(),
        Some(ObserveOptions::new().with_threshold(0.5))
    );
}

#[test]
fn callback_can_stop_future_observation_via_handle() {
    let facility = RecordingFacility::new();
    let fired = Rc::new(Cell::new(0u32));
    let f = Rc::clone(&fired);
    let watcher = VisibilityWatcher::new(facility.clone(), move |_, handle| {
        f.set(f.get() + 1);
        handle.disconnect();
    });
    watcher.bind("a");

    facility.deliver(&[IntersectionEntry::visible("a")]);
    facility.deliver(&[IntersectionEntry::visible("a")]);
    assert_eq!(fired.get(), 1);
}

#[test]
fn never_bound_watcher_touches_nothing() {
    let facility: RecordingFacility<&str> = RecordingFacility::new();
    let fired = Rc::new(Cell::new(0u32));
    let f = Rc::clone(&fired);
    let watcher = VisibilityWatcher::new(facility.clone(), move |_, _| f.set(f.get() + 1));

    facility.deliver(&[IntersectionEntry::visible("a")]);
    drop(watcher);

    assert!(facility.events().is_empty());
    assert_eq!(fired.get(), 0);
}

// The full scenario from the contract: hidden A, visible A, rebind to B.
#[test]
fn scenario_hidden_then_visible_then_rebind() {
    let facility = RecordingFacility::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let watcher = VisibilityWatcher::with_options(
        facility.clone(),
        move |entry, _| sink.borrow_mut().push(entry.clone()),
        ObserveOptions::new().with_threshold(0.1),
    );

    watcher.bind("a");
    facility.deliver(&[IntersectionEntry::hidden("a")]);
    assert!(seen.borrow().is_empty(), "non-intersecting must not fire");

    let visible = IntersectionEntry::visible("a");
    facility.deliver(std::slice::from_ref(&visible));
    assert_eq!(*seen.borrow(), vec![visible]);

    watcher.bind("b");
    let tail: Vec<_> = facility.events().into_iter().skip(2).collect();
    assert_eq!(
        tail,
        vec![
            FacilityEvent::Disconnected,
            FacilityEvent::Created,
            FacilityEvent::Observed("b"),
        ]
    );
    facility.assert_at_most_one_active();
}

#[test]
fn busy_sequence_holds_single_observer_discipline() {
    let facility = RecordingFacility::new();
    let watcher = VisibilityWatcher::new(facility.clone(), |_, _| {});

    watcher.bind("a");
    watcher.bind("b");
    watcher.clear();
    watcher.bind("c");
    watcher.set_options(ObserveOptions::new().with_root_margin("0px"));
    watcher.bind("a");
    watcher.clear();
    watcher.clear();
    drop(watcher);

    facility.assert_at_most_one_active();
    assert_eq!(facility.created_count(), facility.disconnected_count());
}

#![forbid(unsafe_code)]

//! A rectangle-based visibility-observation facility.
//!
//! # Design
//!
//! [`RectViewport`] implements the facility traits from `inview-core`
//! against plain layout rectangles: the caller feeds it element bounds and a
//! viewport rect, and every layout mutation recomputes intersection state
//! for all observed targets. Entries are dispatched **only on state
//! transitions** — a target is reported when its intersecting/non-
//! intersecting state differs from the last report, plus once initially as
//! soon as a registration has both an observed target and known bounds.
//!
//! # Intersection math
//!
//! `ratio` is intersection area over target area against the margin-expanded
//! root. Zero-area targets report 1.0 when the degenerate rect touches the
//! expanded root, else 0.0. `is_intersecting` is `ratio >= threshold`, with
//! a zero threshold meaning any positive overlap.
//!
//! # Failure Modes
//!
//! An unparsable `root_margin` is this facility's own error path: it logs a
//! warning at observer creation and installs an inert registration — no
//! entry is ever dispatched for it, and nothing is retried or reported
//! (callers needing resilience validate with `RootMargin::parse` up front).
//! A root element with unknown bounds likewise suppresses reporting until
//! its bounds arrive.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{trace, warn};

use inview_core::{
    EntryCallback, IntersectionEntry, IntersectionObserver, ObserveOptions, ObserverFactory,
    ObserverHandle, Rect, RootMargin,
};

struct Registration<T> {
    handle: ObserverHandle,
    callback: EntryCallback<T>,
    root: Option<T>,
    /// `None` when the root margin failed to parse; the registration is inert.
    margin: Option<RootMargin>,
    threshold: f64,
    /// Observed targets with the last reported intersecting state.
    watched: Vec<(T, Option<bool>)>,
}

struct ViewportState<T> {
    viewport: Rect,
    bounds: Vec<(T, Rect)>,
    registrations: Vec<Rc<RefCell<Registration<T>>>>,
}

impl<T: PartialEq> ViewportState<T> {
    fn lookup(&self, target: &T) -> Option<Rect> {
        self.bounds
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, rect)| *rect)
    }
}

/// Rectangle-based reference implementation of the observation facility.
///
/// Clones share the same layout state and registrations.
pub struct RectViewport<T> {
    inner: Rc<RefCell<ViewportState<T>>>,
}

impl<T> Clone for RectViewport<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> RectViewport<T> {
    /// A facility whose default root is `viewport`, with no known element
    /// bounds.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ViewportState {
                viewport,
                bounds: Vec::new(),
                registrations: Vec::new(),
            })),
        }
    }

    /// The current default viewport rectangle.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.inner.borrow().viewport
    }

    /// Replace the default viewport and re-evaluate all observed targets.
    pub fn set_viewport(&self, viewport: Rect) {
        self.inner.borrow_mut().viewport = viewport;
        Self::refresh(&self.inner);
    }

    /// Record (or move) an element's layout bounds and re-evaluate.
    pub fn set_bounds(&self, target: T, rect: Rect) {
        {
            let mut state = self.inner.borrow_mut();
            if let Some(slot) = state.bounds.iter_mut().find(|(t, _)| *t == target) {
                slot.1 = rect;
            } else {
                state.bounds.push((target, rect));
            }
        }
        Self::refresh(&self.inner);
    }

    /// Forget an element's bounds. Registrations observing it stop
    /// reporting until bounds reappear; no synthetic "leave" entry is sent.
    pub fn remove_bounds(&self, target: &T) {
        self.inner.borrow_mut().bounds.retain(|(t, _)| t != target);
    }

    /// Known bounds for `target`, if any.
    #[must_use]
    pub fn bounds_of(&self, target: &T) -> Option<Rect> {
        self.inner.borrow().lookup(target)
    }

    /// Recompute every observed target and dispatch state transitions.
    ///
    /// Batches are collected under the borrow and dispatched outside it, so
    /// callbacks may mutate layout (triggering a nested refresh) without
    /// re-entrant borrow failures.
    fn refresh(inner: &Rc<RefCell<ViewportState<T>>>) {
        let mut batches: Vec<(EntryCallback<T>, ObserverHandle, Vec<IntersectionEntry<T>>)> =
            Vec::new();
        {
            let state = inner.borrow();
            for reg_rc in &state.registrations {
                let mut reg = reg_rc.borrow_mut();
                if !reg.handle.is_connected() {
                    continue;
                }
                let mut batch = Vec::new();
                let Registration {
                    root,
                    margin,
                    threshold,
                    watched,
                    ..
                } = &mut *reg;
                for (target, last) in watched.iter_mut() {
                    let Some(entry) =
                        compute_entry(&state, root.as_ref(), margin.as_ref(), *threshold, target)
                    else {
                        continue;
                    };
                    if *last != Some(entry.is_intersecting) {
                        *last = Some(entry.is_intersecting);
                        batch.push(entry);
                    }
                }
                if !batch.is_empty() {
                    batches.push((Rc::clone(&reg.callback), reg.handle.clone(), batch));
                }
            }
        }
        for (callback, handle, batch) in batches {
            if handle.is_connected() {
                trace!(entries = batch.len(), "dispatching intersection batch");
                callback(&batch, &handle);
            }
        }
    }
}

/// Intersection state for one target, or `None` when it cannot be computed
/// (unknown bounds, inert margin, or a root with unknown bounds).
fn compute_entry<T: Clone + PartialEq>(
    state: &ViewportState<T>,
    root: Option<&T>,
    margin: Option<&RootMargin>,
    threshold: f64,
    target: &T,
) -> Option<IntersectionEntry<T>> {
    let bounds = state.lookup(target)?;
    let margin = margin?;
    let root_rect = match root {
        Some(element) => state.lookup(element)?,
        None => state.viewport,
    };
    let expanded = root_rect.expand(margin.resolve(root_rect));
    let ratio = intersection_ratio(bounds, expanded);
    let is_intersecting = if threshold <= 0.0 {
        ratio > 0.0
    } else {
        ratio >= threshold
    };
    Some(IntersectionEntry {
        target: target.clone(),
        is_intersecting,
        intersection_ratio: ratio,
        bounds,
        root_bounds: Some(expanded),
    })
}

fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    if target.area() == 0 {
        return if target.touches(&root) { 1.0 } else { 0.0 };
    }
    match target.intersection(&root) {
        Some(overlap) => overlap.area() as f64 / target.area() as f64,
        None => 0.0,
    }
}

impl<T: Clone + PartialEq + 'static> ObserverFactory<T> for RectViewport<T> {
    fn create(
        &self,
        callback: EntryCallback<T>,
        options: &ObserveOptions<T>,
    ) -> Box<dyn IntersectionObserver<T>> {
        let margin = match RootMargin::parse(&options.root_margin) {
            Ok(margin) => Some(margin),
            Err(err) => {
                warn!(
                    margin = %options.root_margin,
                    error = %err,
                    "invalid root margin; registration will never fire"
                );
                None
            }
        };
        let registration = Rc::new(RefCell::new(Registration {
            handle: ObserverHandle::new(),
            callback,
            root: options.root.clone(),
            margin,
            threshold: options.threshold,
            watched: Vec::new(),
        }));
        self.inner
            .borrow_mut()
            .registrations
            .push(Rc::clone(&registration));
        Box::new(RectObserver {
            state: Rc::clone(&self.inner),
            registration,
        })
    }
}

struct RectObserver<T> {
    state: Rc<RefCell<ViewportState<T>>>,
    registration: Rc<RefCell<Registration<T>>>,
}

impl<T: Clone + PartialEq + 'static> IntersectionObserver<T> for RectObserver<T> {
    fn observe(&mut self, target: T) {
        self.registration.borrow_mut().watched.push((target, None));
        // Initial report, if bounds are already known.
        RectViewport::refresh(&self.state);
    }

    fn disconnect(&mut self) {
        let handle = self.registration.borrow().handle.clone();
        if !handle.is_connected() {
            return;
        }
        handle.disconnect();
        self.registration.borrow_mut().watched.clear();
        self.state
            .borrow_mut()
            .registrations
            .retain(|reg| !Rc::ptr_eq(reg, &self.registration));
    }

    fn is_connected(&self) -> bool {
        self.registration.borrow().handle.is_connected()
    }
}

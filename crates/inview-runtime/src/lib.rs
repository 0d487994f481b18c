#![forbid(unsafe_code)]

//! Runtime: observer lifecycle management for inview.
//!
//! # Role in inview
//! `inview-runtime` owns the behavioral core: the [`VisibilityWatcher`],
//! which binds a single watched element to a visibility-observation facility
//! and guarantees the observer resource is released on every retiring path
//! (rebind, clear, drop).
//!
//! # Primary responsibilities
//! - **VisibilityWatcher**: at most one active observer per watcher,
//!   recreated whenever the bound target or options change by value.
//! - **Reactive slot**: an [`reactive::Observable`] binding slot so callers
//!   can hold a settable target reference detached from the watcher itself.
//! - **RectViewport**: a rectangle-based reference implementation of the
//!   facility traits from `inview-core`, usable without a host platform.
//!
//! # How it fits in the system
//! `inview-core` supplies the vocabulary (options, entries, facility
//! traits); this crate supplies the state machine that drives them. Test
//! doubles live in `inview-harness`.

pub mod reactive;
pub mod viewport;
pub mod watcher;

pub use reactive::{Observable, Subscription};
pub use viewport::RectViewport;
pub use watcher::VisibilityWatcher;

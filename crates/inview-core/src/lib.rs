#![forbid(unsafe_code)]

//! Core: observation model and facility traits for inview.
//!
//! # Role in inview
//! `inview-core` is the vocabulary layer. It owns the value types exchanged
//! between a visibility watcher and a visibility-observation facility, and the
//! traits any facility must implement.
//!
//! # Primary responsibilities
//! - **ObserveOptions**: the `{root, root_margin, threshold}` configuration
//!   record governing when a visibility transition is reported.
//! - **RootMargin**: parsed form of the CSS-margin-like `root_margin` string.
//! - **IntersectionEntry**: a single visibility report for a watched target.
//! - **Facility traits**: `ObserverFactory` / `IntersectionObserver` /
//!   `ObserverHandle` — the construct/observe/disconnect surface a platform
//!   facility exposes.
//!
//! # How it fits in the system
//! The watcher (`inview-runtime`) consumes these types and drives observer
//! lifecycles; facilities (the bundled `RectViewport`, or a host-provided
//! one) produce `IntersectionEntry` batches. This crate has no behavior of
//! its own beyond margin parsing and rectangle math.

pub mod entry;
pub mod geometry;
pub mod margin;
pub mod observer;
pub mod options;

pub use entry::IntersectionEntry;
pub use geometry::{Insets, Rect};
pub use margin::{MarginValue, RootMargin, RootMarginError};
pub use observer::{EntryCallback, IntersectionObserver, ObserverFactory, ObserverHandle};
pub use options::{DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD, ObserveOptions};

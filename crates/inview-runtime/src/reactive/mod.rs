#![forbid(unsafe_code)]

//! Reactive value primitives backing the watcher's binding slot.
//!
//! - [`Observable`]: a shared, version-tracked value with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes eagerly on drop.
//!
//! # Invariants
//!
//! 1. Setting a value equal to the current value (by `PartialEq`) is a
//!    no-op: no version bump, no notifications.
//! 2. Subscribers are notified in registration order.
//! 3. Dropping a [`Subscription`] removes its callback immediately; it will
//!    not fire for any later mutation.

pub mod observable;

pub use observable::{Observable, Subscription};

#![forbid(unsafe_code)]

//! Test harness for inview: a recording visibility-observation facility.
//!
//! # Role in inview
//! [`RecordingFacility`] implements the facility traits from `inview-core`
//! against an in-memory call log instead of a platform. Tests drive it two
//! ways: they inspect the ordered [`FacilityEvent`] log to verify observer
//! lifecycle discipline, and they push scripted entry batches through
//! [`deliver`](RecordingFacility::deliver) to exercise callback dispatch.
//!
//! # Recording semantics
//!
//! - `Created` is logged per factory `create` call, `Observed(target)` per
//!   `observe` call, `Disconnected` on the first `disconnect` of each
//!   observer (idempotent repeats log nothing).
//! - A callback that stops itself via its `ObserverHandle` silences future
//!   dispatch but is *not* logged as `Disconnected`; only explicit observer
//!   teardown is. Lifecycle assertions should drive teardown through the
//!   watcher.
//! - Dropping an observer box without disconnecting logs nothing, so a
//!   leaked registration shows up as an unbalanced log.

pub mod recording;

pub use recording::{FacilityEvent, RecordingFacility};

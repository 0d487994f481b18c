#![forbid(unsafe_code)]

//! Intersection reports delivered to watcher callbacks.

use crate::geometry::Rect;

/// A single visibility report for a watched target.
///
/// Facilities deliver entries in batches; the watcher picks the entry for
/// its bound target and forwards it to the user callback only when
/// `is_intersecting` is true. Callers wanting "on leave" behavior must
/// observe the raw entry stream through their own facility registration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionEntry<T> {
    /// The element this report describes.
    pub target: T,
    /// Whether the target currently satisfies the configured threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`.
    pub intersection_ratio: f64,
    /// Target bounds at report time.
    pub bounds: Rect,
    /// Margin-expanded root bounds, when the facility knows them.
    pub root_bounds: Option<Rect>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl<T> IntersectionEntry<T> {
    /// A fully visible report for `target` (tests and harnesses).
    #[must_use]
    pub fn visible(target: T) -> Self {
        Self {
            target,
            is_intersecting: true,
            intersection_ratio: 1.0,
            bounds: Rect::new(0, 0, 1, 1),
            root_bounds: None,
        }
    }

    /// A fully hidden report for `target` (tests and harnesses).
    #[must_use]
    pub fn hidden(target: T) -> Self {
        Self {
            target,
            is_intersecting: false,
            intersection_ratio: 0.0,
            bounds: Rect::new(0, 0, 1, 1),
            root_bounds: None,
        }
    }
}

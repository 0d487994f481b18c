#![forbid(unsafe_code)]

//! Rectangle math used by intersection reporting.
//!
//! Coordinates are signed (a margin-expanded root may extend past the
//! origin); sizes are unsigned. All area math widens to `i64`/`u64` so
//! degenerate inputs cannot overflow.

/// An axis-aligned rectangle in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Per-edge pixel adjustments applied to a root rectangle.
///
/// Positive values grow the rectangle outward; negative values shrink it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Insets {
    /// Uniform insets on all four edges.
    #[must_use]
    pub const fn uniform(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero-sized rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Exclusive right edge.
    #[must_use]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Area in square units.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether the rectangle encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The overlapping region of `self` and `other`, if any.
    ///
    /// Returns `None` when the rectangles are disjoint. Rectangles that
    /// merely share an edge overlap with zero area and also return `None`.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x1 = i64::from(self.x).max(i64::from(other.x));
        let y1 = i64::from(self.y).max(i64::from(other.y));
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Rect {
            x: x1 as i32,
            y: y1 as i32,
            width: (x2 - x1) as u32,
            height: (y2 - y1) as u32,
        })
    }

    /// Whether `self` and `other` touch or overlap (shared edges count).
    ///
    /// This is the containment test used for zero-area targets, where an
    /// area-based intersection is meaningless.
    #[must_use]
    pub fn touches(&self, other: &Rect) -> bool {
        i64::from(self.x) <= other.right()
            && self.right() >= i64::from(other.x)
            && i64::from(self.y) <= other.bottom()
            && self.bottom() >= i64::from(other.y)
    }

    /// Expand (or shrink, for negative insets) each edge.
    ///
    /// Width and height clamp at zero; a rectangle shrunk past its own size
    /// collapses to an empty rectangle at its adjusted origin.
    #[must_use]
    pub fn expand(&self, insets: Insets) -> Rect {
        let x = i64::from(self.x) - i64::from(insets.left);
        let y = i64::from(self.y) - i64::from(insets.top);
        let width = (i64::from(self.width) + i64::from(insets.left) + i64::from(insets.right))
            .clamp(0, i64::from(u32::MAX));
        let height = (i64::from(self.height) + i64::from(insets.top) + i64::from(insets.bottom))
            .clamp(0, i64::from(u32::MAX));
        Rect {
            x: x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            y: y.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            width: width as u32,
            height: height as u32,
        }
    }
}

#![forbid(unsafe_code)]

//! Parsing for the CSS-margin-like `root_margin` option.
//!
//! # Grammar
//!
//! One to four whitespace-separated lengths, each `<number>px` or
//! `<number>%`. Negative values are allowed (they shrink the root's
//! effective bounds). Shorthand expansion follows CSS margin order:
//!
//! | values      | top | right | bottom | left |
//! |-------------|-----|-------|--------|------|
//! | `a`         | a   | a     | a      | a    |
//! | `a b`       | a   | b     | a      | b    |
//! | `a b c`     | a   | b     | c      | b    |
//! | `a b c d`   | a   | b     | c      | d    |
//!
//! Percentages resolve against the root's height (top/bottom) or width
//! (left/right) at resolution time, so a `RootMargin` is a pure value and
//! can be resolved against different roots.
//!
//! # Failure Modes
//!
//! Parsing is the only fallible operation in this crate. The watcher never
//! parses margins itself; it hands the raw string to the facility, which
//! owns the error path (see `inview-runtime::RectViewport`).

use crate::geometry::{Insets, Rect};

/// A single margin length: absolute pixels or a percentage of the root edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarginValue {
    Px(f64),
    Percent(f64),
}

impl MarginValue {
    fn resolve(self, basis: u32) -> i32 {
        let px = match self {
            Self::Px(v) => v,
            Self::Percent(v) => v / 100.0 * f64::from(basis),
        };
        px.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}

/// Parsed form of a `root_margin` string.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

/// Errors from `root_margin` parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootMarginError {
    /// The string contained no values.
    Empty,
    /// More than four values were supplied.
    TooManyValues(usize),
    /// A value was not a `px` or `%` length.
    InvalidLength(String),
}

impl std::fmt::Display for RootMarginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "root margin is empty"),
            Self::TooManyValues(n) => {
                write!(f, "root margin has {n} values, at most 4 are allowed")
            }
            Self::InvalidLength(v) => {
                write!(f, "invalid root margin length '{v}': expected <number>px or <number>%")
            }
        }
    }
}

impl std::error::Error for RootMarginError {}

impl RootMargin {
    /// Zero margin on all edges.
    pub const ZERO: Self = Self {
        top: MarginValue::Px(0.0),
        right: MarginValue::Px(0.0),
        bottom: MarginValue::Px(0.0),
        left: MarginValue::Px(0.0),
    };

    /// Parse a CSS-margin-like string.
    pub fn parse(input: &str) -> Result<Self, RootMarginError> {
        let values: Vec<MarginValue> = input
            .split_whitespace()
            .map(parse_length)
            .collect::<Result<_, _>>()?;
        match values.as_slice() {
            [] => Err(RootMarginError::Empty),
            [a] => Ok(Self {
                top: *a,
                right: *a,
                bottom: *a,
                left: *a,
            }),
            [a, b] => Ok(Self {
                top: *a,
                right: *b,
                bottom: *a,
                left: *b,
            }),
            [a, b, c] => Ok(Self {
                top: *a,
                right: *b,
                bottom: *c,
                left: *b,
            }),
            [a, b, c, d] => Ok(Self {
                top: *a,
                right: *b,
                bottom: *c,
                left: *d,
            }),
            more => Err(RootMarginError::TooManyValues(more.len())),
        }
    }

    /// Resolve to pixel insets against a concrete root rectangle.
    #[must_use]
    pub fn resolve(&self, root: Rect) -> Insets {
        Insets {
            top: self.top.resolve(root.height),
            right: self.right.resolve(root.width),
            bottom: self.bottom.resolve(root.height),
            left: self.left.resolve(root.width),
        }
    }
}

fn parse_length(token: &str) -> Result<MarginValue, RootMarginError> {
    let invalid = || RootMarginError::InvalidLength(token.to_string());
    if let Some(number) = token.strip_suffix("px") {
        number
            .parse::<f64>()
            .map(MarginValue::Px)
            .map_err(|_| invalid())
    } else if let Some(number) = token.strip_suffix('%') {
        number
            .parse::<f64>()
            .map(MarginValue::Percent)
            .map_err(|_| invalid())
    } else {
        Err(invalid())
    }
}

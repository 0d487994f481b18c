#![forbid(unsafe_code)]

//! Observation configuration.

/// Default `root_margin` when none is supplied.
pub const DEFAULT_ROOT_MARGIN: &str = "1px";

/// Default visibility `threshold` when none is supplied.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Configuration governing when a visibility transition is reported.
///
/// Treated as a *value*: the watcher compares options by `PartialEq` and
/// re-registers its observer only when the value actually changes. Callers
/// should therefore build options once rather than re-deriving a fresh
/// equivalent record per call (re-registration would still be correct, just
/// wasteful).
///
/// No field is validated here. The string `root_margin` is passed through to
/// the facility untouched; `threshold` is expected in `0.0..=1.0` but is the
/// facility's to interpret.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserveOptions<T> {
    /// Ancestor element used as the visibility viewport. `None` selects the
    /// facility's default viewport.
    pub root: Option<T>,
    /// CSS-margin-like string expanding/contracting the root's effective
    /// bounds. See [`crate::margin::RootMargin`] for the grammar.
    pub root_margin: String,
    /// Fraction of target visibility, `0.0..=1.0`, required to trigger.
    pub threshold: f64,
}

impl<T> Default for ObserveOptions<T> {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl<T> ObserveOptions<T> {
    /// Options with all defaults (`root: None`, `"1px"`, `0.1`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `root` as the visibility viewport instead of the default.
    #[must_use]
    pub fn with_root(mut self, root: T) -> Self {
        self.root = Some(root);
        self
    }

    /// Override the root margin string.
    #[must_use]
    pub fn with_root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = margin.into();
        self
    }

    /// Override the visibility threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let opts: ObserveOptions<u32> = ObserveOptions::default();
        assert_eq!(opts.root, None);
        assert_eq!(opts.root_margin, "1px");
        assert!((opts.threshold - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn builder_chain() {
        let opts = ObserveOptions::new()
            .with_root(7u32)
            .with_root_margin("0px 10%")
            .with_threshold(0.5);
        assert_eq!(opts.root, Some(7));
        assert_eq!(opts.root_margin, "0px 10%");
        assert!((opts.threshold - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn value_equality_detects_threshold_change() {
        let a: ObserveOptions<u32> = ObserveOptions::new();
        let b = a.clone().with_threshold(0.5);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn value_equality_detects_root_change() {
        let a = ObserveOptions::new().with_root(1u32);
        let b = a.clone().with_root(2u32);
        assert_ne!(a, b);
    }
}

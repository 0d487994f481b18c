#![forbid(unsafe_code)]

//! Category-selection bubbles as a pure projection.
//!
//! A category list plus the currently selected slug projects to a list of
//! bubble states: the selected category is marked (and a host UI typically
//! renders it inert), every other bubble stays selectable. Stateless and
//! order-preserving; selection changes are the host's concern.

/// A content category descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    /// Display name.
    pub name: String,
    /// Stable identifier used for selection.
    pub slug: String,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// One projected bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryBubble {
    pub name: String,
    pub slug: String,
    /// Whether this bubble is the current selection.
    pub selected: bool,
}

/// Project categories and the selected slug to bubble states.
///
/// A `selected` slug matching no category yields an all-unselected
/// projection; `None` does the same.
#[must_use]
pub fn project_selection(categories: &[Category], selected: Option<&str>) -> Vec<CategoryBubble> {
    categories
        .iter()
        .map(|category| CategoryBubble {
            name: category.name.clone(),
            slug: category.slug.clone(),
            selected: selected == Some(category.slug.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Category> {
        vec![
            Category::new("All", "all"),
            Category::new("Rust", "rust"),
            Category::new("Notes", "notes"),
        ]
    }

    #[test]
    fn marks_exactly_the_selected_slug() {
        let bubbles = project_selection(&sample(), Some("rust"));
        assert_eq!(
            bubbles.iter().map(|b| b.selected).collect::<Vec<_>>(),
            vec![false, true, false]
        );
    }

    #[test]
    fn preserves_input_order() {
        let bubbles = project_selection(&sample(), None);
        assert_eq!(
            bubbles.iter().map(|b| b.slug.as_str()).collect::<Vec<_>>(),
            vec!["all", "rust", "notes"]
        );
    }

    #[test]
    fn unknown_slug_selects_nothing() {
        let bubbles = project_selection(&sample(), Some("missing"));
        assert!(bubbles.iter().all(|b| !b.selected));
    }

    #[test]
    fn none_selects_nothing() {
        let bubbles = project_selection(&sample(), None);
        assert!(bubbles.iter().all(|b| !b.selected));
    }

    #[test]
    fn empty_categories_project_empty() {
        assert!(project_selection(&[], Some("rust")).is_empty());
    }

    #[test]
    fn duplicate_slugs_all_marked() {
        let categories = vec![Category::new("A", "dup"), Category::new("B", "dup")];
        let bubbles = project_selection(&categories, Some("dup"));
        assert!(bubbles.iter().all(|b| b.selected));
    }
}

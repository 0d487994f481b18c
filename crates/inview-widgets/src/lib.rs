#![forbid(unsafe_code)]

//! Widgets: pure state projections for inview-based UIs.
//!
//! Nothing here renders. Each module maps domain data to a display-ready
//! state model that a host UI layer styles however it likes.

pub mod category;

pub use category::{Category, CategoryBubble, project_selection};

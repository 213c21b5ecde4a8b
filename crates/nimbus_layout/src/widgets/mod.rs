//! Widget implementations.

pub mod scroll_bar;
pub mod scroll_view;

pub use scroll_bar::ScrollBar;
pub use scroll_view::{Policy, ScrollView, ScrollViewError, ScrollViewEvent};

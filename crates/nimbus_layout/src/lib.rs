//! Nimbus Widget Layer
//!
//! Retained-mode widgets and the pieces they negotiate layout with:
//!
//! - **Actors**: the [`Actor`] trait (preferred-size queries + allocation)
//!   and the [`Scrollable`] capability for scrolling content
//! - **Adjustments**: the [`Adjustment`] range model driving scrollbars
//! - **Scroll view**: a single-child container that surrounds scrollable
//!   content with policy-controlled scrollbars
//!
//! Layout is synchronous, single-threaded, and height-for-width: the host
//! scene graph queries preferred sizes top-down, then hands each actor its
//! final box in one `allocate` call. Nothing in this crate requests a new
//! layout pass from inside one.

pub mod actor;
pub mod adjustment;
pub mod effects;
pub mod widgets;

pub use actor::{Actor, ActorRef, RequestMode, ScrollAdjustments, Scrollable};
pub use adjustment::{Adjustment, AdjustmentRef};
pub use effects::FadeEffect;
pub use widgets::scroll_bar::ScrollBar;
pub use widgets::scroll_view::{Policy, ScrollView, ScrollViewError, ScrollViewEvent};

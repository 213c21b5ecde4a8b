//! Nimbus Core Primitives
//!
//! This crate provides the foundational types shared by every Nimbus crate:
//!
//! - **Geometry**: points, sizes, actor boxes, and edge margins
//! - **Size requests**: the minimum/natural pair used during layout negotiation
//! - **Scroll events**: smooth and discrete wheel/trackpad event model
//!
//! # Example
//!
//! ```rust
//! use nimbus_core::{ActorBox, Margin};
//!
//! let outer = ActorBox::new(0.0, 0.0, 300.0, 200.0);
//! let inner = outer.shrink(Margin::uniform(10.0));
//! assert_eq!(inner.width(), 280.0);
//! assert_eq!(inner.height(), 180.0);
//! ```

pub mod events;
pub mod geometry;

pub use events::{ScrollDelta, ScrollDirection, ScrollEvent};
pub use geometry::{ActorBox, Margin, Point, Size, SizeRequest, TextDirection};

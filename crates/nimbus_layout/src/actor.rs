//! Actor abstraction for layout negotiation.
//!
//! An actor is anything the scene graph can size and place. The protocol is
//! the classic two-phase negotiation: preferred-size queries flow top-down
//! during the layout pass, then every actor receives exactly one `allocate`
//! with its final box.
//!
//! Containers that scroll their content additionally require the
//! [`Scrollable`] capability, which lets them hand the content a pair of
//! adjustments to publish its scroll position through.

use std::cell::RefCell;
use std::rc::Rc;

use nimbus_core::{ActorBox, SizeRequest};

use crate::adjustment::AdjustmentRef;

/// Shared handle to an actor owned elsewhere in the scene graph.
pub type ActorRef = Rc<RefCell<dyn Actor>>;

/// Which axis drives size negotiation for a container.
///
/// Only height-for-width containers exist in this crate; the mode still
/// matters when two mutually constrained queries must pick an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestMode {
    #[default]
    HeightForWidth,
    WidthForHeight,
}

/// The adjustment pair a scroll container hands to its content.
#[derive(Clone)]
pub struct ScrollAdjustments {
    pub horizontal: AdjustmentRef,
    pub vertical: AdjustmentRef,
}

/// Sizing and placement protocol for scene-graph actors.
///
/// `preferred_width`/`preferred_height` take the opposite-axis constraint
/// (`None` = unconstrained) and report a minimum/natural pair. For scrolled
/// content the reported minimum is the size at which no scrollbar is
/// needed; containers rely on that convention.
pub trait Actor {
    fn preferred_width(&self, for_height: Option<f32>) -> SizeRequest;

    fn preferred_height(&self, for_width: Option<f32>) -> SizeRequest;

    /// Receive the final box. Must not trigger a new layout pass.
    fn allocate(&mut self, allocation: ActorBox);

    /// The box last passed to [`Actor::allocate`].
    fn allocation(&self) -> ActorBox;

    /// Show state of the actor itself, independent of any computed
    /// visibility its parent tracks for it.
    fn is_visible(&self) -> bool {
        true
    }

    /// Name used in diagnostics.
    fn debug_name(&self) -> &'static str {
        "actor"
    }

    /// Downcast to the scrollable capability, when the actor has it.
    fn as_scrollable(&mut self) -> Option<&mut dyn Scrollable> {
        None
    }
}

/// Capability for actors whose content can scroll.
///
/// A scroll container calls `set_adjustments` when the actor becomes its
/// child and clears them with `None` when the actor is removed.
pub trait Scrollable: Actor {
    fn set_adjustments(&mut self, adjustments: Option<ScrollAdjustments>);

    fn adjustments(&self) -> Option<ScrollAdjustments>;
}

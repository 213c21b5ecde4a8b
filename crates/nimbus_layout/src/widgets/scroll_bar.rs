//! Scroll bar actor.
//!
//! A scroll bar is a thin actor bound 1:1 to an adjustment. This module
//! covers only what the scroll view needs to size and place one: themed
//! thickness, show state, orientation, and a stored allocation. Trough and
//! thumb rendering, and drag interaction, live in the paint/input layers.

use nimbus_core::{ActorBox, SizeRequest};

use crate::actor::Actor;
use crate::adjustment::AdjustmentRef;

/// Default bar thickness in pixels, used when the theme does not override.
pub const DEFAULT_THICKNESS: f32 = 6.0;

/// A scrollbar actor for one axis.
pub struct ScrollBar {
    adjustment: AdjustmentRef,
    vertical: bool,
    thickness: f32,
    visible: bool,
    allocation: ActorBox,
}

impl ScrollBar {
    /// Create a bar bound to `adjustment`. `vertical` picks the axis the
    /// bar scrolls along.
    pub fn new(adjustment: AdjustmentRef, vertical: bool) -> Self {
        Self {
            adjustment,
            vertical,
            thickness: DEFAULT_THICKNESS,
            visible: true,
            allocation: ActorBox::ZERO,
        }
    }

    pub fn adjustment(&self) -> AdjustmentRef {
        self.adjustment.clone()
    }

    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Override the themed thickness.
    pub fn set_thickness(&mut self, thickness: f32) {
        self.thickness = thickness.max(0.0);
    }

    /// Show-state toggle. Note this is the actor's own state, not the
    /// computed visibility the owning scroll view derives during allocate.
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl Actor for ScrollBar {
    fn preferred_width(&self, _for_height: Option<f32>) -> SizeRequest {
        if self.vertical {
            // Thickness axis: fixed by the theme.
            SizeRequest::fixed(self.thickness)
        } else {
            // Track axis: stretches to whatever the container grants.
            SizeRequest::ZERO
        }
    }

    fn preferred_height(&self, _for_width: Option<f32>) -> SizeRequest {
        if self.vertical {
            SizeRequest::ZERO
        } else {
            SizeRequest::fixed(self.thickness)
        }
    }

    fn allocate(&mut self, allocation: ActorBox) {
        self.allocation = allocation;
    }

    fn allocation(&self) -> ActorBox {
        self.allocation
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn debug_name(&self) -> &'static str {
        "ScrollBar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustment::Adjustment;

    fn bar(vertical: bool) -> ScrollBar {
        ScrollBar::new(Adjustment::default().into_ref(), vertical)
    }

    #[test]
    fn test_vertical_bar_reports_thickness_as_width() {
        let mut b = bar(true);
        b.set_thickness(12.0);
        assert_eq!(b.preferred_width(None), SizeRequest::fixed(12.0));
        assert_eq!(b.preferred_height(None), SizeRequest::ZERO);
    }

    #[test]
    fn test_horizontal_bar_reports_thickness_as_height() {
        let b = bar(false);
        assert_eq!(b.preferred_height(Some(100.0)), SizeRequest::fixed(DEFAULT_THICKNESS));
        assert_eq!(b.preferred_width(Some(100.0)), SizeRequest::ZERO);
    }

    #[test]
    fn test_allocation_is_stored() {
        let mut b = bar(true);
        let box_ = ActorBox::new(284.0, 0.0, 300.0, 200.0);
        b.allocate(box_);
        assert_eq!(b.allocation(), box_);
    }

    #[test]
    fn test_show_state_defaults_visible() {
        let mut b = bar(false);
        assert!(b.is_visible());
        b.hide();
        assert!(!b.is_visible());
        b.show();
        assert!(b.is_visible());
    }
}

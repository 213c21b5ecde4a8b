//! Nimbus Theme Node
//!
//! The box-model side of styling that widgets consume during layout:
//! per-edge padding and border widths, and optional style lengths such as
//! the scroll-view fade offsets.
//!
//! Widgets never do inset arithmetic themselves. They hand their outer
//! allocation and size requests through the theme node, which
//!
//! - derives the **content box** (outer box minus border and padding),
//! - adjusts **for-size constraints** before they are forwarded to children,
//! - adjusts **preferred sizes** on the way back out.
//!
//! # Example
//!
//! ```rust
//! use nimbus_core::{ActorBox, Margin};
//! use nimbus_theme::ThemeNode;
//!
//! let node = ThemeNode::new().with_padding(Margin::uniform(8.0));
//! let content = node.content_box(&ActorBox::new(0.0, 0.0, 100.0, 100.0));
//! assert_eq!(content.width(), 84.0);
//! ```

use nimbus_core::{ActorBox, Margin, SizeRequest};

/// Resolved box-model values for one widget.
///
/// A real style pipeline would compute this from selectors and cascade;
/// here it is constructed directly and attached to the widget.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemeNode {
    padding: Margin,
    border: Margin,
    /// `-fade-offset` style lengths, when the stylesheet sets them.
    hfade_offset: Option<f32>,
    vfade_offset: Option<f32>,
}

impl ThemeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: Margin) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, border: Margin) -> Self {
        self.border = border;
        self
    }

    pub fn with_hfade_offset(mut self, offset: f32) -> Self {
        self.hfade_offset = Some(offset);
        self
    }

    pub fn with_vfade_offset(mut self, offset: f32) -> Self {
        self.vfade_offset = Some(offset);
        self
    }

    /// Combined border + padding offsets per edge.
    pub fn insets(&self) -> Margin {
        self.border + self.padding
    }

    /// Derive the content box from the widget's outer allocation.
    pub fn content_box(&self, outer: &ActorBox) -> ActorBox {
        outer.shrink(self.insets())
    }

    /// Reduce a for-width constraint by the horizontal insets before it is
    /// forwarded to a child. Unconstrained stays unconstrained.
    pub fn adjust_for_width(&self, for_width: Option<f32>) -> Option<f32> {
        for_width.map(|w| (w - self.insets().horizontal()).max(0.0))
    }

    /// Reduce a for-height constraint by the vertical insets.
    pub fn adjust_for_height(&self, for_height: Option<f32>) -> Option<f32> {
        for_height.map(|h| (h - self.insets().vertical()).max(0.0))
    }

    /// Grow a content-level width request by the horizontal insets.
    pub fn adjust_preferred_width(&self, request: SizeRequest) -> SizeRequest {
        let extra = self.insets().horizontal();
        SizeRequest::new(request.minimum + extra, request.natural + extra)
    }

    /// Grow a content-level height request by the vertical insets.
    pub fn adjust_preferred_height(&self, request: SizeRequest) -> SizeRequest {
        let extra = self.insets().vertical();
        SizeRequest::new(request.minimum + extra, request.natural + extra)
    }

    /// Horizontal fade offset, when the style defines one.
    pub fn hfade_offset(&self) -> Option<f32> {
        self.hfade_offset
    }

    /// Vertical fade offset, when the style defines one.
    pub fn vfade_offset(&self) -> Option<f32> {
        self.vfade_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_box_subtracts_border_and_padding() {
        let node = ThemeNode::new()
            .with_padding(Margin::uniform(4.0))
            .with_border(Margin::new(1.0, 2.0, 1.0, 2.0));
        let content = node.content_box(&ActorBox::new(0.0, 0.0, 100.0, 60.0));
        assert_eq!(content, ActorBox::new(6.0, 5.0, 94.0, 55.0));
    }

    #[test]
    fn test_adjust_for_size_keeps_unconstrained() {
        let node = ThemeNode::new().with_padding(Margin::uniform(10.0));
        assert_eq!(node.adjust_for_width(None), None);
        assert_eq!(node.adjust_for_width(Some(100.0)), Some(80.0));
        assert_eq!(node.adjust_for_height(Some(15.0)), Some(0.0));
    }

    #[test]
    fn test_adjust_preferred_adds_insets() {
        let node = ThemeNode::new().with_padding(Margin::new(1.0, 2.0, 3.0, 4.0));
        let adjusted = node.adjust_preferred_width(SizeRequest::new(10.0, 20.0));
        assert_eq!(adjusted, SizeRequest::new(16.0, 26.0));
        let adjusted = node.adjust_preferred_height(SizeRequest::new(10.0, 20.0));
        assert_eq!(adjusted, SizeRequest::new(14.0, 24.0));
    }

    #[test]
    fn test_fade_offsets_default_unset() {
        let node = ThemeNode::new();
        assert_eq!(node.hfade_offset(), None);
        let node = node.with_vfade_offset(32.0);
        assert_eq!(node.vfade_offset(), Some(32.0));
    }
}

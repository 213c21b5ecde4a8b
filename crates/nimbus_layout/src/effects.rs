//! Visual effect attachments.
//!
//! Effects decorate an actor's painted output without taking part in
//! layout. Only the fade effect the scroll view owns lives here; the shader
//! that realizes it belongs to the paint layer.

use nimbus_core::Margin;

/// Fades scrolled content out toward the edges of the view.
///
/// The margins give the fade extent per edge, in pixels. The owning view
/// attaches the effect while any margin is non-zero and drops it when all
/// margins return to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeEffect {
    margins: Margin,
}

impl FadeEffect {
    pub fn new(margins: Margin) -> Self {
        Self { margins }
    }

    pub fn margins(&self) -> Margin {
        self.margins
    }

    pub fn set_margins(&mut self, margins: Margin) {
        self.margins = margins;
    }
}

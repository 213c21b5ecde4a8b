//! Core geometry types for layout negotiation.
//!
//! Actor allocation works in edge coordinates (`ActorBox`) rather than
//! origin/size pairs: layout code spends most of its time carving sub-boxes
//! out of a parent box, and edge arithmetic keeps that branch-free.

// ─────────────────────────────────────────────────────────────────────────────
// Points and sizes
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Actor box
// ─────────────────────────────────────────────────────────────────────────────

/// An axis-aligned allocation box in parent coordinates.
///
/// Stored as edges (`x1`/`y1` top-left, `x2`/`y2` bottom-right) so that
/// sub-box derivation during allocation is plain edge arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActorBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl ActorBox {
    pub const ZERO: ActorBox = ActorBox {
        x1: 0.0,
        y1: 0.0,
        x2: 0.0,
        y2: 0.0,
    };

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a box from an origin and a size.
    pub const fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Shrink the box by a margin on every edge.
    ///
    /// Edges never cross: a margin larger than the box collapses the
    /// affected axis to zero extent at the leading edge.
    pub fn shrink(&self, margin: Margin) -> ActorBox {
        ActorBox {
            x1: self.x1 + margin.left,
            y1: self.y1 + margin.top,
            x2: (self.x2 - margin.right).max(self.x1 + margin.left),
            y2: (self.y2 - margin.bottom).max(self.y1 + margin.top),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Margin
// ─────────────────────────────────────────────────────────────────────────────

/// Per-edge offsets, used for theme insets and fade margins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const ZERO: Margin = Margin {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(amount: f32) -> Self {
        Self {
            top: amount,
            right: amount,
            bottom: amount,
            left: amount,
        }
    }

    /// Sum of the left and right offsets.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom offsets.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

impl std::ops::Add for Margin {
    type Output = Margin;

    fn add(self, other: Margin) -> Margin {
        Margin {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Size request
// ─────────────────────────────────────────────────────────────────────────────

/// The minimum/natural pair reported by a preferred-size query.
///
/// For a scrolled child the minimum is the smallest size at which no
/// scrollbar is needed; the scroll view relies on that convention to decide
/// scrollbar visibility without inspecting the adjustments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeRequest {
    pub minimum: f32,
    pub natural: f32,
}

impl SizeRequest {
    pub const ZERO: SizeRequest = SizeRequest {
        minimum: 0.0,
        natural: 0.0,
    };

    pub const fn new(minimum: f32, natural: f32) -> Self {
        Self { minimum, natural }
    }

    /// A request whose minimum and natural size coincide.
    pub const fn fixed(size: f32) -> Self {
        Self {
            minimum: size,
            natural: size,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text direction
// ─────────────────────────────────────────────────────────────────────────────

/// Horizontal layout direction. Controls which edge is "leading" when
/// placing scrollbars and mirrors horizontal wheel deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::RightToLeft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_from_origin_size() {
        let b = ActorBox::from_origin_size(10.0, 20.0, 100.0, 50.0);
        assert_eq!(b.x2, 110.0);
        assert_eq!(b.y2, 70.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 50.0);
    }

    #[test]
    fn test_shrink_subtracts_each_edge() {
        let b = ActorBox::new(0.0, 0.0, 100.0, 100.0);
        let inner = b.shrink(Margin::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(inner, ActorBox::new(4.0, 1.0, 98.0, 97.0));
    }

    #[test]
    fn test_shrink_never_inverts() {
        let b = ActorBox::new(0.0, 0.0, 10.0, 10.0);
        let inner = b.shrink(Margin::uniform(8.0));
        assert_eq!(inner.width(), 0.0);
        assert_eq!(inner.height(), 0.0);
    }

    #[test]
    fn test_margin_sums() {
        let m = Margin::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.horizontal(), 6.0);
        assert_eq!(m.vertical(), 4.0);
        assert!(!m.is_zero());
        assert!(Margin::ZERO.is_zero());
    }
}

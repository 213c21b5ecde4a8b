//! Scroll event model
//!
//! Wheel and trackpad input as delivered by the platform layer. Discrete
//! events come from clicky wheels and arrow-key emulation; smooth events
//! carry raw per-frame deltas from trackpads and free-spinning wheels.

/// Direction of a discrete scroll step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// The unit delta a discrete step applies to its adjustment:
    /// up/left move toward the lower bound, down/right toward the upper.
    pub fn unit_delta(&self) -> f32 {
        match self {
            ScrollDirection::Up | ScrollDirection::Left => -1.0,
            ScrollDirection::Down | ScrollDirection::Right => 1.0,
        }
    }

    /// Mirror a horizontal direction; vertical directions are unaffected.
    pub fn mirrored(&self) -> ScrollDirection {
        match self {
            ScrollDirection::Left => ScrollDirection::Right,
            ScrollDirection::Right => ScrollDirection::Left,
            other => *other,
        }
    }
}

/// Payload of a scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollDelta {
    /// Continuous trackpad/high-resolution wheel deltas, in pixels.
    Smooth { dx: f32, dy: f32 },
    /// A single clicky-wheel step.
    Discrete(ScrollDirection),
}

/// A wheel/trackpad scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub delta: ScrollDelta,
    /// Set when the platform synthesized this scroll from pointer motion.
    /// Such events are already handled as pointer gestures and must not be
    /// applied a second time as wheel input.
    pub pointer_emulated: bool,
}

impl ScrollEvent {
    pub fn smooth(dx: f32, dy: f32) -> Self {
        Self {
            delta: ScrollDelta::Smooth { dx, dy },
            pointer_emulated: false,
        }
    }

    pub fn discrete(direction: ScrollDirection) -> Self {
        Self {
            delta: ScrollDelta::Discrete(direction),
            pointer_emulated: false,
        }
    }

    pub fn pointer_emulated(mut self) -> Self {
        self.pointer_emulated = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_deltas() {
        assert_eq!(ScrollDirection::Up.unit_delta(), -1.0);
        assert_eq!(ScrollDirection::Left.unit_delta(), -1.0);
        assert_eq!(ScrollDirection::Down.unit_delta(), 1.0);
        assert_eq!(ScrollDirection::Right.unit_delta(), 1.0);
    }

    #[test]
    fn test_mirroring_only_touches_horizontal() {
        assert_eq!(ScrollDirection::Left.mirrored(), ScrollDirection::Right);
        assert_eq!(ScrollDirection::Right.mirrored(), ScrollDirection::Left);
        assert_eq!(ScrollDirection::Up.mirrored(), ScrollDirection::Up);
        assert_eq!(ScrollDirection::Down.mirrored(), ScrollDirection::Down);
    }
}

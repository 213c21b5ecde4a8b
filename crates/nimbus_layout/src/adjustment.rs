//! Adjustment range model.
//!
//! An adjustment holds a scroll position (`value`) inside `[lower, upper]`
//! together with the increments used for stepping and paging. A scrollbar
//! and its scrolled content share one adjustment per axis; either side can
//! move the value and the other follows.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to an adjustment. Layout is single-threaded, so shared
/// ownership is `Rc<RefCell<_>>` rather than anything lock-based.
pub type AdjustmentRef = Rc<RefCell<Adjustment>>;

/// Step increment an adjustment starts with and reverts to when a widget
/// clears its override.
pub const DEFAULT_STEP_INCREMENT: f32 = 10.0;

/// A bounded scroll position with step/page increments.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjustment {
    value: f32,
    lower: f32,
    upper: f32,
    step_increment: f32,
    page_increment: f32,
    page_size: f32,
}

impl Default for Adjustment {
    fn default() -> Self {
        Self {
            value: 0.0,
            lower: 0.0,
            upper: 0.0,
            step_increment: DEFAULT_STEP_INCREMENT,
            page_increment: 0.0,
            page_size: 0.0,
        }
    }
}

impl Adjustment {
    pub fn new(lower: f32, upper: f32, page_size: f32) -> Self {
        Self {
            lower,
            upper,
            page_size,
            ..Self::default()
        }
    }

    /// Wrap an adjustment in the shared handle widgets exchange.
    pub fn into_ref(self) -> AdjustmentRef {
        Rc::new(RefCell::new(self))
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the scroll position, clamped so a whole page stays in range.
    pub fn set_value(&mut self, value: f32) {
        let max = (self.upper - self.page_size).max(self.lower);
        self.value = value.clamp(self.lower, max);
    }

    pub fn lower(&self) -> f32 {
        self.lower
    }

    pub fn upper(&self) -> f32 {
        self.upper
    }

    /// Update the bounds and page size, re-clamping the current value.
    pub fn set_range(&mut self, lower: f32, upper: f32, page_size: f32) {
        self.lower = lower;
        self.upper = upper.max(lower);
        self.page_size = page_size;
        self.set_value(self.value);
    }

    pub fn step_increment(&self) -> f32 {
        self.step_increment
    }

    pub fn set_step_increment(&mut self, step: f32) {
        self.step_increment = step;
    }

    pub fn page_increment(&self) -> f32 {
        self.page_increment
    }

    pub fn set_page_increment(&mut self, page: f32) {
        self.page_increment = page;
    }

    pub fn page_size(&self) -> f32 {
        self.page_size
    }

    /// Apply a wheel delta as a relative movement.
    ///
    /// The delta is scaled by `page_size^(2/3)`: scroll speed grows with
    /// the viewport, but sub-linearly, so large views stay controllable.
    pub fn adjust_for_scroll_event(&mut self, delta: f32) {
        let scroll_unit = self.page_size.max(0.0).powf(2.0 / 3.0);
        self.set_value(self.value + delta * scroll_unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_clamps_to_page() {
        let mut adj = Adjustment::new(0.0, 100.0, 20.0);
        adj.set_value(95.0);
        assert_eq!(adj.value(), 80.0);
        adj.set_value(-5.0);
        assert_eq!(adj.value(), 0.0);
    }

    #[test]
    fn test_page_larger_than_range_pins_to_lower() {
        let mut adj = Adjustment::new(10.0, 30.0, 50.0);
        adj.set_value(25.0);
        assert_eq!(adj.value(), 10.0);
    }

    #[test]
    fn test_scroll_event_uses_page_scroll_unit() {
        // page_size 8 -> scroll unit 8^(2/3) = 4
        let mut adj = Adjustment::new(0.0, 1000.0, 8.0);
        adj.set_value(100.0);
        adj.adjust_for_scroll_event(5.0);
        assert!((adj.value() - 120.0).abs() < 1e-3);
        adj.adjust_for_scroll_event(-3.0);
        assert!((adj.value() - 108.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_event_with_zero_page_is_a_noop() {
        let mut adj = Adjustment::new(0.0, 1000.0, 0.0);
        adj.set_value(100.0);
        adj.adjust_for_scroll_event(5.0);
        assert_eq!(adj.value(), 100.0);
    }

    #[test]
    fn test_set_range_reclamps_value() {
        let mut adj = Adjustment::new(0.0, 1000.0, 10.0);
        adj.set_value(600.0);
        adj.set_range(0.0, 500.0, 10.0);
        assert_eq!(adj.value(), 490.0);
    }
}

//! Scroll view widget.
//!
//! A single-child container for actors implementing [`Scrollable`]. It
//! surrounds the child with a horizontal and a vertical scroll bar and
//! decides per layout pass which of the two must be visible.
//!
//! # Size negotiation
//!
//! The negotiation is height-for-width and deliberately single-pass. Two
//! conventions make that possible without looking inside the adjustments:
//!
//! - A scrolled child reports as its minimum size the size at which no
//!   scrollbar is needed, so overflow can be read off a plain comparison
//!   of the child's minimum against the available extent.
//! - Under the `Automatic` policy the view always reserves room for the
//!   scrollbar in its reported minimum and natural size; whether the bar is
//!   actually needed is only known once the final box arrives in
//!   `allocate`, which corrects the reservation.
//!
//! `allocate` resolves visibility with at most one extra measurement of the
//! child (the "second pass"): reserving the vertical bar narrows the child,
//! which can newly require the horizontal bar. No further iteration is
//! performed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use tracing::{debug, warn};

use nimbus_core::{
    ActorBox, Margin, ScrollDelta, ScrollDirection, ScrollEvent, SizeRequest, TextDirection,
};
use nimbus_theme::ThemeNode;

use crate::actor::{Actor, ActorRef, RequestMode, ScrollAdjustments, Scrollable};
use crate::adjustment::{Adjustment, AdjustmentRef, DEFAULT_STEP_INCREMENT};
use crate::effects::FadeEffect;
use crate::widgets::scroll_bar::ScrollBar;

// ─────────────────────────────────────────────────────────────────────────────
// Policy
// ─────────────────────────────────────────────────────────────────────────────

/// Per-axis rule governing scrollbar visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
    /// Never show the scrollbar.
    Never,
    /// Always show the scrollbar; space is reserved unless overlaid.
    Always,
    /// Show the scrollbar only while the content overflows.
    #[default]
    Automatic,
    /// Visibility and space are managed by a caller outside this widget.
    External,
}

impl Policy {
    /// Whether this policy reserves layout space for its scrollbar.
    fn reserves_space(&self) -> bool {
        matches!(self, Policy::Always | Policy::Automatic)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Events and errors
// ─────────────────────────────────────────────────────────────────────────────

/// State-change notifications emitted by a [`ScrollView`].
///
/// Changes produced by one operation are delivered to each observer as a
/// single batch, so an observer never sees a half-updated visibility pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollViewEvent {
    HScrollbarVisible(bool),
    VScrollbarVisible(bool),
    HScrollbarPolicy(Policy),
    VScrollbarPolicy(Policy),
    MouseScroll(bool),
    OverlayScrollbars(bool),
}

/// Boundary rejections from [`ScrollView`] child management.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScrollViewError {
    #[error("scroll view already has a child")]
    ChildAlreadySet,
    #[error("actor `{actor}` does not implement the scrollable capability")]
    NotScrollable { actor: &'static str },
}

type Observer = Box<dyn FnMut(&[ScrollViewEvent])>;

// ─────────────────────────────────────────────────────────────────────────────
// Scroll view
// ─────────────────────────────────────────────────────────────────────────────

/// A container with scrollbars around a single scrollable child.
///
/// The view exclusively owns its two scrollbar actors and the two
/// adjustments they are bound to; the child is held as a weak reference to
/// an actor owned elsewhere in the scene graph.
pub struct ScrollView {
    child: Option<Weak<RefCell<dyn Actor>>>,

    hadjustment: AdjustmentRef,
    vadjustment: AdjustmentRef,
    hscroll: ScrollBar,
    vscroll: ScrollBar,

    hscrollbar_policy: Policy,
    vscrollbar_policy: Policy,

    /// Last visibility outcome, updated only inside `allocate`.
    hscrollbar_visible: bool,
    vscrollbar_visible: bool,

    row_size: Option<f32>,
    column_size: Option<f32>,

    mouse_scroll: bool,
    reactive: bool,
    overlay_scrollbars: bool,

    fade_effect: Option<FadeEffect>,

    theme_node: ThemeNode,
    text_direction: TextDirection,
    request_mode: RequestMode,
    allocation: ActorBox,
    relayout_queued: bool,

    observers: Vec<Observer>,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollView {
    pub fn new() -> Self {
        let hadjustment = Adjustment::default().into_ref();
        let vadjustment = Adjustment::default().into_ref();
        let hscroll = ScrollBar::new(hadjustment.clone(), false);
        let vscroll = ScrollBar::new(vadjustment.clone(), true);

        Self {
            child: None,
            hadjustment,
            vadjustment,
            hscroll,
            vscroll,
            hscrollbar_policy: Policy::Automatic,
            vscrollbar_policy: Policy::Automatic,
            hscrollbar_visible: true,
            vscrollbar_visible: true,
            row_size: None,
            column_size: None,
            // Mouse scroll is on by default, which requires the view to be
            // reactive so wheel events reach it.
            mouse_scroll: true,
            reactive: true,
            overlay_scrollbars: false,
            fade_effect: None,
            theme_node: ThemeNode::new(),
            text_direction: TextDirection::LeftToRight,
            request_mode: RequestMode::HeightForWidth,
            allocation: ActorBox::ZERO,
            relayout_queued: false,
            observers: Vec::new(),
        }
    }

    // ── Child management ────────────────────────────────────────────────────

    /// Attach `actor` as the scrolled child.
    ///
    /// Only actors with the [`Scrollable`] capability are accepted; the
    /// child receives the view's adjustment pair on success. Rejections
    /// leave the view untouched.
    pub fn add_child(&mut self, actor: &ActorRef) -> Result<(), ScrollViewError> {
        if self.child.as_ref().and_then(Weak::upgrade).is_some() {
            return Err(ScrollViewError::ChildAlreadySet);
        }

        let mut guard = actor.borrow_mut();
        match guard.as_scrollable() {
            Some(scrollable) => {
                scrollable.set_adjustments(Some(ScrollAdjustments {
                    horizontal: self.hadjustment.clone(),
                    vertical: self.vadjustment.clone(),
                }));
                drop(guard);
                self.child = Some(Rc::downgrade(actor));
                self.queue_relayout();
                Ok(())
            }
            None => {
                let name = guard.debug_name();
                warn!(
                    actor = name,
                    "attempting to add an actor that does not implement Scrollable \
                     to a scroll view"
                );
                Err(ScrollViewError::NotScrollable { actor: name })
            }
        }
    }

    /// Detach the scrolled child, clearing its adjustments.
    ///
    /// # Panics
    ///
    /// Passing an actor that is not the current child is a contract
    /// violation and panics.
    pub fn remove_child(&mut self, actor: &ActorRef) {
        let is_child = self
            .child
            .as_ref()
            .is_some_and(|weak| Weak::ptr_eq(weak, &Rc::downgrade(actor)));
        assert!(is_child, "unknown actor removed from scroll view");

        if let Some(scrollable) = actor.borrow_mut().as_scrollable() {
            scrollable.set_adjustments(None);
        }
        self.child = None;
        self.queue_relayout();
    }

    fn child(&self) -> Option<ActorRef> {
        self.child.as_ref().and_then(Weak::upgrade)
    }

    // ── Scrollbar and adjustment access ─────────────────────────────────────

    pub fn hscroll_bar(&self) -> &ScrollBar {
        &self.hscroll
    }

    pub fn hscroll_bar_mut(&mut self) -> &mut ScrollBar {
        &mut self.hscroll
    }

    pub fn vscroll_bar(&self) -> &ScrollBar {
        &self.vscroll
    }

    pub fn vscroll_bar_mut(&mut self) -> &mut ScrollBar {
        &mut self.vscroll
    }

    pub fn hadjustment(&self) -> AdjustmentRef {
        self.hadjustment.clone()
    }

    pub fn vadjustment(&self) -> AdjustmentRef {
        self.vadjustment.clone()
    }

    /// Horizontal scrollbar visibility as computed by the last allocate.
    pub fn hscrollbar_visible(&self) -> bool {
        self.hscrollbar_visible
    }

    /// Vertical scrollbar visibility as computed by the last allocate.
    pub fn vscrollbar_visible(&self) -> bool {
        self.vscrollbar_visible
    }

    // ── Policies and flags ──────────────────────────────────────────────────

    pub fn policy(&self) -> (Policy, Policy) {
        (self.hscrollbar_policy, self.vscrollbar_policy)
    }

    /// Set both axis policies. A no-op set emits nothing and queues no
    /// relayout; a change to either axis queues exactly one relayout and
    /// notifies the changed axes as one batch.
    pub fn set_policy(&mut self, hscroll: Policy, vscroll: Policy) {
        if self.hscrollbar_policy == hscroll && self.vscrollbar_policy == vscroll {
            return;
        }

        let mut events: SmallVec<[ScrollViewEvent; 2]> = SmallVec::new();
        if self.hscrollbar_policy != hscroll {
            self.hscrollbar_policy = hscroll;
            events.push(ScrollViewEvent::HScrollbarPolicy(hscroll));
        }
        if self.vscrollbar_policy != vscroll {
            self.vscrollbar_policy = vscroll;
            events.push(ScrollViewEvent::VScrollbarPolicy(vscroll));
        }
        self.queue_relayout();
        self.notify(&events);
    }

    pub fn mouse_scrolling(&self) -> bool {
        self.mouse_scroll
    }

    pub fn set_mouse_scrolling(&mut self, enabled: bool) {
        if self.mouse_scroll == enabled {
            return;
        }
        self.mouse_scroll = enabled;
        // Wheel events only arrive while the view is reactive.
        if enabled {
            self.reactive = true;
        }
        self.notify(&[ScrollViewEvent::MouseScroll(enabled)]);
    }

    pub fn is_reactive(&self) -> bool {
        self.reactive
    }

    pub fn overlay_scrollbars(&self) -> bool {
        self.overlay_scrollbars
    }

    pub fn set_overlay_scrollbars(&mut self, enabled: bool) {
        if self.overlay_scrollbars == enabled {
            return;
        }
        self.overlay_scrollbars = enabled;
        self.queue_relayout();
        self.notify(&[ScrollViewEvent::OverlayScrollbars(enabled)]);
    }

    // ── Step sizes ──────────────────────────────────────────────────────────

    /// Step increment of the vertical axis.
    pub fn row_size(&self) -> f32 {
        self.vadjustment.borrow().step_increment()
    }

    /// The row-size override currently in force, if any.
    pub fn row_size_override(&self) -> Option<f32> {
        self.row_size
    }

    /// Override the vertical step increment. A negative value clears the
    /// override and reverts the adjustment to its default step.
    pub fn set_row_size(&mut self, row_size: f32) {
        if row_size < 0.0 {
            self.row_size = None;
            self.vadjustment
                .borrow_mut()
                .set_step_increment(DEFAULT_STEP_INCREMENT);
        } else {
            self.row_size = Some(row_size);
            self.vadjustment.borrow_mut().set_step_increment(row_size);
        }
    }

    /// Step increment of the horizontal axis.
    pub fn column_size(&self) -> f32 {
        self.hadjustment.borrow().step_increment()
    }

    /// The column-size override currently in force, if any.
    pub fn column_size_override(&self) -> Option<f32> {
        self.column_size
    }

    /// Override the horizontal step increment; negative clears it.
    pub fn set_column_size(&mut self, column_size: f32) {
        if column_size < 0.0 {
            self.column_size = None;
            self.hadjustment
                .borrow_mut()
                .set_step_increment(DEFAULT_STEP_INCREMENT);
        } else {
            self.column_size = Some(column_size);
            self.hadjustment
                .borrow_mut()
                .set_step_increment(column_size);
        }
    }

    // ── Fade effect ─────────────────────────────────────────────────────────

    /// Configure the edge fade. Any non-zero margin (re)attaches the effect
    /// with the given extents; all-zero margins detach and destroy it.
    pub fn update_fade_effect(&mut self, margins: Margin) {
        if margins.is_zero() {
            self.fade_effect = None;
        } else {
            match &mut self.fade_effect {
                Some(effect) => effect.set_margins(margins),
                None => self.fade_effect = Some(FadeEffect::new(margins)),
            }
        }
    }

    pub fn fade_effect(&self) -> Option<&FadeEffect> {
        self.fade_effect.as_ref()
    }

    // ── Style and environment ───────────────────────────────────────────────

    pub fn theme_node(&self) -> &ThemeNode {
        &self.theme_node
    }

    /// Swap in a freshly computed theme node and re-apply style-driven
    /// state (fade offsets), then queue a relayout.
    pub fn set_theme_node(&mut self, theme_node: ThemeNode) {
        self.theme_node = theme_node;
        self.style_changed();
    }

    /// Re-read style lengths from the current theme node. The vertical fade
    /// offset feeds the top/bottom margins, the horizontal one left/right.
    pub fn style_changed(&mut self) {
        let hfade = self.theme_node.hfade_offset();
        let vfade = self.theme_node.vfade_offset();
        if hfade.is_some() || vfade.is_some() {
            let h = hfade.unwrap_or(0.0);
            let v = vfade.unwrap_or(0.0);
            self.update_fade_effect(Margin::new(v, h, v, h));
        }
        self.queue_relayout();
    }

    pub fn text_direction(&self) -> TextDirection {
        self.text_direction
    }

    pub fn set_text_direction(&mut self, direction: TextDirection) {
        if self.text_direction != direction {
            self.text_direction = direction;
            self.queue_relayout();
        }
    }

    pub fn request_mode(&self) -> RequestMode {
        self.request_mode
    }

    pub fn set_request_mode(&mut self, mode: RequestMode) {
        self.request_mode = mode;
    }

    // ── Relayout queue ──────────────────────────────────────────────────────

    /// Whether a relayout request is pending for the host to service.
    pub fn relayout_queued(&self) -> bool {
        self.relayout_queued
    }

    /// Consume the pending relayout request, if any.
    pub fn take_relayout_request(&mut self) -> bool {
        std::mem::take(&mut self.relayout_queued)
    }

    fn queue_relayout(&mut self) {
        self.relayout_queued = true;
    }

    // ── Observers ───────────────────────────────────────────────────────────

    /// Register an observer for state-change batches. Observers must not
    /// mutate the view from inside the callback; layout is non-reentrant.
    pub fn connect<F>(&mut self, observer: F)
    where
        F: FnMut(&[ScrollViewEvent]) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, events: &[ScrollViewEvent]) {
        if events.is_empty() {
            return;
        }
        for observer in &mut self.observers {
            observer(events);
        }
    }

    // ── Scrollbar thickness helpers ─────────────────────────────────────────

    /// Width the vertical scrollbar would take.
    ///
    /// Queried only while the bar actor's show state is visible; this uses
    /// the previous pass's state to estimate space for the new one, a
    /// deliberate one-step-stale approximation that avoids an iterative
    /// solve.
    fn scrollbar_width(&self, for_height: Option<f32>) -> f32 {
        if self.vscroll.is_visible() {
            self.vscroll.preferred_width(for_height).minimum
        } else {
            0.0
        }
    }

    /// Height the horizontal scrollbar would take; same staleness caveat
    /// as [`Self::scrollbar_width`].
    fn scrollbar_height(&self, for_width: Option<f32>) -> f32 {
        if self.hscroll.is_visible() {
            self.hscroll.preferred_height(for_width).minimum
        } else {
            0.0
        }
    }

    // ── Scroll-event routing ────────────────────────────────────────────────

    /// Route a wheel/trackpad event to the adjustments.
    ///
    /// Returns whether the event was handled. Once mouse scrolling is
    /// enabled every event reports handled, even when it maps to a no-op,
    /// so it does not also scroll an ancestor view.
    pub fn handle_scroll_event(&mut self, event: &ScrollEvent) -> bool {
        if !self.mouse_scroll {
            return false;
        }

        // Pointer-emulated scrolls were already applied as pointer
        // gestures; swallow them to avoid double scrolling.
        if event.pointer_emulated {
            return true;
        }

        let rtl = self.text_direction.is_rtl();
        match event.delta {
            ScrollDelta::Smooth { dx, dy } => {
                let dx = if rtl { -dx } else { dx };
                self.hadjustment.borrow_mut().adjust_for_scroll_event(dx);
                self.vadjustment.borrow_mut().adjust_for_scroll_event(dy);
            }
            ScrollDelta::Discrete(direction) => match direction {
                ScrollDirection::Up | ScrollDirection::Down => {
                    adjust_with_direction(&self.vadjustment, direction);
                }
                ScrollDirection::Left | ScrollDirection::Right => {
                    let direction = if rtl { direction.mirrored() } else { direction };
                    adjust_with_direction(&self.hadjustment, direction);
                }
            },
        }

        true
    }
}

fn adjust_with_direction(adjustment: &AdjustmentRef, direction: ScrollDirection) {
    adjustment
        .borrow_mut()
        .adjust_for_scroll_event(direction.unit_delta());
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout negotiation
// ─────────────────────────────────────────────────────────────────────────────

impl Actor for ScrollView {
    fn preferred_width(&self, for_height: Option<f32>) -> SizeRequest {
        let Some(child) = self.child() else {
            return SizeRequest::ZERO;
        };

        let for_height = self.theme_node.adjust_for_height(for_height);
        let child_request = child.borrow().preferred_width(None);

        // The true minimum would include the horizontal bar's own minimum
        // width, but that is not well defined before allocation; only
        // Never pins the minimum to the child's.
        let minimum = if self.hscrollbar_policy == Policy::Never {
            child_request.minimum
        } else {
            0.0
        };

        let mut request = SizeRequest::new(minimum, child_request.natural);

        // Automatic reserves space for the vertical bar up front; whether
        // it is really needed is only known in allocate, which corrects
        // the reservation.
        let account_for_vscrollbar =
            self.vscrollbar_policy.reserves_space() && !self.overlay_scrollbars;
        if account_for_vscrollbar {
            let sb_width = self.scrollbar_width(for_height);
            request.minimum += sb_width;
            request.natural += sb_width;
        }

        self.theme_node.adjust_preferred_width(request)
    }

    fn preferred_height(&self, for_width: Option<f32>) -> SizeRequest {
        let Some(child) = self.child() else {
            return SizeRequest::ZERO;
        };
        let child = child.borrow();

        let mut for_width = self.theme_node.adjust_for_width(for_width);

        // Probe the child's width request first so its height-for-width
        // path is primed the way a full layout pass would leave it.
        let _ = child.preferred_width(None);

        // preferred_width reserved room for the vertical bar in the width
        // we were given; subtract it back out so the child is measured at
        // the width it will actually receive.
        if self.vscrollbar_policy.reserves_space() {
            let sb_width = self.scrollbar_width(None);
            for_width = for_width.map(|w| (w - sb_width).max(0.0));
        }

        let account_for_hscrollbar =
            self.hscrollbar_policy.reserves_space() && !self.overlay_scrollbars;

        let child_request = child.preferred_height(for_width);

        let minimum = if self.vscrollbar_policy == Policy::Never {
            child_request.minimum
        } else {
            0.0
        };

        let mut request = SizeRequest::new(minimum, child_request.natural);
        if account_for_hscrollbar {
            let sb_height = self.scrollbar_height(for_width);
            request.minimum += sb_height;
            request.natural += sb_height;
        }

        self.theme_node.adjust_preferred_height(request)
    }

    fn allocate(&mut self, allocation: ActorBox) {
        self.allocation = allocation;
        let content_box = self.theme_node.content_box(&allocation);

        let avail_width = content_box.width();
        let avail_height = content_box.height();

        // Thickness pair under mutual constraint; the authoritative axis
        // of the request mode is queried unconstrained.
        let (mut sb_width, mut sb_height) = match self.request_mode {
            RequestMode::HeightForWidth => {
                let width = self.scrollbar_width(None);
                (width, self.scrollbar_height(Some(width)))
            }
            RequestMode::WidthForHeight => {
                let height = self.scrollbar_height(None);
                (self.scrollbar_width(Some(height)), height)
            }
        };

        // Resolve visibility. Start from the assumption that no scrollbar
        // is needed and add bars until nothing overflows; reserving one
        // bar shrinks the space available to the other axis, hence the
        // second pass below.
        let child = self.child();
        let (hscrollbar_visible, vscrollbar_visible) = if let Some(child) = &child {
            let child = child.borrow();
            let child_min_width = child.preferred_width(None).minimum;

            if self.vscrollbar_policy == Policy::Automatic {
                if self.hscrollbar_policy == Policy::Automatic {
                    // Pass one: try without a vertical scrollbar.
                    let child_min_height =
                        child.preferred_height(Some(avail_width)).minimum;
                    let mut vscrollbar = child_min_height > avail_height;
                    let mut hscrollbar = child_min_width
                        > avail_width - if vscrollbar { sb_width } else { 0.0 };
                    vscrollbar = child_min_height
                        > avail_height - if hscrollbar { sb_height } else { 0.0 };

                    // Pass two: the vertical bar narrows the child, which
                    // can change the height request and newly overflow the
                    // horizontal axis. The re-measure keeps the child's
                    // height-for-width state consistent with the box it is
                    // about to receive.
                    if vscrollbar {
                        let _ = child
                            .preferred_height(Some((avail_width - sb_width).max(0.0)));
                        hscrollbar = child_min_width > avail_width - sb_width;
                    }
                    (hscrollbar, vscrollbar)
                } else {
                    let hscrollbar = self.hscrollbar_policy == Policy::Always;

                    // Try without a vertical scrollbar.
                    let child_min_height =
                        child.preferred_height(Some(avail_width)).minimum;
                    let vscrollbar = child_min_height
                        > avail_height - if hscrollbar { sb_height } else { 0.0 };
                    (hscrollbar, vscrollbar)
                }
            } else {
                let vscrollbar = self.vscrollbar_policy == Policy::Always;
                let hscrollbar = if self.hscrollbar_policy == Policy::Automatic {
                    child_min_width > avail_width - if vscrollbar { sb_width } else { 0.0 }
                } else {
                    self.hscrollbar_policy == Policy::Always
                };
                (hscrollbar, vscrollbar)
            }
        } else {
            // No child: visibility is purely policy-driven.
            (
                !matches!(self.hscrollbar_policy, Policy::Never | Policy::External),
                !matches!(self.vscrollbar_policy, Policy::Never | Policy::External),
            )
        };

        let rtl = self.text_direction.is_rtl();

        // Both bars always receive an allocation whether or not they are
        // shown, so toggling visibility later needs no relayout; invisible
        // bars are simply skipped by paint and pick.

        // Vertical scrollbar: flush against the trailing edge (leading in
        // RTL), stopping above the horizontal bar when that one is shown.
        let vscroll_box = {
            let (x1, x2) = if rtl {
                (content_box.x1, content_box.x1 + sb_width)
            } else {
                (content_box.x2 - sb_width, content_box.x2)
            };
            ActorBox::new(
                x1,
                content_box.y1,
                x2,
                content_box.y2 - if hscrollbar_visible { sb_height } else { 0.0 },
            )
        };
        self.vscroll.allocate(vscroll_box);

        // Horizontal scrollbar: along the bottom edge, yielding to the
        // vertical bar on whichever side that one occupies.
        let hscroll_box = {
            let (x1, x2) = if rtl {
                (
                    content_box.x1 + if vscrollbar_visible { sb_width } else { 0.0 },
                    content_box.x2,
                )
            } else {
                (
                    content_box.x1,
                    content_box.x2 - if vscrollbar_visible { sb_width } else { 0.0 },
                )
            };
            ActorBox::new(x1, content_box.y2 - sb_height, x2, content_box.y2)
        };
        self.hscroll.allocate(hscroll_box);

        // Never/External policies and overlay bars reserve no layout
        // space; fold that into the thickness pair so the child box math
        // below stays uniform.
        if matches!(self.hscrollbar_policy, Policy::Never | Policy::External)
            || self.overlay_scrollbars
        {
            sb_height = 0.0;
        }
        if matches!(self.vscrollbar_policy, Policy::Never | Policy::External)
            || self.overlay_scrollbars
        {
            sb_width = 0.0;
        }

        let child_box = {
            let (x1, x2) = if rtl {
                (content_box.x1 + sb_width, content_box.x2)
            } else {
                (content_box.x1, content_box.x2 - sb_width)
            };
            ActorBox::new(x1, content_box.y1, x2, content_box.y2 - sb_height)
        };
        if let Some(child) = &child {
            child.borrow_mut().allocate(child_box);
        }

        // Publish visibility transitions as one batch so observers never
        // see the pair half-updated.
        let mut events: SmallVec<[ScrollViewEvent; 2]> = SmallVec::new();
        if self.hscrollbar_visible != hscrollbar_visible {
            self.hscrollbar_visible = hscrollbar_visible;
            events.push(ScrollViewEvent::HScrollbarVisible(hscrollbar_visible));
        }
        if self.vscrollbar_visible != vscrollbar_visible {
            self.vscrollbar_visible = vscrollbar_visible;
            events.push(ScrollViewEvent::VScrollbarVisible(vscrollbar_visible));
        }
        if !events.is_empty() {
            debug!(
                hscrollbar_visible,
                vscrollbar_visible, "scrollbar visibility changed"
            );
            self.notify(&events);
        }
    }

    fn allocation(&self) -> ActorBox {
        self.allocation
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn debug_name(&self) -> &'static str {
        "ScrollView"
    }
}

impl Drop for ScrollView {
    fn drop(&mut self) {
        // The child outlives the view; hand its adjustments back before
        // ours are dropped with us.
        if let Some(child) = self.child.as_ref().and_then(Weak::upgrade) {
            if let Some(scrollable) = child.borrow_mut().as_scrollable() {
                scrollable.set_adjustments(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scrollable test content with a fixed width request and a pluggable
    /// height-for-width response.
    struct Content {
        width: SizeRequest,
        height: Box<dyn Fn(Option<f32>) -> SizeRequest>,
        adjustments: Option<ScrollAdjustments>,
        allocation: ActorBox,
    }

    impl Content {
        fn fixed(width: SizeRequest, height: SizeRequest) -> Self {
            Self {
                width,
                height: Box::new(move |_| height),
                adjustments: None,
                allocation: ActorBox::ZERO,
            }
        }
    }

    impl Actor for Content {
        fn preferred_width(&self, _for_height: Option<f32>) -> SizeRequest {
            self.width
        }

        fn preferred_height(&self, for_width: Option<f32>) -> SizeRequest {
            (self.height)(for_width)
        }

        fn allocate(&mut self, allocation: ActorBox) {
            self.allocation = allocation;
        }

        fn allocation(&self) -> ActorBox {
            self.allocation
        }

        fn debug_name(&self) -> &'static str {
            "Content"
        }

        fn as_scrollable(&mut self) -> Option<&mut dyn Scrollable> {
            Some(self)
        }
    }

    impl Scrollable for Content {
        fn set_adjustments(&mut self, adjustments: Option<ScrollAdjustments>) {
            self.adjustments = adjustments;
        }

        fn adjustments(&self) -> Option<ScrollAdjustments> {
            self.adjustments.clone()
        }
    }

    /// An actor without the scrollable capability.
    struct Opaque {
        allocation: ActorBox,
    }

    impl Actor for Opaque {
        fn preferred_width(&self, _for_height: Option<f32>) -> SizeRequest {
            SizeRequest::fixed(10.0)
        }

        fn preferred_height(&self, _for_width: Option<f32>) -> SizeRequest {
            SizeRequest::fixed(10.0)
        }

        fn allocate(&mut self, allocation: ActorBox) {
            self.allocation = allocation;
        }

        fn allocation(&self) -> ActorBox {
            self.allocation
        }

        fn debug_name(&self) -> &'static str {
            "Opaque"
        }
    }

    fn content_ref(content: Content) -> ActorRef {
        Rc::new(RefCell::new(content))
    }

    #[test]
    fn test_rejects_non_scrollable_child() {
        let mut view = ScrollView::new();
        let opaque: ActorRef = Rc::new(RefCell::new(Opaque {
            allocation: ActorBox::ZERO,
        }));
        let err = view.add_child(&opaque).unwrap_err();
        assert_eq!(err, ScrollViewError::NotScrollable { actor: "Opaque" });
        assert!(view.child().is_none());
        assert!(!view.relayout_queued());
    }

    #[test]
    fn test_rejects_second_child() {
        let mut view = ScrollView::new();
        let first = content_ref(Content::fixed(
            SizeRequest::fixed(10.0),
            SizeRequest::fixed(10.0),
        ));
        let second = content_ref(Content::fixed(
            SizeRequest::fixed(10.0),
            SizeRequest::fixed(10.0),
        ));
        view.add_child(&first).unwrap();
        assert_eq!(
            view.add_child(&second).unwrap_err(),
            ScrollViewError::ChildAlreadySet
        );
    }

    #[test]
    fn test_child_receives_and_loses_adjustments() {
        let mut view = ScrollView::new();
        let child = content_ref(Content::fixed(
            SizeRequest::fixed(10.0),
            SizeRequest::fixed(10.0),
        ));
        view.add_child(&child).unwrap();
        {
            let mut guard = child.borrow_mut();
            let scrollable = guard.as_scrollable().unwrap();
            let adjustments = scrollable.adjustments().unwrap();
            assert!(Rc::ptr_eq(&adjustments.horizontal, &view.hadjustment()));
            assert!(Rc::ptr_eq(&adjustments.vertical, &view.vadjustment()));
        }
        view.remove_child(&child);
        let mut guard = child.borrow_mut();
        assert!(guard.as_scrollable().unwrap().adjustments().is_none());
    }

    #[test]
    #[should_panic(expected = "unknown actor removed")]
    fn test_removing_unknown_actor_panics() {
        let mut view = ScrollView::new();
        let stranger = content_ref(Content::fixed(
            SizeRequest::fixed(10.0),
            SizeRequest::fixed(10.0),
        ));
        view.remove_child(&stranger);
    }

    #[test]
    fn test_policy_round_trip_and_noop_set() {
        let mut view = ScrollView::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        view.connect(move |events| sink.borrow_mut().extend_from_slice(events));

        view.set_policy(Policy::Never, Policy::Always);
        assert_eq!(view.policy(), (Policy::Never, Policy::Always));
        assert!(view.take_relayout_request());
        assert_eq!(
            *seen.borrow(),
            vec![
                ScrollViewEvent::HScrollbarPolicy(Policy::Never),
                ScrollViewEvent::VScrollbarPolicy(Policy::Always),
            ]
        );

        // Same pair again: no notification, no relayout.
        seen.borrow_mut().clear();
        view.set_policy(Policy::Never, Policy::Always);
        assert!(seen.borrow().is_empty());
        assert!(!view.take_relayout_request());
    }

    #[test]
    fn test_preferred_width_reserves_vertical_bar() {
        let mut view = ScrollView::new();
        view.vscroll_bar_mut().set_thickness(16.0);
        let child = content_ref(Content::fixed(
            SizeRequest::new(100.0, 200.0),
            SizeRequest::fixed(50.0),
        ));
        view.add_child(&child).unwrap();

        // Automatic: minimum deferred to allocate, vertical bar reserved.
        let request = view.preferred_width(None);
        assert_eq!(request, SizeRequest::new(16.0, 216.0));

        // Never on the horizontal axis pins the minimum to the child's.
        view.set_policy(Policy::Never, Policy::Automatic);
        assert_eq!(view.preferred_width(None), SizeRequest::new(116.0, 216.0));

        // External/Never vertical policies reserve nothing.
        view.set_policy(Policy::Never, Policy::External);
        assert_eq!(view.preferred_width(None), SizeRequest::new(100.0, 200.0));

        // Overlay bars reserve nothing either.
        view.set_policy(Policy::Automatic, Policy::Automatic);
        view.set_overlay_scrollbars(true);
        assert_eq!(view.preferred_width(None), SizeRequest::new(0.0, 200.0));
    }

    #[test]
    fn test_preferred_height_measures_child_at_final_width() {
        let mut view = ScrollView::new();
        view.vscroll_bar_mut().set_thickness(16.0);
        view.hscroll_bar_mut().set_thickness(16.0);

        // The child must be measured against the width it will actually
        // receive: the given 200 minus the reserved vertical bar.
        let child = content_ref(Content {
            width: SizeRequest::fixed(100.0),
            height: Box::new(|for_width| {
                assert_eq!(for_width, Some(184.0));
                SizeRequest::new(50.0, 80.0)
            }),
            adjustments: None,
            allocation: ActorBox::ZERO,
        });
        view.add_child(&child).unwrap();

        let request = view.preferred_height(Some(200.0));
        // Horizontal bar reserved on top of the child's natural height.
        assert_eq!(request, SizeRequest::new(16.0, 96.0));
    }

    #[test]
    fn test_preferred_height_unconstrained_stays_unconstrained() {
        let mut view = ScrollView::new();
        let child = content_ref(Content {
            width: SizeRequest::fixed(100.0),
            height: Box::new(|for_width| {
                assert_eq!(for_width, None);
                SizeRequest::new(50.0, 80.0)
            }),
            adjustments: None,
            allocation: ActorBox::ZERO,
        });
        view.add_child(&child).unwrap();
        let _ = view.preferred_height(None);
    }

    #[test]
    fn test_no_size_request_without_child() {
        let view = ScrollView::new();
        assert_eq!(view.preferred_width(Some(100.0)), SizeRequest::ZERO);
        assert_eq!(view.preferred_height(Some(100.0)), SizeRequest::ZERO);
    }

    #[test]
    fn test_childless_allocate_is_policy_driven() {
        let mut view = ScrollView::new();
        view.set_policy(Policy::Never, Policy::External);
        view.allocate(ActorBox::new(0.0, 0.0, 100.0, 100.0));
        assert!(!view.hscrollbar_visible());
        assert!(!view.vscrollbar_visible());

        view.set_policy(Policy::Always, Policy::Automatic);
        view.allocate(ActorBox::new(0.0, 0.0, 100.0, 100.0));
        assert!(view.hscrollbar_visible());
        assert!(view.vscrollbar_visible());
    }

    #[test]
    fn test_fade_effect_lifecycle() {
        let mut view = ScrollView::new();
        assert!(view.fade_effect().is_none());

        view.update_fade_effect(Margin::uniform(24.0));
        assert_eq!(view.fade_effect().unwrap().margins(), Margin::uniform(24.0));

        // All-zero margins destroy the effect.
        view.update_fade_effect(Margin::ZERO);
        assert!(view.fade_effect().is_none());

        // A single non-zero edge recreates it.
        view.update_fade_effect(Margin::new(8.0, 0.0, 0.0, 0.0));
        assert_eq!(
            view.fade_effect().unwrap().margins(),
            Margin::new(8.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_style_changed_applies_fade_offsets() {
        let mut view = ScrollView::new();
        view.set_theme_node(ThemeNode::new().with_vfade_offset(32.0));
        assert_eq!(
            view.fade_effect().unwrap().margins(),
            Margin::new(32.0, 0.0, 32.0, 0.0)
        );
        assert!(view.take_relayout_request());
    }

    #[test]
    fn test_disabled_mouse_scroll_leaves_event_unhandled() {
        let mut view = ScrollView::new();
        view.set_mouse_scrolling(false);
        assert!(!view.handle_scroll_event(&ScrollEvent::smooth(5.0, 5.0)));
    }

    #[test]
    fn test_pointer_emulated_scroll_is_swallowed() {
        let mut view = ScrollView::new();
        view.hadjustment().borrow_mut().set_range(0.0, 1000.0, 8.0);
        view.hadjustment().borrow_mut().set_value(100.0);

        let handled =
            view.handle_scroll_event(&ScrollEvent::smooth(5.0, 0.0).pointer_emulated());
        assert!(handled);
        assert_eq!(view.hadjustment().borrow().value(), 100.0);
    }

    #[test]
    fn test_row_and_column_size_override_and_unset() {
        let mut view = ScrollView::new();
        assert_eq!(view.row_size(), DEFAULT_STEP_INCREMENT);

        view.set_row_size(5.0);
        assert_eq!(view.row_size(), 5.0);
        assert_eq!(view.row_size_override(), Some(5.0));
        assert_eq!(view.vadjustment().borrow().step_increment(), 5.0);

        view.set_column_size(7.0);
        assert_eq!(view.column_size(), 7.0);

        // Negative unsets and reverts to the adjustment default.
        view.set_row_size(-1.0);
        assert_eq!(view.row_size(), DEFAULT_STEP_INCREMENT);
        assert_eq!(view.row_size_override(), None);
        view.set_column_size(-1.0);
        assert_eq!(view.column_size(), DEFAULT_STEP_INCREMENT);
        assert_eq!(view.column_size_override(), None);
    }

    #[test]
    fn test_enabling_mouse_scroll_forces_reactive() {
        let mut view = ScrollView::new();
        assert!(view.is_reactive());
        view.set_mouse_scrolling(false);
        view.set_mouse_scrolling(true);
        assert!(view.is_reactive());
    }

    #[test]
    fn test_drop_detaches_child_adjustments() {
        let child = content_ref(Content::fixed(
            SizeRequest::fixed(10.0),
            SizeRequest::fixed(10.0),
        ));
        {
            let mut view = ScrollView::new();
            view.add_child(&child).unwrap();
        }
        let mut guard = child.borrow_mut();
        assert!(guard.as_scrollable().unwrap().adjustments().is_none());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger controller: the hover state machine behind one tooltip.
//!
//! ## States
//!
//! A trigger is either [`Hidden`](Visibility::Hidden) or [`Visible`](Visibility::Visible).
//!
//! - `pointer_enter`: cancels any pending hide and measures the anchor. A hidden trigger
//!   becomes visible; a visible one re-captures its anchor. If the anchor cannot be measured,
//!   nothing changes.
//! - `pointer_over`: on a visible trigger, cancels a pending hide. On a hidden trigger it runs
//!   the enter logic, which recovers hover lost e.g. after scrolling.
//! - `pointer_leave`: schedules a hide after the grace window. Hovering the anchor or the
//!   overlay before the deadline cancels it.
//!
//! The overlay body reaches the timer through an explicit [`HideHandle`], so moving the
//! pointer from the anchor onto the overlay keeps the tooltip open.
//!
//! Handlers lifted off the wrapped element run first, exactly once per event.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_tooltip::config::TooltipConfig;
//! use understory_tooltip::rewrite::rewrite;
//! use understory_tooltip::trigger::{Transition, TriggerController};
//! use understory_tooltip::types::{Element, Node, PointerEvent};
//!
//! let tree = rewrite(&[Node::from(Element::new("span").hint("help").text("?"))]).unwrap();
//! let mut c = TriggerController::new(tree[0].as_trigger().unwrap(), &TooltipConfig::default());
//!
//! let anchor = Rect::from_origin_size((100.0, 50.0), (40.0, 20.0));
//! assert_eq!(c.pointer_enter(&PointerEvent::at(0), || Some(anchor)), Some(Transition::Shown));
//! assert!(c.layout(|| Some(Size::new(60.0, 24.0))));
//! let view = c.overlay_view().unwrap();
//! assert_eq!((view.geometry.top, view.geometry.left), (70.0, 90.0));
//!
//! c.pointer_leave(&PointerEvent::at(1_000));
//! assert_eq!(c.poll(1_249), None);
//! assert_eq!(c.poll(1_250), Some(Transition::Hidden));
//! ```

use kurbo::{Rect, Size};
use tracing::{debug, trace};

use crate::config::TooltipConfig;
use crate::position::{Placement, measurable};
use crate::render::OverlayView;
use crate::timer::{HideTimer, TimerToken};
use crate::types::{Element, PointerEvent, PointerHandlers, Title, TriggerId, TriggerNode};

/// Whether a trigger's overlay is shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    /// No overlay.
    #[default]
    Hidden,
    /// Overlay mounted in the overlay layer.
    Visible,
}

/// A visibility change produced by an event or a timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The trigger went from hidden to visible.
    Shown,
    /// The trigger went from visible to hidden.
    Hidden,
}

/// Per-trigger hover state.
#[derive(Clone, Debug)]
pub struct TriggerController {
    id: TriggerId,
    title: Title,
    handlers: PointerHandlers,
    anchor: Element,
    visibility: Visibility,
    anchor_rect: Option<Rect>,
    placement: Option<Placement>,
    timer: HideTimer,
    hide_delay_ms: u64,
    fade_in_ms: u64,
}

impl TriggerController {
    /// Mount a controller for `node`.
    pub fn new(node: &TriggerNode, config: &TooltipConfig) -> Self {
        Self {
            id: node.id,
            title: node.title.clone(),
            handlers: node.handlers.clone(),
            anchor: (*node.child).clone(),
            visibility: Visibility::Hidden,
            anchor_rect: None,
            placement: None,
            timer: HideTimer::new(),
            hide_delay_ms: config.hide_delay_ms,
            fade_in_ms: config.fade_in_ms,
        }
    }

    /// Refresh title, handlers and anchor content from a new render pass.
    ///
    /// Hover state is kept. A visible overlay whose title changed is measured again.
    pub fn update(&mut self, node: &TriggerNode) {
        debug_assert_eq!(node.id, self.id, "controllers are keyed by trigger id");
        if self.title != node.title {
            self.title = node.title.clone();
            if let (Some(rect), Some(_)) = (self.anchor_rect, self.placement) {
                self.placement = Some(Placement::initial(rect));
            }
        }
        self.handlers = node.handlers.clone();
        self.anchor = (*node.child).clone();
    }

    /// The trigger id.
    pub fn id(&self) -> TriggerId {
        self.id
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns true if the overlay is shown.
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Anchor geometry captured by the last successful show.
    pub fn anchor_rect(&self) -> Option<Rect> {
        self.anchor_rect
    }

    /// Placement of the visible overlay.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Deadline of the pending hide, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    /// Returns true if a hide is pending.
    pub fn hide_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Pointer entered the anchor.
    ///
    /// `measure` is called at most once, to read the anchor's live rectangle.
    pub fn pointer_enter<F>(&mut self, event: &PointerEvent, measure: F) -> Option<Transition>
    where
        F: FnOnce() -> Option<Rect>,
    {
        self.handlers.fire_enter(event);
        self.show(measure)
    }

    /// Pointer moved onto the anchor or one of its descendants.
    pub fn pointer_over<F>(&mut self, event: &PointerEvent, measure: F) -> Option<Transition>
    where
        F: FnOnce() -> Option<Rect>,
    {
        self.handlers.fire_over(event);
        match self.visibility {
            Visibility::Visible => {
                self.timer.cancel();
                None
            }
            Visibility::Hidden => self.show(measure),
        }
    }

    /// Pointer left the anchor.
    pub fn pointer_leave(&mut self, event: &PointerEvent) {
        self.handlers.fire_leave(event);
        self.hide_handle().schedule_hide(event.timestamp);
    }

    /// Pointer entered the overlay body.
    pub fn overlay_enter(&mut self) {
        self.hide_handle().cancel_hide();
    }

    /// Pointer left the overlay body.
    pub fn overlay_leave(&mut self, now: u64) {
        self.hide_handle().schedule_hide(now);
    }

    /// Hide control for whatever renders the overlay body.
    pub fn hide_handle(&mut self) -> HideHandle<'_> {
        HideHandle {
            id: self.id,
            visible: self.is_visible(),
            delay: self.hide_delay_ms,
            timer: &mut self.timer,
        }
    }

    /// Apply the pending hide if its deadline has passed.
    pub fn poll(&mut self, now: u64) -> Option<Transition> {
        if self.timer.poll(now) {
            self.hide()
        } else {
            None
        }
    }

    /// Apply the pending hide identified by `token`.
    ///
    /// For hosts whose timers call back once per scheduled timeout. Stale tokens are ignored.
    pub fn fire_timer(&mut self, token: TimerToken) -> Option<Transition> {
        if self.timer.fire(token) {
            self.hide()
        } else {
            trace!(trigger = self.id.0, "ignoring stale hide timer");
            None
        }
    }

    /// Second layout pass: measure the mounted overlay and fix its horizontal offset.
    ///
    /// Returns true if the overlay became placed by this call.
    pub fn layout<F>(&mut self, measure: F) -> bool
    where
        F: FnOnce() -> Option<Size>,
    {
        let (Some(anchor), Some(placement)) = (self.anchor_rect, self.placement.as_mut()) else {
            return false;
        };
        if placement.is_placed() {
            return false;
        }
        let Some(size) = measure() else {
            trace!(trigger = self.id.0, "overlay not measurable yet");
            return false;
        };
        placement.settle(anchor, size);
        placement.is_placed()
    }

    /// Tear down: release the pending hide and drop the overlay.
    ///
    /// Returns true if a pending hide was released.
    pub fn unmount(&mut self) -> bool {
        let released = self.timer.cancel();
        self.visibility = Visibility::Hidden;
        self.placement = None;
        trace!(trigger = self.id.0, released, "trigger unmounted");
        released
    }

    /// The wrapped element as it should render: no hint, no hint template, no handlers of its
    /// own (the trigger owns them).
    pub fn render_anchor(&self) -> &Element {
        &self.anchor
    }

    /// The overlay to mount, while visible.
    pub fn overlay_view(&self) -> Option<OverlayView> {
        let placement = self.placement.filter(|_| self.is_visible())?;
        Some(OverlayView {
            trigger: self.id,
            geometry: placement.geometry(),
            opacity: placement.opacity(),
            fade_in_ms: self.fade_in_ms,
            content: self.title.to_nodes(),
        })
    }

    fn show<F>(&mut self, measure: F) -> Option<Transition>
    where
        F: FnOnce() -> Option<Rect>,
    {
        self.timer.cancel();
        let Some(rect) = measure().and_then(measurable) else {
            debug!(trigger = self.id.0, "anchor geometry unavailable");
            return None;
        };
        if self.anchor_rect != Some(rect) || self.placement.is_none() {
            self.placement = Some(Placement::initial(rect));
        }
        self.anchor_rect = Some(rect);
        match self.visibility {
            Visibility::Hidden => {
                self.visibility = Visibility::Visible;
                debug!(trigger = self.id.0, "tooltip shown");
                Some(Transition::Shown)
            }
            Visibility::Visible => None,
        }
    }

    fn hide(&mut self) -> Option<Transition> {
        self.placement = None;
        match self.visibility {
            Visibility::Visible => {
                self.visibility = Visibility::Hidden;
                debug!(trigger = self.id.0, "tooltip hidden");
                Some(Transition::Hidden)
            }
            Visibility::Hidden => None,
        }
    }
}

/// Hide control handed to an overlay body.
///
/// Lets the overlay keep its trigger open while hovered and start the grace window when the
/// pointer leaves it, without any shared ambient state.
#[derive(Debug)]
pub struct HideHandle<'a> {
    id: TriggerId,
    visible: bool,
    delay: u64,
    timer: &'a mut HideTimer,
}

impl HideHandle<'_> {
    /// Cancel the pending hide. Returns true if one was pending.
    pub fn cancel_hide(&mut self) -> bool {
        self.timer.cancel()
    }

    /// Schedule a hide after the grace window, replacing any pending one.
    ///
    /// Returns `None` without scheduling if the trigger is already hidden.
    pub fn schedule_hide(&mut self, now: u64) -> Option<TimerToken> {
        if !self.visible {
            trace!(trigger = self.id.0, "not scheduling hide for hidden trigger");
            return None;
        }
        Some(self.timer.schedule(now, self.delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    use crate::position::OverlayGeometry;
    use crate::rewrite::rewrite;
    use crate::types::Node;

    #[derive(Default)]
    struct Calls {
        enter: Rc<Cell<u32>>,
        over: Rc<Cell<u32>>,
        leave: Rc<Cell<u32>>,
    }

    fn counted(el: Element, calls: &Calls) -> Element {
        let (e, o, l) = (calls.enter.clone(), calls.over.clone(), calls.leave.clone());
        el.on_pointer_enter(move |_| e.set(e.get() + 1))
            .on_pointer_over(move |_| o.set(o.get() + 1))
            .on_pointer_leave(move |_| l.set(l.get() + 1))
    }

    fn controller(el: Element) -> TriggerController {
        let tree = rewrite(&[Node::from(el)]).unwrap();
        TriggerController::new(tree[0].as_trigger().unwrap(), &TooltipConfig::default())
    }

    fn anchor() -> Option<Rect> {
        Some(Rect::from_origin_size((100.0, 50.0), (40.0, 20.0)))
    }

    fn ev(t: u64) -> PointerEvent {
        PointerEvent::at(t)
    }

    #[test]
    fn enter_shows_below_anchor() {
        let mut c = controller(Element::new("span").hint("help"));
        assert_eq!(c.pointer_enter(&ev(0), anchor), Some(Transition::Shown));
        assert!(c.is_visible());
        let first = c.overlay_view().unwrap();
        assert_eq!(first.geometry.top, 70.0);
        assert!(first.geometry.left >= 0.0);
        assert_eq!(first.opacity, 0.0);

        assert!(c.layout(|| Some(Size::new(60.0, 20.0))));
        let placed = c.overlay_view().unwrap();
        assert_eq!(placed.geometry, OverlayGeometry { top: 70.0, left: 90.0 });
        assert_eq!(placed.opacity, 1.0);
        // Already placed: no further work.
        assert!(!c.layout(|| Some(Size::new(10.0, 10.0))));
    }

    #[test]
    fn unmeasurable_anchor_stays_hidden() {
        let calls = Calls::default();
        let mut c = controller(counted(Element::new("span").hint("help"), &calls));
        assert_eq!(c.pointer_enter(&ev(0), || None), None);
        assert!(!c.is_visible());
        assert!(c.overlay_view().is_none());
        assert_eq!(
            c.pointer_over(&ev(1), || Some(Rect::new(0.0, f64::NAN, 1.0, 1.0))),
            None
        );
        assert!(!c.is_visible());
        // Handlers still ran.
        assert_eq!(calls.enter.get(), 1);
        assert_eq!(calls.over.get(), 1);
    }

    // An inverted rectangle has a negative size and is not a usable anchor.
    #[test]
    fn inverted_anchor_stays_hidden() {
        let mut c = controller(Element::new("span").hint("help"));
        let inverted = Rect::new(140.0, 70.0, 100.0, 50.0);
        assert_eq!(c.pointer_enter(&ev(0), || Some(inverted)), None);
        assert!(!c.is_visible());
        assert_eq!(c.anchor_rect(), None);
        assert_eq!(c.pointer_enter(&ev(1), anchor), Some(Transition::Shown));
    }

    // Leave, then hover again inside the grace window: never hidden.
    #[test]
    fn hover_resumed_before_deadline_keeps_visible() {
        let mut c = controller(Element::new("span").hint("help"));
        c.pointer_enter(&ev(0), anchor);
        c.pointer_leave(&ev(1_000));
        assert!(c.is_visible());
        assert_eq!(c.poll(1_100), None);
        assert_eq!(c.pointer_over(&ev(1_100), anchor), None);
        assert!(!c.hide_pending());
        assert_eq!(c.poll(5_000), None);
        assert!(c.is_visible());
    }

    #[test]
    fn leave_hides_only_after_grace_window() {
        let mut c = controller(Element::new("span").hint("help"));
        c.pointer_enter(&ev(0), anchor);
        c.pointer_leave(&ev(1_000));
        assert_eq!(c.next_deadline(), Some(1_250));
        assert_eq!(c.poll(1_249), None);
        assert!(c.is_visible());
        assert_eq!(c.poll(1_250), Some(Transition::Hidden));
        assert!(c.overlay_view().is_none());
    }

    // Over on a hidden trigger shows it but does not replay the original enter handler.
    #[test]
    fn over_on_hidden_acts_as_enter() {
        let calls = Calls::default();
        let mut c = controller(counted(Element::new("span").hint("help"), &calls));
        assert_eq!(c.pointer_over(&ev(0), anchor), Some(Transition::Shown));
        assert_eq!(calls.over.get(), 1);
        assert_eq!(calls.enter.get(), 0);
    }

    #[test]
    fn original_handlers_fire_once_per_event() {
        let calls = Calls::default();
        let mut c = controller(counted(Element::new("span").hint("help"), &calls));
        c.pointer_enter(&ev(0), anchor);
        c.pointer_over(&ev(1), anchor);
        c.pointer_leave(&ev(2));
        c.pointer_over(&ev(3), anchor);
        assert_eq!(
            (calls.enter.get(), calls.over.get(), calls.leave.get()),
            (1, 2, 1)
        );
    }

    // Anchor → overlay transit: leaving the anchor schedules a hide, entering the overlay cancels.
    #[test]
    fn overlay_hover_keeps_tooltip_open() {
        let mut c = controller(Element::new("span").hint("help"));
        c.pointer_enter(&ev(0), anchor);
        c.pointer_leave(&ev(100));
        c.overlay_enter();
        assert_eq!(c.poll(10_000), None);
        assert!(c.is_visible());

        c.overlay_leave(10_000);
        assert_eq!(c.poll(10_249), None);
        assert_eq!(c.poll(10_250), Some(Transition::Hidden));
    }

    #[test]
    fn reenter_recaptures_moved_anchor() {
        let mut c = controller(Element::new("span").hint("help"));
        c.pointer_enter(&ev(0), anchor);
        c.layout(|| Some(Size::new(60.0, 20.0)));

        // Same anchor: the settled placement is kept.
        assert_eq!(c.pointer_enter(&ev(1), anchor), None);
        assert!(c.placement().unwrap().is_placed());

        // Moved anchor (e.g. after scrolling): back to the first pass.
        let moved = Rect::from_origin_size((100.0, 10.0), (40.0, 20.0));
        assert_eq!(c.pointer_enter(&ev(2), || Some(moved)), None);
        assert_eq!(c.placement(), Some(Placement::Pending { top: 30.0 }));
        assert_eq!(c.anchor_rect(), Some(moved));

        // A failed measurement while visible keeps the previous anchor.
        c.pointer_enter(&ev(3), || None);
        assert!(c.is_visible());
        assert_eq!(c.anchor_rect(), Some(moved));
    }

    #[test]
    fn unmount_releases_pending_hide() {
        let mut c = controller(Element::new("span").hint("help"));
        c.pointer_enter(&ev(0), anchor);
        c.pointer_leave(&ev(10));
        assert!(c.unmount());
        assert!(!c.is_visible());
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.poll(1_000), None);
        assert!(!c.unmount());
    }

    #[test]
    fn stale_timer_tokens_are_ignored() {
        let mut c = controller(Element::new("span").hint("help"));
        c.pointer_enter(&ev(0), anchor);
        let first = c.hide_handle().schedule_hide(10).unwrap();
        let second = c.hide_handle().schedule_hide(20).unwrap();
        assert_eq!(c.fire_timer(first), None);
        assert!(c.is_visible());
        assert_eq!(c.fire_timer(second), Some(Transition::Hidden));
    }

    #[test]
    fn hidden_trigger_does_not_schedule() {
        let mut c = controller(Element::new("span").hint("help"));
        assert_eq!(c.hide_handle().schedule_hide(0), None);
        c.pointer_leave(&ev(0));
        assert!(!c.hide_pending());
        assert!(!c.hide_handle().cancel_hide());
    }

    #[test]
    fn template_is_rendered_instead_of_hint() {
        let mut c = controller(
            Element::new("p")
                .hint("This is the way")
                .hint_template([Node::from(Element::new("h1").text("THIS IS THE WAY"))]),
        );
        c.pointer_enter(&ev(0), anchor);
        let view = c.overlay_view().unwrap();
        assert_eq!(
            view.content,
            vec![Node::from(Element::new("h1").text("THIS IS THE WAY"))]
        );
    }

    #[test]
    fn anchor_renders_without_hint_or_handlers() {
        let calls = Calls::default();
        let c = controller(counted(
            Element::new("span").attr("style", "color: red").hint("help"),
            &calls,
        ));
        let el = c.render_anchor();
        assert_eq!(el.hint, None);
        assert!(el.handlers.is_empty());
        assert_eq!(el.get_attr("style"), Some("color: red"));
    }

    #[test]
    fn title_change_remeasures_visible_overlay() {
        let mut c = controller(Element::new("span").hint("old"));
        c.pointer_enter(&ev(0), anchor);
        c.layout(|| Some(Size::new(60.0, 20.0)));
        let tree = rewrite(&[Node::from(Element::new("span").hint("a longer title"))]).unwrap();
        c.update(tree[0].as_trigger().unwrap());
        assert!(c.is_visible());
        assert!(!c.placement().unwrap().is_placed());
        assert_eq!(
            c.overlay_view().unwrap().content,
            vec![Node::text("a longer title")]
        );
    }
}

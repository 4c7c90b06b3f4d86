// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tooltip host: one per tooltip-enabled subtree.
//!
//! ## Frame loop
//!
//! 1) [`Tooltip::render`] the subtree's children each pass. Hinting elements come back as
//!    triggers; the host mounts a controller for new ones, refreshes existing ones, and
//!    unmounts those that disappeared (releasing their timers).
//! 2) Route pointer input, either per trigger ([`pointer_enter`](Tooltip::pointer_enter),
//!    [`overlay_leave`](Tooltip::overlay_leave), …) or as a hover path with
//!    [`pointer_move`](Tooltip::pointer_move).
//! 3) [`tick`](Tooltip::tick) with the current time; [`next_deadline`](Tooltip::next_deadline)
//!    tells an event loop when it next needs to.
//! 4) [`layout`](Tooltip::layout) after overlays mount, so each can be measured and centered.
//! 5) Inject [`portal`](Tooltip::portal) at the root of the page.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_tooltip::tooltip::{Measure, Tooltip};
//! use understory_tooltip::types::{Element, Node, PointerEvent, TriggerId};
//!
//! struct Page;
//! impl Measure for Page {
//!     fn anchor_rect(&self, _: TriggerId) -> Option<Rect> {
//!         Some(Rect::from_origin_size((100.0, 50.0), (40.0, 20.0)))
//!     }
//!     fn overlay_size(&self, _: TriggerId) -> Option<Size> {
//!         Some(Size::new(60.0, 24.0))
//!     }
//! }
//!
//! let mut tooltip = Tooltip::new();
//! let tree = tooltip
//!     .render(&[Node::from(Element::new("span").hint("help").text("?"))])
//!     .unwrap();
//! let id = tree[0].as_trigger().unwrap().id;
//!
//! tooltip.pointer_enter(id, &PointerEvent::at(0), &Page).unwrap();
//! tooltip.layout(&Page);
//! let layer = tooltip.portal();
//! assert_eq!(layer.get(id).unwrap().geometry.left, 90.0);
//!
//! tooltip.pointer_leave(id, &PointerEvent::at(10)).unwrap();
//! assert_eq!(tooltip.next_deadline(), Some(260));
//! assert_eq!(tooltip.tick(260), vec![id]);
//! assert!(tooltip.portal().is_empty());
//! ```

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use tracing::{debug, trace};

use crate::config::TooltipConfig;
use crate::error::{Error, Result};
use crate::hover::{HoverEvent, HoverState, HoverTarget};
use crate::portal::OverlayLayer;
use crate::rewrite::{rewrite_from, triggers};
use crate::timer::TimerToken;
use crate::trigger::{HideHandle, Transition, TriggerController};
use crate::types::{Node, PointerEvent, TriggerId};

/// Live geometry supplied by the host's layout system.
pub trait Measure {
    /// The anchor's current rectangle in root coordinates, or `None` if it is not mounted or
    /// has no box.
    fn anchor_rect(&self, id: TriggerId) -> Option<Rect>;
    /// The mounted overlay's size, or `None` if it has not been laid out yet.
    fn overlay_size(&self, id: TriggerId) -> Option<Size>;
}

/// Tooltip host for one subtree.
#[derive(Debug, Default)]
pub struct Tooltip {
    config: TooltipConfig,
    controllers: BTreeMap<TriggerId, TriggerController>,
    hover: HoverState<HoverTarget>,
}

impl Tooltip {
    /// Create a host with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with `config`.
    pub fn with_config(config: TooltipConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Rewrite `children` and reconcile controllers with the triggers found.
    ///
    /// # Errors
    ///
    /// [`Error::IdsExhausted`] if `children` holds more hinting elements than ids remain after
    /// the configured first id. Mounted controllers are left untouched in that case.
    pub fn render(&mut self, children: &[Node]) -> Result<Vec<Node>> {
        let (out, _) = rewrite_from(children, self.config.first_id)?;
        let mut live = BTreeSet::new();
        for t in triggers(&out) {
            live.insert(t.id);
            match self.controllers.get_mut(&t.id) {
                Some(c) => c.update(t),
                None => {
                    trace!(trigger = t.id.0, "trigger mounted");
                    self.controllers
                        .insert(t.id, TriggerController::new(t, &self.config));
                }
            }
        }
        self.controllers.retain(|id, c| {
            if live.contains(id) {
                return true;
            }
            c.unmount();
            false
        });
        self.hover.forget(|t| !live.contains(&t.trigger()));
        Ok(out)
    }

    /// Number of mounted triggers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Returns true if no trigger is mounted.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// The controller of `id`.
    pub fn controller(&self, id: TriggerId) -> Option<&TriggerController> {
        self.controllers.get(&id)
    }

    /// Returns true if `id` is mounted and visible.
    pub fn is_visible(&self, id: TriggerId) -> bool {
        self.controllers.get(&id).is_some_and(TriggerController::is_visible)
    }

    /// Route a pointer-enter on the anchor of `id`.
    pub fn pointer_enter<M: Measure + ?Sized>(
        &mut self,
        id: TriggerId,
        event: &PointerEvent,
        measure: &M,
    ) -> Result<Option<Transition>> {
        Ok(self
            .get_mut(id)?
            .pointer_enter(event, || measure.anchor_rect(id)))
    }

    /// Route a pointer-over on the anchor of `id`.
    pub fn pointer_over<M: Measure + ?Sized>(
        &mut self,
        id: TriggerId,
        event: &PointerEvent,
        measure: &M,
    ) -> Result<Option<Transition>> {
        Ok(self
            .get_mut(id)?
            .pointer_over(event, || measure.anchor_rect(id)))
    }

    /// Route a pointer-leave on the anchor of `id`.
    pub fn pointer_leave(&mut self, id: TriggerId, event: &PointerEvent) -> Result<()> {
        self.get_mut(id)?.pointer_leave(event);
        Ok(())
    }

    /// Route a pointer-enter on the overlay body of `id`.
    pub fn overlay_enter(&mut self, id: TriggerId) -> Result<()> {
        self.get_mut(id)?.overlay_enter();
        Ok(())
    }

    /// Route a pointer-leave on the overlay body of `id`.
    pub fn overlay_leave(&mut self, id: TriggerId, now: u64) -> Result<()> {
        self.get_mut(id)?.overlay_leave(now);
        Ok(())
    }

    /// Hide control for the overlay body of `id`.
    pub fn hide_handle(&mut self, id: TriggerId) -> Result<HideHandle<'_>> {
        Ok(self.get_mut(id)?.hide_handle())
    }

    /// Deliver a host timer callback for `id`.
    pub fn fire_timer(&mut self, id: TriggerId, token: TimerToken) -> Result<Option<Transition>> {
        Ok(self.get_mut(id)?.fire_timer(token))
    }

    /// Update the hovered path (outer→inner) and dispatch the resulting events.
    ///
    /// Leaves go out first (inner→outer), then enters (outer→inner). Whenever the path
    /// changed, every anchor on the new path also receives a pointer-over, as the pointer
    /// moved onto a new element within it. Targets of unmounted triggers are skipped.
    pub fn pointer_move<M: Measure + ?Sized>(
        &mut self,
        path: &[HoverTarget],
        event: &PointerEvent,
        measure: &M,
    ) -> Vec<(TriggerId, Transition)> {
        let events = self.hover.update_path(path);
        if events.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        for ev in events {
            let (target, entering) = match ev {
                HoverEvent::Enter(t) => (t, true),
                HoverEvent::Leave(t) => (t, false),
            };
            let id = target.trigger();
            let Some(c) = self.controllers.get_mut(&id) else {
                trace!(trigger = id.0, "hover target not mounted");
                continue;
            };
            let transition = match (target, entering) {
                (HoverTarget::Anchor(_), true) => {
                    c.pointer_enter(event, || measure.anchor_rect(id))
                }
                (HoverTarget::Anchor(_), false) => {
                    c.pointer_leave(event);
                    None
                }
                (HoverTarget::Overlay(_), true) => {
                    c.overlay_enter();
                    None
                }
                (HoverTarget::Overlay(_), false) => {
                    c.overlay_leave(event.timestamp);
                    None
                }
            };
            out.extend(transition.map(|t| (id, t)));
        }
        for target in path {
            if let HoverTarget::Anchor(id) = *target
                && let Some(c) = self.controllers.get_mut(&id)
                && let Some(t) = c.pointer_over(event, || measure.anchor_rect(id))
            {
                out.push((id, t));
            }
        }
        out
    }

    /// Apply every pending hide whose deadline is at or before `now`.
    ///
    /// Returns the triggers that became hidden.
    pub fn tick(&mut self, now: u64) -> Vec<TriggerId> {
        self.controllers
            .values_mut()
            .filter_map(|c| (c.poll(now) == Some(Transition::Hidden)).then(|| c.id()))
            .collect()
    }

    /// Earliest pending hide deadline across all triggers.
    pub fn next_deadline(&self) -> Option<u64> {
        self.controllers
            .values()
            .filter_map(TriggerController::next_deadline)
            .min()
    }

    /// Second layout pass for every visible, not yet placed overlay.
    ///
    /// Returns the number of overlays placed by this call.
    pub fn layout<M: Measure + ?Sized>(&mut self, measure: &M) -> usize {
        self.controllers
            .values_mut()
            .map(|c| {
                let id = c.id();
                c.layout(|| measure.overlay_size(id))
            })
            .filter(|&placed| placed)
            .count()
    }

    /// The overlay layer: one view per visible trigger.
    pub fn portal(&self) -> OverlayLayer {
        self.controllers
            .values()
            .filter_map(TriggerController::overlay_view)
            .collect()
    }

    /// Unmount every trigger, releasing all pending hides.
    pub fn unmount(&mut self) {
        let released = self
            .controllers
            .values_mut()
            .map(TriggerController::unmount)
            .filter(|&released| released)
            .count();
        debug!(triggers = self.controllers.len(), released, "tooltip unmounted");
        self.controllers.clear();
        self.hover = HoverState::new();
    }

    fn get_mut(&mut self, id: TriggerId) -> Result<&mut TriggerController> {
        self.controllers
            .get_mut(&id)
            .ok_or(Error::UnknownTrigger(id))
    }
}

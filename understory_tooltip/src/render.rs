// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Templated output: overlay views and plain trees.
//!
//! ## Overlay structure
//!
//! An overlay renders as a fixed shape that external styles target:
//!
//! ```text
//! div.tooltip            style="top: …px; left: …px; opacity: …; transition: opacity …ms ease-in"
//! ├── div.tooltip__arrow.bottom
//! └── div.tooltip__body
//!     └── title content
//! ```
//!
//! Colors, borders and shadows are left to the stylesheet.
//!
//! ## Plain trees
//!
//! [`flatten`] turns a rewritten tree back into plain elements for hosts that render
//! [`Node::Element`] only. Each trigger becomes its stripped child tagged with
//! [`TRIGGER_ATTR`], so the host can route pointer events on it back to the trigger.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::position::OverlayGeometry;
use crate::types::{Element, Node, TriggerId, TriggerNode};

/// Class of the overlay container.
pub const OVERLAY_CLASS: &str = "tooltip";
/// Class of the arrow indicator. The overlay sits below its anchor.
pub const ARROW_CLASS: &str = "tooltip__arrow bottom";
/// Class of the body wrapping the title content.
pub const BODY_CLASS: &str = "tooltip__body";
/// Attribute carrying the trigger id on flattened anchors.
pub const TRIGGER_ATTR: &str = "data-tooltip-trigger";

/// A visible overlay, ready to be mounted into the overlay layer.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayView {
    /// Trigger that owns this overlay.
    pub trigger: TriggerId,
    /// Current offsets.
    pub geometry: OverlayGeometry,
    /// Target opacity (0 until placed, then 1).
    pub opacity: f64,
    /// Duration of the opacity transition.
    pub fade_in_ms: u64,
    /// Title content.
    pub content: Vec<Node>,
}

impl OverlayView {
    /// Inline style for the container.
    pub fn style(&self) -> String {
        format!(
            "top: {}px; left: {}px; opacity: {}; transition: opacity {}ms ease-in",
            self.geometry.top, self.geometry.left, self.opacity, self.fade_in_ms
        )
    }

    /// Build the overlay's element structure.
    pub fn to_node(&self) -> Node {
        let arrow = Element::new("div").attr("class", ARROW_CLASS);
        let body = Element {
            children: self.content.clone(),
            ..Element::new("div").attr("class", BODY_CLASS)
        };
        Element::new("div")
            .attr("class", OVERLAY_CLASS)
            .attr("style", self.style())
            .child(arrow)
            .child(body)
            .into()
    }
}

/// Render one trigger's anchor as a plain element.
pub fn anchor_element(trigger: &TriggerNode) -> Element {
    let mut el = (*trigger.child).clone();
    el.attrs.push((String::from(TRIGGER_ATTR), format!("{}", trigger.id)));
    el
}

/// Replace every trigger in a rewritten tree with its tagged anchor element.
pub fn flatten(nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| match node {
            Node::Trigger(t) => Node::Element(anchor_element(t)),
            Node::Element(el) if !el.children.is_empty() => Node::Element(Element {
                children: flatten(&el.children),
                ..el.clone()
            }),
            other => other.clone(),
        })
        .collect()
}

/// Parse the trigger id off a flattened anchor.
pub fn trigger_of(el: &Element) -> Option<TriggerId> {
    el.get_attr(TRIGGER_ATTR)?.parse().ok().map(TriggerId)
}

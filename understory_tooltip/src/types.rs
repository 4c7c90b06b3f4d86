// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the tooltip tree: nodes, elements, titles, triggers, and pointer handlers.
//!
//! ## Overview
//!
//! A declarative tree is a sequence of [`Node`]s. Plain text is a primitive leaf; an
//! [`Element`] carries a tag, pass-through attributes, optional pointer handlers, ordered
//! children, and optionally a hint (`hint` / `hint_template`).
//! [`rewrite`](crate::rewrite::rewrite) turns each outermost hinting element into a
//! [`TriggerNode`]; nothing else in the tree changes.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

/// Identifier of a trigger in a rewritten tree.
///
/// Assigned in document (pre-order) order by [`rewrite`](crate::rewrite::rewrite), starting at
/// zero unless a different first id is requested. The same input tree always yields the same
/// ids, which is what lets a [`Tooltip`](crate::tooltip::Tooltip) keep per-trigger state across
/// render passes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TriggerId(pub u32);

impl core::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pointer event delivered to a trigger, an overlay body, or an original handler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in root (viewport) coordinates.
    pub position: Point,
    /// Host timestamp in milliseconds. Only differences between timestamps matter.
    pub timestamp: u64,
}

impl PointerEvent {
    /// Create an event at `position` and `timestamp`.
    pub fn new(position: Point, timestamp: u64) -> Self {
        Self {
            position,
            timestamp,
        }
    }

    /// Create an event at the origin; handy when only the time matters.
    pub fn at(timestamp: u64) -> Self {
        Self::new(Point::ORIGIN, timestamp)
    }
}

/// A shared pointer callback.
///
/// Equality is identity: two handlers are equal when they point at the same callback.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&PointerEvent)>);

impl Handler {
    /// Wrap a callback.
    pub fn new(f: impl Fn(&PointerEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, event: &PointerEvent) {
        (self.0)(event);
    }
}

impl core::fmt::Debug for Handler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Optional hover handlers attached to an element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerHandlers {
    /// Called when the pointer enters the element.
    pub enter: Option<Handler>,
    /// Called when the pointer moves onto the element or one of its descendants.
    pub over: Option<Handler>,
    /// Called when the pointer leaves the element.
    pub leave: Option<Handler>,
}

impl PointerHandlers {
    /// Returns true if no handler is set.
    pub fn is_empty(&self) -> bool {
        self.enter.is_none() && self.over.is_none() && self.leave.is_none()
    }

    pub(crate) fn fire_enter(&self, event: &PointerEvent) {
        if let Some(h) = &self.enter {
            h.call(event);
        }
    }

    pub(crate) fn fire_over(&self, event: &PointerEvent) {
        if let Some(h) = &self.over {
            h.call(event);
        }
    }

    pub(crate) fn fire_leave(&self, event: &PointerEvent) {
        if let Some(h) = &self.leave {
            h.call(event);
        }
    }
}

/// A node in a declarative tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Primitive text leaf.
    Text(String),
    /// Structured element.
    Element(Element),
    /// Hinting element wrapped by the rewriter.
    Trigger(TriggerNode),
}

impl Node {
    /// Create a text leaf.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the trigger if this node is one.
    pub fn as_trigger(&self) -> Option<&TriggerNode> {
        match self {
            Self::Trigger(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A structured element.
///
/// Built with the chaining setters:
///
/// ```
/// use understory_tooltip::types::{Element, Node};
///
/// let p = Element::new("p")
///     .attr("class", "lead")
///     .hint("This is the way")
///     .text("A paragraph with a tooltip.");
/// assert!(p.is_hinting());
/// assert_eq!(p.children, vec![Node::text("A paragraph with a tooltip.")]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    /// Tag name, e.g. `"div"`.
    pub tag: String,
    /// Pass-through attributes in declaration order.
    pub attrs: Vec<(String, String)>,
    /// Plain hover text. Setting it makes the element a hinting node.
    pub hint: Option<String>,
    /// Rich hover content. Takes precedence over `hint` for display but does not by itself
    /// make the element a hinting node.
    pub hint_template: Option<Vec<Node>>,
    /// Hover handlers that must keep firing after rewriting.
    pub handlers: PointerHandlers,
    /// Ordered children.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with the given tag and nothing else.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Append a pass-through attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set the plain hint.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the rich hint content.
    pub fn hint_template(mut self, content: impl IntoIterator<Item = Node>) -> Self {
        self.hint_template = Some(content.into_iter().collect());
        self
    }

    /// Set the pointer-enter handler.
    pub fn on_pointer_enter(mut self, f: impl Fn(&PointerEvent) + 'static) -> Self {
        self.handlers.enter = Some(Handler::new(f));
        self
    }

    /// Set the pointer-over handler.
    pub fn on_pointer_over(mut self, f: impl Fn(&PointerEvent) + 'static) -> Self {
        self.handlers.over = Some(Handler::new(f));
        self
    }

    /// Set the pointer-leave handler.
    pub fn on_pointer_leave(mut self, f: impl Fn(&PointerEvent) + 'static) -> Self {
        self.handlers.leave = Some(Handler::new(f));
        self
    }

    /// Append a child node.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child.
    pub fn text(self, s: impl Into<String>) -> Self {
        self.child(Node::Text(s.into()))
    }

    /// Returns the value of the first attribute named `name`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if this element declares a plain hint.
    pub fn is_hinting(&self) -> bool {
        self.hint.is_some()
    }
}

/// Content displayed inside an overlay.
#[derive(Clone, Debug, PartialEq)]
pub enum Title {
    /// Plain text taken from `hint`.
    Text(String),
    /// Rich content taken from `hint_template`.
    Template(Vec<Node>),
}

impl Title {
    /// Render the title as overlay body children.
    pub fn to_nodes(&self) -> Vec<Node> {
        match self {
            Self::Text(s) => alloc::vec![Node::Text(s.clone())],
            Self::Template(nodes) => nodes.clone(),
        }
    }
}

/// A hinting element wrapped for tooltip handling.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerNode {
    /// Document-order id of this trigger.
    pub id: TriggerId,
    /// Content shown in the overlay.
    pub title: Title,
    /// Handlers lifted off the wrapped element; the trigger invokes them.
    pub handlers: PointerHandlers,
    /// The wrapped element with its hint, hint template and handlers removed.
    pub child: Box<Element>,
}

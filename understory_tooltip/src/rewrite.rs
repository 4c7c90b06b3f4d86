// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree rewriting: wrap outermost hinting elements into triggers.
//!
//! ## Rules
//!
//! For each child, in order:
//! - Text (and anything that is not a plain element) passes through unchanged.
//! - An element with a `hint` becomes a [`TriggerNode`]. Its title is the `hint_template` when
//!   present, else the `hint`. The element's pointer handlers move onto the trigger and its
//!   hint attributes are stripped. Its children are not visited, so hints below it never
//!   produce triggers of their own.
//! - An element without a hint but with children is rebuilt with rewritten children; its tag,
//!   attributes, handlers and any un-hinted `hint_template` are kept as-is.
//! - An element with neither hint nor children passes through unchanged.
//!
//! Trigger ids are assigned in pre-order, so the same input always yields the same ids.
//!
//! ## Example
//!
//! ```
//! use understory_tooltip::rewrite::rewrite;
//! use understory_tooltip::types::{Element, Node, Title, TriggerId};
//!
//! let tree = vec![
//!     Node::from(Element::new("h1").text("Hello")),
//!     Node::from(Element::new("span").hint("The most basic example").text("Happy path")),
//! ];
//! let out = rewrite(&tree).unwrap();
//!
//! assert_eq!(out[0], tree[0]);
//! let trigger = out[1].as_trigger().unwrap();
//! assert_eq!(trigger.id, TriggerId(0));
//! assert_eq!(trigger.title, Title::Text("The most basic example".into()));
//! assert!(trigger.child.hint.is_none());
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::types::{Element, Node, PointerHandlers, Title, TriggerId, TriggerNode};

/// Rewrite `children`, numbering triggers from zero.
pub fn rewrite(children: &[Node]) -> Result<Vec<Node>> {
    Ok(rewrite_from(children, TriggerId(0))?.0)
}

/// Rewrite `children`, numbering triggers from `first`.
///
/// Returns the rewritten nodes and the next unused id, so several sibling subtrees can be
/// rewritten without id collisions. The next id is `None` once `TriggerId(u32::MAX)` has been
/// handed out.
///
/// # Errors
///
/// [`Error::IdsExhausted`] if the tree has more hinting elements than ids remain after
/// `first`.
pub fn rewrite_from(
    children: &[Node],
    first: TriggerId,
) -> Result<(Vec<Node>, Option<TriggerId>)> {
    let mut next = Some(first.0);
    let out = rewrite_children(children, &mut next)?;
    Ok((out, next.map(TriggerId)))
}

fn rewrite_children(children: &[Node], next: &mut Option<u32>) -> Result<Vec<Node>> {
    children
        .iter()
        .map(|child| -> Result<Node> {
            Ok(match child {
                Node::Element(el) => match &el.hint {
                    Some(hint) => Node::Trigger(wrap(el, hint, next)?),
                    None if !el.children.is_empty() => Node::Element(Element {
                        tag: el.tag.clone(),
                        attrs: el.attrs.clone(),
                        hint: None,
                        hint_template: el.hint_template.clone(),
                        handlers: el.handlers.clone(),
                        children: rewrite_children(&el.children, next)?,
                    }),
                    None => child.clone(),
                },
                other => other.clone(),
            })
        })
        .collect()
}

fn wrap(el: &Element, hint: &str, next: &mut Option<u32>) -> Result<TriggerNode> {
    let id = next.ok_or(Error::IdsExhausted)?;
    *next = id.checked_add(1);
    let title = match &el.hint_template {
        Some(template) => Title::Template(template.clone()),
        None => Title::Text(hint.into()),
    };
    Ok(TriggerNode {
        id: TriggerId(id),
        title,
        handlers: el.handlers.clone(),
        child: Box::new(Element {
            tag: el.tag.clone(),
            attrs: el.attrs.clone(),
            hint: None,
            hint_template: None,
            handlers: PointerHandlers::default(),
            children: el.children.clone(),
        }),
    })
}

/// Collect the triggers of a rewritten tree in document order.
pub fn triggers(nodes: &[Node]) -> Vec<&TriggerNode> {
    let mut out = Vec::new();
    collect_triggers(nodes, &mut out);
    out
}

fn collect_triggers<'a>(nodes: &'a [Node], out: &mut Vec<&'a TriggerNode>) {
    for node in nodes {
        match node {
            Node::Trigger(t) => out.push(t),
            Node::Element(el) => collect_triggers(&el.children, out),
            Node::Text(_) => {}
        }
    }
}

/// Count the triggers in a rewritten tree.
pub fn count_triggers(nodes: &[Node]) -> usize {
    triggers(nodes).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::Cell;

    use crate::types::PointerEvent;

    fn text_leaves(nodes: &[Node]) -> usize {
        nodes
            .iter()
            .map(|n| match n {
                Node::Text(_) => 1,
                Node::Element(el) => text_leaves(&el.children),
                Node::Trigger(t) => text_leaves(&t.child.children),
            })
            .sum()
    }

    // Mirrors the demo page: a heading, a templated paragraph, a nested pair, and a happy path.
    fn page() -> Vec<Node> {
        vec![
            Element::new("h1").text("Hello").into(),
            Element::new("p")
                .hint("This is the way")
                .hint_template([Node::from(Element::new("h1").text("THIS IS THE WAY"))])
                .attr("style", "background: linear-gradient(#e66465, #9198e5)")
                .text("A paragraph with a title and a tooltip template. ")
                .child(Element::new("em").text("Those styles had better be preserved!"))
                .into(),
            Element::new("div")
                .text("This is a cool div with ")
                .child(
                    Element::new("div")
                        .hint("outer")
                        .text("nested ")
                        .child(Element::new("span").hint("inner").text("HTML")),
                )
                .text(". What a surprise!")
                .into(),
            Element::new("div")
                .child(Element::new("span").hint("The most basic example").text("Happy path"))
                .into(),
        ]
    }

    #[test]
    fn text_passes_through() {
        let tree = vec![Node::text("a"), Node::text("b")];
        assert_eq!(rewrite(&tree).unwrap(), tree);
    }

    #[test]
    fn hinting_element_is_wrapped_and_stripped() {
        let tree = vec![Node::from(
            Element::new("span")
                .attr("class", "x")
                .hint("help")
                .text("label"),
        )];
        let out = rewrite(&tree).unwrap();
        let t = out[0].as_trigger().unwrap();
        assert_eq!(t.id, TriggerId(0));
        assert_eq!(t.title, Title::Text(String::from("help")));
        assert_eq!(t.child.tag, "span");
        assert_eq!(t.child.get_attr("class"), Some("x"));
        assert_eq!(t.child.hint, None);
        assert_eq!(t.child.hint_template, None);
        assert_eq!(t.child.children, vec![Node::text("label")]);
    }

    #[test]
    fn template_takes_precedence_over_hint() {
        let out = rewrite(&page()).unwrap();
        let t = out[1].as_trigger().unwrap();
        assert_eq!(
            t.title,
            Title::Template(vec![Element::new("h1").text("THIS IS THE WAY").into()])
        );
        assert_eq!(
            t.child.get_attr("style"),
            Some("background: linear-gradient(#e66465, #9198e5)")
        );
    }

    // The inner span declares a hint but sits under a hinting div: only the div is wrapped.
    #[test]
    fn no_nested_triggers() {
        let out = rewrite(&page()).unwrap();
        let cool_div = out[2].as_element().unwrap();
        let outer = cool_div.children[1].as_trigger().unwrap();
        assert_eq!(outer.title, Title::Text(String::from("outer")));
        let inner = outer.child.children[1].as_element().unwrap();
        assert_eq!(inner.hint.as_deref(), Some("inner"));
        assert_eq!(count_triggers(&out), 3);
    }

    // A template alone does not make a node hinting; its subtree is still searched.
    #[test]
    fn template_without_hint_is_not_a_trigger() {
        let tree = vec![Node::from(
            Element::new("div")
                .hint_template([Node::text("Surprise")])
                .child(Element::new("span").hint("inner").text("HTML")),
        )];
        let out = rewrite(&tree).unwrap();
        let div = out[0].as_element().unwrap();
        assert_eq!(div.hint_template, Some(vec![Node::text("Surprise")]));
        let t = div.children[0].as_trigger().unwrap();
        assert_eq!(t.title, Title::Text(String::from("inner")));
    }

    // Empty, un-hinted elements are kept. Dropping them would lose structure.
    #[test]
    fn empty_leaf_elements_pass_through() {
        let tree = vec![
            Node::from(Element::new("br")),
            Node::from(Element::new("div").child(Element::new("hr").attr("class", "rule"))),
        ];
        assert_eq!(rewrite(&tree).unwrap(), tree);
    }

    #[test]
    fn ids_follow_document_order() {
        let out = rewrite(&page()).unwrap();
        let ids: Vec<_> = triggers(&out).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TriggerId(0), TriggerId(1), TriggerId(2)]);

        let (out, next) = rewrite_from(&page(), TriggerId(10)).unwrap();
        assert_eq!(triggers(&out)[0].id, TriggerId(10));
        assert_eq!(next, Some(TriggerId(13)));
    }

    // The last id is usable; one hint past it is an error, not a wrapped id.
    #[test]
    fn id_space_end_is_reported() {
        let one = vec![Node::from(Element::new("span").hint("h"))];
        let (out, next) = rewrite_from(&one, TriggerId(u32::MAX)).unwrap();
        assert_eq!(out[0].as_trigger().unwrap().id, TriggerId(u32::MAX));
        assert_eq!(next, None);

        assert_eq!(
            rewrite_from(&page(), TriggerId(u32::MAX - 1)),
            Err(Error::IdsExhausted)
        );
        // No hints: nothing to number.
        let plain = vec![Node::text("a")];
        assert_eq!(
            rewrite_from(&plain, TriggerId(u32::MAX)),
            Ok((plain.clone(), Some(TriggerId(u32::MAX))))
        );
    }

    #[test]
    fn text_leaf_count_is_preserved() {
        let tree = page();
        assert_eq!(text_leaves(&rewrite(&tree).unwrap()), text_leaves(&tree));
    }

    #[test]
    fn handlers_move_onto_trigger() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let el = Element::new("b")
            .hint("bold")
            .on_pointer_enter(move |_| h.set(h.get() + 1));
        let enter = el.handlers.enter.clone();
        let out = rewrite(&[Node::from(el)]).unwrap();
        let t = out[0].as_trigger().unwrap();
        assert_eq!(t.handlers.enter, enter);
        assert!(t.child.handlers.is_empty());
        t.handlers.fire_enter(&PointerEvent::at(0));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn input_is_left_untouched() {
        let tree = page();
        let before = tree.clone();
        let _ = rewrite(&tree).unwrap();
        assert_eq!(tree, before);
    }

    // Un-hinted containers keep their own handlers.
    #[test]
    fn container_handlers_are_kept() {
        let el = Element::new("div")
            .on_pointer_over(|_| {})
            .child(Element::new("i").hint("x"));
        let over = el.handlers.over.clone();
        let out = rewrite(&[Node::from(el)]).unwrap();
        assert_eq!(out[0].as_element().unwrap().handlers.over, over);
    }
}

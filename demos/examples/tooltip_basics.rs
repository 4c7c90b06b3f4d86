// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rewriting a page.
//!
//! Builds a small page with plain, templated and nested hints, rewrites it, and prints the
//! resulting outline. Only the outermost hint on each path becomes a trigger; a template alone
//! does not make an element hinting.
//!
//! Run:
//! - `cargo run -p understory_tooltip_demos --example tooltip_basics`

use understory_tooltip::error::Result;
use understory_tooltip::render::{flatten, trigger_of};
use understory_tooltip::rewrite::{count_triggers, rewrite, triggers};
use understory_tooltip::types::{Element, Node, Title};

fn page() -> Vec<Node> {
    vec![
        Element::new("h1").text("Hello").into(),
        Element::new("p")
            .hint("This is the way")
            .hint_template([Node::from(Element::new("h1").text("THIS IS THE WAY"))])
            .attr("style", "background: linear-gradient(#e66465, #9198e5)")
            .text("This is a paragraph with a title and a tooltip template. ")
            .child(Element::new("em").text("Those styles had better be preserved!"))
            .into(),
        Element::new("div")
            .text("This is a cool div with ")
            .child(
                Element::new("div")
                    .hint_template([Node::from(Element::new("span").text("Surprise, surprise"))])
                    .text("nested ")
                    .child(
                        Element::new("span")
                            .hint("An ordinary tooltip")
                            .hint_template([Node::from(
                                Element::new("h1").text("Will you be able to see this?"),
                            )])
                            .text("HTML"),
                    ),
            )
            .text(". What a surprise!")
            .into(),
        Element::new("div")
            .child(
                Element::new("span")
                    .hint("The most basic example")
                    .text("I'm, like, the happy path example."),
            )
            .into(),
    ]
}

fn outline(nodes: &[Node], depth: usize) {
    for node in nodes {
        let pad = "  ".repeat(depth);
        match node {
            Node::Text(s) => println!("{pad}{s:?}"),
            Node::Element(el) => {
                match trigger_of(el) {
                    Some(id) => println!("{pad}<{}> (trigger {id})", el.tag),
                    None => println!("{pad}<{}>", el.tag),
                }
                outline(&el.children, depth + 1);
            }
            Node::Trigger(t) => println!("{pad}[trigger {}]", t.id),
        }
    }
}

fn main() -> Result<()> {
    let input = page();
    let tree = rewrite(&input)?;

    println!("== Triggers ==");
    for t in triggers(&tree) {
        let title = match &t.title {
            Title::Text(s) => format!("text {s:?}"),
            Title::Template(nodes) => format!("template ({} nodes)", nodes.len()),
        };
        println!("  {} <{}>: {title}", t.id, t.child.tag);
    }

    println!("== Flattened ==");
    outline(&flatten(&tree), 1);

    assert_eq!(count_triggers(&tree), 3);
    assert!(matches!(
        triggers(&tree)[1].title,
        Title::Template(_)
    ));
    Ok(())
}

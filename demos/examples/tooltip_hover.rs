// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover timeline.
//!
//! Drives a tooltip through a pointer timeline: hover the anchor, travel onto the overlay,
//! wander off, and let the grace window expire. Set `RUST_LOG=understory_tooltip=trace` to see
//! the state machine's logs.
//!
//! Run:
//! - `cargo run -p understory_tooltip_demos --example tooltip_hover`

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_tooltip::error::Result;
use understory_tooltip::hover::HoverTarget;
use understory_tooltip::tooltip::{Measure, Tooltip};
use understory_tooltip::types::{Element, Node, PointerEvent, TriggerId};

struct Layout;

impl Measure for Layout {
    fn anchor_rect(&self, id: TriggerId) -> Option<Rect> {
        match id.0 {
            0 => Some(Rect::from_origin_size((100.0, 50.0), (40.0, 20.0))),
            // Not laid out yet.
            _ => None,
        }
    }

    fn overlay_size(&self, _: TriggerId) -> Option<Size> {
        Some(Size::new(60.0, 24.0))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let page = vec![
        Node::from(
            Element::new("span")
                .hint("The most basic example")
                .on_pointer_enter(|e| println!("  (page handler) enter at {}", e.timestamp))
                .text("happy path"),
        ),
        Node::from(Element::new("span").hint("Unmeasured").text("offscreen")),
    ];

    let mut tooltip = Tooltip::new();
    let _ = tooltip.render(&page)?;

    let anchor = HoverTarget::Anchor(TriggerId(0));
    let overlay = HoverTarget::Overlay(TriggerId(0));
    let timeline: [(u64, &[HoverTarget]); 5] = [
        (0, &[anchor]),
        (120, &[]),
        (180, &[overlay]),
        (900, &[]),
        (1_000, &[HoverTarget::Anchor(TriggerId(1))]),
    ];

    for (t, path) in timeline {
        let ev = PointerEvent::new(Point::new(110.0, 60.0), t);
        let hidden = tooltip.tick(t);
        let changes = tooltip.pointer_move(path, &ev, &Layout);
        let placed = tooltip.layout(&Layout);
        println!("t={t:>5} path={path:?}");
        println!("        hidden={hidden:?} changes={changes:?} placed={placed}");
        for view in tooltip.portal().iter() {
            println!("        overlay {}: {}", view.trigger, view.style());
        }
    }

    let deadline = tooltip.next_deadline();
    println!("next deadline: {deadline:?}");
    assert_eq!(deadline, Some(1_150));
    assert_eq!(tooltip.tick(1_150), vec![TriggerId(0)]);
    assert!(tooltip.portal().is_empty());
    Ok(())
}

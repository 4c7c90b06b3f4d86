// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tooltip --heading-base-level=0

//! Understory Tooltip: hover overlays for declarative UI trees.
//!
//! ## Overview
//!
//! Elements in a declarative tree can carry a hint (plain hover text) and optionally a hint
//! template (rich hover content). This crate replaces those hints with interactive overlays:
//! it finds the hinting elements, drives a hover state machine for each, places the overlay
//! under its anchor, and collects the overlays into one root-level layer.
//!
//! It does not touch a real DOM, window, or clock. The host feeds it pointer events with
//! timestamps and measured rectangles, and renders what comes back.
//!
//! ## Pieces
//!
//! - [`rewrite`](crate::rewrite): pure tree rewriting. Each outermost hinting element becomes a
//!   [`TriggerNode`](crate::types::TriggerNode); hints below a hinting element are left alone
//!   (no nested tooltips).
//! - [`trigger`](crate::trigger): the per-trigger state machine (`Hidden` ↔ `Visible`) with a
//!   grace window before hiding, so the pointer can travel from the anchor to the overlay.
//! - [`position`](crate::position): `top` flush with the anchor's bottom edge, `left` centered
//!   on the anchor and clamped at zero.
//! - [`portal`](crate::portal) and [`render`](crate::render): the overlay layer and the fixed
//!   overlay structure external styles target.
//! - [`tooltip`](crate::tooltip): the host that ties these together across render passes.
//! - [`hover`](crate::hover): enter/leave transitions from the targets under the pointer.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_tooltip::hover::HoverTarget;
//! use understory_tooltip::tooltip::{Measure, Tooltip};
//! use understory_tooltip::types::{Element, Node, PointerEvent, TriggerId};
//!
//! struct Layout;
//! impl Measure for Layout {
//!     fn anchor_rect(&self, _: TriggerId) -> Option<Rect> {
//!         Some(Rect::from_origin_size((100.0, 50.0), (40.0, 20.0)))
//!     }
//!     fn overlay_size(&self, _: TriggerId) -> Option<Size> {
//!         Some(Size::new(60.0, 24.0))
//!     }
//! }
//!
//! let page = vec![
//!     Node::from(Element::new("h1").text("Hello")),
//!     Node::from(
//!         Element::new("p")
//!             .hint("This is the way")
//!             .hint_template([Node::from(Element::new("h1").text("THIS IS THE WAY"))])
//!             .text("A paragraph with a tooltip template."),
//!     ),
//! ];
//!
//! let mut tooltip = Tooltip::new();
//! let tree = tooltip.render(&page).unwrap();
//! let id = tree[1].as_trigger().unwrap().id;
//!
//! // Pointer moves onto the paragraph, then onto its overlay.
//! tooltip.pointer_move(&[HoverTarget::Anchor(id)], &PointerEvent::at(0), &Layout);
//! tooltip.layout(&Layout);
//! tooltip.pointer_move(&[HoverTarget::Overlay(id)], &PointerEvent::at(40), &Layout);
//! assert!(tooltip.tick(1_000).is_empty());
//!
//! let layer = tooltip.portal();
//! let overlay = layer.get(id).unwrap();
//! assert_eq!((overlay.geometry.top, overlay.geometry.left), (70.0, 90.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo`, `tracing` and `thiserror`.
//! - `libm`: `no_std` float support for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod hover;
pub mod portal;
pub mod position;
pub mod render;
pub mod rewrite;
pub mod timer;
pub mod tooltip;
pub mod trigger;
pub mod types;

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay layer: a single top-level rendering target for every visible overlay.
//!
//! Overlays live outside the normal tree so that ancestor clipping and stacking rules do not
//! apply to them. Each overlay owns its own subtree; any number may be mounted at once.

use alloc::vec::Vec;

use crate::render::OverlayView;
use crate::types::{Node, TriggerId};

/// Overlays to mount at the root, ordered by trigger id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayLayer {
    overlays: Vec<OverlayView>,
}

impl OverlayLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `view`, replacing any overlay of the same trigger.
    pub fn mount(&mut self, view: OverlayView) {
        match self.overlays.binary_search_by_key(&view.trigger, |v| v.trigger) {
            Ok(i) => self.overlays[i] = view,
            Err(i) => self.overlays.insert(i, view),
        }
    }

    /// Remove the overlay of `trigger`. Returns true if one was mounted.
    pub fn unmount(&mut self, trigger: TriggerId) -> bool {
        match self.overlays.binary_search_by_key(&trigger, |v| v.trigger) {
            Ok(i) => {
                self.overlays.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// The overlay of `trigger`, if mounted.
    pub fn get(&self, trigger: TriggerId) -> Option<&OverlayView> {
        self.overlays
            .binary_search_by_key(&trigger, |v| v.trigger)
            .ok()
            .map(|i| &self.overlays[i])
    }

    /// Mounted overlays in trigger order.
    pub fn iter(&self) -> impl Iterator<Item = &OverlayView> + '_ {
        self.overlays.iter()
    }

    /// Number of mounted overlays.
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Returns true if no overlay is mounted.
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Element trees to inject at the root.
    pub fn to_nodes(&self) -> Vec<Node> {
        self.overlays.iter().map(OverlayView::to_node).collect()
    }
}

impl FromIterator<OverlayView> for OverlayLayer {
    fn from_iter<I: IntoIterator<Item = OverlayView>>(iter: I) -> Self {
        let mut layer = Self::new();
        for view in iter {
            layer.mount(view);
        }
        layer
    }
}

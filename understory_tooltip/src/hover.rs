// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover routing: turn "what is under the pointer" into enter/leave transitions.
//!
//! ## Usage
//!
//! 1) Hit test the pointer in your toolkit and list the tooltip-relevant targets under it,
//!    outer→inner, as [`HoverTarget`]s (anchors and overlay bodies).
//! 2) Call [`HoverState::update_path`] with that list to get `Enter(..)` / `Leave(..)`
//!    transitions, or let [`Tooltip::pointer_move`](crate::tooltip::Tooltip::pointer_move) do
//!    it and dispatch them for you.
//!
//! ```
//! use understory_tooltip::hover::{HoverEvent, HoverState, HoverTarget};
//! use understory_tooltip::types::TriggerId;
//!
//! let a = HoverTarget::Anchor(TriggerId(0));
//! let o = HoverTarget::Overlay(TriggerId(0));
//! let mut h = HoverState::new();
//! assert_eq!(h.update_path(&[a]), vec![HoverEvent::Enter(a)]);
//! assert_eq!(h.update_path(&[o]), vec![HoverEvent::Leave(a), HoverEvent::Enter(o)]);
//! ```

use alloc::vec::Vec;

use crate::types::TriggerId;

/// Something under the pointer that a tooltip reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HoverTarget {
    /// The rendered anchor of a trigger.
    Anchor(TriggerId),
    /// The overlay body of a trigger.
    Overlay(TriggerId),
}

impl HoverTarget {
    /// The trigger this target belongs to.
    pub fn trigger(self) -> TriggerId {
        match self {
            Self::Anchor(id) | Self::Overlay(id) => id,
        }
    }
}

/// A hover transition event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer enters the given target (in order from outer→inner).
    Enter(K),
    /// Pointer leaves the given target (in order from inner→outer).
    Leave(K),
}

/// Tracks the hovered path (outer→inner) and computes minimal transitions between paths.
///
/// Leaves are emitted inner-most first, then enters outer-most first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Vec<K>,
}

impl<K: Copy + Eq> Default for HoverState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// The current outer→inner path.
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// Clear the path, returning leave events from inner-most to outer-most.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        let out = self
            .current
            .iter()
            .rev()
            .map(|&k| HoverEvent::Leave(k))
            .collect();
        self.current.clear();
        out
    }

    /// Drop targets matching `pred` from the current path without emitting events.
    ///
    /// Used when their owners are unmounted and can no longer receive a leave.
    pub fn forget(&mut self, mut pred: impl FnMut(&K) -> bool) {
        self.current.retain(|k| !pred(k));
    }

    /// Move to `new_path` and return the leave/enter events for the change.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        // Length of the shared prefix.
        let lca = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out: Vec<_> = self.current[lca..]
            .iter()
            .rev()
            .map(|&k| HoverEvent::Leave(k))
            .collect();
        out.extend(new_path[lca..].iter().map(|&k| HoverEvent::Enter(k)));

        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host configuration.

use crate::types::TriggerId;

/// Default grace window between pointer-leave and hide, in milliseconds.
pub const DEFAULT_HIDE_DELAY_MS: u64 = 250;

/// Default overlay fade-in duration, in milliseconds.
pub const DEFAULT_FADE_IN_MS: u64 = 50;

/// Tunables for a [`Tooltip`](crate::tooltip::Tooltip).
///
/// ```
/// use understory_tooltip::config::TooltipConfig;
///
/// let config = TooltipConfig::default().hide_delay_ms(400).fade_in_ms(0);
/// assert_eq!(config.hide_delay_ms, 400);
/// assert_eq!(config.fade_in_ms, 0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TooltipConfig {
    /// Grace window before a left trigger hides its overlay.
    pub hide_delay_ms: u64,
    /// Duration of the overlay's opacity transition once it is placed.
    pub fade_in_ms: u64,
    /// Id given to the first trigger of the subtree.
    ///
    /// Hosts that run several tooltip subtrees side by side give each a disjoint range.
    pub first_id: TriggerId,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: DEFAULT_HIDE_DELAY_MS,
            fade_in_ms: DEFAULT_FADE_IN_MS,
            first_id: TriggerId(0),
        }
    }
}

impl TooltipConfig {
    /// Set the hide grace window.
    pub fn hide_delay_ms(mut self, ms: u64) -> Self {
        self.hide_delay_ms = ms;
        self
    }

    /// Set the fade-in duration.
    pub fn fade_in_ms(mut self, ms: u64) -> Self {
        self.fade_in_ms = ms;
        self
    }

    /// Set the first trigger id.
    pub fn first_id(mut self, id: TriggerId) -> Self {
        self.first_id = id;
        self
    }
}

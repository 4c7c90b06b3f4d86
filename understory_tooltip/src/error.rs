// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for tooltip hosts.
//!
//! Expected conditions never produce errors: an anchor that cannot be measured simply keeps
//! its tooltip hidden, and overlay events for a hidden tooltip are ignored. Errors are reserved
//! for wiring mistakes in the host, such as routing an event to a trigger that was never
//! mounted, and for running out of trigger ids.

use crate::types::TriggerId;

/// Errors reported by [`Tooltip`](crate::tooltip::Tooltip) and the rewriter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An event was routed to a trigger id that is not mounted.
    #[error("no trigger with id {0} is mounted")]
    UnknownTrigger(TriggerId),
    /// A tree had more hinting elements than trigger ids remain after the first id.
    #[error("trigger ids exhausted")]
    IdsExhausted,
}

/// Result alias using [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred-hide timer: an owned, replaceable, cancellable deadline.
//!
//! The timer never reads a clock. Callers pass timestamps (milliseconds, any epoch) and either
//! [`poll`](HideTimer::poll) it from their event loop or, when their platform hands back a
//! callback per scheduled timeout, [`fire`](HideTimer::fire) it with the token returned by
//! [`schedule`](HideTimer::schedule).
//!
//! At most one hide is pending at a time. Scheduling again supersedes the previous one, and
//! its token goes stale. Cancelling an idle timer and firing a stale token are both no-ops.
//!
//! ```
//! use understory_tooltip::timer::HideTimer;
//!
//! let mut t = HideTimer::new();
//! let first = t.schedule(0, 250);
//! let second = t.schedule(100, 250);
//! assert!(!t.fire(first));
//! assert!(!t.poll(300));
//! assert!(t.poll(350));
//! assert!(!t.fire(second));
//! ```

/// Identifies one scheduled hide.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimerToken(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    token: TimerToken,
    deadline: u64,
}

/// A single-slot deadline timer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HideTimer {
    pending: Option<Pending>,
    generation: u32,
}

impl HideTimer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a hide `delay` milliseconds after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: u64, delay: u64) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TimerToken(self.generation);
        self.pending = Some(Pending {
            token,
            deadline: now.saturating_add(delay),
        });
        token
    }

    /// Cancel the pending hide. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Returns true if a hide is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending hide, if any.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.map(|p| p.deadline)
    }

    /// Token of the pending hide, if any.
    pub fn token(&self) -> Option<TimerToken> {
        self.pending.map(|p| p.token)
    }

    /// Fire the pending hide if its deadline is at or before `now`.
    ///
    /// Returns true exactly once per scheduled hide.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.pending {
            Some(p) if p.deadline <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Fire the pending hide identified by `token`, regardless of time.
    ///
    /// Returns false for superseded, cancelled, or already fired tokens.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some(p) if p.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

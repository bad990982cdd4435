//! Deterministic one-shot timers.
//!
//! The engine never sleeps. A [`PendingTimer`] records a deadline on the
//! caller's millisecond clock; the owning state machine checks it whenever the
//! host reports a new time via `advance_clock`. Tests drive time explicitly.

use crate::types::Millis;

/// A cancellable one-shot deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingTimer {
    deadline: Option<Millis>,
}

impl PendingTimer {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer to fire `delay` ms after `now`.
    pub fn arm(&mut self, now: Millis, delay: Millis) {
        self.deadline = Some(now.saturating_add(delay));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Fire the timer if its deadline has passed. Returns `true` exactly once
    /// per arming.
    pub fn fire_if_due(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

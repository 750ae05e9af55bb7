// SPDX-License-Identifier: MPL-2.0
//! Pausable auto-dismiss countdown.
//!
//! A `Countdown` is a single-shot timer that can be paused, resumed and
//! stopped at any time. It never schedules anything itself: the owner polls
//! it with an explicit `Instant`, which keeps expiry deterministic and lets
//! tests drive time by hand.

use std::time::{Duration, Instant};

/// Single-shot countdown with pause/resume/stop semantics.
///
/// While running, the remaining time decreases; pausing freezes it and
/// `resume` continues from the frozen remainder. `stop` resets the remainder
/// to the full duration. At most one expiry is ever reported.
#[derive(Debug, Clone)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
    /// Set while the countdown is running.
    started_at: Option<Instant>,
    fired: bool,
}

impl Countdown {
    /// Starts a new countdown that expires `duration` after `now`.
    #[must_use]
    pub fn start(duration: Duration, now: Instant) -> Self {
        Self {
            total: duration,
            remaining: duration,
            started_at: Some(now),
            fired: false,
        }
    }

    /// Returns whether the countdown is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.fired
    }

    /// Pauses the countdown, freezing the remaining time.
    ///
    /// A paused or already-fired countdown is left untouched.
    pub fn pause(&mut self, now: Instant) {
        if self.fired {
            return;
        }
        if let Some(started) = self.started_at.take() {
            let elapsed = now.saturating_duration_since(started);
            self.remaining = self.remaining.saturating_sub(elapsed);
        }
    }

    /// Resumes a paused countdown from the frozen remainder.
    pub fn resume(&mut self, now: Instant) {
        if self.fired || self.started_at.is_some() {
            return;
        }
        self.started_at = Some(now);
    }

    /// Halts the countdown and resets the remainder to the full duration.
    ///
    /// Used when a dismissal or a hover "reset" policy ends the wait instead
    /// of expiry. A stopped countdown will not fire until resumed.
    pub fn stop(&mut self) {
        if self.fired {
            return;
        }
        self.started_at = None;
        self.remaining = self.total;
    }

    /// Remaining time as of `now`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started) if !self.fired => self
                .remaining
                .saturating_sub(now.saturating_duration_since(started)),
            _ if self.fired => Duration::ZERO,
            _ => self.remaining,
        }
    }

    /// Reports expiry.
    ///
    /// Returns `true` exactly once, on the first poll at or after the instant
    /// the running remainder elapses. Paused and stopped countdowns never
    /// expire.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired {
            return false;
        }
        let Some(started) = self.started_at else {
            return false;
        };
        if now.saturating_duration_since(started) >= self.remaining {
            self.fired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn fires_once_at_expiry() {
        let t0 = Instant::now();
        let mut countdown = Countdown::start(secs(5), t0);

        assert!(!countdown.poll(t0 + secs(4)));
        assert!(countdown.poll(t0 + secs(5)));
        // Second signal is a no-op.
        assert!(!countdown.poll(t0 + secs(6)));
    }

    #[test]
    fn pause_then_resume_extends_expiry_by_the_paused_span() {
        let t0 = Instant::now();
        let mut countdown = Countdown::start(secs(5), t0);

        countdown.pause(t0 + secs(2));
        assert!(!countdown.is_running());
        assert_eq!(countdown.remaining(t0 + secs(10)), secs(3));

        countdown.resume(t0 + secs(4));
        // 5s of uninterrupted countdown time: 2s before the pause, 3s after.
        assert!(!countdown.poll(t0 + secs(6)));
        assert!(countdown.poll(t0 + secs(7)));
    }

    #[test]
    fn stop_resets_remaining_to_full_duration() {
        let t0 = Instant::now();
        let mut countdown = Countdown::start(secs(5), t0);

        countdown.stop();
        assert!(!countdown.poll(t0 + secs(60)));
        assert_eq!(countdown.remaining(t0 + secs(60)), secs(5));

        // A resume after stop behaves like a fresh start.
        countdown.resume(t0 + secs(10));
        assert!(!countdown.poll(t0 + secs(14)));
        assert!(countdown.poll(t0 + secs(15)));
    }

    #[test]
    fn pause_while_paused_keeps_the_remainder() {
        let t0 = Instant::now();
        let mut countdown = Countdown::start(secs(8), t0);

        countdown.pause(t0 + secs(3));
        countdown.pause(t0 + secs(6));
        assert_eq!(countdown.remaining(t0 + secs(6)), secs(5));
    }

    #[test]
    fn resume_while_running_is_a_no_op() {
        let t0 = Instant::now();
        let mut countdown = Countdown::start(secs(5), t0);

        countdown.resume(t0 + secs(4));
        assert!(countdown.poll(t0 + secs(5)));
    }

    #[test]
    fn poll_after_stop_never_fires_a_previously_due_expiry() {
        let t0 = Instant::now();
        let mut countdown = Countdown::start(secs(2), t0);

        countdown.stop();
        // The original expiry instant passes while stopped.
        assert!(!countdown.poll(t0 + secs(2)));
        assert!(!countdown.poll(t0 + secs(3)));
    }
}

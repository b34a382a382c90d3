use std::time::{Duration, Instant};

/// Fixed-interval timer polled by whoever drives the form session.
///
/// The timer never reads the clock itself: callers pass `now`, which keeps
/// autosave deterministic under test.
#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl AutosaveTimer {
    /// A timer armed to fire one `interval` after `now`.
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: Some(now + interval),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true at most once per call when the deadline has passed, then
    /// re-arms one interval after `now`. Missed intervals collapse into one tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left before the next tick, or None once cancelled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }
}

//! Periodic repaint while the overlay tracks the wall clock.

use std::time::{Duration, Instant};

/// A polled repeating deadline.
///
/// Armed only while the layer has no fixed date.
#[derive(Clone, Debug)]
pub struct RepaintTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepaintTimer {
    /// A disarmed timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Start firing every interval, counting from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Change the interval. An armed timer restarts from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.is_armed() {
            self.arm(now);
        }
    }

    /// Returns `true` if the deadline has passed, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

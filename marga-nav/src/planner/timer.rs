//! One-shot deadline compared against a monotonic clock.

use std::time::{Duration, Instant};

/// Single-fire timer driven by explicit `now` values.
#[derive(Clone, Copy, Debug)]
pub struct OneShot {
    interval: Duration,
    deadline: Option<Instant>,
}

impl OneShot {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arm the timer unless it is already running.
    pub fn start(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
        }
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// True exactly once when the deadline has passed; disarms the timer.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

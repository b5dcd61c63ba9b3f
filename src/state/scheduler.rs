//! Single-slot deferred task
//!
//! Scheduling replaces whatever deadline is pending, so only the last call
//! in a burst ever fires. Time is passed in explicitly; the event loop ticks
//! the task with `Instant::now()`.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PendingTask {
    delay: Duration,
    deadline: Option<Instant>,
}

impl PendingTask {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Schedule the task `delay` after `now`, cancelling any pending run
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

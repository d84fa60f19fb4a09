//! Debounce timer for the catalog search controls.

use std::time::{Duration, Instant};

/// Trailing-edge debounce over an explicit clock.
///
/// Each [`schedule`](Self::schedule) pushes the deadline back; [`fire`](Self::fire)
/// reports once when the deadline has passed. Callers read their current state
/// when it fires, so nothing is captured at scheduling time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn ready(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Consume the pending deadline if it has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.ready(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

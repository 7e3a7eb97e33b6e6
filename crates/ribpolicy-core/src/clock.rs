//! Monotonic time source used for policy expiry.
//!
//! Policies take the clock as an explicit dependency so that TTL behavior can
//! be driven deterministically in tests and simulations.

use std::fmt::Debug;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Non-decreasing time source, immune to wall-clock adjustments.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// Process monotonic clock (`std::time::Instant`).
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Starts at the instant it was created and only
/// moves when `advance` is called.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        // A poisoned lock still holds a valid Instant.
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(next) = now.checked_add(by) {
            *now = next;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

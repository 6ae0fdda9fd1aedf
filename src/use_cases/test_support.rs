use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::Clock;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> u64 {
        self.0
    }
}

// Advances by `step` on every read, starting at `start`.
pub(crate) struct SteppingClock {
    next: AtomicU64,
    step: u64,
}

impl SteppingClock {
    pub(crate) fn new(start: u64, step: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now_epoch_millis(&self) -> u64 {
        self.next.fetch_add(self.step, Ordering::Relaxed)
    }
}

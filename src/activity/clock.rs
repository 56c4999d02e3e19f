use std::{
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use crate::Timestamp;

/// A monotonic source of "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Time elapsed since the clock was created
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_duration(self.origin.elapsed())
    }
}

/// A clock that only moves when told to
///
/// Cloning shares the underlying time, so a test can keep one handle and give
/// another to the code under test.
#[derive(Clone, Default)]
pub struct ManualClock {
    raw_time: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, time: Timestamp) {
        self.raw_time.store(time.as_raw_i64(), Ordering::Release);
    }

    pub fn set_millis(&self, milliseconds: u64) {
        self.set(Timestamp::from_millis(milliseconds));
    }

    pub fn advance(&self, duration: Duration) {
        self.set(self.now().incremented_by(duration));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_raw_i64(self.raw_time.load(Ordering::Acquire))
    }
}

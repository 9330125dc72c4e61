//! Outbound ports for the meal monitor.

use chrono::{Duration, NaiveDateTime, SubsecRound};
use parking_lot::Mutex;

/// Time source trait for testability
pub trait TimeSource: Send + Sync {
    /// Current local wall-clock time, truncated to whole seconds.
    fn now(&self) -> NaiveDateTime;
}

/// System local time implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local().trunc_subsecs(0)
    }
}

/// Manually driven time source for tests and simulations.
#[derive(Debug)]
pub struct ManualTimeSource {
    time: Mutex<NaiveDateTime>,
}

impl ManualTimeSource {
    pub fn new(initial: NaiveDateTime) -> Self {
        Self {
            time: Mutex::new(initial.trunc_subsecs(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut time = self.time.lock();
        *time += by;
    }

    pub fn set(&self, time: NaiveDateTime) {
        *self.time.lock() = time.trunc_subsecs(0);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> NaiveDateTime {
        *self.time.lock()
    }
}

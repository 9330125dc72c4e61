//! Status store: the single process-wide meal record.
//!
//! All mutations happen under one mutex, so concurrent requests are applied
//! one at a time and the last write wins. The clock is read while the lock is
//! held, so applied timestamps never go backwards.

use crate::domain::status::{format_duration, MealState, MealStatus, DEFAULT_DURATION};
use crate::ports::{SystemTimeSource, TimeSource};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// Mutex-guarded meal status record
pub struct StatusStore {
    state: Mutex<MealStatus>,
    clock: Arc<dyn TimeSource>,
}

impl StatusStore {
    /// Create a store backed by the system clock
    pub fn new() -> Self {
        Self::with_time_source(Arc::new(SystemTimeSource))
    }

    /// Create a store with an explicit time source
    pub fn with_time_source(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            state: Mutex::new(MealStatus::default()),
            clock,
        }
    }

    /// Mark a meal as started now.
    pub fn start_meal(&self) -> MealStatus {
        let mut state = self.state.lock();
        let now = self.clock.now();

        state.status = MealState::InProgress;
        state.start_time = Some(now);
        state.end_time = None;
        state.duration = DEFAULT_DURATION.to_string();

        info!(start_time = %now, "Meal started");
        state.clone()
    }

    /// Mark the meal as ended now.
    ///
    /// The duration is only recomputed when a start time is known; otherwise
    /// the previous duration is kept.
    pub fn end_meal(&self) -> MealStatus {
        let mut state = self.state.lock();
        let now = self.clock.now();

        match state.start_time {
            Some(start) => {
                state.duration = format_duration(now - start);
                info!(
                    start_time = %start,
                    end_time = %now,
                    duration = %state.duration,
                    "Meal ended"
                );
            }
            None => {
                debug!(end_time = %now, "Meal end without a recorded start; duration unchanged");
            }
        }

        state.status = MealState::NotDetected;
        state.end_time = Some(now);
        state.clone()
    }

    /// Clear all fields back to their defaults.
    pub fn reset(&self) -> MealStatus {
        let mut state = self.state.lock();
        *state = MealStatus::default();
        info!("Meal status reset");
        state.clone()
    }

    /// Snapshot of the current record.
    pub fn status(&self) -> MealStatus {
        self.state.lock().clone()
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ManualTimeSource;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Hands out a fixed sequence of times; one call can be made to stall
    /// after it has produced its value.
    struct ScriptedTimeSource {
        times: Mutex<VecDeque<NaiveDateTime>>,
        calls: AtomicUsize,
        stall_on_call: usize,
        stall: std::time::Duration,
    }

    impl TimeSource for ScriptedTimeSource {
        fn now(&self) -> NaiveDateTime {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let time = self
                .times
                .lock()
                .pop_front()
                .expect("scripted clock exhausted");
            if call == self.stall_on_call {
                std::thread::sleep(self.stall);
            }
            time
        }
    }

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn store_at(start: NaiveDateTime) -> (StatusStore, Arc<ManualTimeSource>) {
        let clock = Arc::new(ManualTimeSource::new(start));
        (StatusStore::with_time_source(clock.clone()), clock)
    }

    #[test]
    fn test_initial_state_is_default() {
        let store = StatusStore::new();
        assert_eq!(store.status(), MealStatus::default());
    }

    #[test]
    fn test_start_meal() {
        let (store, _clock) = store_at(t0());
        store.start_meal();

        let status = store.status();
        assert_eq!(status.status, MealState::InProgress);
        assert_eq!(status.start_time, Some(t0()));
        assert!(status.end_time.is_none());
        assert_eq!(status.duration, "0分");
    }

    #[test]
    fn test_end_after_65_seconds() {
        let (store, clock) = store_at(t0());
        store.start_meal();
        clock.advance(Duration::seconds(65));
        store.end_meal();

        let status = store.status();
        assert_eq!(status.status, MealState::NotDetected);
        assert_eq!(status.start_time, Some(t0()));
        assert_eq!(status.end_time, Some(t0() + Duration::seconds(65)));
        assert_eq!(status.duration, "1分5秒");
    }

    #[test]
    fn test_end_without_start_keeps_duration() {
        let (store, _clock) = store_at(t0());
        let status = store.end_meal();

        assert_eq!(status.status, MealState::NotDetected);
        assert_eq!(status.end_time, Some(t0()));
        assert_eq!(status.duration, "0分");
    }

    #[test]
    fn test_end_after_reset_keeps_cleared_duration() {
        let (store, clock) = store_at(t0());
        store.start_meal();
        clock.advance(Duration::seconds(30));
        store.end_meal();
        store.reset();
        clock.advance(Duration::seconds(30));

        let status = store.end_meal();
        assert!(status.start_time.is_none());
        assert_eq!(status.duration, "0分");
    }

    #[test]
    fn test_restart_clears_end_and_duration() {
        let (store, clock) = store_at(t0());
        store.start_meal();
        clock.advance(Duration::seconds(90));
        store.end_meal();
        clock.advance(Duration::seconds(10));

        let status = store.start_meal();
        assert_eq!(status.status, MealState::InProgress);
        assert_eq!(status.start_time, Some(t0() + Duration::seconds(100)));
        assert!(status.end_time.is_none());
        assert_eq!(status.duration, "0分");
    }

    #[test]
    fn test_second_end_recomputes_from_same_start() {
        let (store, clock) = store_at(t0());
        store.start_meal();
        clock.advance(Duration::seconds(60));
        store.end_meal();
        clock.advance(Duration::seconds(60));

        let status = store.end_meal();
        assert_eq!(status.duration, "2分0秒");
    }

    #[test]
    fn test_reset_from_any_state() {
        let (store, clock) = store_at(t0());
        store.start_meal();
        assert_eq!(store.reset(), MealStatus::default());

        store.start_meal();
        clock.advance(Duration::seconds(5));
        store.end_meal();
        assert_eq!(store.reset(), MealStatus::default());
        assert_eq!(store.status(), MealStatus::default());
    }

    #[test]
    fn test_clock_moved_backwards_clamps_duration() {
        let (store, clock) = store_at(t0());
        store.start_meal();
        clock.set(t0() - Duration::seconds(30));

        let status = store.end_meal();
        assert_eq!(status.end_time, Some(t0() - Duration::seconds(30)));
        assert_eq!(status.duration, "0分0秒");
    }

    #[test]
    fn test_slow_clock_read_cannot_reorder_updates() {
        let at = |secs| t0() + Duration::seconds(secs);
        let clock = Arc::new(ScriptedTimeSource {
            times: Mutex::new(VecDeque::from([at(0), at(10), at(20)])),
            calls: AtomicUsize::new(0),
            stall_on_call: 2,
            stall: std::time::Duration::from_millis(300),
        });
        let store = Arc::new(StatusStore::with_time_source(clock));
        store.start_meal();

        let ender = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.end_meal())
        };
        std::thread::sleep(std::time::Duration::from_millis(50));
        store.start_meal();
        ender.join().unwrap();

        // Whichever update took the lock first, the times it applied are the
        // ones it read, so the record stays ordered.
        let status = store.status();
        match status.status {
            MealState::InProgress => {
                assert_eq!(status.start_time, Some(at(20)));
                assert!(status.end_time.is_none());
                assert_eq!(status.duration, "0分");
            }
            MealState::NotDetected => {
                let (start, end) = (status.start_time.unwrap(), status.end_time.unwrap());
                assert!(end >= start, "end_time {end} before start_time {start}");
                assert_eq!(status.duration, format_duration(end - start));
            }
        }
    }

    #[test]
    fn test_concurrent_updates_leave_consistent_record() {
        let store = Arc::new(StatusStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            store.start_meal();
                        } else {
                            store.end_meal();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let status = store.status();
        match status.status {
            MealState::InProgress => assert!(status.end_time.is_none()),
            MealState::NotDetected => assert!(status.end_time.is_some()),
        }
    }
}

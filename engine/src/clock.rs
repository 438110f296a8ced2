//! Wall-clock source and the formatted snapshot shown in the chrome.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime};

/// How often the snapshot is recomputed.
pub const CLOCK_REFRESH: Duration = Duration::from_secs(1);

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually set time. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSnapshot {
    /// 12-hour time, e.g. `03:07 PM`.
    pub time: String,
    /// e.g. `Monday, October 19`.
    pub date: String,
    pub today: NaiveDate,
}

impl ClockSnapshot {
    #[must_use]
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            time: now.format("%I:%M %p").to_string(),
            date: now.format("%A, %B %-d").to_string(),
            today: now.date(),
        }
    }
}

pub struct ClockService {
    clock: Box<dyn Clock>,
    snapshot: ClockSnapshot,
}

impl ClockService {
    #[must_use]
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let snapshot = ClockSnapshot::at(clock.now());
        Self { clock, snapshot }
    }

    pub fn refresh(&mut self) {
        self.snapshot = ClockSnapshot::at(self.clock.now());
    }

    #[must_use]
    pub fn snapshot(&self) -> &ClockSnapshot {
        &self.snapshot
    }
}

impl std::fmt::Debug for ClockService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockService")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

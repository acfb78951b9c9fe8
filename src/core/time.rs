use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone};

/// Source of "now" for the client.
///
/// Broadcast date strings on the listing page carry no year, so the search
/// workflow stamps them with the year of the injected clock. Tests pin the
/// clock with [`MockTimeProvider`] to keep parsed dates deterministic.
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub struct MockTimeProvider {
    current_time: Arc<Mutex<DateTime<Local>>>,
}

impl MockTimeProvider {
    pub fn new(time: DateTime<Local>) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(time)),
        }
    }

    /// Clock pinned to midnight on the given calendar date.
    ///
    /// # Panics
    ///
    /// Panics on an invalid calendar date; intended for tests.
    pub fn fixed(year: i32, month: u32, day: u32) -> Self {
        Self::new(
            Local
                .with_ymd_and_hms(year, month, day, 0, 0, 0)
                .single()
                .expect("valid calendar date"),
        )
    }

    pub fn set_time(&self, time: DateTime<Local>) {
        let mut t = self.current_time.lock().unwrap();
        *t = time;
    }
}

impl TimeProvider for MockTimeProvider {
    fn now(&self) -> DateTime<Local> {
        *self.current_time.lock().unwrap()
    }
}

//! Shared test doubles for unit and integration tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::outbound::memory::InMemoryCatalog;

/// Fixed starting instant used by catalog tests.
#[must_use]
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).single() {
        Some(value) => value,
        None => panic!("fixture timestamp must be unambiguous"),
    }
}

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// In-memory catalog driven by a [`MutableClock`] starting at
/// [`fixture_timestamp`].
#[must_use]
pub fn in_memory_catalog() -> (Arc<InMemoryCatalog>, Arc<MutableClock>) {
    let clock = Arc::new(MutableClock::new(fixture_timestamp()));
    let catalog = Arc::new(InMemoryCatalog::new(clock.clone()));
    (catalog, clock)
}

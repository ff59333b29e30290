//!
//! # Clock
//!
//! Time source used when stamping status timestamps.
//!
use std::sync::Mutex;

use chrono::Duration;

use crate::time::Time;

pub trait Clock: Send + Sync {
    fn now(&self) -> Time;
}

/// reads the system wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        Time::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<Time>,
}

impl FixedClock {
    pub fn new(start: Time) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn set(&self, time: Time) {
        *self.lock() = time;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.lock();
        *current = Time::new(*current.inner() + by);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Time> {
        // a poisoned clock still holds a valid time
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Time {
        *self.lock()
    }
}

#[cfg(test)]
mod test {

    use chrono::{Duration, TimeZone, Utc};

    use crate::time::Time;

    use super::{Clock, FixedClock, SystemClock};

    #[test]
    fn test_fixed_clock() {
        let start = Time::new(Utc.with_ymd_and_hms(2022, 4, 1, 0, 0, 0).unwrap());
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now().to_string(), "2022-04-01T00:01:30Z");

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_system_clock_is_not_zero() {
        assert!(!SystemClock.now().is_zero());
    }
}

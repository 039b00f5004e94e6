//! Wall-clock source for execution durations.
//!
//! An execution without an end date is still running; its duration is
//! measured against [`Clock::now_utc`].

use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// # Example
///
/// ```
/// use pagerduty_alert::time::{Clock, SystemClock};
///
/// let now = SystemClock.now_utc();
/// assert!(now.timestamp() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as a UTC timestamp.
    fn now_utc(&self) -> DateTime<Utc> {
        self.now().into()
    }
}

/// Clock reading [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Clock frozen at a fixed offset from the epoch.
    struct FrozenClock(u64);

    impl Clock for FrozenClock {
        fn now(&self) -> SystemTime {
            SystemTime::UNIX_EPOCH + Duration::from_secs(self.0)
        }
    }

    #[test]
    fn system_clock_tracks_wall_time() {
        let before = Utc::now();
        let now = SystemClock.now_utc();
        let after = Utc::now();

        assert!(before <= now && now <= after);
    }

    #[test]
    fn now_utc_converts_frozen_time() {
        let clock = FrozenClock(1_714_557_600);

        assert_eq!(clock.now_utc().to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn running_execution_measured_against_clock() {
        let started: DateTime<Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
        let clock = FrozenClock(1_714_557_665);

        assert_eq!((clock.now_utc() - started).num_seconds(), 65);
    }

    #[test]
    fn clocks_are_shareable() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<SystemClock>();
        assert_send_sync::<FrozenClock>();
    }
}

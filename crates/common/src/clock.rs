//! Injectable current-time source.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

/// Time source for expiration handling.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Default wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A time source frozen at a Unix timestamp (whole seconds) that can be moved
/// explicitly.
#[derive(Debug)]
pub struct FixedTimeSource {
    timestamp: AtomicI64,
}

impl FixedTimeSource {
    #[must_use]
    pub fn at(timestamp: i64) -> Self {
        Self {
            timestamp: AtomicI64::new(timestamp),
        }
    }

    pub fn set(&self, timestamp: i64) {
        self.timestamp.store(timestamp, Ordering::SeqCst);
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.timestamp
            .fetch_add(delta.num_seconds(), Ordering::SeqCst);
    }

    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp.load(Ordering::SeqCst)
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        // Out-of-range timestamps clamp to the epoch rather than panic.
        DateTime::from_timestamp(self.timestamp(), 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source() {
        let now = SystemTimeSource.now();

        // Should be a reasonable timestamp (after 2020-01-01)
        assert!(now.timestamp() > 1_577_836_800);
    }

    #[test]
    fn test_fixed_time_source() {
        let clock = FixedTimeSource::at(1_700_000_000);
        assert_eq!(clock.now().timestamp(), 1_700_000_000);

        clock.advance(TimeDelta::minutes(30));
        assert_eq!(clock.now().timestamp(), 1_700_001_800);

        clock.set(42);
        assert_eq!(clock.timestamp(), 42);
        assert_eq!(clock.now().timestamp(), 42);
    }

    #[test]
    fn test_fixed_time_source_out_of_range() {
        let clock = FixedTimeSource::at(i64::MAX);
        assert_eq!(clock.now(), DateTime::UNIX_EPOCH);
    }
}

//! Request timestamps for signed Binance endpoints.
//!
//! Signed requests carry a `timestamp` parameter in milliseconds since the
//! UNIX epoch. The server rejects requests whose timestamp falls outside the
//! receive window, so the value must track wall-clock time.

use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;

/// Trait for providing request timestamps.
pub trait TimestampProvider: Send + Sync {
    /// Milliseconds since the UNIX epoch to attach to the next signed request.
    fn timestamp_millis(&self) -> u64;
}

/// Wall-clock timestamp provider.
///
/// Never hands out a value lower than the previous one, so a clock step
/// backwards cannot reorder requests issued from the same client.
pub struct SystemClock {
    last_millis: AtomicU64,
}

impl SystemClock {
    /// Create a new system clock provider.
    pub fn new() -> Self {
        Self {
            last_millis: AtomicU64::new(0),
        }
    }

    fn now_millis() -> u64 {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        u64::try_from(nanos / 1_000_000).unwrap_or_default()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampProvider for SystemClock {
    fn timestamp_millis(&self) -> u64 {
        let now = Self::now_millis();
        let previous = self.last_millis.fetch_max(now, Ordering::SeqCst);
        now.max(previous)
    }
}

/// A provider that always returns the same timestamp.
///
/// Useful for reproducible signatures in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestamp(pub u64);

impl TimestampProvider for FixedTimestamp {
    fn timestamp_millis(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();

        let mut last = 0u64;
        for _ in 0..1000 {
            let ts = clock.timestamp_millis();
            assert!(ts >= last, "Timestamps must never go backwards");
            last = ts;
        }
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        let floor = 1_577_836_800_000u64;
        assert!(SystemClock::new().timestamp_millis() > floor);
    }

    #[test]
    fn test_system_clock_shared_across_threads() {
        let clock = std::sync::Arc::new(SystemClock::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let c = clock.clone();
            handles.push(thread::spawn(move || {
                let mut last = 0u64;
                for _ in 0..500 {
                    let ts = c.timestamp_millis();
                    assert!(ts >= last);
                    last = ts;
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_fixed_timestamp() {
        assert_eq!(FixedTimestamp(1_499_827_319_559).timestamp_millis(), 1_499_827_319_559);
    }
}

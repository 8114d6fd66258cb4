//! Clock adapters for [`TimeSource`].

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::ports::outbound::TimeSource;

/// Default time source using system time.
///
/// A system clock set before the Unix epoch reads as `i64::MAX`, so every
/// signed timestamp looks stale and a freshness check rejects it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> i64 {
        unix_seconds(SystemTime::now())
    }
}

fn unix_seconds(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
        Err(e) => {
            tracing::warn!(
                behind_epoch_secs = e.duration().as_secs(),
                "System clock is before the Unix epoch; timestamps will fail freshness checks"
            );
            i64::MAX
        }
    }
}

/// Settable time source for tests and replaying recorded deliveries.
#[derive(Debug, Default)]
pub struct FixedTimeSource {
    time: AtomicI64,
}

impl FixedTimeSource {
    pub fn new(initial: i64) -> Self {
        Self {
            time: AtomicI64::new(initial),
        }
    }

    pub fn set(&self, time: i64) {
        self.time.store(time, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.time.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> i64 {
        self.time.load(Ordering::SeqCst)
    }
}

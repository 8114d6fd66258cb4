//! # Outbound Ports (Driven Ports / SPI)
//!
//! The only thing verification needs from the outside world is the time.

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

//! Injected time source.
//!
//! Layout is a pure function of its inputs, so "now" is passed in through a
//! [`TimeProvider`] instead of being read from the ambient clock.

use chrono::{Local, Offset, TimeZone, Utc};

/// Supplies the current instant and the viewer's UTC offset.
pub trait TimeProvider {
    /// Current instant (ms since the Unix epoch).
    fn now_ms(&self) -> i64;

    /// Viewer's offset from UTC at the given instant (ms, east positive).
    fn utc_offset_ms(&self, at_ms: i64) -> i64;
}

/// Wall clock in the process' local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeProvider for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn utc_offset_ms(&self, at_ms: i64) -> i64 {
        Local
            .timestamp_millis_opt(at_ms)
            .earliest()
            .map(|dt| i64::from(dt.offset().fix().local_minus_utc()) * 1000)
            .unwrap_or(0)
    }
}

/// A clock frozen at one instant with a constant offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedClock {
    /// The instant returned by `now_ms` (ms).
    pub now_ms: i64,
    /// The constant viewer offset (ms).
    pub offset_ms: i64,
}

impl FixedClock {
    /// Creates a UTC clock frozen at `now_ms`.
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms,
            offset_ms: 0,
        }
    }

    /// Sets the viewer offset.
    pub fn with_offset(mut self, offset_ms: i64) -> Self {
        self.offset_ms = offset_ms;
        self
    }
}

impl TimeProvider for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn utc_offset_ms(&self, _at_ms: i64) -> i64 {
        self.offset_ms
    }
}

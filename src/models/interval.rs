//! Time spans, group sets and day arithmetic.
//!
//! # Time Model
//! All times are in milliseconds since the Unix epoch. A day starts at a
//! UTC midnight; the time of day is the offset from it.
//!
//! # Group Sets
//! An empty group set is a wildcard: it applies to every group.

use serde::{Deserialize, Serialize};

use super::{GroupId, Program};

/// Length of one day (ms).
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A time interval [begin, end).
///
/// Half-open interval: includes begin, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSpan {
    /// Interval start (ms, inclusive).
    pub begin_ms: i64,
    /// Interval end (ms, exclusive).
    pub end_ms: i64,
}

impl TimeSpan {
    /// Creates a new span.
    pub fn new(begin_ms: i64, end_ms: i64) -> Self {
        Self { begin_ms, end_ms }
    }

    /// Duration of this span (ms), saturating at `i64::MAX`.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.begin_ms)
    }

    /// Whether two spans overlap. Touching spans do not.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.begin_ms < other.end_ms && other.begin_ms < self.end_ms
    }
}

/// Whether two programs overlap in time.
///
/// Unplaced programs overlap nothing.
pub fn time_overlaps(a: &Program, b: &Program) -> bool {
    match (a.span(), b.span()) {
        (Some(a), Some(b)) => a.overlaps(&b),
        _ => false,
    }
}

/// Whether two group sets share a group, treating empty sets as wildcards.
pub fn groups_intersect(a: &[GroupId], b: &[GroupId]) -> bool {
    a.is_empty() || b.is_empty() || a.iter().any(|g| b.contains(g))
}

/// Whether two group sets contain the same ids, ignoring order and repeats.
pub fn same_group_set(a: &[GroupId], b: &[GroupId]) -> bool {
    a.iter().all(|g| b.contains(g)) && b.iter().all(|g| a.contains(g))
}

/// UTC midnight of the day containing `time_ms`.
#[inline]
pub fn date_of(time_ms: i64) -> i64 {
    time_ms - time_of_day(time_ms)
}

/// Offset of `time_ms` from its UTC midnight.
#[inline]
pub fn time_of_day(time_ms: i64) -> i64 {
    time_ms.rem_euclid(DAY_MS)
}

/// Ceiling division for a positive divisor. Never overflows.
#[inline]
pub fn ceil_div(value: i64, divisor: i64) -> i64 {
    value.div_euclid(divisor) + i64::from(value.rem_euclid(divisor) != 0)
}

/// Floors `value` to a multiple of a positive `step`.
#[inline]
pub fn floor_to(value: i64, step: i64) -> i64 {
    value.div_euclid(step) * step
}

/// Ceils `value` to a multiple of a positive `step`, saturating.
#[inline]
pub fn ceil_to(value: i64, step: i64) -> i64 {
    ceil_div(value, step).saturating_mul(step)
}

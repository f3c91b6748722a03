use std::time::{Duration, Instant};

use crate::clock::{saturating_nanos, signed_nanos};
use crate::unit::{to_unit, TimeUnit, Unit};

/// One elapsed-time sample, stored as signed nanoseconds.
///
/// Negative spans (end read before start) are kept as-is, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimeDiff {
    nanos: i64,
}

impl TimeDiff {
    /// Sample between two readings of the monotonic clock
    pub fn new(begin: Instant, end: Instant) -> Self {
        Self {
            nanos: signed_nanos(begin, end),
        }
    }

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Raw span in nanoseconds
    pub const fn time_span(&self) -> i64 {
        self.nanos
    }

    /// Span expressed in unit `U`
    pub fn span<U: TimeUnit>(&self) -> f64 {
        to_unit::<U>(self.nanos)
    }

    /// Span expressed in a unit chosen at runtime
    pub fn span_in(&self, unit: Unit) -> f64 {
        unit.convert(self.nanos)
    }
}

impl From<Duration> for TimeDiff {
    fn from(duration: Duration) -> Self {
        Self::from_nanos(saturating_nanos(duration))
    }
}

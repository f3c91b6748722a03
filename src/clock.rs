//! Clock sources for trials.
//!
//! [`MonotonicClock`] is what every measurement uses unless a caller
//! substitutes its own [`Clock`].

use std::time::{Duration, Instant};

/// A source of comparable instants with nanosecond subtraction.
pub trait Clock {
    type Instant: Copy;

    fn now(&self) -> Self::Instant;

    /// Signed nanoseconds from `start` to `end`; negative if `end` comes first.
    fn nanos_between(&self, start: Self::Instant, end: Self::Instant) -> i64;
}

/// Steady wall-clock time via [`std::time::Instant`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn nanos_between(&self, start: Instant, end: Instant) -> i64 {
        signed_nanos(start, end)
    }
}

pub(crate) fn signed_nanos(start: Instant, end: Instant) -> i64 {
    match end.checked_duration_since(start) {
        Some(forward) => saturating_nanos(forward),
        None => -saturating_nanos(start.duration_since(end)),
    }
}

pub(crate) fn saturating_nanos(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}

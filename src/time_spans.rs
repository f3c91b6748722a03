//! Sample Accumulator
//!
//! Collects the [`TimeDiff`] of every trial in a run and reduces them to an
//! arithmetic mean.

use std::borrow::Borrow;

use crate::measurement::TimeMeasurement;
use crate::time_diff::TimeDiff;
use crate::unit::{TimeUnit, Unit};

/// Append-only, ordered store of per-trial samples
#[derive(Debug, Clone, Default)]
pub struct TimeSpans {
    samples: Vec<TimeDiff>,
}

impl TimeSpans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-reserve room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Append one sample. Takes either a `TimeDiff` or a `&TimeDiff`.
    pub fn add<S: Borrow<TimeDiff>>(&mut self, sample: S) {
        self.samples.push(*sample.borrow());
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TimeDiff] {
        &self.samples
    }

    /// Mean of all samples in unit `U`; 0 when empty
    pub fn average<U: TimeUnit>(&self) -> f64 {
        self.mean(|sample| sample.span::<U>())
    }

    /// Mean of all samples in a unit chosen at runtime; 0 when empty
    pub fn average_in(&self, unit: Unit) -> f64 {
        self.mean(|sample| sample.span_in(unit))
    }

    fn mean(&self, span: impl Fn(&TimeDiff) -> f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: f64 = self.samples.iter().map(span).sum();
        total / self.samples.len() as f64
    }

    pub fn unit_suffix<U: TimeUnit>(&self) -> &'static str {
        U::SUFFIX
    }

    pub fn time_measurement<U: TimeUnit>(&self) -> TimeMeasurement {
        TimeMeasurement::new(self.average::<U>(), self.unit_suffix::<U>())
    }

    pub fn time_measurement_in(&self, unit: Unit) -> TimeMeasurement {
        TimeMeasurement::new(self.average_in(unit), unit.suffix())
    }
}

impl Extend<TimeDiff> for TimeSpans {
    fn extend<I: IntoIterator<Item = TimeDiff>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl FromIterator<TimeDiff> for TimeSpans {
    fn from_iter<I: IntoIterator<Item = TimeDiff>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

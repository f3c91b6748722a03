use std::fmt;

use serde::Serialize;

/// Final result of a run: an averaged magnitude and its unit suffix
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeMeasurement {
    pub time: f64,
    pub unit: &'static str,
}

impl TimeMeasurement {
    pub fn new(time: f64, unit: &'static str) -> Self {
        Self { time, unit }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }
}

impl fmt::Display for TimeMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.12} {}", self.time, self.unit)
    }
}

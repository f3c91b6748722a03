//! Benchmark Configuration
//!
//! Defaults are fixed when the crate is compiled. An integrator can change
//! them by setting `RKZP_ITER_AMT_DEFAULT` (trial count) and
//! `RKZP_UNIT_DEFAULT` (unit name or suffix) in the build environment;
//! malformed values fail the build.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::unit::Unit;

/// Trials per run when the caller does not say otherwise
pub const DEFAULT_REPETITIONS: u64 = match option_env!("RKZP_ITER_AMT_DEFAULT") {
    Some(value) => parse_repetitions(value),
    None => 10_000,
};

/// Unit of the result when the caller does not say otherwise
pub const DEFAULT_UNIT: Unit = match option_env!("RKZP_UNIT_DEFAULT") {
    Some(name) => match Unit::lookup(name) {
        Some(unit) => unit,
        None => panic!("RKZP_UNIT_DEFAULT does not name a supported unit of time"),
    },
    None => Unit::Milliseconds,
};

/// Diagnostic shown when a type without a `TimeUnit` implementation is used
pub const UNIT_NOT_IMPLEMENTED: &str = "Provide your own specialization for time unit scaling :(";

const fn parse_repetitions(value: &str) -> u64 {
    let bytes = value.as_bytes();
    assert!(!bytes.is_empty(), "RKZP_ITER_AMT_DEFAULT is empty");

    let mut total: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(
            digit.is_ascii_digit(),
            "RKZP_ITER_AMT_DEFAULT must be a decimal integer"
        );
        total = match total.checked_mul(10) {
            Some(shifted) => match shifted.checked_add((digit - b'0') as u64) {
                Some(sum) => sum,
                None => panic!("RKZP_ITER_AMT_DEFAULT overflows u64"),
            },
            None => panic!("RKZP_ITER_AMT_DEFAULT overflows u64"),
        };
        i += 1;
    }

    assert!(total > 0, "RKZP_ITER_AMT_DEFAULT must be at least 1");
    total
}

/// Parameters of one averaged measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Unit the average is reported in
    pub unit: Unit,
    /// Number of sequential trials
    pub repetitions: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT,
            repetitions: DEFAULT_REPETITIONS,
        }
    }
}

impl BenchConfig {
    pub fn new(unit: Unit, repetitions: u64) -> Self {
        Self { unit, repetitions }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_repetitions(mut self, repetitions: u64) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Reject configurations no run can satisfy
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(BenchError::InvalidRepetitions(self.repetitions));
        }
        Ok(())
    }

    /// Parse a JSON object such as `{"unit": "microseconds", "repetitions": 500}`.
    /// Missing fields take the compiled-in defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BenchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| BenchError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }
}

//! Error Types for rukozop-bench
//!
//! Measurement itself cannot fail; these cover configuration and I/O
//! around it.

use std::fmt;

/// Unified error type for benchmarking operations
#[derive(Debug, Clone, PartialEq)]
pub enum BenchError {
    /// A run was requested with zero trials
    InvalidRepetitions(u64),
    /// A unit name that none of the six units answers to
    UnknownUnit(String),
    /// Invalid configuration
    ConfigError(String),
    /// I/O operation failed
    IoError(String),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::InvalidRepetitions(n) => {
                write!(f, "Invalid repetitions: {} (at least one trial is required)", n)
            }
            BenchError::UnknownUnit(name) => write!(f, "Unknown unit of time: {}", name),
            BenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BenchError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for BenchError {}

/// Result type alias for benchmarking operations
pub type Result<T> = std::result::Result<T, BenchError>;

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::ConfigError(format!("JSON error: {}", err))
    }
}

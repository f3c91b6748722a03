//! Units of Time
//!
//! Each supported granularity is a zero-sized marker type implementing
//! [`TimeUnit`], so the conversion factor and suffix are resolved at compile
//! time. [`Unit`] is the runtime mirror used by configuration and the CLI.
//!
//! Asking for a unit that has no [`TimeUnit`] implementation does not build:
//!
//! ```compile_fail
//! use rukozop_bench::{TimeDiff, TimeUnit};
//!
//! struct Fortnights;
//!
//! let diff = TimeDiff::from_nanos(1_000);
//! let _ = diff.span::<Fortnights>();
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

/// Compile-time description of a unit of time.
#[diagnostic::on_unimplemented(
    message = "Provide your own specialization for time unit scaling :(",
    label = "`{Self}` is not a supported unit of time",
    note = "supported units: Nanoseconds, Microseconds, Milliseconds, Seconds, Minutes, Hours"
)]
pub trait TimeUnit {
    /// How many nanoseconds make up one of this unit
    const NANOS_PER_UNIT: u64;
    /// Short display suffix ("ns", "ms", ...)
    const SUFFIX: &'static str;
    /// Runtime tag for this unit
    const UNIT: Unit;
}

macro_rules! time_unit {
    ($(#[$doc:meta])* $name:ident, $factor:expr, $suffix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl TimeUnit for $name {
            const NANOS_PER_UNIT: u64 = $factor;
            const SUFFIX: &'static str = $suffix;
            const UNIT: Unit = Unit::$name;
        }
    };
}

time_unit!(
    /// 1 ns
    Nanoseconds, 1, "ns"
);
time_unit!(
    /// 1 000 ns
    Microseconds, Nanoseconds::NANOS_PER_UNIT * 1000, "mus"
);
time_unit!(Milliseconds, Microseconds::NANOS_PER_UNIT * 1000, "ms");
time_unit!(Seconds, Milliseconds::NANOS_PER_UNIT * 1000, "s");
time_unit!(Minutes, Seconds::NANOS_PER_UNIT * 60, "min");
time_unit!(Hours, Minutes::NANOS_PER_UNIT * 60, "h");

/// Express `nanos` nanoseconds in unit `U`.
pub fn to_unit<U: TimeUnit>(nanos: i64) -> f64 {
    nanos as f64 / U::NANOS_PER_UNIT as f64
}

/// Express `value` of unit `U` in nanoseconds.
pub fn from_unit<U: TimeUnit>(value: f64) -> f64 {
    value * U::NANOS_PER_UNIT as f64
}

/// Runtime selector for one of the six supported units
///
/// Serializes as the lowercase full name; deserializes from any name
/// [`Unit::lookup`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Unit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl Unit {
    /// All units, finest first
    pub fn all() -> [Unit; 6] {
        [
            Unit::Nanoseconds,
            Unit::Microseconds,
            Unit::Milliseconds,
            Unit::Seconds,
            Unit::Minutes,
            Unit::Hours,
        ]
    }

    pub const fn nanos_per_unit(self) -> u64 {
        match self {
            Unit::Nanoseconds => Nanoseconds::NANOS_PER_UNIT,
            Unit::Microseconds => Microseconds::NANOS_PER_UNIT,
            Unit::Milliseconds => Milliseconds::NANOS_PER_UNIT,
            Unit::Seconds => Seconds::NANOS_PER_UNIT,
            Unit::Minutes => Minutes::NANOS_PER_UNIT,
            Unit::Hours => Hours::NANOS_PER_UNIT,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Unit::Nanoseconds => Nanoseconds::SUFFIX,
            Unit::Microseconds => Microseconds::SUFFIX,
            Unit::Milliseconds => Milliseconds::SUFFIX,
            Unit::Seconds => Seconds::SUFFIX,
            Unit::Minutes => Minutes::SUFFIX,
            Unit::Hours => Hours::SUFFIX,
        }
    }

    /// Lowercase full name, as used in config files
    pub const fn name(self) -> &'static str {
        match self {
            Unit::Nanoseconds => "nanoseconds",
            Unit::Microseconds => "microseconds",
            Unit::Milliseconds => "milliseconds",
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
        }
    }

    /// Express `nanos` nanoseconds in this unit.
    pub fn convert(self, nanos: i64) -> f64 {
        nanos as f64 / self.nanos_per_unit() as f64
    }

    /// Const lookup shared by `FromStr` and the build-time default.
    /// Accepts full names, singular names and suffixes, ignoring ASCII case.
    pub const fn lookup(name: &str) -> Option<Unit> {
        const ALIASES: [(&str, Unit); 24] = [
            ("nanoseconds", Unit::Nanoseconds),
            ("nanosecond", Unit::Nanoseconds),
            ("ns", Unit::Nanoseconds),
            ("nanos", Unit::Nanoseconds),
            ("microseconds", Unit::Microseconds),
            ("microsecond", Unit::Microseconds),
            ("mus", Unit::Microseconds),
            ("us", Unit::Microseconds),
            ("milliseconds", Unit::Milliseconds),
            ("millisecond", Unit::Milliseconds),
            ("ms", Unit::Milliseconds),
            ("millis", Unit::Milliseconds),
            ("seconds", Unit::Seconds),
            ("second", Unit::Seconds),
            ("s", Unit::Seconds),
            ("secs", Unit::Seconds),
            ("minutes", Unit::Minutes),
            ("minute", Unit::Minutes),
            ("min", Unit::Minutes),
            ("mins", Unit::Minutes),
            ("hours", Unit::Hours),
            ("hour", Unit::Hours),
            ("h", Unit::Hours),
            ("hrs", Unit::Hours),
        ];

        let mut i = 0;
        while i < ALIASES.len() {
            if eq_ignore_ascii_case(ALIASES[i].0.as_bytes(), name.as_bytes()) {
                return Some(ALIASES[i].1);
            }
            i += 1;
        }
        None
    }
}

const fn eq_ignore_ascii_case(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i].to_ascii_lowercase() != b[i].to_ascii_lowercase() {
            return false;
        }
        i += 1;
    }
    true
}

impl FromStr for Unit {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::lookup(s.trim()).ok_or_else(|| BenchError::UnknownUnit(s.to_string()))
    }
}

impl TryFrom<String> for Unit {
    type Error = BenchError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<U: TimeUnit>(nanos: i64) -> f64 {
        from_unit::<U>(to_unit::<U>(nanos))
    }

    #[test]
    fn test_factor_chain() {
        assert_eq!(Nanoseconds::NANOS_PER_UNIT, 1);
        assert_eq!(Microseconds::NANOS_PER_UNIT, 1_000);
        assert_eq!(Milliseconds::NANOS_PER_UNIT, 1_000_000);
        assert_eq!(Seconds::NANOS_PER_UNIT, 1_000_000_000);
        assert_eq!(Minutes::NANOS_PER_UNIT, 60_000_000_000);
        assert_eq!(
            Hours::NANOS_PER_UNIT / Nanoseconds::NANOS_PER_UNIT,
            3_600_000_000_000
        );
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(Nanoseconds::SUFFIX, "ns");
        assert_eq!(Milliseconds::SUFFIX, "ms");
        assert_eq!(Unit::Microseconds.suffix(), "mus");
        assert_eq!(Unit::Hours.suffix(), "h");
    }

    #[test]
    fn test_round_trip_all_units() {
        for nanos in [0_i64, 1, 999, 1_234_567, 3_600_000_000_001, -42] {
            for value in [
                round_trip::<Nanoseconds>(nanos),
                round_trip::<Microseconds>(nanos),
                round_trip::<Milliseconds>(nanos),
                round_trip::<Seconds>(nanos),
                round_trip::<Minutes>(nanos),
                round_trip::<Hours>(nanos),
            ] {
                let tolerance = (nanos.abs() as f64 * 1e-12).max(1e-6);
                assert!(
                    (value - nanos as f64).abs() <= tolerance,
                    "{} round-tripped to {}",
                    nanos,
                    value
                );
            }
        }
    }

    #[test]
    fn test_runtime_mirror_matches_markers() {
        assert_eq!(Milliseconds::UNIT, Unit::Milliseconds);
        assert_eq!(Unit::Minutes.nanos_per_unit(), Minutes::NANOS_PER_UNIT);
        assert_eq!(Unit::Seconds.convert(1_500_000_000), 1.5);
        let factors: Vec<u64> = Unit::all().iter().map(|u| u.nanos_per_unit()).collect();
        assert!(factors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!("ms".parse::<Unit>().unwrap(), Unit::Milliseconds);
        assert_eq!("Hours".parse::<Unit>().unwrap(), Unit::Hours);
        assert_eq!(" mus ".parse::<Unit>().unwrap(), Unit::Microseconds);
        assert_eq!("us".parse::<Unit>().unwrap(), Unit::Microseconds);
        for unit in Unit::all() {
            assert_eq!(unit.name().parse::<Unit>().unwrap(), unit);
            assert_eq!(unit.suffix().parse::<Unit>().unwrap(), unit);
        }

        let err = "fortnights".parse::<Unit>().unwrap_err();
        assert!(err.to_string().contains("fortnights"));
    }

    #[test]
    fn test_unit_serde_names() {
        let json = serde_json::to_string(&Unit::Microseconds).unwrap();
        assert_eq!(json, "\"microseconds\"");
        let unit: Unit = serde_json::from_str("\"hours\"").unwrap();
        assert_eq!(unit, Unit::Hours);
        let unit: Unit = serde_json::from_str("\"ms\"").unwrap();
        assert_eq!(unit, Unit::Milliseconds);
        let unit: Unit = serde_json::from_str("\"Mus\"").unwrap();
        assert_eq!(unit, Unit::Microseconds);
        assert!(serde_json::from_str::<Unit>("\"days\"").is_err());
    }
}

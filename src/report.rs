//! Text and JSON reporting of a [`TimeMeasurement`].
//!
//! Precision is passed to each format call, so nothing here changes how
//! other output on the same stream is formatted.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::Result;
use crate::measurement::TimeMeasurement;

/// Digits after the decimal point in text reports
pub const REPORT_PRECISION: usize = 12;

/// `"<label> took on average <time> <unit>"`
pub fn format_time(label: &str, measurement: &TimeMeasurement) -> String {
    format!(
        "{} took on average {:.prec$} {}",
        label,
        measurement.time,
        measurement.unit,
        prec = REPORT_PRECISION
    )
}

pub fn write_time<W: Write>(
    out: &mut W,
    label: &str,
    measurement: &TimeMeasurement,
) -> io::Result<()> {
    writeln!(out, "{}", format_time(label, measurement))
}

/// Print a report line to stdout.
pub fn print_time(label: &str, measurement: &TimeMeasurement) {
    println!("{}", format_time(label, measurement));
}

#[derive(Serialize)]
struct JsonReport<'a> {
    label: &'a str,
    time: f64,
    unit: &'a str,
}

/// Write one JSON object per line: `{"label":..,"time":..,"unit":..}`
pub fn write_json<W: Write>(
    out: &mut W,
    label: &str,
    measurement: &TimeMeasurement,
) -> Result<()> {
    let report = JsonReport {
        label,
        time: measurement.time,
        unit: measurement.unit,
    };
    serde_json::to_writer(&mut *out, &report)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        let m = TimeMeasurement::new(1.0, "ms");
        assert_eq!(
            format_time("My function", &m),
            "My function took on average 1.000000000000 ms"
        );
    }

    #[test]
    fn test_format_small_value() {
        let m = TimeMeasurement::new(0.000000123456, "s");
        assert_eq!(format_time("f", &m), "f took on average 0.000000123456 s");
    }

    #[test]
    fn test_write_time_leaves_stream_usable() {
        let mut buf = Vec::new();
        write_time(&mut buf, "a", &TimeMeasurement::new(2.5, "mus")).unwrap();
        writeln!(buf, "{}", 2.5).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "a took on average 2.500000000000 mus\n2.5\n");
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&mut buf, "sort", &TimeMeasurement::new(0.5, "ms")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "{\"label\":\"sort\",\"time\":0.5,\"unit\":\"ms\"}\n");
    }
}

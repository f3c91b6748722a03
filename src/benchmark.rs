//! Measurement Functions
//!
//! A trial brackets one synchronous call with two clock readings. An averaged
//! measurement runs N trials back to back on the calling thread and reduces
//! them to a [`TimeMeasurement`].
//!
//! Panics raised by the measured callable are not caught: they unwind through
//! the measurement call and no partial average is produced. Callables that
//! report failure through `Result` go through [`try_measure`], which stops at
//! the first error and hands it back unchanged.

use std::hint::black_box;

use tracing::{debug, trace};

use crate::clock::{Clock, MonotonicClock};
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::measurement::TimeMeasurement;
use crate::time_diff::TimeDiff;
use crate::time_spans::TimeSpans;
use crate::unit::TimeUnit;

/// Upper bound on samples reserved up front; larger runs grow as they go.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 24;

/// Time a single call of `func` on the monotonic clock.
/// The callable's return value is discarded.
pub fn measure_exec_time<F, R>(func: F) -> TimeDiff
where
    F: FnOnce() -> R,
{
    measure_exec_time_with(&MonotonicClock, func)
}

/// Time a single call of `func` on `clock`.
pub fn measure_exec_time_with<C, F, R>(clock: &C, func: F) -> TimeDiff
where
    C: Clock,
    F: FnOnce() -> R,
{
    let start = clock.now();
    black_box(func());
    let end = clock.now();

    TimeDiff::from_nanos(clock.nanos_between(start, end))
}

/// Average `repetitions` trials of `func`, reported in the unit `U` selected
/// by its marker value.
///
/// ```
/// use rukozop_bench::{measure_exec_time_avg, Nanoseconds};
///
/// let m = measure_exec_time_avg(Nanoseconds, || (0..64u64).sum::<u64>(), 100).unwrap();
/// assert_eq!(m.unit, "ns");
/// assert!(m.time >= 0.0);
/// ```
pub fn measure_exec_time_avg<U, F, R>(
    _unit: U,
    mut func: F,
    repetitions: u64,
) -> Result<TimeMeasurement>
where
    U: TimeUnit,
    F: FnMut() -> R,
{
    let spans = run_trials(&MonotonicClock, repetitions, || Ok::<_, BenchError>(func()))?;
    let measurement = spans.time_measurement::<U>();
    log_result(repetitions, &measurement);
    Ok(measurement)
}

/// Average trials of `func` as described by `config`.
pub fn measure<F, R>(config: &BenchConfig, func: F) -> Result<TimeMeasurement>
where
    F: FnMut() -> R,
{
    measure_with(&MonotonicClock, config, func)
}

/// Average trials of `func` using the compiled-in unit and repetition count.
pub fn measure_default<F, R>(func: F) -> Result<TimeMeasurement>
where
    F: FnMut() -> R,
{
    measure(&BenchConfig::default(), func)
}

/// Like [`measure`], reading time from `clock`.
pub fn measure_with<C, F, R>(
    clock: &C,
    config: &BenchConfig,
    mut func: F,
) -> Result<TimeMeasurement>
where
    C: Clock,
    F: FnMut() -> R,
{
    let spans = run_trials(clock, config.repetitions, || Ok::<_, BenchError>(func()))?;
    let measurement = spans.time_measurement_in(config.unit);
    log_result(config.repetitions, &measurement);
    Ok(measurement)
}

/// Average trials of a fallible callable. The first `Err` aborts the run and
/// is returned as-is; configuration errors are converted into `E`.
pub fn try_measure<F, R, E>(
    config: &BenchConfig,
    func: F,
) -> std::result::Result<TimeMeasurement, E>
where
    F: FnMut() -> std::result::Result<R, E>,
    E: From<BenchError>,
{
    let spans = run_trials(&MonotonicClock, config.repetitions, func)?;
    let measurement = spans.time_measurement_in(config.unit);
    log_result(config.repetitions, &measurement);
    Ok(measurement)
}

/// Run `repetitions` sequential trials into a fresh accumulator.
pub fn run_trials<C, F, R, E>(
    clock: &C,
    repetitions: u64,
    mut func: F,
) -> std::result::Result<TimeSpans, E>
where
    C: Clock,
    F: FnMut() -> std::result::Result<R, E>,
    E: From<BenchError>,
{
    if repetitions == 0 {
        return Err(BenchError::InvalidRepetitions(repetitions).into());
    }

    debug!(repetitions, "starting benchmark run");

    let capacity = usize::try_from(repetitions)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATED_SAMPLES);
    let mut spans = TimeSpans::with_capacity(capacity);

    for trial in 0..repetitions {
        let start = clock.now();
        let outcome = black_box(func());
        let end = clock.now();

        if outcome.is_err() {
            debug!(trial, "trial failed, aborting run");
        }
        outcome?;

        let sample = TimeDiff::from_nanos(clock.nanos_between(start, end));
        trace!(trial, nanos = sample.time_span(), "trial finished");
        metrics::counter!("rkzp_trials_total", 1);
        metrics::histogram!("rkzp_trial_duration_ns", sample.time_span() as f64);
        spans.add(sample);
    }

    Ok(spans)
}

fn log_result(repetitions: u64, measurement: &TimeMeasurement) {
    debug!(
        repetitions,
        average = measurement.time,
        unit = measurement.unit,
        "benchmark run complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{Microseconds, Milliseconds, Nanoseconds, Unit};
    use std::cell::Cell;

    /// Clock that advances by a fixed step every time it is read
    struct SteppingClock {
        now: Cell<i64>,
        step: i64,
    }

    impl SteppingClock {
        fn new(step: i64) -> Self {
            Self {
                now: Cell::new(0),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        type Instant = i64;

        fn now(&self) -> i64 {
            let t = self.now.get();
            self.now.set(t + self.step);
            t
        }

        fn nanos_between(&self, start: i64, end: i64) -> i64 {
            end - start
        }
    }

    #[test]
    fn test_single_trial_runs_once() {
        let mut calls = 0;
        let diff = measure_exec_time(|| calls += 1);
        assert_eq!(calls, 1);
        assert!(diff.time_span() >= 0);
    }

    #[test]
    fn test_single_trial_with_clock() {
        let clock = SteppingClock::new(250);
        let diff = measure_exec_time_with(&clock, || 42);
        assert_eq!(diff.time_span(), 250);
    }

    #[test]
    fn test_exact_repetitions() {
        let mut calls = 0u64;
        let m = measure_exec_time_avg(Nanoseconds, || calls += 1, 37).unwrap();
        assert_eq!(calls, 37);
        assert_eq!(m.unit, "ns");
        assert!(m.time >= 0.0);
    }

    #[test]
    fn test_deterministic_average() {
        let clock = SteppingClock::new(1_500);
        let config = BenchConfig::new(Unit::Microseconds, 4);
        let m = measure_with(&clock, &config, || ()).unwrap();
        assert_eq!(m.time, 1.5);
        assert_eq!(m.unit, "mus");
    }

    #[test]
    fn test_zero_repetitions_rejected() {
        let mut calls = 0;
        let err = measure_exec_time_avg(Milliseconds, || calls += 1, 0).unwrap_err();
        assert_eq!(err, BenchError::InvalidRepetitions(0));
        assert_eq!(calls, 0);

        let config = BenchConfig::default().with_repetitions(0);
        assert!(measure(&config, || ()).is_err());
    }

    #[test]
    fn test_run_trials_preallocates() {
        let spans = run_trials(&SteppingClock::new(1), 100, || Ok::<_, BenchError>(())).unwrap();
        assert_eq!(spans.len(), 100);
        assert!(spans.samples().iter().all(|s| s.time_span() == 1));
        assert!((spans.average::<Microseconds>() - 0.001).abs() < 1e-12);
    }

    #[derive(Debug, PartialEq)]
    enum WorkError {
        Broken(u32),
        Bench(BenchError),
    }

    impl From<BenchError> for WorkError {
        fn from(err: BenchError) -> Self {
            WorkError::Bench(err)
        }
    }

    #[test]
    fn test_try_measure_stops_at_first_error() {
        let mut calls = 0;
        let config = BenchConfig::new(Unit::Nanoseconds, 10);
        let result = try_measure(&config, || {
            calls += 1;
            if calls == 3 {
                Err(WorkError::Broken(calls))
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err(WorkError::Broken(3)));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_try_measure_config_error() {
        let config = BenchConfig::new(Unit::Nanoseconds, 0);
        let result = try_measure(&config, || Ok::<_, WorkError>(()));
        assert_eq!(result, Err(WorkError::Bench(BenchError::InvalidRepetitions(0))));
    }

    #[test]
    #[should_panic(expected = "trial blew up")]
    fn test_panic_propagates() {
        let _ = measure_exec_time_avg(Nanoseconds, || panic!("trial blew up"), 5);
    }
}

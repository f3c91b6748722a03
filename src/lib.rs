//! Small benchmarking helper: run a callable many times on a monotonic clock,
//! average the elapsed time and report it in a chosen unit.
//!
//! ```
//! use rukozop_bench::{measure_exec_time_avg, print_time, Milliseconds};
//!
//! fn my_awesome_function() {
//!     std::hint::black_box((0..1_000u64).sum::<u64>());
//! }
//!
//! let m = measure_exec_time_avg(Milliseconds, my_awesome_function, 100).unwrap();
//! print_time("My awesome function", &m);
//! ```

pub mod benchmark;
pub mod clock;
pub mod config;
pub mod error;
pub mod measurement;
pub mod report;
pub mod time_diff;
pub mod time_spans;
pub mod unit;

pub use benchmark::{
    measure, measure_default, measure_exec_time, measure_exec_time_avg, measure_exec_time_with,
    measure_with, run_trials, try_measure,
};
pub use clock::{Clock, MonotonicClock};
pub use config::{BenchConfig, DEFAULT_REPETITIONS, DEFAULT_UNIT};
pub use error::{BenchError, Result};
pub use measurement::TimeMeasurement;
pub use report::{format_time, print_time, write_json, write_time};
pub use time_diff::TimeDiff;
pub use time_spans::TimeSpans;
pub use unit::{
    Hours, Microseconds, Milliseconds, Minutes, Nanoseconds, Seconds, TimeUnit, Unit,
};

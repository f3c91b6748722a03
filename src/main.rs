use std::hint::black_box;
use std::io;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use rand::Rng;
use rukozop_bench::{
    measure, measure_default, measure_exec_time_avg, print_time, write_json, write_time,
    BenchConfig, BenchError, Milliseconds, Unit, DEFAULT_REPETITIONS, DEFAULT_UNIT,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Average the wall-clock time of a workload", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Measure one built-in workload
    Run {
        #[arg(short, long, value_enum)]
        workload: Workload,

        /// Workload size: milliseconds for sleep, iterations for spin, elements for sort
        #[arg(short, long, default_value_t = 1)]
        arg: u64,

        /// Unit of the reported average (name or suffix, e.g. "ms")
        #[arg(short, long)]
        unit: Option<Unit>,

        /// Number of trials
        #[arg(short, long)]
        repetitions: Option<u64>,

        /// JSON file with `unit` and `repetitions`; flags take precedence
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Label printed in front of the result
        #[arg(short, long)]
        label: Option<String>,

        /// Emit the result as a JSON line
        #[arg(long)]
        json: bool,

        /// Print per-trial metrics in Prometheus text format after the run
        #[arg(long)]
        metrics: bool,
    },
    /// Walk through the default/explicit unit and repetition combinations
    Demo {
        /// Trials for the scenarios that take an explicit count
        #[arg(short, long, default_value_t = 2)]
        repetitions: u64,

        /// Trials for the scenarios that use the compiled-in default
        #[arg(long, default_value_t = DEFAULT_REPETITIONS)]
        default_repetitions: u64,
    },
    /// List supported units
    Units,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Workload {
    /// thread::sleep for `arg` milliseconds
    Sleep,
    /// Busy loop of `arg` iterations
    Spin,
    /// Sort `arg` random u64 values
    Sort,
}

impl Workload {
    fn label(self, arg: u64) -> String {
        match self {
            Workload::Sleep => format!("sleep({} ms)", arg),
            Workload::Spin => format!("spin({})", arg),
            Workload::Sort => format!("sort({})", arg),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args.command) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), BenchError> {
    match command {
        Command::Run {
            workload,
            arg,
            unit,
            repetitions,
            config,
            label,
            json,
            metrics,
        } => {
            let mut bench = match config {
                Some(path) => BenchConfig::from_json_file(&path)?,
                None => BenchConfig::default(),
            };
            if let Some(unit) = unit {
                bench = bench.with_unit(unit);
            }
            if let Some(repetitions) = repetitions {
                bench = bench.with_repetitions(repetitions);
            }
            bench.validate()?;

            let recorder = if metrics { Some(install_metrics()?) } else { None };

            info!(
                workload = ?workload,
                arg,
                unit = %bench.unit,
                repetitions = bench.repetitions,
                "running workload"
            );
            let measurement = run_workload(workload, arg, &bench)?;
            let label = label.unwrap_or_else(|| workload.label(arg));

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                write_json(&mut out, &label, &measurement)?;
            } else {
                write_time(&mut out, &label, &measurement)?;
            }

            if let Some(handle) = recorder {
                print!("{}", handle.render());
            }
            Ok(())
        }
        Command::Demo {
            repetitions,
            default_repetitions,
        } => demo(repetitions, default_repetitions),
        Command::Units => {
            for unit in Unit::all() {
                println!(
                    "{:<13} {:<4} {} ns",
                    unit.name(),
                    unit.suffix(),
                    unit.nanos_per_unit()
                );
            }
            Ok(())
        }
    }
}

fn run_workload(
    workload: Workload,
    arg: u64,
    config: &BenchConfig,
) -> Result<rukozop_bench::TimeMeasurement, BenchError> {
    match workload {
        Workload::Sleep => measure(config, || sleep_ms(arg)),
        Workload::Spin => measure(config, || spin(arg)),
        Workload::Sort => {
            let len = usize::try_from(arg)
                .map_err(|_| BenchError::ConfigError(format!("sort size {} too large", arg)))?;
            let mut rng = rand::thread_rng();
            measure(config, || {
                let mut values: Vec<u64> = (0..len).map(|_| rng.gen()).collect();
                values.sort_unstable();
                values
            })
        }
    }
}

fn install_metrics() -> Result<PrometheusHandle, BenchError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| BenchError::ConfigError(format!("metrics recorder: {}", e)))
}

fn sleep_ms(ms: u64) {
    thread::sleep(Duration::from_millis(ms));
}

fn spin(iterations: u64) -> u64 {
    let mut acc = 0u64;
    for i in 0..black_box(iterations) {
        acc = acc.wrapping_add(black_box(i));
    }
    acc
}

fn measure_me(msg: &str, sleep_time_ms: u64) {
    black_box(msg);
    sleep_ms(sleep_time_ms);
}

fn demo(repetitions: u64, default_repetitions: u64) -> Result<(), BenchError> {
    println!("Testing the usage scenarios on a 1 ms sleep (each may take a while)");
    println!("Working...");

    let defaults = BenchConfig::default().with_repetitions(default_repetitions);

    let m = measure(&defaults, || measure_me("Hello there!", 1))?;
    print_time(
        &format!(
            "measure_me, {} repetitions, default unit ({})",
            default_repetitions, DEFAULT_UNIT
        ),
        &m,
    );

    let m = measure_exec_time_avg(
        Milliseconds,
        || measure_me("Hello there!", 1),
        default_repetitions,
    )?;
    print_time(
        &format!("measure_me, {} repetitions, milliseconds", default_repetitions),
        &m,
    );

    let m = measure(
        &BenchConfig::default().with_repetitions(repetitions),
        || measure_me("Hello there!", 1),
    )?;
    print_time(
        &format!("measure_me, {} repetitions, default unit ({})", repetitions, DEFAULT_UNIT),
        &m,
    );

    let m = measure(&BenchConfig::new(Unit::Microseconds, repetitions), || {
        measure_me("Hello there!", 1)
    })?;
    print_time(
        &format!("measure_me, {} repetitions, microseconds", repetitions),
        &m,
    );

    let msg = String::from("Hello there!");
    let closure = || measure_me(&msg, 1);
    let m = if default_repetitions == DEFAULT_REPETITIONS {
        measure_default(closure)?
    } else {
        measure(&defaults, closure)?
    };
    print_time("Closure capturing its arguments, default settings", &m);

    println!("Demo completed!");
    Ok(())
}

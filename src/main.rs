use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use lanebench::catalog;
use lanebench::config::{BenchConfig, DEFAULT_COUNT, DEFAULT_REPETITIONS};
use lanebench::report::{rule, SystemInfo, Table, BANNER_WIDTH};
use lanebench::{BenchError, NumericKind, Operation};

/// Times scalar against lane-wise (SIMD) arithmetic for every numeric kind
#[derive(Debug, Parser)]
#[command(name = "lanebench", version)]
struct Cli {
    /// Number of elements in each operand array
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    count: usize,

    /// Number of passes over the arrays per timed phase
    #[arg(short, long, default_value_t = DEFAULT_REPETITIONS)]
    repetitions: usize,

    /// Seed of the input generator
    #[arg(short, long, default_value_t = lanebench::bench::DEFAULT_SEED)]
    seed: u64,

    /// Only run these kinds (i8, u8, ..., f64; aliases such as `int` or `double` work too)
    #[arg(short, long = "kind")]
    kinds: Vec<NumericKind>,

    /// Only run these operations (add, sub, mul, div)
    #[arg(short, long = "operation")]
    operations: Vec<Operation>,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Stop at the first failing case
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = BenchConfig::new()
        .count(cli.count)
        .repetitions(cli.repetitions)
        .seed(cli.seed);
    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    for &kind in &cli.kinds {
        for &operation in &cli.operations {
            if let Err(e) = catalog::find(kind, operation) {
                warn!("{e}, skipping");
            }
        }
    }

    let entries: Vec<_> = catalog::select(&cli.kinds, &cli.operations).collect();
    if entries.is_empty() {
        error!("no benchmark case matches the given filters");
        return ExitCode::FAILURE;
    }

    println!("{}", SystemInfo::collect());
    println!("{}", rule('=', BANNER_WIDTH));
    println!();
    println!();

    let mut table = Table::new();
    println!("{}", table.header());

    let mut failures: Vec<BenchError> = Vec::new();
    for entry in entries {
        match entry.run(&config) {
            Ok(result) => {
                match result.speedup() {
                    Some(speedup) => info!(
                        "{} {}: scalar {} ms, simd {} ms, {speedup:.2}x",
                        entry.kind, entry.operation, result.scalar_millis, result.vector_millis
                    ),
                    None => info!(
                        "{} {}: scalar {} ms, simd under 1 ms",
                        entry.kind, entry.operation, result.scalar_millis
                    ),
                }
                println!("{}", table.row(entry.kind, entry.operation, &result));
            }
            Err(e) => {
                error!("{e}");
                println!("{}", table.failed_row(entry.kind, entry.operation));
                failures.push(e);
                if cli.fail_fast {
                    break;
                }
            }
        }
    }

    println!("{}", table.footer());

    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        error!("{} case(s) failed", failures.len());
        ExitCode::FAILURE
    }
}

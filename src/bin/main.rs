use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use probe_table::{
    experiment::{Experiment, ExperimentConfig, DEFAULT_MAX_RANGE, DEFAULT_MIN_RANGE},
    source::{now_millis, DataSource, SourceOptions},
};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Compares average probe counts of linear probing and double hashing.
#[derive(Parser, Debug)]
#[command(name = "probe-table", version)]
struct Args {
    /// 1 = random numbers, 2 = date values, 3 = word list
    data_source: DataSource,

    /// Target ratio of stored keys to table capacity, strictly between 0 and 1
    load_factor: f64,

    /// 0 = summary, 1 = also dump both tables, 2 = also log every insert
    #[arg(default_value_t = 0)]
    debug_level: u8,

    #[arg(long, default_value_t = DEFAULT_MIN_RANGE)]
    min_range: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_RANGE)]
    max_range: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value = "word-list.txt")]
    word_list: PathBuf,
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let args = Args::parse();
    let filter = if args.debug_level >= 2 { "info,probe_table=debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    let config = ExperimentConfig {
        source: args.data_source,
        load_factor: args.load_factor,
        debug_level: args.debug_level,
        min_range: args.min_range,
        max_range: args.max_range,
        source_options: SourceOptions { seed: args.seed, start_millis: now_millis(), word_list: args.word_list },
        ..ExperimentConfig::default()
    };

    let outcome = Experiment::run(&config).context("experiment failed")?;

    println!("Found a twin prime table capacity: {}", outcome.capacity);
    println!("Input: {}   Loadfactor: {:.2}", config.source, config.load_factor);
    println!("{}", outcome.linear_report);
    println!("{}", outcome.double_report);

    if config.dumps_enabled() {
        let results = [
            outcome.linear.dump_to_file(&config.linear_dump),
            outcome.double.dump_to_file(&config.double_dump),
        ];
        for result in results {
            if let Err(err) = result {
                log::error!("{err}");
            }
        }
    }

    Ok(())
}

//! Search Binary
//!
//! Runs one worker of a program-synthesis experiment: a genetic
//! algorithm or uniform random search over tape-machine programs,
//! with results appended to this worker's shard under --logdir.

use clap::Parser;
use tapeforge::config::Experiment;
use tapeforge::run::Worker;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// directory for logs, checkpoints, and result shards
    #[arg(long)]
    logdir: std::path::PathBuf,
    /// experiment configuration, e.g. env=c(task="reverse"),agent=c(algorithm="ga")
    #[arg(long, default_value = "")]
    config: String,
    /// program budget per repetition; 0 means unlimited
    #[arg(long = "max_npe", default_value_t = 0)]
    max_npe: usize,
    /// repetitions this worker runs
    #[arg(long = "num_repetitions", default_value_t = 1)]
    num_repetitions: usize,
    /// this worker's shard id
    #[arg(long = "task_id", default_value_t = 0)]
    task_id: usize,
    /// total workers in the experiment
    #[arg(long = "num_workers", default_value_t = 1)]
    num_workers: usize,
    /// terminal log level (the file log always gets debug)
    #[arg(long = "log_level", default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    let level = args
        .log_level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);
    tapeforge::init(&args.logdir, level);
    let experiment = match Experiment::build(&args.config) {
        Ok(experiment) => experiment,
        Err(e) => {
            log::error!("configuration error: {:#}", e);
            std::process::exit(2);
        }
    };
    let worker = Worker {
        logdir: args.logdir,
        experiment,
        max_npe: args.max_npe,
        repetitions: args.num_repetitions,
        num_workers: args.num_workers,
        shard_id: args.task_id,
    };
    if let Err(e) = worker.run() {
        log::error!("worker failed: {:#}", e);
        std::process::exit(1);
    }
}

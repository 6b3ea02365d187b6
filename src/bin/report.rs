//! Report Binary
//!
//! Aggregates the result shards of an experiment directory and prints
//! per-shard progress plus every solution found.

use clap::Parser;
use tapeforge::results::Results;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// experiment directory containing experiment_results_*.txt
    #[arg(long)]
    logdir: std::path::PathBuf,
    /// how many shards the experiment was launched with
    #[arg(long = "num_shards")]
    num_shards: usize,
}

fn main() {
    let args = Args::parse();
    let (records, stats) = Results::new(&args.logdir).read_all(args.num_shards);
    let solved = records.iter().filter(|r| r.found_solution).count();
    println!(
        "{} records across {} expected shards; {} solved",
        records.len(),
        args.num_shards,
        solved,
    );
    for stat in &stats {
        println!(
            "shard {:>4}: {:>3}/{:<3} {}",
            stat.id,
            stat.completed,
            stat.expected,
            if stat.finished { "finished" } else { "unfinished" },
        );
    }
    for record in records.iter().filter(|r| r.found_solution) {
        println!(
            "rep {:>4} [{}] npe {:>8} reward {:+.4}  {}",
            record.global_rep, record.task, record.npe, record.best_reward, record.code_solution,
        );
    }
}

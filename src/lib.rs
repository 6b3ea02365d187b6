pub mod config;
pub mod results;
pub mod reward;
pub mod run;
pub mod score;
pub mod search;
pub mod tape;
pub mod task;

/// dimensional analysis types
type Cell = u16;
type Reward = f64;
type Weight = f64;

// interpreter bounds
const MAX_EXECUTION_STEPS: usize = 5000;
const CASE_TIMEOUT_SECS: f64 = 0.1;

// scoring parameters
const CORRECT_BONUS: Reward = 2.0;
const LENGTH_BONUS: Reward = 1.0;
const FAILURE_REWARD: Reward = -2.0;

// search parameters
const SELECTION_SHIFT: Weight = 0.05;
const HALL_OF_FAME_SIZE: usize = 2;
const TOPK_SIZE: usize = 10;
const CHECKPOINT_PERIOD: usize = 100;
const STATUS_FLUSH_PERIOD: usize = 1000;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize logging. one term logger at the requested level,
/// one per-run file logger at Debug under <logdir>/logs.
pub fn init(logdir: &std::path::Path, level: log::LevelFilter) {
    let logs = logdir.join("logs");
    std::fs::create_dir_all(&logs).expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(logs.join(format!("{}.log", time))).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

use crate::Reward;
use serde::Deserialize;
use serde::Serialize;

/// one finished repetition, as a single line in its worker's shard.
/// `code_solution` is empty when no solution was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub max_npe: usize,
    pub max_global_repetitions: usize,
    pub max_local_repetitions: usize,
    pub npe: usize,
    pub batch_size: usize,
    pub num_batches: usize,
    pub found_solution: bool,
    pub best_reward: Reward,
    pub code_solution: String,
    pub task: String,
    pub global_rep: usize,
}

pub mod checkpoint;
pub mod ga;
pub mod individual;
pub mod queue;
pub mod random;
pub mod roulette;

pub use checkpoint::Checkpoint;
pub use ga::Ga;
pub use individual::Individual;
pub use queue::MaxUniquePriorityQueue;
pub use random::RandomSearch;
pub use roulette::RouletteWheel;

use crate::Reward;

/// what a search engine hands back when it stops, whatever the reason.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// programs executed during this session
    pub executed: usize,
    /// generations (GA) or batches (random search) completed
    pub batches: usize,
    pub found_solution: bool,
    pub best_code: String,
    pub best_reward: Reward,
}

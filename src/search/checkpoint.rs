use super::individual::Individual;
use crate::Reward;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// everything the genetic algorithm needs to resume: the generation
/// counter, the whole population, and the hall-of-fame entries.
/// written as a single blob with an atomic replace so readers never
/// observe a half-written checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub generation: usize,
    pub population: Vec<Individual>,
    pub elites: Vec<(Reward, String)>,
}

impl Checkpoint {
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let staging = path.with_extension("tmp");
        let file = std::fs::File::create(&staging)?;
        bincode::serialize_into(std::io::BufWriter::new(file), self)?;
        std::fs::rename(&staging, path)?;
        log::debug!("checkpointed generation {}", self.generation);
        Ok(())
    }

    /// a missing or corrupt checkpoint is not an error, just a fresh
    /// start.
    pub fn load(path: &Path) -> Option<Self> {
        let file = std::fs::File::open(path).ok()?;
        match bincode::deserialize_from(std::io::BufReader::new(file)) {
            Ok(checkpoint) => Some(checkpoint),
            Err(e) => {
                log::warn!("discarding corrupt checkpoint {:?}: {}", path, e);
                None
            }
        }
    }
}

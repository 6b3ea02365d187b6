use super::individual::Individual;
use super::Outcome;
use crate::score::Scorer;
use crate::Reward;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// progress counter persisted between interruptions. a plain text
/// file: programs seen, the solved flag, then the best program and its
/// reward once one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub seen: usize,
    pub solved: bool,
    pub best_code: String,
    pub best_reward: Reward,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            seen: 0,
            solved: false,
            best_code: String::new(),
            best_reward: f64::NEG_INFINITY,
        }
    }
}

impl Progress {
    pub fn load(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        let lines = text.lines().collect::<Vec<&str>>();
        let seen = lines.first().and_then(|s| s.parse::<usize>().ok());
        let solved = lines.get(1).and_then(|s| s.parse::<bool>().ok());
        match (seen, solved) {
            (Some(seen), Some(solved)) => Self {
                seen,
                solved,
                best_code: lines.get(2).map(|s| s.to_string()).unwrap_or_default(),
                best_reward: lines
                    .get(3)
                    .and_then(|s| s.parse::<f64>().ok())
                    .unwrap_or(f64::NEG_INFINITY),
            },
            _ => {
                log::warn!("discarding corrupt status file {:?}", path);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut file = std::fs::File::create(path)?;
        if self.best_code.is_empty() {
            write!(file, "{}\n{}\n", self.seen, self.solved)?;
        } else {
            write!(
                file,
                "{}\n{}\n{}\n{}\n",
                self.seen, self.solved, self.best_code, self.best_reward
            )?;
        }
        file.flush()?;
        Ok(())
    }
}

/// the uniform-random baseline: sample fixed-length programs from the
/// 8-token alphabet until one is correct or the budget runs out.
/// shares the scoring path with the genetic algorithm.
pub struct RandomSearch {
    genome_length: usize,
    status: PathBuf,
    rng: SmallRng,
}

impl RandomSearch {
    pub fn new(genome_length: usize, status: PathBuf, seed: u64) -> Self {
        assert!(genome_length > 0);
        Self {
            genome_length,
            status,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn run(&mut self, scorer: &Scorer, max_programs: usize) -> anyhow::Result<Outcome> {
        let mut progress = Progress::load(&self.status);
        if progress.seen > 0 {
            log::info!("resuming after {} programs", progress.seen);
        }
        let start = progress.seen;
        while !progress.solved && (max_programs == 0 || progress.seen < max_programs) {
            let candidate = Individual::random(self.genome_length, &mut self.rng);
            let scored = scorer.score(&candidate.genome);
            progress.seen += 1;
            if scored.total() > progress.best_reward {
                progress.best_reward = scored.total();
                progress.best_code = candidate.genome.clone();
            }
            if scored.correct() {
                log::info!("solved after {} programs: {}", progress.seen, candidate.genome);
                progress.solved = true;
            }
            if progress.seen % crate::STATUS_FLUSH_PERIOD == 0 {
                progress.save(&self.status)?;
            }
        }
        progress.save(&self.status)?;
        Ok(Outcome {
            executed: progress.seen - start,
            batches: progress.seen,
            found_solution: progress.solved,
            best_code: progress.best_code,
            best_reward: progress.best_reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Scorer;
    use crate::task;

    #[test]
    fn progress_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.txt");
        let progress = Progress {
            seen: 1234,
            solved: true,
            best_code: "+.+.".to_string(),
            best_reward: 0.75,
        };
        progress.save(&path).unwrap();
        assert_eq!(progress, Progress::load(&path));
    }

    #[test]
    fn missing_or_garbled_status_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.txt");
        assert_eq!(Progress::default(), Progress::load(&path));
        std::fs::write(&path, "what\neven\nis\nthis").unwrap();
        assert_eq!(Progress::default(), Progress::load(&path));
    }

    #[test]
    fn stops_at_the_program_budget() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.txt");
        let scorer = Scorer::new(task::make("reverse").unwrap(), 10, false, false);
        let mut search = RandomSearch::new(10, path.clone(), 17);
        let outcome = search.run(&scorer, 50).unwrap();
        if !outcome.found_solution {
            assert_eq!(50, outcome.executed);
        }
        // the budget is cumulative across resumptions
        let mut resumed = RandomSearch::new(10, path, 18);
        let outcome = resumed.run(&scorer, 50).unwrap();
        assert_eq!(0, outcome.executed);
    }
}

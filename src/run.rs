use crate::config::Algorithm;
use crate::config::Experiment;
use crate::results::Record;
use crate::results::Shard;
use crate::score::Scorer;
use crate::search::Ga;
use crate::search::RandomSearch;
use crate::task;
use std::path::PathBuf;

/// one worker process: runs its local repetitions of the configured
/// experiment and appends one record per repetition to its own shard.
/// workers share nothing but the filesystem; restarting a worker picks
/// up after the last completed repetition.
pub struct Worker {
    pub logdir: PathBuf,
    pub experiment: Experiment,
    /// program budget per repetition; 0 means unlimited
    pub max_npe: usize,
    pub repetitions: usize,
    pub num_workers: usize,
    pub shard_id: usize,
}

impl Worker {
    pub fn run(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.logdir)?;
        let scorer = Scorer::new(
            task::make(&self.experiment.task)?,
            self.experiment.timestep_limit,
            self.experiment.simplify,
            self.experiment.require_correct_syntax,
        );
        let shard = Shard::new(&self.logdir, self.shard_id);
        let completed = shard.read().len();
        if completed >= self.repetitions {
            log::info!("all {} repetitions already recorded", self.repetitions);
            return Ok(());
        }
        if completed > 0 {
            log::info!("resuming at local repetition {}", completed);
        }
        for rep in completed..self.repetitions {
            let global_rep = self.shard_id * self.repetitions + rep;
            let workdir = self.logdir.join(format!("run_{}", global_rep));
            std::fs::create_dir_all(&workdir)?;
            let seed = self.experiment.seed.wrapping_add(global_rep as u64);
            log::info!(
                "repetition {} ({}/{} local) of task {}",
                global_rep,
                rep + 1,
                self.repetitions,
                self.experiment.task,
            );
            let outcome = match self.experiment.algorithm {
                Algorithm::Ga {
                    crossover_rate,
                    mutation_rate,
                } => Ga::new(
                    self.experiment.batch_size,
                    self.experiment.timestep_limit,
                    crossover_rate,
                    mutation_rate,
                    self.experiment.generations,
                    Some(workdir.join("evolution.checkpoint")),
                    seed,
                )
                .run(&scorer, self.max_npe)?,
                Algorithm::Rand => {
                    RandomSearch::new(self.experiment.timestep_limit, workdir.join("status.txt"), seed)
                        .run(&scorer, self.max_npe)?
                }
            };
            log::info!(
                "repetition {} {} after {} programs, best {:+.4}",
                global_rep,
                if outcome.found_solution { "solved" } else { "unsolved" },
                outcome.executed,
                outcome.best_reward,
            );
            shard.append(&Record {
                max_npe: self.max_npe,
                max_global_repetitions: self.num_workers * self.repetitions,
                max_local_repetitions: self.repetitions,
                npe: outcome.executed,
                batch_size: self.experiment.batch_size,
                num_batches: outcome.batches,
                found_solution: outcome.found_solution,
                best_reward: outcome.best_reward,
                code_solution: if outcome.found_solution {
                    outcome.best_code
                } else {
                    String::new()
                },
                task: self.experiment.task.clone(),
                global_rep,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Experiment;
    use crate::results::Results;

    fn worker(logdir: PathBuf) -> Worker {
        let experiment = Experiment::build(
            "env=c(task=\"print\"),agent=c(algorithm=\"rand\"),timestep_limit=10,batch_size=8",
        )
        .unwrap();
        Worker {
            logdir,
            experiment,
            max_npe: 40,
            repetitions: 2,
            num_workers: 3,
            shard_id: 1,
        }
    }

    #[test]
    fn records_every_repetition_and_resumes_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let worker = worker(dir.path().to_path_buf());
        worker.run().unwrap();
        let (records, stats) = Results::new(dir.path()).read_all(2);
        assert_eq!(2, records.len());
        assert!(!stats[0].finished);
        assert!(stats[1].finished);
        assert_eq!(6, records[0].max_global_repetitions);
        assert_eq!(2, records[0].global_rep);
        assert_eq!(3, records[1].global_rep);
        // a second run finds the shard complete and adds nothing
        worker.run().unwrap();
        assert_eq!(2, Results::new(dir.path()).read_all(2).0.len());
    }
}

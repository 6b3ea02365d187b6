use super::checkpoint::Checkpoint;
use super::individual::random_op;
use super::individual::Individual;
use super::queue::MaxUniquePriorityQueue;
use super::roulette::RouletteWheel;
use super::Outcome;
use crate::score::Scorer;
use crate::Reward;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

type Elites = MaxUniquePriorityQueue<String, ()>;

/// generational genetic algorithm over fixed-length program strings.
///
/// each generation draws parents by roulette selection over
/// positive-shifted fitness, crosses adjacent pairs at one point,
/// mutates children position-wise, scores whatever changed, and
/// reinserts the hall of fame so the best genomes always survive.
pub struct Ga {
    population_size: usize,
    genome_length: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    /// generation budget; 0 means unlimited
    generations: usize,
    checkpoint: Option<PathBuf>,
    rng: SmallRng,
    /// genome string -> (reward, correct). one cache instance is bound
    /// to exactly one task, so the genome alone is a sufficient key.
    cache: HashMap<String, (Reward, bool)>,
    /// best programs ever seen, beyond the elites that re-enter the
    /// population. persisted for off-policy consumers.
    topk: Elites,
    executed: usize,
}

impl Ga {
    pub fn new(
        population_size: usize,
        genome_length: usize,
        crossover_rate: f64,
        mutation_rate: f64,
        generations: usize,
        checkpoint: Option<PathBuf>,
        seed: u64,
    ) -> Self {
        assert!(population_size > crate::HALL_OF_FAME_SIZE);
        assert!(genome_length > 0);
        Self {
            population_size,
            genome_length,
            crossover_rate,
            mutation_rate,
            generations,
            checkpoint,
            rng: SmallRng::seed_from_u64(seed),
            cache: HashMap::new(),
            topk: Elites::new(crate::TOPK_SIZE),
            executed: 0,
        }
    }

    fn topk_path(&self) -> Option<PathBuf> {
        self.checkpoint.as_ref().map(|p| p.with_file_name("topk.dat"))
    }

    /// run until a correct program appears, or the generation budget or
    /// the program budget (0 = unlimited) runs out.
    pub fn run(&mut self, scorer: &Scorer, max_programs: usize) -> anyhow::Result<Outcome> {
        let (mut generation, mut population, mut elites) = self.restore(scorer);
        self.evaluate(scorer, &mut population);
        for individual in &population {
            let fitness = individual.fitness.expect("evaluated");
            elites.push(fitness, individual.genome.clone(), ());
            self.topk.push(fitness, individual.genome.clone(), ());
        }
        loop {
            let best = self.best(&population);
            if self.cache[&best.genome].1 {
                log::info!("solved at generation {}: {}", generation, best.genome);
                break;
            }
            if self.generations != 0 && generation >= self.generations {
                log::info!("generation budget exhausted at {}", generation);
                break;
            }
            if max_programs != 0 && self.executed >= max_programs {
                log::info!("program budget exhausted after {}", self.executed);
                break;
            }
            generation += 1;
            let pool = self.select(&population, self.population_size - elites.len());
            let mut children = self.breed(pool);
            self.evaluate(scorer, &mut children);
            for child in &children {
                let fitness = child.fitness.expect("evaluated");
                elites.push(fitness, child.genome.clone(), ());
                self.topk.push(fitness, child.genome.clone(), ());
            }
            population = children;
            for (genome, ()) in elites.iter_in_order() {
                population.push(Individual {
                    fitness: Some(self.cache[&genome].0),
                    genome,
                });
            }
            if generation % crate::CHECKPOINT_PERIOD == 0 {
                self.checkpoint(generation, &population, &elites)?;
                let best = self.best(&population);
                log::info!(
                    "generation {:>6} best {:+.4} ({})",
                    generation,
                    best.fitness.expect("evaluated"),
                    best.genome,
                );
            }
        }
        let best = self.best(&population);
        Ok(Outcome {
            executed: self.executed,
            batches: generation,
            found_solution: self.cache[&best.genome].1,
            best_code: best.genome.clone(),
            best_reward: best.fitness.expect("evaluated"),
        })
    }

    /// fresh population, or the checkpointed one. checkpointed elites
    /// are re-scored rather than trusted, since the scorer (not the
    /// checkpoint) is the authority on fitness.
    fn restore(&mut self, scorer: &Scorer) -> (usize, Vec<Individual>, Elites) {
        if let Some(path) = self.topk_path() {
            if let Ok(topk) = Elites::load(&path, crate::TOPK_SIZE) {
                self.topk = topk;
            }
        }
        let mut elites = Elites::new(crate::HALL_OF_FAME_SIZE);
        match self.checkpoint.as_ref().and_then(|p| Checkpoint::load(p)) {
            Some(checkpoint) => {
                log::info!("resuming from generation {}", checkpoint.generation);
                for (_, genome) in checkpoint.elites {
                    let scored = scorer.score(&genome);
                    self.executed += 1;
                    self.cache
                        .insert(genome.clone(), (scored.total(), scored.correct()));
                    elites.push(scored.total(), genome, ());
                }
                // checkpointed fitness is not trusted; everything gets
                // re-scored against the live scorer
                let population = checkpoint
                    .population
                    .into_iter()
                    .map(|individual| Individual {
                        genome: individual.genome,
                        fitness: None,
                    })
                    .collect();
                (checkpoint.generation, population, elites)
            }
            None => {
                let population = (0..self.population_size)
                    .map(|_| Individual::random(self.genome_length, &mut self.rng))
                    .collect();
                (0, population, elites)
            }
        }
    }

    fn checkpoint(
        &self,
        generation: usize,
        population: &[Individual],
        elites: &Elites,
    ) -> anyhow::Result<()> {
        if let Some(ref path) = self.checkpoint {
            Checkpoint {
                generation,
                population: population.to_vec(),
                elites: elites
                    .iter_in_order()
                    .map(|(genome, ())| (self.cache[&genome].0, genome))
                    .collect(),
            }
            .save(path)?;
        }
        if let Some(path) = self.topk_path() {
            self.topk.save(&path)?;
        }
        Ok(())
    }

    fn best<'a>(&self, population: &'a [Individual]) -> &'a Individual {
        population
            .iter()
            .max_by(|a, b| {
                a.fitness
                    .expect("evaluated")
                    .total_cmp(&b.fitness.expect("evaluated"))
            })
            .expect("nonempty population")
    }

    /// roulette selection with positive-shifted fitness, drawn with
    /// replacement.
    fn select(&mut self, population: &[Individual], count: usize) -> Vec<Individual> {
        let mut wheel = RouletteWheel::new();
        for (i, individual) in population.iter().enumerate() {
            let fitness = individual.fitness.expect("evaluated");
            let shifted = fitness.max(0.0) + crate::SELECTION_SHIFT;
            assert!(shifted > 0.0);
            wheel.add(i, shifted, None);
        }
        wheel
            .sample_many(count, &mut self.rng)
            .into_iter()
            .map(|(&i, _)| population[i].clone())
            .collect()
    }

    /// crossover adjacent pairs, then mutate every child in place.
    fn breed(&mut self, mut pool: Vec<Individual>) -> Vec<Individual> {
        for i in (1..pool.len()).step_by(2) {
            if self.rng.gen::<f64>() < self.crossover_rate {
                let (a, b) = self.crossover(&pool[i - 1].genome, &pool[i].genome);
                pool[i - 1] = Individual {
                    genome: a,
                    fitness: None,
                };
                pool[i] = Individual {
                    genome: b,
                    fitness: None,
                };
            }
        }
        for child in &mut pool {
            let mut genome = child.genome.chars().collect::<Vec<char>>();
            if self.mutate(&mut genome) {
                child.genome = genome.into_iter().collect();
                child.fitness = None;
            }
        }
        pool
    }

    /// one-point crossover that tolerates unequal lengths: the cut is
    /// drawn over the longer parent, and a cut past the shorter one
    /// moves the longer tail wholesale.
    fn crossover(&mut self, a: &str, b: &str) -> (String, String) {
        let (long, short, flipped) = if a.chars().count() >= b.chars().count() {
            (a, b, false)
        } else {
            (b, a, true)
        };
        let long = long.chars().collect::<Vec<char>>();
        let short = short.chars().collect::<Vec<char>>();
        let p = self.rng.gen_range(0..long.len().max(1));
        let (one, two) = if p >= short.len() {
            (
                long[..p].iter().collect::<String>(),
                short.iter().chain(long[p..].iter()).collect::<String>(),
            )
        } else {
            (
                long[..p].iter().chain(short[p..].iter()).collect::<String>(),
                short[..p].iter().chain(long[p..].iter()).collect::<String>(),
            )
        };
        if flipped {
            (two, one)
        } else {
            (one, two)
        }
    }

    /// position-wise mutation. each site independently picks one of
    /// four length-preserving edits, every one of which writes a fresh
    /// uniform token somewhere.
    fn mutate(&mut self, genome: &mut Vec<char>) -> bool {
        let mut changed = false;
        for pos in 0..genome.len() {
            if self.rng.gen::<f64>() >= self.mutation_rate {
                continue;
            }
            changed = true;
            let fresh = random_op(&mut self.rng);
            let rightward = self.rng.gen_bool(0.5);
            match self.rng.gen_range(0..4) {
                // insertion: shift a neighborhood off one end to make room
                0 => {
                    if rightward {
                        genome[pos..].rotate_right(1);
                    } else {
                        genome[..=pos].rotate_left(1);
                    }
                    genome[pos] = fresh;
                }
                // deletion: close the gap and refill the vacated end
                1 => {
                    if rightward {
                        genome[pos..].rotate_left(1);
                        *genome.last_mut().expect("nonempty genome") = fresh;
                    } else {
                        genome[..=pos].rotate_right(1);
                        genome[0] = fresh;
                    }
                }
                // rotation of the whole genome
                2 => {
                    if rightward {
                        genome.rotate_right(1);
                    } else {
                        genome.rotate_left(1);
                    }
                    genome[pos] = fresh;
                }
                // plain replacement
                _ => genome[pos] = fresh,
            }
        }
        changed
    }

    /// score whatever has no fitness yet, through the reward cache.
    /// cache misses run the scorer in parallel and count against the
    /// program budget.
    fn evaluate(&mut self, scorer: &Scorer, population: &mut [Individual]) {
        let misses = population
            .iter()
            .filter(|individual| individual.fitness.is_none())
            .filter(|individual| !self.cache.contains_key(&individual.genome))
            .map(|individual| individual.genome.clone())
            .collect::<std::collections::HashSet<String>>()
            .into_iter()
            .collect::<Vec<String>>();
        self.executed += misses.len();
        let scored = misses
            .into_par_iter()
            .map(|genome| {
                let scored = scorer.score(&genome);
                (genome, (scored.total(), scored.correct()))
            })
            .collect::<Vec<_>>();
        self.cache.extend(scored);
        for individual in population.iter_mut() {
            if individual.fitness.is_none() {
                individual.fitness = Some(self.cache[&individual.genome].0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Scorer;
    use crate::task;

    fn scorer() -> Scorer {
        Scorer::new(task::make("print").unwrap(), 20, false, false)
    }

    fn engine(checkpoint: Option<PathBuf>) -> Ga {
        Ga::new(16, 10, 0.5, 0.2, 3, checkpoint, 99)
    }

    #[test]
    fn crossover_preserves_total_length() {
        let mut ga = engine(None);
        for _ in 0..32 {
            let (a, b) = ga.crossover("++++++++", "><><><><");
            assert_eq!(16, a.len() + b.len());
        }
    }

    #[test]
    fn crossover_splices_unequal_parents() {
        let mut ga = engine(None);
        for _ in 0..32 {
            let (a, b) = ga.crossover("++++++++", "><");
            assert_eq!(10, a.len() + b.len());
            assert!(a.chars().chain(b.chars()).all(|c| c == '+' || c == '>' || c == '<'));
        }
    }

    #[test]
    fn mutation_preserves_length_and_alphabet() {
        let mut ga = engine(None);
        let mut genome = "++++++++++++++++".chars().collect::<Vec<char>>();
        for _ in 0..64 {
            ga.mutate(&mut genome);
            assert_eq!(16, genome.len());
            assert!(genome
                .iter()
                .all(|&c| crate::tape::Op::decode(c).is_some()));
        }
    }

    #[test]
    fn selection_prefers_the_fit() {
        let mut ga = engine(None);
        let population = vec![
            Individual {
                genome: "++".to_string(),
                fitness: Some(1.0),
            },
            Individual {
                genome: "--".to_string(),
                fitness: Some(-2.0),
            },
        ];
        let picks = ga.select(&population, 400);
        let fit = picks.iter().filter(|i| i.genome == "++").count();
        // weights are 1.05 vs 0.05, so the fit genome should dominate
        assert!(fit > 350, "fit genome picked {} times", fit);
    }

    #[test]
    fn evaluation_counts_only_cache_misses() {
        let mut ga = engine(None);
        let scorer = scorer();
        let mut population = vec![
            Individual::from("+.+.+.+.+."),
            Individual::from("+.+.+.+.+."),
            Individual::from("----"),
        ];
        ga.evaluate(&scorer, &mut population);
        assert_eq!(2, ga.executed);
        assert!(population.iter().all(|i| i.fitness.is_some()));
        ga.evaluate(&scorer, &mut population);
        assert_eq!(2, ga.executed);
    }

    #[test]
    fn finds_the_print_solution_or_stops_at_budget() {
        let mut ga = engine(None);
        let outcome = ga.run(&scorer(), 0).unwrap();
        assert!(outcome.batches <= 3);
        assert!(outcome.executed > 0);
        assert!(!outcome.best_code.is_empty());
    }

    #[test]
    fn checkpoint_resume_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evolution.checkpoint");
        let scorer = scorer();
        // force an immediate checkpoint by running exactly one period
        let mut ga = Ga::new(16, 10, 0.5, 0.2, crate::CHECKPOINT_PERIOD, Some(path.clone()), 7);
        let outcome = ga.run(&scorer, 0).unwrap();
        if path.exists() {
            let checkpoint = Checkpoint::load(&path).unwrap();
            assert_eq!(16, checkpoint.population.len());
            let mut resumed = Ga::new(16, 10, 0.5, 0.2, checkpoint.generation, Some(path), 8);
            let again = resumed.run(&scorer, 0).unwrap();
            assert_eq!(checkpoint.generation, again.batches);
        } else {
            // the run solved the task before the first checkpoint
            assert!(outcome.found_solution);
        }
    }
}

use crate::tape::Op;
use crate::Reward;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// one candidate program plus its attached fitness. fitness is unset
/// until the scorer has seen the genome, and is wiped whenever
/// crossover or mutation changes the genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub genome: String,
    pub fitness: Option<Reward>,
}

impl Individual {
    pub fn random(length: usize, rng: &mut impl Rng) -> Self {
        Self {
            genome: (0..length).map(|_| random_op(rng)).collect(),
            fitness: None,
        }
    }

    pub fn len(&self) -> usize {
        self.genome.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.genome.is_empty()
    }
}

impl From<&str> for Individual {
    fn from(genome: &str) -> Self {
        Self {
            genome: genome.to_string(),
            fitness: None,
        }
    }
}

impl std::fmt::Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.genome)
    }
}

/// uniform draw from the 8-token alphabet.
pub fn random_op(rng: &mut impl Rng) -> char {
    char::from(Op::from(rng.gen_range(0..8u8)))
}

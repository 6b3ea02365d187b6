use super::tree::Config;
use super::tree::OneOf;
use super::value::Value;
use anyhow::bail;

/// which search engine drives the experiment.
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    Ga {
        crossover_rate: f64,
        mutation_rate: f64,
    },
    Rand,
}

/// the fully resolved experiment settings, extracted from the default
/// config tree after the user's `--config` string has been strictly
/// applied. a malformed string aborts before any training starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub task: String,
    pub algorithm: Algorithm,
    pub timestep_limit: usize,
    pub batch_size: usize,
    pub generations: usize,
    pub require_correct_syntax: bool,
    pub simplify: bool,
    pub seed: u64,
}

impl Experiment {
    /// the default tree. `agent` branches on `algorithm`, and each
    /// branch carries its own hyperparameters.
    pub fn defaults() -> Config {
        Config::new()
            .with(
                "env",
                Value::Tree(
                    Config::new()
                        .with("task", Value::Str("reverse".to_string()))
                        .with("correct_syntax", Value::Bool(false)),
                ),
            )
            .with(
                "agent",
                Value::Choice(OneOf::new(
                    vec![
                        Config::new()
                            .with("algorithm", Value::Str("ga".to_string()))
                            .with("crossover_rate", Value::Float(0.95))
                            .with("mutation_rate", Value::Float(0.1)),
                        Config::new().with("algorithm", Value::Str("rand".to_string())),
                    ],
                    "algorithm",
                    Value::Str("ga".to_string()),
                )),
            )
            .with("timestep_limit", Value::Int(32))
            .with("batch_size", Value::Int(64))
            .with("generations", Value::Int(0))
            .with("simplify", Value::Bool(false))
            .with("seed", Value::Int(0))
    }

    pub fn build(config_string: &str) -> anyhow::Result<Self> {
        let mut config = Self::defaults();
        if config_string.trim().is_empty() {
            config.make_default();
        } else {
            config.strict_update(&Config::parse(config_string)?)?;
        }
        Self::extract(&config)
    }

    fn extract(config: &Config) -> anyhow::Result<Self> {
        let env = config.tree("env")?;
        let agent = config.tree("agent")?;
        let algorithm = match agent.text("algorithm")? {
            "ga" => Algorithm::Ga {
                crossover_rate: agent.float("crossover_rate")?,
                mutation_rate: agent.float("mutation_rate")?,
            },
            "rand" => Algorithm::Rand,
            other => bail!("unknown algorithm \"{}\"", other),
        };
        let timestep_limit = config.int("timestep_limit")?;
        let batch_size = config.int("batch_size")?;
        if timestep_limit <= 0 {
            bail!("timestep_limit must be positive, got {}", timestep_limit);
        }
        if batch_size <= 0 {
            bail!("batch_size must be positive, got {}", batch_size);
        }
        Ok(Self {
            task: env.text("task")?.to_string(),
            algorithm,
            timestep_limit: timestep_limit as usize,
            batch_size: batch_size as usize,
            generations: config.int("generations")?.max(0) as usize,
            require_correct_syntax: env.flag("correct_syntax")?,
            simplify: config.flag("simplify")?,
            seed: config.int("seed")?.max(0) as u64,
        })
    }
}

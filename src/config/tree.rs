use super::value::split_top;
use super::value::Value;
use anyhow::anyhow;
use anyhow::bail;
use std::collections::BTreeMap;

/// a tree of named configuration values with strict updates: no new
/// keys, no type changes. parsed from `k=v,k=v` strings where values
/// are literals or nested `c(...)` configs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config(BTreeMap<String, Value>);

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// parse the `k=v,k=v,...` grammar. commas inside balanced
    /// brackets do not split pairs; `c(...)` nests.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if text.trim().is_empty() {
            return Ok(config);
        }
        for pair in split_top(text, ',') {
            let split = pair
                .find('=')
                .ok_or_else(|| anyhow!("expected key=value, got \"{}\"", pair))?;
            let key = pair[..split].trim();
            let text = pair[split + 1..].trim();
            let value = match text.strip_prefix("c(").and_then(|v| v.strip_suffix(')')) {
                Some(inner) => Value::Tree(Self::parse(inner)?),
                None => Value::parse_literal(text)?,
            };
            config.0.insert(key.to_string(), value);
        }
        Ok(config)
    }

    /// update in place. keys must already exist and values must keep
    /// their dynamic type; a `OneOf` slot selects and validates the
    /// branch named by the update. untouched `OneOf` slots collapse to
    /// their default branch.
    pub fn strict_update(&mut self, other: &Config) -> anyhow::Result<()> {
        for (key, incoming) in other.0.iter() {
            let current = self
                .0
                .get(key)
                .cloned()
                .ok_or_else(|| anyhow!("key {} does not exist; new keys are not allowed", key))?;
            let merged = Self::merge(key, current, incoming)?;
            self.0.insert(key.clone(), merged);
        }
        for (key, value) in self.0.iter_mut() {
            if !other.0.contains_key(key) {
                resolve(value);
            }
        }
        Ok(())
    }

    fn merge(key: &str, current: Value, incoming: &Value) -> anyhow::Result<Value> {
        match (current, incoming) {
            (Value::Tree(mut mine), Value::Tree(theirs)) => {
                mine.strict_update(theirs)?;
                Ok(Value::Tree(mine))
            }
            (Value::Tree(_), other) => {
                bail!("config required for key {}, got {}", key, other.kind())
            }
            (Value::Choice(choice), Value::Tree(update)) => {
                Ok(Value::Tree(choice.strict_select(update)?))
            }
            (Value::Choice(_), other) => {
                bail!("config required for one-of key {}, got {}", key, other.kind())
            }
            (current, incoming) => {
                if std::mem::discriminant(&current) == std::mem::discriminant(incoming) {
                    Ok(incoming.clone())
                } else {
                    bail!(
                        "expecting {} for key {}, got {}",
                        current.kind(),
                        key,
                        incoming.kind()
                    )
                }
            }
        }
    }

    /// collapse every `OneOf` in the tree to its default branch.
    pub fn make_default(&mut self) {
        for value in self.0.values_mut() {
            resolve(value);
        }
    }

    pub fn int(&self, key: &str) -> anyhow::Result<i64> {
        match self.get(key) {
            Some(Value::Int(int)) => Ok(*int),
            other => bail!("expected int for key {}, found {:?}", key, other),
        }
    }

    pub fn float(&self, key: &str) -> anyhow::Result<f64> {
        match self.get(key) {
            Some(Value::Float(float)) => Ok(*float),
            other => bail!("expected float for key {}, found {:?}", key, other),
        }
    }

    pub fn flag(&self, key: &str) -> anyhow::Result<bool> {
        match self.get(key) {
            Some(Value::Bool(flag)) => Ok(*flag),
            other => bail!("expected bool for key {}, found {:?}", key, other),
        }
    }

    pub fn text(&self, key: &str) -> anyhow::Result<&str> {
        match self.get(key) {
            Some(Value::Str(text)) => Ok(text),
            other => bail!("expected str for key {}, found {:?}", key, other),
        }
    }

    pub fn tree(&self, key: &str) -> anyhow::Result<&Config> {
        match self.get(key) {
            Some(Value::Tree(config)) => Ok(config),
            other => bail!("expected config for key {}, found {:?}", key, other),
        }
    }
}

fn resolve(value: &mut Value) {
    if let Value::Choice(choice) = value {
        *value = Value::Tree(choice.default_branch());
    }
    if let Value::Tree(config) = value {
        config.make_default();
    }
}

/// branching configuration: one of several configs is selected by the
/// value of a shared key. a strict update must name the key, must name
/// one of the available values, and then updates the chosen branch.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOf {
    key: String,
    default: Box<Value>,
    branches: Vec<Config>,
}

impl OneOf {
    pub fn new(branches: Vec<Config>, key: &str, default: Value) -> Self {
        let one = Self {
            key: key.to_string(),
            default: Box::new(default),
            branches,
        };
        assert!(
            one.branches.iter().all(|b| b.get(&one.key).is_some()),
            "every branch must carry the branching key"
        );
        let distinct = one
            .branches
            .iter()
            .map(|b| format!("{:?}", b.get(&one.key)))
            .collect::<std::collections::BTreeSet<String>>();
        assert!(
            distinct.len() == one.branches.len(),
            "branch values must be distinct"
        );
        assert!(
            one.branch(one.default.as_ref()).is_some(),
            "default must name an available branch"
        );
        one
    }

    fn branch(&self, value: &Value) -> Option<&Config> {
        self.branches.iter().find(|b| b.get(&self.key) == Some(value))
    }

    pub fn default_branch(&self) -> Config {
        self.branch(self.default.as_ref())
            .expect("validated default")
            .clone()
    }

    pub fn strict_select(&self, update: &Config) -> anyhow::Result<Config> {
        let value = update.get(&self.key).ok_or_else(|| {
            anyhow!("branching key {} required but not found in update", self.key)
        })?;
        let mut chosen = self
            .branch(value)
            .ok_or_else(|| anyhow!("value {:?} for key {} is not a possible choice", value, self.key))?
            .clone();
        chosen.strict_update(update)?;
        Ok(chosen)
    }
}

use crate::Weight;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;

/// samples stored objects proportionally to their weights, like a
/// roulette disk where each object owns a slice proportional to its
/// weight. doubles as a replay buffer: exp(reward / temperature) is a
/// good weight choice for that use.
///
/// in unique mode every object is added under a hashable key and
/// duplicate keys are rejected, so repeated experiences cannot be
/// overweighted. first insertion wins; weight updates are not allowed.
pub struct RouletteWheel<T> {
    objects: Vec<T>,
    weights: Vec<Weight>,
    partial_sums: Vec<Weight>,
    keys: Option<HashMap<String, Weight>>,
    save_file: Option<PathBuf>,
    buffer: Vec<(T, Weight, Option<String>)>,
}

impl<T> Default for RouletteWheel<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            weights: Vec::new(),
            partial_sums: Vec::new(),
            keys: None,
            save_file: None,
            buffer: Vec::new(),
        }
    }
}

impl<T> RouletteWheel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unique() -> Self {
        Self {
            keys: Some(HashMap::new()),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partial_sums.is_empty()
    }

    pub fn total_weight(&self) -> Weight {
        self.partial_sums.last().copied().unwrap_or(0.0)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.keys
            .as_ref()
            .expect("has_key requires unique mode")
            .contains_key(key)
    }

    pub fn get_weight(&self, key: &str) -> Option<Weight> {
        self.keys
            .as_ref()
            .expect("get_weight requires unique mode")
            .get(key)
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, Weight)> {
        self.objects.iter().zip(self.weights.iter().copied())
    }
}

impl<T: Clone> RouletteWheel<T> {
    /// add one object. returns false (and changes nothing) when the
    /// key is already present in unique mode.
    pub fn add(&mut self, obj: T, weight: Weight, key: Option<&str>) -> bool {
        assert!(weight >= 0.0, "weight must be non-negative");
        match (self.keys.as_mut(), key) {
            (Some(keys), Some(key)) => {
                if keys.contains_key(key) {
                    return false;
                }
                keys.insert(key.to_string(), weight);
            }
            (Some(_), None) => panic!("unique mode requires a hashable key"),
            (None, Some(_)) => panic!("keys are only used in unique mode"),
            (None, None) => {}
        }
        self.partial_sums.push(self.total_weight() + weight);
        self.weights.push(weight);
        if self.save_file.is_some() {
            self.buffer
                .push((obj.clone(), weight, key.map(String::from)));
        }
        self.objects.push(obj);
        true
    }

    /// add many objects; lists must agree in length and key presence
    /// must agree with the mode. returns how many were inserted.
    pub fn add_many(&mut self, objs: Vec<T>, weights: &[Weight], keys: Option<&[String]>) -> usize {
        assert!(
            keys.is_some() == self.keys.is_some(),
            "keys must be given exactly in unique mode"
        );
        assert!(
            objs.len() == weights.len(),
            "number of objects does not equal number of weights"
        );
        if let Some(keys) = keys {
            assert!(
                objs.len() == keys.len(),
                "number of objects does not equal number of keys"
            );
        }
        objs.into_iter()
            .enumerate()
            .map(|(i, obj)| self.add(obj, weights[i], keys.map(|k| k[i].as_str())))
            .filter(|&added| added)
            .count()
    }

    /// spin the wheel once. draws u in [0, total) and binary-searches
    /// the prefix sums for the owning slot, clamping to the last slot
    /// on floating-point boundary error.
    pub fn sample(&self, rng: &mut impl Rng) -> (&T, Weight) {
        assert!(!self.is_empty(), "sampling from empty roulette wheel");
        let spin = rng.gen::<f64>() * self.total_weight();
        let i = self
            .partial_sums
            .partition_point(|&sum| sum <= spin)
            .min(self.objects.len() - 1);
        (&self.objects[i], self.weights[i])
    }

    pub fn sample_many(&self, count: usize, rng: &mut impl Rng) -> Vec<(&T, Weight)> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

impl<T: Clone + Serialize + DeserializeOwned> RouletteWheel<T> {
    /// restore from the save file if it exists, then keep appending to
    /// it. a truncated final record (crash mid-write) is dropped.
    pub fn restore(unique: bool, save_file: &Path) -> anyhow::Result<Self> {
        let mut wheel = if unique { Self::unique() } else { Self::new() };
        wheel.save_file = Some(save_file.to_path_buf());
        if save_file.exists() {
            let mut reader = BufReader::new(std::fs::File::open(save_file)?);
            let mut count = 0usize;
            loop {
                match bincode::deserialize_from::<_, (T, Weight, Option<String>)>(&mut reader) {
                    Ok((obj, weight, key)) => {
                        wheel.add(obj, weight, key.as_deref());
                        count += 1;
                    }
                    Err(_) => break,
                }
            }
            log::info!("loaded {} samples from disk", count);
            // these entries are already on disk
            wheel.buffer.clear();
        }
        Ok(wheel)
    }

    /// append everything added since the last save to the save file.
    pub fn incremental_save(&mut self) -> anyhow::Result<()> {
        let path = self
            .save_file
            .as_ref()
            .expect("incremental_save requires a save file");
        log::debug!("saving {} new samples to disk", self.buffer.len());
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);
        for entry in &self.buffer {
            bincode::serialize_into(&mut writer, entry)?;
        }
        writer.flush()?;
        self.buffer.clear();
        Ok(())
    }
}

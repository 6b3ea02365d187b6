use super::record::Record;
use regex::Regex;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// one worker's append-only results file. every line is one JSON
/// record, written with append+flush so concurrent readers never see a
/// partial record as anything but a droppable trailing line.
pub struct Shard {
    path: PathBuf,
}

impl Shard {
    pub fn new(dir: &Path, id: usize) -> Self {
        Self {
            path: dir.join(format!("experiment_results_{}.txt", id)),
        }
    }

    pub fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// read back this shard's records, dropping unparseable lines
    /// (a crash mid-append leaves at most one).
    pub fn read(&self) -> Vec<Record> {
        let Ok(text) = std::fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        text.lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

/// how far along one shard is relative to the repetitions it declared.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardStats {
    pub id: usize,
    pub completed: usize,
    pub expected: usize,
    pub finished: bool,
}

/// reader side of the results directory. shards are discovered by
/// file name; aggregation is eventually consistent across workers.
pub struct Results {
    dir: PathBuf,
}

impl Results {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// shard ids present on disk, in ascending order.
    pub fn discover(&self) -> Vec<usize> {
        let pattern = Regex::new(r"^experiment_results_([0-9]+)\.txt$").expect("valid regex");
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut ids = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter_map(|name| {
                pattern
                    .captures(&name)
                    .and_then(|c| c.get(1))
                    .and_then(|m| m.as_str().parse::<usize>().ok())
            })
            .collect::<Vec<usize>>();
        ids.sort_unstable();
        ids
    }

    /// load every discovered shard and report, for each of the
    /// `num_shards` expected, whether it has finished its declared
    /// repetitions. a shard with no records (or no file) is unfinished.
    pub fn read_all(&self, num_shards: usize) -> (Vec<Record>, Vec<ShardStats>) {
        let mut records = Vec::new();
        let mut stats = Vec::new();
        let present = self.discover();
        for id in 0..num_shards {
            let shard = if present.contains(&id) {
                Shard::new(&self.dir, id).read()
            } else {
                Vec::new()
            };
            let completed = shard.len();
            let expected = shard
                .first()
                .map(|r| r.max_local_repetitions)
                .unwrap_or(0);
            stats.push(ShardStats {
                id,
                completed,
                expected,
                finished: expected > 0 && completed >= expected,
            });
            records.extend(shard);
        }
        (records, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(global_rep: usize, max_local_repetitions: usize) -> Record {
        Record {
            max_npe: 1000,
            max_global_repetitions: 4,
            max_local_repetitions,
            npe: 500,
            batch_size: 64,
            num_batches: 8,
            found_solution: global_rep % 2 == 0,
            best_reward: 0.5,
            code_solution: String::new(),
            task: "reverse".to_string(),
            global_rep,
        }
    }

    #[test]
    fn append_and_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let shard = Shard::new(dir.path(), 0);
        shard.append(&record(0, 2)).unwrap();
        shard.append(&record(1, 2)).unwrap();
        assert_eq!(vec![record(0, 2), record(1, 2)], shard.read());
    }

    #[test]
    fn partial_trailing_lines_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let shard = Shard::new(dir.path(), 3);
        shard.append(&record(0, 1)).unwrap();
        let path = dir.path().join("experiment_results_3.txt");
        let mut file = std::fs::OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(b"{\"max_npe\": 10").unwrap();
        drop(file);
        assert_eq!(1, shard.read().len());
    }

    #[test]
    fn discovery_matches_only_shard_files() {
        let dir = tempfile::tempdir().unwrap();
        Shard::new(dir.path(), 0).append(&record(0, 1)).unwrap();
        Shard::new(dir.path(), 7).append(&record(1, 1)).unwrap();
        std::fs::write(dir.path().join("experiment_results_x.txt"), "junk").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "junk").unwrap();
        assert_eq!(vec![0, 7], Results::new(dir.path()).discover());
    }

    #[test]
    fn aggregation_reports_unfinished_shards() {
        let dir = tempfile::tempdir().unwrap();
        let finished = Shard::new(dir.path(), 0);
        finished.append(&record(0, 2)).unwrap();
        finished.append(&record(1, 2)).unwrap();
        let unfinished = Shard::new(dir.path(), 1);
        unfinished.append(&record(2, 2)).unwrap();
        let (records, stats) = Results::new(dir.path()).read_all(3);
        assert_eq!(3, records.len());
        assert_eq!(3, stats.len());
        assert!(stats[0].finished);
        assert!(!stats[1].finished);
        // shard 2 never wrote anything
        assert!(!stats[2].finished);
        assert_eq!(0, stats[2].completed);
    }
}

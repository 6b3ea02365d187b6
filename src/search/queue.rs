use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

/// heap entry ordered by score, with insertion order breaking ties so
/// the earliest of equal scores is evicted first.
#[derive(Debug, Clone)]
struct Entry<T, E> {
    score: f64,
    stamp: u64,
    item: T,
    extra: E,
}

impl<T, E> PartialEq for Entry<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.stamp == other.stamp
    }
}
impl<T, E> Eq for Entry<T, E> {}
impl<T, E> PartialOrd for Entry<T, E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T, E> Ord for Entry<T, E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.stamp.cmp(&other.stamp))
    }
}

/// a bounded priority queue that keeps the highest-scored unique items
/// ever pushed. at capacity, pushing evicts the lowest-scored entry.
/// duplicate items are ignored outright, even at a different score.
///
/// backs both the hall of fame (small capacity) and top-k replay
/// buffers (larger capacity).
pub struct MaxUniquePriorityQueue<T, E = ()> {
    capacity: usize,
    heap: BinaryHeap<Reverse<Entry<T, E>>>,
    items: HashSet<T>,
    stamp: u64,
}

impl<T: Clone + Eq + Hash, E: Clone> MaxUniquePriorityQueue<T, E> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            capacity,
            heap: BinaryHeap::new(),
            items: HashSet::new(),
            stamp: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn push(&mut self, score: f64, item: T, extra: E) {
        if self.items.contains(&item) {
            return;
        }
        let entry = Entry {
            score,
            stamp: self.stamp,
            item: item.clone(),
            extra,
        };
        self.stamp += 1;
        self.items.insert(item);
        self.heap.push(Reverse(entry));
        if self.heap.len() > self.capacity {
            let Reverse(popped) = self.heap.pop().expect("nonempty heap");
            self.items.remove(&popped.item);
        }
    }

    /// remove and return the lowest-scored entry.
    pub fn pop(&mut self) -> Option<(f64, T, E)> {
        let Reverse(entry) = self.heap.pop()?;
        self.items.remove(&entry.item);
        Some((entry.score, entry.item, entry.extra))
    }

    pub fn get_min(&self) -> Option<(f64, T, E)> {
        self.heap
            .peek()
            .map(|Reverse(e)| (e.score, e.item.clone(), e.extra.clone()))
    }

    pub fn get_max(&self) -> Option<(f64, T, E)> {
        self.heap
            .iter()
            .max_by(|Reverse(a), Reverse(b)| a.cmp(b))
            .map(|Reverse(e)| (e.score, e.item.clone(), e.extra.clone()))
    }

    /// items from highest score to lowest.
    pub fn iter_in_order(&self) -> impl Iterator<Item = (T, E)> {
        let mut entries = self
            .heap
            .iter()
            .map(|Reverse(e)| e.clone())
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|e| (e.item, e.extra))
    }

    /// uniform selection with replacement, not weighted by score.
    pub fn random_sample(&self, count: usize, rng: &mut impl Rng) -> Vec<(T, E)> {
        assert!(!self.is_empty(), "sampling from empty queue");
        let entries = self.heap.iter().collect::<Vec<_>>();
        (0..count)
            .map(|_| {
                let Reverse(e) = entries[rng.gen_range(0..entries.len())];
                (e.item.clone(), e.extra.clone())
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|Reverse(e)| &e.item)
    }
}

impl<T, E> MaxUniquePriorityQueue<T, E>
where
    T: Clone + Eq + Hash + Serialize + DeserializeOwned,
    E: Clone + Serialize + DeserializeOwned,
{
    /// full overwrite of the buffer file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let entries = self
            .heap
            .iter()
            .map(|Reverse(e)| (e.score, e.item.clone(), e.extra.clone()))
            .collect::<Vec<(f64, T, E)>>();
        let file = std::fs::File::create(path)?;
        bincode::serialize_into(std::io::BufWriter::new(file), &entries)?;
        Ok(())
    }

    pub fn load(path: &Path, capacity: usize) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let entries: Vec<(f64, T, E)> =
            bincode::deserialize_from(std::io::BufReader::new(file))?;
        let mut queue = Self::new(capacity);
        for (score, item, extra) in entries {
            queue.push(score, item, extra);
        }
        Ok(queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn keeps_the_top_scores() {
        let mut queue = MaxUniquePriorityQueue::new(5);
        queue.push(1.0, "string 1", ());
        queue.push(-0.5, "string 2", ());
        queue.push(0.5, "string 3", ());
        assert_eq!(Some((-0.5, "string 2", ())), queue.pop());
        queue.push(0.1, "string 4", ());
        queue.push(1.5, "string 5", ());
        queue.push(0.0, "string 6", ());
        queue.push(0.2, "string 7", ());
        assert_eq!(Some((1.5, "string 5", ())), queue.get_max());
        assert_eq!(Some((0.1, "string 4", ())), queue.get_min());
        assert_eq!(
            vec![
                ("string 5", ()),
                ("string 1", ()),
                ("string 3", ()),
                ("string 7", ()),
                ("string 4", ()),
            ],
            queue.iter_in_order().collect::<Vec<_>>()
        );
    }

    #[test]
    fn duplicate_pushes_are_ignored() {
        let mut queue = MaxUniquePriorityQueue::new(5);
        queue.push(0.0, "string 1", ());
        queue.push(9.9, "string 1", ());
        assert_eq!(1, queue.len());
        assert_eq!(Some((0.0, "string 1", ())), queue.get_max());
    }

    #[test]
    fn equal_scores_evict_in_insertion_order() {
        let mut queue = MaxUniquePriorityQueue::new(5);
        queue.push(0.0, "string 1", ());
        queue.push(0.0, "string 2", ());
        queue.push(0.0, "string 3", ());
        assert_eq!(Some((0.0, "string 1", ())), queue.pop());
        assert_eq!(Some((0.0, "string 2", ())), queue.pop());
        assert_eq!(Some((0.0, "string 3", ())), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn capacity_evicts_the_weakest_ever_pushed() {
        let mut queue = MaxUniquePriorityQueue::new(3);
        for (score, item) in [(0.1, "a"), (0.9, "b"), (0.5, "c"), (0.7, "d"), (0.2, "e")] {
            queue.push(score, item, ());
        }
        assert_eq!(
            vec![("b", ()), ("d", ()), ("c", ())],
            queue.iter_in_order().collect::<Vec<_>>()
        );
    }

    #[test]
    fn random_sample_draws_with_replacement() {
        let mut queue = MaxUniquePriorityQueue::new(2);
        queue.push(1.0, "a", ());
        queue.push(2.0, "b", ());
        let mut rng = SmallRng::seed_from_u64(3);
        let sample = queue.random_sample(100, &mut rng);
        assert_eq!(100, sample.len());
        assert!(sample.iter().any(|(i, _)| *i == "a"));
        assert!(sample.iter().any(|(i, _)| *i == "b"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topk.dat");
        let mut queue = MaxUniquePriorityQueue::<String, i32>::new(10);
        queue.push(0.5, "one".to_string(), 1);
        queue.push(1.5, "two".to_string(), 2);
        queue.save(&path).unwrap();
        let loaded = MaxUniquePriorityQueue::<String, i32>::load(&path, 10).unwrap();
        assert_eq!(
            queue.iter_in_order().collect::<Vec<_>>(),
            loaded.iter_in_order().collect::<Vec<_>>()
        );
    }
}

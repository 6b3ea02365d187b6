use super::Case;
use super::IoType;
use super::Task;
use crate::Cell;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// the letter every filtering task singles out. 1 is 'a' in the
/// 27-letter alphabet.
const TARGET: Cell = 1;

fn string(rng: &mut SmallRng, base: Cell, len: usize) -> Vec<Cell> {
    (0..len).map(|_| rng.gen_range(1..base)).collect()
}

/// drop every occurrence of the target letter from a 0-terminated
/// input string.
pub struct RemoveCharTask {
    cases: Vec<Case>,
}

impl RemoveCharTask {
    const SEED: u64 = 0x5EED_0003;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|i| {
                let len = rng.gen_range(1..=6);
                let mut seq = string(&mut rng, Self::BASE, len);
                // make sure the target actually appears in half the cases
                if i % 2 == 0 {
                    let at = rng.gen_range(0..seq.len());
                    seq[at] = TARGET;
                }
                let kept = seq.iter().copied().filter(|&c| c != TARGET).collect();
                let mut input = seq;
                input.push(0);
                Case::from((input, kept))
            })
            .collect();
        Self { cases }
    }
}

impl Task for RemoveCharTask {
    fn name(&self) -> &'static str {
        "remove-char"
    }
    fn base(&self) -> Cell {
        Self::BASE
    }
    fn cases(&self) -> Vec<Case> {
        self.cases.clone()
    }
    fn input_type(&self) -> IoType {
        IoType::String
    }
    fn output_type(&self) -> IoType {
        IoType::String
    }
}

/// collapse runs of adjacent duplicates in a 0-terminated input string.
pub struct DedupTask {
    cases: Vec<Case>,
}

impl DedupTask {
    const SEED: u64 = 0x5EED_0004;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let len = rng.gen_range(1..=4);
                // duplicate a few letters in place so there is something to collapse
                let mut seq = Vec::new();
                for c in string(&mut rng, Self::BASE, len) {
                    for _ in 0..rng.gen_range(1..=3) {
                        seq.push(c);
                    }
                }
                let mut deduped: Vec<Cell> = Vec::new();
                for &c in &seq {
                    if deduped.last() != Some(&c) {
                        deduped.push(c);
                    }
                }
                let mut input = seq;
                input.push(0);
                Case::from((input, deduped))
            })
            .collect();
        Self { cases }
    }
}

impl Task for DedupTask {
    fn name(&self) -> &'static str {
        "dedup"
    }
    fn base(&self) -> Cell {
        Self::BASE
    }
    fn cases(&self) -> Vec<Case> {
        self.cases.clone()
    }
    fn input_type(&self) -> IoType {
        IoType::String
    }
    fn output_type(&self) -> IoType {
        IoType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_char_strips_the_target() {
        for case in RemoveCharTask::new().cases() {
            assert!(case.output.iter().all(|&c| c != TARGET));
            assert_eq!(Some(&0), case.input.last());
        }
    }

    #[test]
    fn dedup_output_has_no_adjacent_pairs() {
        for case in DedupTask::new().cases() {
            assert!(case.output.windows(2).all(|w| w[0] != w[1]));
        }
    }
}

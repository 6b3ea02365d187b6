use super::Case;
use super::IoType;
use super::Task;
use crate::Cell;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// count occurrences of the letter 'a' (= 1) in a 0-terminated input.
pub struct CountCharTask {
    cases: Vec<Case>,
}

impl CountCharTask {
    const SEED: u64 = 0x5EED_0005;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let len = rng.gen_range(1..=6);
                // draw from a narrow band so counts above zero are common
                let seq: Vec<Cell> = (0..len).map(|_| rng.gen_range(1..4)).collect();
                let count = seq.iter().filter(|&&c| c == 1).count() as Cell;
                let mut input = seq;
                input.push(0);
                Case::from((input, vec![count]))
            })
            .collect();
        Self { cases }
    }
}

impl Task for CountCharTask {
    fn name(&self) -> &'static str {
        "count-char"
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
}

/// output the length of a 0-terminated input string.
pub struct LengthTask {
    cases: Vec<Case>,
}

impl LengthTask {
    const SEED: u64 = 0x5EED_0006;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let len = rng.gen_range(0..=6);
                let seq: Vec<Cell> = (0..len).map(|_| rng.gen_range(1..Self::BASE)).collect();
                let mut input = seq;
                input.push(0);
                Case::from((input, vec![len as Cell]))
            })
            .collect();
        Self { cases }
    }
}

impl Task for LengthTask {
    fn name(&self) -> &'static str {
        "length"
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_occurrences() {
        for case in CountCharTask::new().cases() {
            let expected = case.input[..case.input.len() - 1]
                .iter()
                .filter(|&&c| c == 1)
                .count() as Cell;
            assert_eq!(vec![expected], case.output);
        }
    }

    #[test]
    fn lengths_match_terminated_prefix() {
        for case in LengthTask::new().cases() {
            assert_eq!(vec![(case.input.len() - 1) as Cell], case.output);
        }
    }
}

use super::Case;
use super::IoType;
use super::Task;
use crate::Cell;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// input is a position, a length, then a 0-terminated string; output
/// is the substring starting at that position.
pub struct SubstringTask {
    cases: Vec<Case>,
}

impl SubstringTask {
    const SEED: u64 = 0x5EED_0010;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let len = rng.gen_range(3..=6);
                let seq: Vec<Cell> = (0..len).map(|_| rng.gen_range(1..Self::BASE)).collect();
                let pos = rng.gen_range(0..len);
                let take = rng.gen_range(1..=len - pos);
                let expected = seq[pos..pos + take].to_vec();
                let mut input = vec![pos as Cell, take as Cell];
                input.extend(&seq);
                input.push(0);
                Case::from((input, expected))
            })
            .collect();
        Self { cases }
    }
}

impl Task for SubstringTask {
    fn name(&self) -> &'static str {
        "substring"
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
    fn prefix_addresses_the_tail() {
        for case in SubstringTask::new().cases() {
            let pos = case.input[0] as usize;
            let take = case.input[1] as usize;
            let seq = &case.input[2..case.input.len() - 1];
            assert_eq!(&seq[pos..pos + take], case.output.as_slice());
        }
    }
}

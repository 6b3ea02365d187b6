use super::Case;
use super::IoType;
use super::Task;
use crate::tape::Machine;
use crate::Cell;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// derive expected outputs by running a known-correct program over the
/// generated inputs. guarantees the task is solvable within the code
/// length bounds the search operates under.
pub fn solve(solution: &str, base: Cell, inputs: Vec<Vec<Cell>>) -> Vec<Case> {
    let machine = Machine::new(base).timeout(None).steps(Some(5000));
    inputs
        .into_iter()
        .map(|input| {
            let evaluation = machine.run(solution, &input);
            assert!(evaluation.success(), "reference program must terminate");
            Case::from((input, evaluation.output))
        })
        .collect()
}

/// write the input stream back out unchanged. the reference solution
/// is `,[.,]`: echo cells until the exhausted input reads 0.
pub struct EchoTask {
    cases: Vec<Case>,
}

impl EchoTask {
    const SEED: u64 = 0x5EED_0001;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let inputs = (0..16)
            .map(|_| {
                let len = rng.gen_range(1..=6);
                (0..len).map(|_| rng.gen_range(1..Self::BASE)).collect()
            })
            .collect();
        Self {
            cases: solve(",[.,]", Self::BASE, inputs),
        }
    }
}

impl Task for EchoTask {
    fn name(&self) -> &'static str {
        "echo"
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

/// write the input stream back out reversed. the reference solution is
/// `>,[>,]<[.<]`: load rightward from cell 1, then print back to the
/// zero sentinel parked in cell 0.
pub struct ReverseTask {
    cases: Vec<Case>,
}

impl ReverseTask {
    const SEED: u64 = 0x5EED_0002;
    const BASE: Cell = 256;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let inputs = (0..16)
            .map(|_| {
                let len = rng.gen_range(1..=6);
                (0..len).map(|_| rng.gen_range(1..Self::BASE)).collect()
            })
            .collect();
        Self {
            cases: solve(">,[>,]<[.<]", Self::BASE, inputs),
        }
    }
}

impl Task for ReverseTask {
    fn name(&self) -> &'static str {
        "reverse"
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

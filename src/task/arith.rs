use super::Case;
use super::Task;
use crate::Cell;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// add two input numbers modulo the base.
pub struct AddTask {
    cases: Vec<Case>,
}

impl AddTask {
    const SEED: u64 = 0x5EED_0007;
    const BASE: Cell = 256;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..9)
            .map(|_| {
                let a = rng.gen_range(0..Self::BASE);
                let b = rng.gen_range(0..Self::BASE);
                Case::from((vec![a, b], vec![(a + b) % Self::BASE]))
            })
            .collect();
        Self { cases }
    }
}

impl Task for AddTask {
    fn name(&self) -> &'static str {
        "add"
    }
    fn base(&self) -> Cell {
        Self::BASE
    }
    fn cases(&self) -> Vec<Case> {
        self.cases.clone()
    }
}

/// multiply two small numbers. base 512 keeps every product in range.
pub struct MultiplyTask {
    cases: Vec<Case>,
}

impl MultiplyTask {
    const SEED: u64 = 0x5EED_0008;
    const BASE: Cell = 512;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let a = rng.gen_range(0..22);
                let b = rng.gen_range(0..22);
                Case::from((vec![a, b], vec![a * b]))
            })
            .collect();
        Self { cases }
    }
}

impl Task for MultiplyTask {
    fn name(&self) -> &'static str {
        "multiply"
    }
    fn base(&self) -> Cell {
        Self::BASE
    }
    fn cases(&self) -> Vec<Case> {
        self.cases.clone()
    }
}

/// quotient then remainder of the two input numbers.
pub struct DivModTask {
    cases: Vec<Case>,
}

impl DivModTask {
    const SEED: u64 = 0x5EED_0009;
    const BASE: Cell = 512;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let a = rng.gen_range(0..256);
                let b = rng.gen_range(1..10);
                Case::from((vec![a, b], vec![a / b, a % b]))
            })
            .collect();
        Self { cases }
    }
}

impl Task for DivModTask {
    fn name(&self) -> &'static str {
        "divmod"
    }
    fn base(&self) -> Cell {
        Self::BASE
    }
    fn cases(&self) -> Vec<Case> {
        self.cases.clone()
    }
}

/// halve the input number, rounding down.
pub struct Divide2Task {
    cases: Vec<Case>,
}

impl Divide2Task {
    const SEED: u64 = 0x5EED_000A;
    const BASE: Cell = 256;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let a = rng.gen_range(0..Self::BASE);
                Case::from((vec![a], vec![a / 2]))
            })
            .collect();
        Self { cases }
    }
}

impl Task for Divide2Task {
    fn name(&self) -> &'static str {
        "divide-2"
    }
    fn base(&self) -> Cell {
        Self::BASE
    }
    fn cases(&self) -> Vec<Case> {
        self.cases.clone()
    }
}

use super::Case;
use super::IoType;
use super::Task;
use crate::Cell;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

fn string(rng: &mut SmallRng, base: Cell, len: usize) -> Vec<Cell> {
    (0..len).map(|_| rng.gen_range(1..base)).collect()
}

fn terminated(seq: Vec<Cell>) -> Vec<Cell> {
    let mut input = seq;
    input.push(0);
    input
}

/// rotate a 0-terminated input string one position to the left.
pub struct ShiftLeftTask {
    cases: Vec<Case>,
}

impl ShiftLeftTask {
    const SEED: u64 = 0x5EED_000C;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let len = rng.gen_range(1..=6);
                let seq = string(&mut rng, Self::BASE, len);
                let mut rotated = seq.clone();
                rotated.rotate_left(1);
                Case::from((terminated(seq), rotated))
            })
            .collect();
        Self { cases }
    }
}

impl Task for ShiftLeftTask {
    fn name(&self) -> &'static str {
        "shift-left"
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

/// rotate a 0-terminated input string one position to the right.
pub struct ShiftRightTask {
    cases: Vec<Case>,
}

impl ShiftRightTask {
    const SEED: u64 = 0x5EED_000D;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let len = rng.gen_range(1..=6);
                let seq = string(&mut rng, Self::BASE, len);
                let mut rotated = seq.clone();
                rotated.rotate_right(1);
                Case::from((terminated(seq), rotated))
            })
            .collect();
        Self { cases }
    }
}

impl Task for ShiftRightTask {
    fn name(&self) -> &'static str {
        "shift-right"
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

/// interleave the two halves of a 0-terminated input of even length:
/// a1..ak b1..bk becomes a1 b1 a2 b2 .. ak bk.
pub struct RiffleTask {
    cases: Vec<Case>,
}

impl RiffleTask {
    const SEED: u64 = 0x5EED_000E;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let half = rng.gen_range(1..=3);
                let seq = string(&mut rng, Self::BASE, half * 2);
                let riffled = riffle(&seq);
                Case::from((terminated(seq), riffled))
            })
            .collect();
        Self { cases }
    }
}

fn riffle(seq: &[Cell]) -> Vec<Cell> {
    let half = seq.len() / 2;
    seq[..half]
        .iter()
        .zip(seq[half..].iter())
        .flat_map(|(&a, &b)| [a, b])
        .collect()
}

fn unriffle(seq: &[Cell]) -> Vec<Cell> {
    let evens = seq.iter().copied().step_by(2);
    let odds = seq.iter().copied().skip(1).step_by(2);
    evens.chain(odds).collect()
}

impl Task for RiffleTask {
    fn name(&self) -> &'static str {
        "riffle"
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

/// inverse of riffle: deal alternating positions back into halves.
pub struct UnriffleTask {
    cases: Vec<Case>,
}

impl UnriffleTask {
    const SEED: u64 = 0x5EED_000F;
    const BASE: Cell = 27;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..16)
            .map(|_| {
                let half = rng.gen_range(1..=3);
                let seq = string(&mut rng, Self::BASE, half * 2);
                let unriffled = unriffle(&seq);
                Case::from((terminated(seq), unriffled))
            })
            .collect();
        Self { cases }
    }
}

impl Task for UnriffleTask {
    fn name(&self) -> &'static str {
        "unriffle"
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

use super::Case;
use super::IoType;
use super::Task;
use crate::Cell;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// three input bits, one output bit: the majority vote. the full truth
/// table is the test set.
pub struct BooleanLogicTask;

impl Task for BooleanLogicTask {
    fn name(&self) -> &'static str {
        "bool-logic"
    }
    fn base(&self) -> Cell {
        2
    }
    fn cases(&self) -> Vec<Case> {
        (0..8u16)
            .map(|bits| {
                let (a, b, c) = (bits >> 2 & 1, bits >> 1 & 1, bits & 1);
                let majority = ((a + b + c) >= 2) as Cell;
                Case::from((vec![a, b, c], vec![majority]))
            })
            .collect()
    }
    fn input_type(&self) -> IoType {
        IoType::Boolean
    }
    fn output_type(&self) -> IoType {
        IoType::Boolean
    }
}

/// moves on a grid encoded up=1 down=2 left=3 right=4, 0-terminated.
/// output 1 iff the route returns to the origin.
pub struct JudgeRouteCircleTask {
    cases: Vec<Case>,
}

impl JudgeRouteCircleTask {
    const SEED: u64 = 0x5EED_000B;
    const BASE: Cell = 5;

    pub fn new() -> Self {
        let mut rng = SmallRng::seed_from_u64(Self::SEED);
        let cases = (0..32)
            .map(|i| {
                let moves: Vec<Cell> = if i % 2 == 0 {
                    // balanced routes are rare by chance; construct them
                    let pairs = rng.gen_range(0..=6);
                    let mut moves = Vec::new();
                    for _ in 0..pairs {
                        if rng.gen_bool(0.5) {
                            moves.extend([1, 2]);
                        } else {
                            moves.extend([3, 4]);
                        }
                    }
                    shuffle(&mut moves, &mut rng);
                    moves
                } else {
                    let len = rng.gen_range(0..=12);
                    (0..len).map(|_| rng.gen_range(1..5)).collect()
                };
                let circular = returns_home(&moves) as Cell;
                let mut input = moves;
                input.push(0);
                Case::from((input, vec![circular]))
            })
            .collect();
        Self { cases }
    }
}

fn returns_home(moves: &[Cell]) -> bool {
    let mut x = 0i32;
    let mut y = 0i32;
    for &m in moves {
        match m {
            1 => y += 1,
            2 => y -= 1,
            3 => x -= 1,
            4 => x += 1,
            _ => unreachable!("invalid move encoding"),
        }
    }
    x == 0 && y == 0
}

fn shuffle(moves: &mut [Cell], rng: &mut SmallRng) {
    for i in (1..moves.len()).rev() {
        moves.swap(i, rng.gen_range(0..=i));
    }
}

impl Task for JudgeRouteCircleTask {
    fn name(&self) -> &'static str {
        "circle-route"
    }
    fn base(&self) -> Cell {
        Self::BASE
    }
    fn cases(&self) -> Vec<Case> {
        self.cases.clone()
    }
    fn output_type(&self) -> IoType {
        IoType::Boolean
    }
}

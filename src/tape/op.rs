use crate::Arbitrary;

/// the 8 instructions of the tape machine. bracket pairs form loops
/// with conditional entry/exit based on the current tape cell.
#[derive(Debug, Clone, Copy, Hash, Ord, PartialOrd, PartialEq, Eq)]
pub enum Op {
    Right,
    Left,
    Incr,
    Decr,
    Open,
    Close,
    Write,
    Read,
}

impl Op {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Right,
            Self::Left,
            Self::Incr,
            Self::Decr,
            Self::Open,
            Self::Close,
            Self::Write,
            Self::Read,
        ]
    }
    /// characters outside the alphabet are not ops. the machine
    /// skips them but still spends a step on them.
    pub fn decode(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Right),
            '<' => Some(Self::Left),
            '+' => Some(Self::Incr),
            '-' => Some(Self::Decr),
            '[' => Some(Self::Open),
            ']' => Some(Self::Close),
            '.' => Some(Self::Write),
            ',' => Some(Self::Read),
            _ => None,
        }
    }
}

/// u8 bijection
impl From<Op> for u8 {
    fn from(op: Op) -> Self {
        match op {
            Op::Right => 0,
            Op::Left => 1,
            Op::Incr => 2,
            Op::Decr => 3,
            Op::Open => 4,
            Op::Close => 5,
            Op::Write => 6,
            Op::Read => 7,
        }
    }
}
impl From<u8> for Op {
    fn from(value: u8) -> Self {
        match value {
            0 => Op::Right,
            1 => Op::Left,
            2 => Op::Incr,
            3 => Op::Decr,
            4 => Op::Open,
            5 => Op::Close,
            6 => Op::Write,
            7 => Op::Read,
            _ => unreachable!("invalid op encoding"),
        }
    }
}

impl From<Op> for char {
    fn from(op: Op) -> Self {
        match op {
            Op::Right => '>',
            Op::Left => '<',
            Op::Incr => '+',
            Op::Decr => '-',
            Op::Open => '[',
            Op::Close => ']',
            Op::Write => '.',
            Op::Read => ',',
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Arbitrary for Op {
    fn random() -> Self {
        use rand::Rng;
        Self::from(rand::thread_rng().gen_range(0..8) as u8)
    }
}

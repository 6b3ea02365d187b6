use crate::tape::Status;
use crate::task::IoType;
use crate::Cell;
use crate::Reward;

/// why a candidate scored the way it did. starts at Correct and decays
/// to Wrong on the first mismatched case, or to the machine's failure
/// status on the first case that does not finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Correct,
    Wrong,
    Timeout,
    StepLimit,
    SyntaxError,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::Correct => write!(f, "correct"),
            Reason::Wrong => write!(f, "wrong"),
            Reason::Timeout => write!(f, "timeout"),
            Reason::StepLimit => write!(f, "step-limit"),
            Reason::SyntaxError => write!(f, "syntax-error"),
        }
    }
}

impl From<Status> for Reason {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => Reason::Correct,
            Status::Timeout => Reason::Timeout,
            Status::StepLimit => Reason::StepLimit,
            Status::SyntaxError => Reason::SyntaxError,
        }
    }
}

/// one candidate's full scoring record. `episode_rewards` has one slot
/// per code character with the whole normalized total in the last slot,
/// giving downstream learners a per-step reward shape.
#[derive(Debug, Clone)]
pub struct Scored {
    pub episode_rewards: Vec<Reward>,
    pub inputs: Vec<Vec<Cell>>,
    pub expected: Vec<Vec<Cell>>,
    pub outputs: Vec<Vec<Cell>>,
    pub reason: Reason,
    pub input_type: IoType,
    pub output_type: IoType,
}

impl Scored {
    pub fn total(&self) -> Reward {
        self.episode_rewards.last().copied().unwrap_or(0.0)
    }
    pub fn correct(&self) -> bool {
        self.reason == Reason::Correct
    }
}

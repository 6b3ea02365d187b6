pub mod arith;
pub mod catalog;
pub mod counting;
pub mod echo;
pub mod filters;
pub mod logic;
pub mod printing;
pub mod series;
pub mod shuffle;
pub mod substring;

pub use catalog::make;
pub use catalog::names;

use crate::Cell;

/// declared semantic type of a task's input or output tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IoType {
    Integer,
    String,
    Boolean,
}

impl std::fmt::Display for IoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoType::Integer => write!(f, "integer"),
            IoType::String => write!(f, "string"),
            IoType::Boolean => write!(f, "boolean"),
        }
    }
}

/// one test case: an input stream and the output a correct program
/// must produce for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub input: Vec<Cell>,
    pub output: Vec<Cell>,
}

impl From<(Vec<Cell>, Vec<Cell>)> for Case {
    fn from((input, output): (Vec<Cell>, Vec<Cell>)) -> Self {
        Self { input, output }
    }
}

/// a coding task. publishes a fixed (or deterministically generated)
/// set of test cases and the integer base its tokens live in.
///
/// `cases` must return value-equal content on every call during a run;
/// tasks that generate cases do so once at construction from a fixed
/// seed and hand out copies.
pub trait Task: Send + Sync {
    fn name(&self) -> &'static str;
    fn base(&self) -> Cell;
    fn cases(&self) -> Vec<Case>;
    fn input_type(&self) -> IoType {
        IoType::Integer
    }
    fn output_type(&self) -> IoType {
        IoType::Integer
    }
}

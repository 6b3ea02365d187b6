use super::Case;
use super::IoType;
use super::Task;
use crate::Cell;

/// print a fixed sequence; the input stream is empty.
pub struct PrintTask {
    name: &'static str,
    base: Cell,
    string: Vec<Cell>,
    io: IoType,
}

impl PrintTask {
    /// "hello" in the 27-letter alphabet (a=1 .. z=26, 0 reserved).
    pub fn hello() -> Self {
        Self {
            name: "print-hello",
            base: 27,
            string: vec![8, 5, 12, 12, 15],
            io: IoType::String,
        }
    }
    pub fn digits() -> Self {
        Self {
            name: "print",
            base: 256,
            string: vec![1, 2, 3, 4, 5],
            io: IoType::Integer,
        }
    }
}

impl Task for PrintTask {
    fn name(&self) -> &'static str {
        self.name
    }
    fn base(&self) -> Cell {
        self.base
    }
    fn cases(&self) -> Vec<Case> {
        vec![Case::from((vec![], self.string.clone()))]
    }
    fn output_type(&self) -> IoType {
        self.io
    }
}

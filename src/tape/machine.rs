use super::braces::Braces;
use super::op::Op;
use crate::Cell;
use std::time::Duration;
use std::time::Instant;

/// how an execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Timeout,
    StepLimit,
    SyntaxError,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::Timeout => write!(f, "timeout"),
            Status::StepLimit => write!(f, "step-limit"),
            Status::SyntaxError => write!(f, "syntax-error"),
        }
    }
}

/// everything observable about one execution.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub output: Vec<Cell>,
    pub status: Status,
    pub steps: usize,
    pub elapsed: Duration,
    pub memory: Option<Vec<Cell>>,
    pub trace: Option<Vec<Snapshot>>,
}

impl Evaluation {
    pub fn success(&self) -> bool {
        self.status == Status::Success
    }
}

/// machine state captured before each executed instruction, and once
/// more after the loop exits. carries value-copies of tape and output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub code_index: usize,
    pub code_char: Option<char>,
    pub mem_index: usize,
    pub mem_value: Cell,
    pub memory: Vec<Cell>,
    pub next_input: Cell,
    pub output: Vec<Cell>,
}

/// a bounded, deterministic executor for one program at a time.
/// cells live in [0, base) and wrap on overflow/underflow. the data
/// pointer clamps at zero on the left and grows the tape on the right.
/// reads past the end of the input buffer produce 0.
#[derive(Debug, Clone)]
pub struct Machine {
    base: Cell,
    timeout: Option<Duration>,
    max_steps: Option<usize>,
    strict: bool,
    capture_memory: bool,
    capture_trace: bool,
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            base: 256,
            timeout: Some(Duration::from_secs(1)),
            max_steps: None,
            strict: true,
            capture_memory: false,
            capture_trace: false,
        }
    }
}

impl Machine {
    pub fn new(base: Cell) -> Self {
        assert!(base >= 2);
        Self {
            base,
            ..Self::default()
        }
    }
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
    pub fn memory(mut self) -> Self {
        self.capture_memory = true;
        self
    }
    pub fn trace(mut self) -> Self {
        self.capture_trace = true;
        self
    }

    pub fn run(&self, code: &str, input: &[Cell]) -> Evaluation {
        self.boot(code, input, &[])
    }

    /// execute with the first cells of the tape preloaded.
    pub fn boot(&self, code: &str, input: &[Cell], init_memory: &[Cell]) -> Evaluation {
        let chars = code.chars().collect::<Vec<char>>();
        let ops = chars.iter().map(|&c| Op::decode(c)).collect::<Vec<_>>();
        let braces = Braces::from(code);
        if self.strict && !braces.correct() {
            return Evaluation {
                output: vec![],
                status: Status::SyntaxError,
                steps: 0,
                elapsed: Duration::ZERO,
                memory: self.capture_memory.then(Vec::new),
                trace: self.capture_trace.then(Vec::new),
            };
        }
        let mut tape = if init_memory.is_empty() {
            vec![0]
        } else {
            init_memory.to_vec()
        };
        let mut inputs = input.iter().copied().peekable();
        let mut output = Vec::new();
        let mut trace = self.capture_trace.then(Vec::new);
        let mut head = 0usize;
        let mut pc = 0usize;
        let mut steps = 0usize;
        let mut status = Status::Success;
        let clock = Instant::now();
        while pc < ops.len() {
            if let Some(ref mut trace) = trace {
                trace.push(Snapshot {
                    code_index: pc,
                    code_char: Some(chars[pc]),
                    mem_index: head,
                    mem_value: tape[head],
                    memory: tape.clone(),
                    next_input: inputs.peek().copied().unwrap_or(0),
                    output: output.clone(),
                });
            }
            match ops[pc] {
                Some(Op::Right) => {
                    head += 1;
                    if head == tape.len() {
                        tape.push(0);
                    }
                }
                Some(Op::Left) => head = head.saturating_sub(1),
                Some(Op::Incr) => {
                    tape[head] = if tape[head] < self.base - 1 {
                        tape[head] + 1
                    } else {
                        0
                    }
                }
                Some(Op::Decr) => {
                    tape[head] = if tape[head] > 0 {
                        tape[head] - 1
                    } else {
                        self.base - 1
                    }
                }
                Some(Op::Open) => {
                    if tape[head] == 0 {
                        pc = braces.jump(pc);
                    }
                }
                Some(Op::Close) => {
                    if tape[head] != 0 {
                        pc = braces.jump(pc);
                    }
                }
                Some(Op::Write) => output.push(tape[head]),
                Some(Op::Read) => tape[head] = inputs.next().unwrap_or(0),
                None => {}
            }
            pc += 1;
            steps += 1;
            if let Some(timeout) = self.timeout {
                if clock.elapsed() > timeout {
                    status = Status::Timeout;
                    break;
                }
            }
            if let Some(max) = self.max_steps {
                if steps >= max {
                    status = Status::StepLimit;
                    break;
                }
            }
        }
        if let Some(ref mut trace) = trace {
            trace.push(Snapshot {
                code_index: pc,
                code_char: chars.get(pc).copied(),
                mem_index: head,
                mem_value: tape[head],
                memory: tape.clone(),
                next_input: inputs.peek().copied().unwrap_or(0),
                output: output.clone(),
            });
        }
        Evaluation {
            output,
            status,
            steps,
            elapsed: clock.elapsed(),
            memory: self.capture_memory.then(|| tape),
            trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_output(expected: &[Cell], evaluation: &Evaluation) {
        assert_eq!(expected, evaluation.output.as_slice());
        assert!(evaluation.success());
        assert_eq!(Status::Success, evaluation.status);
    }

    #[test]
    fn basic_ops() {
        assert_output(&[3, 1, 2], &Machine::default().run("+++.--.+.", &[]));
        assert_output(&[1, 1, 2], &Machine::default().run("+.<.>++.", &[]));
        assert_output(&[0], &Machine::default().run("+,.", &[]));
    }

    #[test]
    fn hello_world() {
        let expected = "Hello World!\n"
            .chars()
            .map(|c| c as Cell)
            .collect::<Vec<Cell>>();
        let code = ">++++++++[-<+++++++++>]<.>>+>-[+]++>++>+++[>[->+++<<+++>]<<]>-----\
                    .>->+++..+++.>-.<<+[>[+>+]>>]<--------------.>>.+++.------.-------\
                    -.>+.>+.";
        assert_output(&expected, &Machine::default().run(code, &[]));
    }

    #[test]
    fn wraps_in_base() {
        assert_output(&[1, 4], &Machine::new(5).run("+.--.", &[]));
        // five increments in base 5 wrap the cell back to zero
        assert_output(&[0], &Machine::new(5).run("+++++.", &[]));
    }

    #[test]
    fn reads_input_and_reverses() {
        assert_output(&[2, 3, 4], &Machine::default().run(">,[>,]<[.<]", &[4, 3, 2]));
    }

    #[test]
    fn skips_unknown_characters() {
        assert_output(
            &[2, 3, 4],
            &Machine::default().run(">,[>,]hello<world[.<]comments", &[4, 3, 2]),
        );
    }

    #[test]
    fn unmatched_braces() {
        let code = "+++.]]]]>----.[[[[[>+.";
        assert_output(&[3, 6, 1], &Machine::new(10).strict(false).run(code, &[]));
        let evaluation = Machine::new(10).strict(true).run(code, &[]);
        assert!(evaluation.output.is_empty());
        assert_eq!(0, evaluation.steps);
        assert_eq!(Status::SyntaxError, evaluation.status);
    }

    #[test]
    fn timeout() {
        let machine = Machine::new(5).timeout(Some(Duration::from_millis(100)));
        let evaluation = machine.run("+.[].", &[]);
        assert_eq!(vec![1], evaluation.output);
        assert_eq!(Status::Timeout, evaluation.status);
        assert!(evaluation.elapsed > Duration::from_millis(70));
        assert!(evaluation.elapsed < Duration::from_millis(250));
        let evaluation = machine.run("+.[-].", &[]);
        assert_eq!(vec![1, 0], evaluation.output);
        assert_eq!(Status::Success, evaluation.status);
    }

    #[test]
    fn step_limit() {
        let machine = Machine::new(5).timeout(None).steps(Some(100));
        let evaluation = machine.run("+.[].", &[]);
        assert_eq!(vec![1], evaluation.output);
        assert_eq!(Status::StepLimit, evaluation.status);
        assert_eq!(100, evaluation.steps);
        let evaluation = machine.run("+.[-].", &[]);
        assert_eq!(vec![1, 0], evaluation.output);
        assert_eq!(Status::Success, evaluation.status);
        assert!(evaluation.steps < 100);
    }

    #[test]
    fn prefix_stability_under_step_limits() {
        let machine = Machine::new(10).timeout(None);
        let full = machine.run(",[.-]", &[7]).output;
        for n in 1..32 {
            let partial = machine.clone().steps(Some(n)).run(",[.-]", &[7]);
            if !partial.success() {
                assert!(full.starts_with(&partial.output));
            }
        }
    }

    #[test]
    fn captures_memory() {
        let evaluation = Machine::default().memory().run("+>++>+++>++++.", &[]);
        assert_output(&[4], &evaluation);
        assert_eq!(Some(vec![1, 2, 3, 4]), evaluation.memory);
    }

    #[test]
    fn boots_from_initial_memory() {
        let evaluation = Machine::default().boot(".>.", &[], &[7, 9]);
        assert_output(&[7, 9], &evaluation);
    }

    #[test]
    fn empty_program() {
        let evaluation = Machine::default().run("", &[]);
        assert_output(&[], &evaluation);
        assert_eq!(0, evaluation.steps);
    }

    #[test]
    fn read_with_exhausted_input() {
        let evaluation = Machine::default().memory().run(",", &[]);
        assert_output(&[], &evaluation);
        assert_eq!(Some(vec![0]), evaluation.memory);
    }

    #[test]
    fn pointer_clamps_at_zero() {
        assert_output(&[1], &Machine::default().run("+<<<.", &[]));
    }

    #[test]
    fn program_trace() {
        let snapshot = |code_index: usize,
                        code_char: Option<char>,
                        mem_index: usize,
                        mem_value: Cell,
                        memory: Vec<Cell>,
                        next_input: Cell,
                        output: Vec<Cell>| Snapshot {
            code_index,
            code_char,
            mem_index,
            mem_value,
            memory,
            next_input,
            output,
        };
        let evaluation = Machine::default().trace().run(",[.>,].", &[2, 1]);
        assert_eq!(
            vec![
                snapshot(0, Some(','), 0, 0, vec![0], 2, vec![]),
                snapshot(1, Some('['), 0, 2, vec![2], 1, vec![]),
                snapshot(2, Some('.'), 0, 2, vec![2], 1, vec![]),
                snapshot(3, Some('>'), 0, 2, vec![2], 1, vec![2]),
                snapshot(4, Some(','), 1, 0, vec![2, 0], 1, vec![2]),
                snapshot(5, Some(']'), 1, 1, vec![2, 1], 0, vec![2]),
                snapshot(2, Some('.'), 1, 1, vec![2, 1], 0, vec![2]),
                snapshot(3, Some('>'), 1, 1, vec![2, 1], 0, vec![2, 1]),
                snapshot(4, Some(','), 2, 0, vec![2, 1, 0], 0, vec![2, 1]),
                snapshot(5, Some(']'), 2, 0, vec![2, 1, 0], 0, vec![2, 1]),
                snapshot(6, Some('.'), 2, 0, vec![2, 1, 0], 0, vec![2, 1]),
                snapshot(7, None, 2, 0, vec![2, 1, 0], 0, vec![2, 1, 0]),
            ],
            evaluation.trace.unwrap()
        );
    }
}

pub mod braces;
pub mod machine;
pub mod op;
pub mod token;

pub use braces::Braces;
pub use machine::Evaluation;
pub use machine::Machine;
pub use machine::Snapshot;
pub use machine::Status;
pub use op::Op;
pub use token::Token;

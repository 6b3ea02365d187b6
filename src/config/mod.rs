pub mod experiment;
pub mod tree;
pub mod value;

pub use experiment::Algorithm;
pub use experiment::Experiment;
pub use tree::Config;
pub use tree::OneOf;
pub use value::Value;

pub mod runner;

pub use runner::{Invocation, ToolOutput, ToolRunner};

//! Multiple sequence aligners

pub mod tcoffee;

pub use tcoffee::{AlignmentRun, TCoffee};

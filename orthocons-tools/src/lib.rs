//! Wrappers for the external programs of the pipeline
//!
//! T-Coffee builds the multiple sequence alignment and Rate4Site scores each
//! alignment column. Both are driven through the [`ToolRunner`] capability so
//! the working directory is always explicit and tests can substitute a
//! [`MockRunner`].

pub mod aligners;
pub mod error;
pub mod runner;
pub mod scorers;
pub mod testing;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use aligners::{AlignmentRun, TCoffee};
pub use error::ToolError;
pub use runner::SystemRunner;
pub use scorers::rate4site::{
    get_alpha, parse_matrix, read_matrix, Column, ColumnSelection, ConservationMatrix,
    ConservationRecord, MsaData, Rate4Site, Rate4SiteError,
};
pub use testing::MockRunner;
pub use traits::{Invocation, ToolOutput, ToolRunner};
pub use types::Tool;

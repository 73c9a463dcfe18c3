//! Sequence handling and remote orthology lookups for orthocons

pub mod formats;
pub mod providers;

// Re-export commonly used types
pub use formats::fasta::{header_check, FastaRecord, SequenceError};
pub use providers::oma::{failure_message, HogLevel, OmaClient, OmaError, OrthologFinder};

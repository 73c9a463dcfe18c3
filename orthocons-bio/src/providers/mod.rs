pub mod oma;

pub use oma::{failure_message, HogLevel, OmaClient, OmaError, OrthologFinder, OMA_BASE_URL};

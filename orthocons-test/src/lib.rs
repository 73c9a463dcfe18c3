//! Test utilities for the orthocons workspace
//!
//! Centralises the fixtures (Rate4Site score files, OMA response bodies,
//! FASTA strings) and the isolated [`TestEnvironment`] used by the
//! integration tests of every crate.

pub mod environment;
pub mod fixtures;

// Re-export commonly used items
pub use environment::TestEnvironment;
pub use fixtures::*;

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (safe to call from every test)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

//! Core error types for orthocons

use thiserror::Error;

/// Main error type for orthocons operations
#[derive(Error, Debug)]
pub enum OrthoconsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for orthocons operations
pub type OrthoconsResult<T> = Result<T, OrthoconsError>;

impl From<serde_json::Error> for OrthoconsError {
    fn from(err: serde_json::Error) -> Self {
        OrthoconsError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for OrthoconsError {
    fn from(err: anyhow::Error) -> Self {
        OrthoconsError::Other(err.to_string())
    }
}

impl OrthoconsError {
    /// Process exit code used by the CLI for this class of error
    pub fn exit_code(&self) -> i32 {
        match self {
            OrthoconsError::Configuration(_) => 2,
            OrthoconsError::Io(_) | OrthoconsError::NotFound(_) => 3,
            OrthoconsError::Parse(_) | OrthoconsError::Serialization(_) => 4,
            OrthoconsError::Network(_) => 5,
            _ => 1,
        }
    }
}

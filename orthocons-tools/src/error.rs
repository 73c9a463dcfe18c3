use crate::types::Tool;
use orthocons_core::OrthoconsError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while launching or running an external program
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{tool} binary not found: {binary}")]
    NotInstalled { tool: Tool, binary: String },

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed with exit code {code}: stderr='{stderr}', stdout='{stdout}'")]
    Failed {
        tool: Tool,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("{tool} produced no output at {}", .path.display())]
    MissingOutput { tool: Tool, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ToolError> for OrthoconsError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Io(e) => OrthoconsError::Io(e),
            other => OrthoconsError::Tool(other.to_string()),
        }
    }
}

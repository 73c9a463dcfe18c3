/// Capability for running external programs
use crate::error::ToolError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A single program invocation. The working directory is always explicit;
/// nothing here touches the process-wide current directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add `flag value`
    pub fn option(self, flag: &str, value: impl Into<OsString>) -> Self {
        self.arg(flag).arg(value)
    }

    /// Value following `flag`, if present
    pub fn value_of(&self, flag: &str) -> Option<&Path> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(Path::new)
    }

    /// Shell-like rendering for logs and error messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when terminated by a signal
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }

    pub fn code(&self) -> i32 {
        self.status_code.unwrap_or(-1)
    }
}

/// Runs an [`Invocation`] to completion
pub trait ToolRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError>;
}

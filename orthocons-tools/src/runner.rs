//! Runner backed by `std::process::Command`

use crate::error::ToolError;
use crate::traits::{Invocation, ToolOutput, ToolRunner};
use std::process::Command;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
        debug!(
            "Running `{}` in {}",
            invocation.command_line(),
            invocation.cwd.display()
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .output()
            .map_err(|source| ToolError::Launch {
                program: invocation.program.display().to_string(),
                source,
            })?;

        let result = ToolOutput {
            status_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        info!(
            "{} exited with code {}",
            invocation.program.display(),
            result.code()
        );
        Ok(result)
    }
}

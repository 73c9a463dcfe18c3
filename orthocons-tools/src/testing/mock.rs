//! Mock runner for tests that must not launch real programs

use crate::error::ToolError;
use crate::traits::{Invocation, ToolOutput, ToolRunner};
use std::fs;
use std::sync::Mutex;

/// Records every invocation and writes canned files into the invocation's
/// working directory, as the real program would.
pub struct MockRunner {
    files: Vec<(String, String)>,
    exit_code: i32,
    stderr: String,
    calls: Mutex<Vec<Invocation>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Runner that succeeds without producing files
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            exit_code: 0,
            stderr: String::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Write `contents` to `name` (relative to the working directory) on each run
    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.push((name.into(), contents.into()));
        self
    }

    /// Exit with `code` and the given stderr
    pub fn failing(mut self, code: i32, stderr: impl Into<String>) -> Self {
        self.exit_code = code;
        self.stderr = stderr.into();
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

impl ToolRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }

        for (name, contents) in &self.files {
            fs::write(invocation.cwd.join(name), contents)?;
        }

        Ok(ToolOutput {
            status_code: Some(self.exit_code),
            stdout: String::new(),
            stderr: self.stderr.clone(),
        })
    }
}

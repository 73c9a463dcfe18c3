//! T-Coffee multiple sequence alignment
//!
//! T-Coffee writes its alignment and guide tree into the current directory,
//! so each run gets a working directory of its own and the child process is
//! started there. The caller's working directory is left alone.

use crate::error::ToolError;
use crate::traits::{Invocation, ToolOutput, ToolRunner};
use crate::types::Tool;
use orthocons_core::Config;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Output of one alignment run
#[derive(Debug, Clone)]
pub struct AlignmentRun {
    /// Directory the aligner ran in; it is kept after the run
    pub workdir: PathBuf,
    /// Alignment file inside `workdir`
    pub alignment: PathBuf,
    pub output: ToolOutput,
}

/// T-Coffee integration
pub struct TCoffee {
    binary: PathBuf,
    output_format: String,
    workspace_root: PathBuf,
    runner: Arc<dyn ToolRunner>,
}

impl TCoffee {
    pub fn new(binary: impl Into<PathBuf>, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            binary: binary.into(),
            output_format: "clustalw".to_string(),
            workspace_root: std::env::temp_dir(),
            runner,
        }
    }

    /// Build from configuration, resolving the binary on PATH
    pub fn from_config(config: &Config, runner: Arc<dyn ToolRunner>) -> Result<Self, ToolError> {
        let binary = Tool::TCoffee.locate(&config.tcoffee.binary)?;
        Ok(Self::new(binary, runner)
            .with_output_format(&config.tcoffee.output_format)
            .with_workspace_root(config.workspace_root()))
    }

    pub fn with_output_format(mut self, format: &str) -> Self {
        self.output_format = format.to_string();
        self
    }

    /// Parent directory for the temporary working directories
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    /// Align the sequences in `fasta` inside a fresh temporary directory
    pub fn build_alignment(&self, fasta: &Path) -> Result<AlignmentRun, ToolError> {
        let fasta = fasta.canonicalize()?;
        fs::create_dir_all(&self.workspace_root)?;
        let workdir = tempfile::Builder::new()
            .prefix("tcoffee-")
            .tempdir_in(&self.workspace_root)?
            .keep();
        self.build_alignment_in(&fasta, &workdir)
    }

    /// Align the sequences in `fasta` inside `workdir`
    pub fn build_alignment_in(&self, fasta: &Path, workdir: &Path) -> Result<AlignmentRun, ToolError> {
        let fasta = fasta.canonicalize()?;
        fs::create_dir_all(workdir)?;

        let outfile = alignment_name(&fasta);
        let invocation = Invocation::new(&self.binary, workdir)
            .option("-infile", fasta.as_os_str())
            .option("-output", self.output_format.as_str())
            .option("-outfile", outfile.as_str());

        info!("Aligning {} with T-Coffee", fasta.display());
        let output = self.runner.run(&invocation)?;
        if !output.success() {
            return Err(ToolError::Failed {
                tool: Tool::TCoffee,
                code: output.code(),
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        let alignment = workdir.join(&outfile);
        if !alignment.is_file() {
            return Err(ToolError::MissingOutput {
                tool: Tool::TCoffee,
                path: alignment,
            });
        }

        Ok(AlignmentRun {
            workdir: workdir.to_path_buf(),
            alignment,
            output,
        })
    }
}

/// `<stem>.aln` for an input FASTA path
fn alignment_name(fasta: &Path) -> String {
    let stem = fasta
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "alignment".to_string());
    format!("{}.aln", stem)
}

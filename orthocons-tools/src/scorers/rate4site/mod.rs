//! Rate4Site conservation scoring
//!
//! Rate4Site reads a multiple sequence alignment and writes a table of
//! per-column conservation scores, a tree and a couple of intermediate files
//! into its working directory. [`Rate4Site`] runs it once, parses the table
//! into a [`ConservationMatrix`] and serves later calls from the files it
//! left behind.

pub mod matrix;
pub mod parser;

pub use matrix::{Column, ColumnSelection, ConservationMatrix, ConservationRecord, MsaData};
pub use parser::{extract, extract_residues, get_alpha, get_num, parse_alpha, parse_matrix, read_matrix};

use crate::error::ToolError;
use crate::traits::{Invocation, ToolOutput, ToolRunner};
use crate::types::Tool;
use orthocons_core::{Config, OrthoconsError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Tree written next to the score table
const TREE_FILE: &str = "TheTree.txt";
/// Intermediate files removed once the table is parsed
const INTERMEDIATE_FILES: [&str; 2] = ["r4s.res", "r4sOrig.res"];

#[derive(Error, Debug)]
pub enum Rate4SiteError {
    #[error("Rate4Site failed with exit code {code}. Please check the program output: {}", .output.stderr.trim())]
    Failed { code: i32, output: ToolOutput },

    #[error("Rate4Site output not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{0}")]
    Format(String),

    #[error("Unknown score column: {0}")]
    UnknownColumn(String),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<Rate4SiteError> for OrthoconsError {
    fn from(err: Rate4SiteError) -> Self {
        match err {
            Rate4SiteError::NotFound(path) => OrthoconsError::NotFound(path.display().to_string()),
            Rate4SiteError::Format(msg) => OrthoconsError::Parse(msg),
            unknown @ Rate4SiteError::UnknownColumn(_) => OrthoconsError::InvalidInput(unknown.to_string()),
            Rate4SiteError::Tool(e) => e.into(),
            Rate4SiteError::Io(e) => OrthoconsError::Io(e),
            failed @ Rate4SiteError::Failed { .. } => OrthoconsError::Tool(failed.to_string()),
        }
    }
}

/// One scoring job for one alignment
pub struct Rate4Site {
    binary: PathBuf,
    msa: PathBuf,
    name: String,
    workdir: PathBuf,
    owns_workdir: bool,
    columns: ColumnSelection,
    keep_output: bool,
    runner: Arc<dyn ToolRunner>,
    alpha: Option<f64>,
    result: Option<ConservationMatrix>,
    output: Option<ToolOutput>,
    has_run: bool,
}

impl Rate4Site {
    /// Prepare a job for `msa`. Without an explicit `workdir` the job runs in
    /// `<msa parent>/<msa name up to the first '.'>`.
    pub fn new(
        msa: impl AsRef<Path>,
        workdir: Option<PathBuf>,
        runner: Arc<dyn ToolRunner>,
    ) -> Result<Self, Rate4SiteError> {
        let msa = absolute(msa.as_ref())?;
        let name = job_name(&msa);
        let workdir = match workdir {
            Some(dir) => absolute(&dir)?,
            None => msa.parent().unwrap_or_else(|| Path::new(".")).join(&name),
        };

        Ok(Self {
            binary: PathBuf::from(Tool::Rate4Site.binary_name()),
            msa,
            name,
            workdir,
            owns_workdir: false,
            columns: ColumnSelection::default(),
            keep_output: false,
            runner,
            alpha: None,
            result: None,
            output: None,
            has_run: false,
        })
    }

    /// Build from configuration, resolving the binary on PATH
    pub fn from_config(
        msa: impl AsRef<Path>,
        workdir: Option<PathBuf>,
        config: &Config,
        runner: Arc<dyn ToolRunner>,
    ) -> Result<Self, Rate4SiteError> {
        let binary = Tool::Rate4Site.locate(&config.rate4site.binary)?;
        let columns = ColumnSelection::from_names(&config.rate4site.columns)?;
        Ok(Self::new(msa, workdir, runner)?
            .with_binary(binary)
            .with_columns(columns)
            .with_keep_output(config.rate4site.keep_output))
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_columns(mut self, columns: ColumnSelection) -> Self {
        self.columns = columns;
        self
    }

    /// Leave the working directory in place when the job is dropped
    pub fn with_keep_output(mut self, keep: bool) -> Self {
        self.keep_output = keep;
        self
    }

    pub fn msa(&self) -> &Path {
        &self.msa
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Path of the score table
    pub fn score_output(&self) -> PathBuf {
        self.workdir.join(self.output_name())
    }

    pub fn columns(&self) -> ColumnSelection {
        self.columns
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    pub fn result(&self) -> Option<&ConservationMatrix> {
        self.result.as_ref()
    }

    /// Captured output of the last program run
    pub fn output(&self) -> Option<&ToolOutput> {
        self.output.as_ref()
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Score the alignment. After a successful run the program is not started
    /// again; the table is re-read from the working directory instead.
    pub fn run(&mut self) -> Result<&ConservationMatrix, Rate4SiteError> {
        if self.has_run {
            debug!("Rate4Site already ran for {}, reusing output", self.msa.display());
            return self.finish();
        }

        if !self.workdir.exists() {
            fs::create_dir_all(&self.workdir)?;
            self.owns_workdir = true;
        }

        let invocation = Invocation::new(&self.binary, &self.workdir)
            .option("-s", self.msa.as_os_str())
            .option("-o", self.output_name());

        info!("Scoring {} with Rate4Site", self.msa.display());
        let output = self.runner.run(&invocation)?;
        let code = output.code();
        let success = output.success();
        self.output = Some(output.clone());
        if !success {
            return Err(Rate4SiteError::Failed { code, output });
        }

        self.finish()
    }

    /// Parse the score table and remove intermediate files
    pub fn finish(&mut self) -> Result<&ConservationMatrix, Rate4SiteError> {
        let score_output = self.score_output();
        self.alpha = Some(get_alpha(&score_output)?);
        let matrix = read_matrix(&score_output, &self.columns)?;
        debug!(
            "Parsed {} positions from {} (alpha {:?})",
            matrix.n_rows(),
            score_output.display(),
            self.alpha
        );

        for name in INTERMEDIATE_FILES {
            remove_file_if_exists(&self.workdir.join(name))?;
        }

        self.has_run = true;
        Ok(&*self.result.insert(matrix))
    }

    /// Delete the tree and the working directory, and forget the cached result
    pub fn close(&mut self) -> Result<(), Rate4SiteError> {
        remove_file_if_exists(&self.workdir.join(TREE_FILE))?;
        if self.owns_workdir && self.workdir.exists() {
            fs::remove_dir_all(&self.workdir)?;
            self.owns_workdir = false;
        }

        self.has_run = false;
        self.alpha = None;
        self.result = None;
        Ok(())
    }

    fn output_name(&self) -> String {
        format!("{}.res", self.name)
    }
}

impl Drop for Rate4Site {
    fn drop(&mut self) {
        if self.keep_output {
            return;
        }
        if let Err(e) = self.close() {
            warn!("Failed to clean up {}: {}", self.workdir.display(), e);
        }
    }
}

/// File name of `msa` up to the first '.'
fn job_name(msa: &Path) -> String {
    msa.file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_string))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "rate4site".to_string())
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

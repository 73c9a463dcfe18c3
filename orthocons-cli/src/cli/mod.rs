pub mod commands;
pub mod output;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "orthocons",
    version,
    about = "Per-residue conservation scores for a protein from its OMA orthologs",
    long_about = "Orthocons looks up the orthologs (or hierarchical orthologous group) of a protein \
                  in the OMA browser, aligns them with T-Coffee and scores every alignment column \
                  with Rate4Site. Without a subcommand it prints the ortholog FASTA of SEQUENCE.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Protein sequence, FASTA text or FASTA file
    #[arg(value_name = "SEQUENCE")]
    pub sequence: Option<String>,

    /// Return the hierarchical orthologous group (HOG) instead of the orthologs
    #[arg(long)]
    pub hogs: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to $ORTHOCONS_HOME/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the OMA browser
    #[arg(long, value_name = "URL", env = "ORTHOCONS_OMA_URL", global = true)]
    pub oma_url: Option<String>,
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            config: self.config.clone(),
            oma_url: self.oma_url.clone(),
        }
    }

    /// SEQUENCE and `--hogs` belong to the bare lookup and cannot be combined
    /// with a subcommand
    pub fn check_conflicts(&self) -> Result<(), clap::Error> {
        match &self.command {
            Some(_) if self.sequence.is_some() || self.hogs => Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "SEQUENCE and --hogs cannot be used before a subcommand",
            )),
            _ => Ok(()),
        }
    }
}

/// Flags shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub oma_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the orthologs (or HOG) of a sequence as FASTA
    Orthologs(commands::orthologs::OrthologsArgs),

    /// Align a FASTA file with T-Coffee
    Align(commands::align::AlignArgs),

    /// Score an alignment with Rate4Site
    Conserve(commands::conserve::ConserveArgs),

    /// Orthologs, alignment and conservation scores in one go
    Run(commands::run::RunArgs),

    /// Show configuration paths and external tool availability
    Check,
}

/// Output format of the conservation table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

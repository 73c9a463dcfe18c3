use super::{load_config, system_runner};
use crate::cli::{output, GlobalArgs};
use anyhow::Result;
use clap::Args;
use orthocons_core::OrthoconsError;
use orthocons_tools::TCoffee;
use std::path::PathBuf;

#[derive(Args)]
pub struct AlignArgs {
    /// FASTA file with the sequences to align
    #[arg(value_name = "FASTA")]
    pub fasta: PathBuf,

    /// Run T-Coffee in DIR instead of a fresh temporary directory
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,
}

pub fn run(args: AlignArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let tcoffee = TCoffee::from_config(&config, system_runner()).map_err(OrthoconsError::from)?;

    let alignment = match &args.workdir {
        Some(dir) => tcoffee.build_alignment_in(&args.fasta, dir),
        None => tcoffee.build_alignment(&args.fasta),
    }
    .map_err(OrthoconsError::from)?;

    output::success(&format!("Alignment written to {}", alignment.alignment.display()));
    println!("{}", alignment.alignment.display());
    Ok(())
}

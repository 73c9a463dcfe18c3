use super::{fetch, load_config, ortholog_finder};
use crate::cli::{output, GlobalArgs};
use anyhow::{Context, Result};
use clap::Args;
use orthocons_core::OrthoconsError;
use std::path::PathBuf;

#[derive(Args)]
pub struct OrthologsArgs {
    /// Protein sequence, FASTA text or FASTA file
    #[arg(value_name = "SEQUENCE")]
    pub sequence: String,

    /// Return the hierarchical orthologous group (HOG) instead of the orthologs
    #[arg(long)]
    pub hogs: bool,

    /// Write the FASTA to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: OrthologsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let mut finder = ortholog_finder(&config, &args.sequence)?;
    let fasta = fetch(&mut finder, args.hogs)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &fasta)
                .map_err(OrthoconsError::Io)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!("Wrote {}", path.display()));
        }
        None => print!("{}", fasta),
    }
    Ok(())
}

/// `orthocons SEQUENCE`: database failures are printed as a message, bad
/// input is still an error
pub fn lookup(sequence: &str, hogs: bool, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let mut finder = ortholog_finder(&config, sequence)?;
    let text = if hogs {
        finder.get_hogs()
    } else {
        finder.get_orthologs()
    }
    .map_err(OrthoconsError::from)?;
    println!("{}", text.trim_end());
    Ok(())
}

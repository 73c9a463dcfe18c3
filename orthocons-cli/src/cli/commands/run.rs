use super::{column_selection, fetch, load_config, ortholog_finder, system_runner};
use crate::cli::{output, GlobalArgs, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use orthocons_bio::formats::fasta;
use orthocons_core::OrthoconsError;
use orthocons_tools::{Rate4Site, TCoffee};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct RunArgs {
    /// Protein sequence, FASTA text or FASTA file
    #[arg(value_name = "SEQUENCE")]
    pub sequence: String,

    /// Score the hierarchical orthologous group (HOG) instead of the orthologs
    #[arg(long)]
    pub hogs: bool,

    /// Write the sequences and the alignment to DIR. The Rate4Site
    /// subdirectory is removed unless --keep is given.
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Comma-separated columns: identity, score, qqint, std, msa
    #[arg(long, value_name = "LIST")]
    pub columns: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Keep the Rate4Site working directory
    #[arg(long)]
    pub keep: bool,
}

pub fn run(args: RunArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let columns = column_selection(args.columns.as_deref(), &config)?;
    let runner = system_runner();

    // Fail on missing programs before querying the database
    let tcoffee = TCoffee::from_config(&config, runner.clone()).map_err(OrthoconsError::from)?;
    let binary = orthocons_tools::Tool::Rate4Site
        .locate(&config.rate4site.binary)
        .map_err(OrthoconsError::from)?;

    let mut finder = ortholog_finder(&config, &args.sequence)?;
    let sequences = fetch(&mut finder, args.hogs)?;
    let records = fasta::parse_records(&sequences)
        .map_err(OrthoconsError::from)
        .context("Unusable sequences returned by the database")?;
    info!("Retrieved {} sequences", records.len());

    let workdir = match args.workdir {
        Some(dir) => {
            fs::create_dir_all(&dir).map_err(OrthoconsError::Io)?;
            dir
        }
        None => {
            let root = config.workspace_root();
            fs::create_dir_all(&root).map_err(OrthoconsError::Io)?;
            tempfile::Builder::new()
                .prefix("orthocons-")
                .tempdir_in(&root)
                .map_err(OrthoconsError::Io)?
                .keep()
        }
    };

    let name = if args.hogs { "hogs.fasta" } else { "orthologs.fasta" };
    let input = workdir.join(name);
    fasta::write_records(&input, &records)?;

    let alignment = tcoffee
        .build_alignment_in(&input, &workdir)
        .map_err(OrthoconsError::from)?;

    let keep = args.keep || config.rate4site.keep_output;
    let mut r4s = Rate4Site::new(&alignment.alignment, None, runner)
        .map_err(OrthoconsError::from)?
        .with_binary(binary)
        .with_columns(columns)
        .with_keep_output(keep);
    let matrix = r4s.run().map_err(OrthoconsError::from)?.clone();

    output::print_matrix(&matrix, r4s.alpha(), args.format)?;
    output::info(&format!("Alignment kept in {}", workdir.display()));
    Ok(())
}

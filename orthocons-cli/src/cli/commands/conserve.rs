use super::{column_selection, load_config, system_runner};
use crate::cli::{output, GlobalArgs, OutputFormat};
use anyhow::Result;
use clap::Args;
use orthocons_core::OrthoconsError;
use orthocons_tools::Rate4Site;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConserveArgs {
    /// Multiple sequence alignment to score
    #[arg(value_name = "MSA")]
    pub msa: PathBuf,

    /// Run Rate4Site in DIR (defaults to a directory next to the alignment)
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

pub fn run(args: ConserveArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let columns = column_selection(args.columns.as_deref(), &config)?;

    let mut r4s = Rate4Site::from_config(&args.msa, args.workdir.clone(), &config, system_runner())
        .map_err(OrthoconsError::from)?
        .with_columns(columns)
        .with_keep_output(args.keep || config.rate4site.keep_output);

    let matrix = r4s.run().map_err(OrthoconsError::from)?.clone();
    output::print_matrix(&matrix, r4s.alpha(), args.format)?;

    if args.keep || config.rate4site.keep_output {
        output::info(&format!("Rate4Site output kept in {}", r4s.workdir().display()));
    }
    Ok(())
}

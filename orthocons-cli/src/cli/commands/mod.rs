pub mod align;
pub mod check;
pub mod conserve;
pub mod orthologs;
pub mod run;

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};
use orthocons_bio::{failure_message, OmaClient, OmaError, OrthologFinder};
use orthocons_core::{Config, OrthoconsError};
use orthocons_tools::{ColumnSelection, SystemRunner, ToolRunner};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Effective configuration: the config file with command line overrides applied
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = orthocons_core::load_or_default(global.config.as_deref())?;
    if let Some(url) = &global.oma_url {
        debug!("Using OMA at {}", url);
        config.oma.base_url = url.clone();
    }
    Ok(config)
}

/// The argument itself, or the contents of the file it names
pub fn read_sequence(arg: &str) -> Result<String> {
    let path = Path::new(arg);
    if path.is_file() {
        debug!("Reading sequence from {}", path.display());
        return std::fs::read_to_string(path)
            .map_err(OrthoconsError::Io)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    Ok(arg.to_string())
}

pub fn ortholog_finder(config: &Config, sequence: &str) -> Result<OrthologFinder> {
    let client = OmaClient::from_config(&config.oma).map_err(OrthoconsError::from)?;
    Ok(OrthologFinder::new(client, read_sequence(sequence)?))
}

/// Orthologs or HOG members of the query as FASTA
pub fn fetch(finder: &mut OrthologFinder, hogs: bool) -> Result<String> {
    let (what, result) = if hogs {
        ("HOGs", finder.try_get_hogs())
    } else {
        ("orthologs", finder.try_get_orthologs())
    };

    result.map_err(|err| match err {
        OmaError::Sequence(err) => anyhow::Error::new(OrthoconsError::from(err)),
        err => {
            let message = failure_message(&err, what);
            anyhow::Error::new(OrthoconsError::from(err)).context(message)
        }
    })
}

/// `--columns` if given, otherwise the configured columns
pub fn column_selection(columns: Option<&str>, config: &Config) -> Result<ColumnSelection> {
    let selection = match columns {
        Some(list) => list.parse::<ColumnSelection>(),
        None => ColumnSelection::from_names(&config.rate4site.columns),
    };
    let selection = selection.map_err(OrthoconsError::from)?;
    if selection.count() == 0 {
        return Err(OrthoconsError::InvalidInput("No score columns selected".to_string()).into());
    }
    Ok(selection)
}

pub fn system_runner() -> Arc<dyn ToolRunner> {
    Arc::new(SystemRunner::new())
}

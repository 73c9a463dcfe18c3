use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use orthocons_core::OrthoconsError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.check_conflicts() {
        e.exit();
    }
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<OrthoconsError>() {
            Some(err) => err.exit_code(),
            None => 1,
        };
        process::exit(exit_code);
    }
}

/// ORTHOCONS_LOG, then RUST_LOG, then `warn`. Each `-v` raises the level.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => std::env::var("ORTHOCONS_LOG")
            .ok()
            .and_then(|level| EnvFilter::try_new(level).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let global = cli.global();
    match cli.command {
        Some(Commands::Orthologs(args)) => crate::cli::commands::orthologs::run(args, &global),
        Some(Commands::Align(args)) => crate::cli::commands::align::run(args, &global),
        Some(Commands::Conserve(args)) => crate::cli::commands::conserve::run(args, &global),
        Some(Commands::Run(args)) => crate::cli::commands::run::run(args, &global),
        Some(Commands::Check) => crate::cli::commands::check::run(&global),
        None => match cli.sequence {
            Some(sequence) => crate::cli::commands::orthologs::lookup(&sequence, cli.hogs, &global),
            None => anyhow::bail!("No sequence given. Run `orthocons --help` for usage."),
        },
    }
}

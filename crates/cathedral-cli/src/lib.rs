//! cathedral CLI - export, enrich and lint Cathedral reference content
//!
//! This is the library half of the `cathedral` binary; `main.rs` only maps
//! the returned exit code. Commands live in [`commands`], one module each.

use std::process::ExitCode;

use anyhow::{Context, Result};
use cathedral_core::Config;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod output;
mod utils;

use crate::utils::initialize_logging;
use cli::{Cli, Commands};

/// Execute the cathedral CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging setup, configuration loading, or the selected
/// command fails.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<ExitCode> {
    let root = cli.root;
    let config = Config::load(&root)
        .with_context(|| format!("failed to load configuration under {}", root.display()))?;
    debug!(root = %root.display(), "configuration loaded");

    match cli.command {
        Commands::Export {
            out,
            bundle_name,
            format,
        } => commands::export(&root, &config, out, bundle_name, format.resolve()),
        Commands::Lint { dir, format } => commands::lint(&root, &config, dir, format.resolve()),
        Commands::Enrich { output } => commands::enrich(&root, &config, output),
    }
}

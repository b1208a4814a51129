//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use is_terminal::IsTerminal;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands};
use crate::output::OutputFormat;

/// Initialize the logging subsystem based on CLI flags.
///
/// Warnings are shown by default; `--verbose` enables debug output and
/// `--quiet` limits it to errors. JSON output also drops to errors unless
/// verbose logging was requested explicitly.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let mut level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let machine_output = !cli.verbose && command_format(&cli.command) == Some(OutputFormat::Json);
    if machine_output {
        level = Level::ERROR;
    }

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(ansi_enabled(
            cli.no_color,
            env_no_color,
            std::io::stderr().is_terminal(),
        ))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    if cli.no_color || env_no_color || machine_output || !std::io::stdout().is_terminal() {
        color_control::set_override(false);
    }
    Ok(())
}

/// ANSI escapes in log lines need a terminal and no opt-out.
const fn ansi_enabled(no_color_flag: bool, env_no_color: bool, is_tty: bool) -> bool {
    is_tty && !no_color_flag && !env_no_color
}

fn command_format(command: &Commands) -> Option<OutputFormat> {
    match command {
        Commands::Export { format, .. } | Commands::Lint { format, .. } => Some(format.resolve()),
        Commands::Enrich { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_env_disables_ansi_on_a_terminal() {
        assert!(!ansi_enabled(false, true, true));
    }

    #[test]
    fn ansi_needs_terminal_and_no_opt_out() {
        assert!(ansi_enabled(false, false, true));
        assert!(!ansi_enabled(true, false, true));
        assert!(!ansi_enabled(false, false, false));
    }
}

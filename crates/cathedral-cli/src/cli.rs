//! # CLI Structure and Argument Parsing
//!
//! The `cathedral` binary exposes the content passes as subcommands:
//!
//! ```bash
//! # Package docs, codex template and engines into exports/cathedral-site
//! cathedral export
//!
//! # Same, into a custom location, printing the manifest as JSON
//! cathedral export --out /tmp/site --format json
//!
//! # Validate chatmode definitions (exit code 2 on violations)
//! cathedral lint
//!
//! # Write data/codex.music.enriched.json
//! cathedral enrich
//! ```
//!
//! Global options (`--root`, `--verbose`, `--quiet`, `--no-color`) apply to
//! every command.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `cathedral` command
#[derive(Parser, Clone, Debug)]
#[command(name = "cathedral")]
#[command(version)]
#[command(about = "Export, enrich and lint Cathedral reference content", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Content root holding docs/, resources/ and the codex template
    #[arg(long, global = true, env = "CATHEDRAL_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available subcommands for the `cathedral` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Export the static reference bundle
    Export {
        /// Bundle directory (defaults to `<output_dir>/<bundle_name>` from config)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Bundle directory name under the output directory
        #[arg(long, value_name = "NAME")]
        bundle_name: Option<String>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Check chatmode files for required sections and size
    Lint {
        /// Chatmodes directory (defaults to `.github/chatmodes`)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Write a music-enriched copy of the codex template
    Enrich {
        /// Output file (defaults to `data/codex.music.enriched.json`)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_flags() {
        let cli = Cli::try_parse_from([
            "cathedral",
            "--root",
            "content",
            "export",
            "--out",
            "/tmp/site",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("content"));
        match cli.command {
            Commands::Export { out, format, .. } => {
                assert_eq!(out, Some(PathBuf::from("/tmp/site")));
                assert_eq!(format.resolve(), OutputFormat::Json);
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cathedral", "lint", "-v", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["cathedral", "-q", "-v", "lint"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["cathedral"]).is_err());
    }
}

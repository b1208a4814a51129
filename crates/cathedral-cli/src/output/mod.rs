//! # Output Formatting
//!
//! Commands print either human-readable text or a single pretty-printed JSON
//! document. Diagnostics go to stderr through `tracing`; stdout carries only
//! the command result.

use anyhow::Result;
use serde::Serialize;

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Single pretty-printed JSON document
    Json,
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cathedral_core::{ChatmodeLinter, Config};
use colored::Colorize;

use crate::output::{OutputFormat, print_json};

/// Exit code when any chatmode violates the rules.
pub const LINT_FAILURE: u8 = 2;

/// Lint every chatmode file and report all findings at once.
pub fn execute(
    root: &Path,
    config: &Config,
    dir: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let dir = dir.unwrap_or_else(|| config.chatmodes_dir(root));
    let linter = ChatmodeLinter::new(&config.lint)?;
    let report = linter
        .lint_dir(&dir)
        .with_context(|| format!("failed to lint {}", dir.display()))?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            if !report.directory_found {
                println!("No chatmodes directory");
            } else if report.is_clean() {
                println!("Chatmode lint: {}", "OK".green());
            } else {
                eprintln!("{}", "Chatmode lint issues:".red());
                for issue in &report.issues {
                    eprintln!(" - {issue}");
                }
            }
        },
    }

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(LINT_FAILURE))
    }
}

use clap::Args;

use crate::output::OutputFormat;

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (`--format` / `-f`)
    #[arg(short = 'f', long = "format", value_enum, env = "CATHEDRAL_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl FormatArg {
    /// Returns the effective output format, text unless JSON was requested.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cathedral_core::{CodexEnricher, Config};
use tracing::info;

/// Write the music-enriched codex.
pub fn execute(root: &Path, config: &Config, output: Option<PathBuf>) -> Result<ExitCode> {
    let mut enricher = CodexEnricher::new(root, config);
    if let Some(path) = output {
        enricher = enricher.with_output(path);
    }

    let report = enricher.run().context("codex enrichment failed")?;
    info!(
        source = %report.source.display(),
        enriched = report.enriched,
        "enrichment complete"
    );

    println!(
        "Enriched codex written to {} nodes: {}",
        report.output.display(),
        report.nodes
    );
    Ok(ExitCode::SUCCESS)
}

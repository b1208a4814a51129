use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cathedral_core::{BundleExporter, Config};
use colored::Colorize;
use serde_json::json;
use tracing::info;

use crate::output::{OutputFormat, print_json};

/// Export the reference bundle and report where it landed.
pub fn execute(
    root: &Path,
    config: &Config,
    out: Option<PathBuf>,
    bundle_name: Option<String>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let mut config = config.clone();
    if let Some(name) = bundle_name {
        config.export.bundle_name = name;
        config.validate()?;
    }

    let mut exporter = BundleExporter::new(root, &config);
    if let Some(dir) = out {
        exporter = exporter.with_bundle_dir(dir);
    }

    let report = exporter
        .export()
        .with_context(|| format!("failed to export bundle to {}", exporter.bundle_dir().display()))?;

    info!(
        instructions = report.manifest.instructions.len(),
        engines = report.manifest.engines.len(),
        index = report.index_rendered,
        "export complete"
    );

    match format {
        OutputFormat::Text => {
            println!(
                "{} bundle created at {}",
                "[export]".green(),
                report.bundle_dir.display()
            );
        },
        OutputFormat::Json => print_json(&json!({
            "bundleDir": report.bundle_dir,
            "manifestPath": report.manifest_path(),
            "indexRendered": report.index_rendered,
            "manifest": report.manifest,
        }))?,
    }

    Ok(ExitCode::SUCCESS)
}

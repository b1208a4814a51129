//! The one-pass reference bundle export.
//!
//! Categories are emitted in a fixed order and each one is independent: a
//! missing source is folded into the manifest as `null` or an omitted entry,
//! while any failure to write the output tree aborts the run.
//!
//! 1. instruction pages
//! 2. index page
//! 3. codex template
//! 4. engine prototypes
//! 5. audio map, stylesheet, portal, loader
//! 6. manifest

use super::assets::{LOADER_JS, STYLE_CSS, portal_html};
use super::manifest::{
    AUDIO_MAP_FILE, BundleContents, EngineEntry, InstructionEntry, LOADER_FILE, MANIFEST_FILE,
    ReferenceManifest,
};
use super::writer::BundleWriter;
use crate::config::Config;
use crate::locate::{Asset, ContentLocator, ENGINE_NAMES};
use crate::markdown::{PageShell, render_document};
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Output file name of the rendered research index.
pub const INDEX_HTML: &str = "index.html";

/// Outcome of a completed export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Directory the bundle was written to.
    pub bundle_dir: PathBuf,
    /// The manifest that was written.
    pub manifest: ReferenceManifest,
    /// Whether `index.html` was emitted.
    pub index_rendered: bool,
}

impl ExportReport {
    /// Path of the written manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.bundle_dir.join(MANIFEST_FILE)
    }
}

/// Exports a content tree into a static reference bundle.
#[derive(Debug, Clone)]
pub struct BundleExporter {
    locator: ContentLocator,
    bundle_dir: PathBuf,
    title: String,
}

impl BundleExporter {
    /// Exporter for `root` using the bundle location and title from `config`.
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        let root = root.into();
        let bundle_dir = config.bundle_dir(&root);
        Self {
            locator: ContentLocator::new(root),
            bundle_dir,
            title: config.export.title.clone(),
        }
    }

    /// Write the bundle somewhere other than the configured location.
    #[must_use]
    pub fn with_bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundle_dir = dir.into();
        self
    }

    /// Target bundle directory.
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// Run the export, stamping the manifest with the current time.
    pub fn export(&self) -> Result<ExportReport> {
        self.export_at(Utc::now())
    }

    /// Run the export with an explicit generation timestamp.
    pub fn export_at(&self, generated: DateTime<Utc>) -> Result<ExportReport> {
        let writer = BundleWriter::create(&self.bundle_dir)?;
        let mut contents = BundleContents {
            instructions: self.emit_instructions(&writer)?,
            ..BundleContents::default()
        };
        let index_rendered = self.emit_index(&writer)?;
        contents.codex_template = self.emit_codex_template(&writer)?;
        contents.engines = self.emit_engines(&writer)?;
        contents.audio_map = self.emit_audio_map(&writer)?;

        let manifest = ReferenceManifest::new(contents, generated);

        writer.write("style.css", STYLE_CSS.as_bytes())?;
        writer.write("portal.html", portal_html(&self.title, &manifest).as_bytes())?;
        writer.write(LOADER_FILE, LOADER_JS.as_bytes())?;

        let json = serde_json::to_string_pretty(&manifest)?;
        writer.write(MANIFEST_FILE, json.as_bytes())?;

        info!(
            bundle = %self.bundle_dir.display(),
            instructions = manifest.instructions.len(),
            engines = manifest.engines.len(),
            codex = manifest.codex_template.is_some(),
            audio_map = manifest.audio_map.is_some(),
            "reference bundle created"
        );

        Ok(ExportReport {
            bundle_dir: self.bundle_dir.clone(),
            manifest,
            index_rendered,
        })
    }

    fn emit_instructions(&self, writer: &BundleWriter) -> Result<Vec<InstructionEntry>> {
        writer.ensure_dir("instructions")?;
        let Some(dir) = self.locator.locate(Asset::InstructionsDir) else {
            return Ok(Vec::new());
        };

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push((name, path)),
                Err(raw) => warn!(name = ?raw, "skipping instruction with non UTF-8 name"),
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let shell = PageShell {
            title: &self.title,
            stylesheet: "../style.css",
        };
        let mut entries = Vec::with_capacity(files.len());
        let mut taken = HashSet::new();
        for (file, path) in files {
            // Same-stem sources (intro.md, intro.txt) keep their full name.
            let Some(html_name) = [
                format!("{}.html", strip_extension(&file)),
                format!("{file}.html"),
            ]
            .into_iter()
            .find(|name| !taken.contains(name)) else {
                warn!(file = %file, "skipping instruction whose page name is already taken");
                continue;
            };
            taken.insert(html_name.clone());
            let markdown = read_text(&path)?;
            let html = render_document(&markdown, &shell);
            let hash = writer.write(&format!("instructions/{html_name}"), html.as_bytes())?;
            debug!(file = %file, html = %html_name, hash = %hash, "rendered instruction");
            entries.push(InstructionEntry {
                file,
                html: html_name,
                hash,
            });
        }
        Ok(entries)
    }

    fn emit_index(&self, writer: &BundleWriter) -> Result<bool> {
        let Some(path) = self.locator.locate(Asset::IndexDoc) else {
            return Ok(false);
        };
        let shell = PageShell {
            title: &self.title,
            stylesheet: "./style.css",
        };
        let html = render_document(&read_text(&path)?, &shell);
        writer.write(INDEX_HTML, html.as_bytes())?;
        Ok(true)
    }

    fn emit_codex_template(&self, writer: &BundleWriter) -> Result<Option<String>> {
        let Some(path) = self.locator.locate(Asset::CodexTemplate) else {
            return Ok(None);
        };
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let rel = format!("codex/{name}");
        writer.write(&rel, &fs::read(&path)?)?;
        Ok(Some(rel))
    }

    fn emit_engines(&self, writer: &BundleWriter) -> Result<Vec<EngineEntry>> {
        writer.ensure_dir("engines")?;
        let mut entries = Vec::new();
        for name in ENGINE_NAMES {
            let Some(path) = self.locator.locate(Asset::Engine(name)) else {
                continue;
            };
            let hash = writer.write(&format!("engines/{name}"), &fs::read(&path)?)?;
            entries.push(EngineEntry {
                name: name.to_string(),
                hash,
            });
        }
        Ok(entries)
    }

    fn emit_audio_map(&self, writer: &BundleWriter) -> Result<Option<String>> {
        let Some(path) = self.locator.locate(Asset::AudioMap) else {
            return Ok(None);
        };
        writer.write(AUDIO_MAP_FILE, &fs::read(&path)?)?;
        Ok(Some(AUDIO_MAP_FILE.to_string()))
    }
}

/// Drop the last `.ext` of a file name (`intro.md` -> `intro`, `a.b.md` -> `a.b`).
///
/// A trailing dot with nothing after it is kept, and a leading-dot name like
/// `.notes` loses everything, matching a `\.[^.]+$` strip.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[..idx],
        _ => name,
    }
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), "source is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        },
    })
}

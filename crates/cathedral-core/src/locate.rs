//! Candidate path resolution for content sources.
//!
//! Sources have moved between directory layouts over time (engine prototypes
//! migrated from the repository root into `docs/research`, for instance). Each
//! logical asset therefore has an ordered list of candidate locations and the
//! first one that exists wins. Absence is a normal outcome, reported as `None`.

use std::path::{Path, PathBuf};

/// File name of the codex template in every layout.
pub const CODEX_TEMPLATE_FILE: &str = "codex_144_nodes_template.json";

/// Engine prototype scripts copied into the bundle, in manifest order.
pub const ENGINE_NAMES: [&str; 2] = ["ambient-engine.js", "cymatic-engine.js"];

/// A logical content asset with a fixed set of candidate locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset<'a> {
    /// The JSON array of codex nodes.
    CodexTemplate,
    /// An engine prototype script by file name.
    Engine(&'a str),
    /// The optional audio map consumed by the enricher and the loader.
    AudioMap,
    /// The research index document.
    IndexDoc,
    /// Directory holding instruction documents.
    InstructionsDir,
}

/// Return the first candidate accepted by `exists`.
///
/// Pure over its inputs: the predicate is the only view of the filesystem.
///
/// ```rust
/// use cathedral_core::locate::first_existing;
/// use std::path::PathBuf;
///
/// let candidates = [PathBuf::from("new/a.json"), PathBuf::from("a.json")];
/// let found = first_existing(&candidates, |p| p.starts_with("a.json"));
/// assert_eq!(found, Some(PathBuf::from("a.json")));
/// ```
pub fn first_existing<F>(candidates: &[PathBuf], exists: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    candidates.iter().find(|p| exists(p)).cloned()
}

/// Resolves assets relative to a content root.
#[derive(Debug, Clone)]
pub struct ContentLocator {
    root: PathBuf,
}

impl ContentLocator {
    /// Create a locator anchored at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ordered candidate paths for `asset`, most recent layout first.
    pub fn candidates(&self, asset: Asset<'_>) -> Vec<PathBuf> {
        let docs = self.root.join("docs");
        match asset {
            Asset::CodexTemplate => vec![
                docs.join("research").join(CODEX_TEMPLATE_FILE),
                self.root.join(CODEX_TEMPLATE_FILE),
            ],
            Asset::Engine(name) => vec![docs.join("research").join(name), self.root.join(name)],
            Asset::AudioMap => vec![self.root.join("resources").join("audio-map.json")],
            Asset::IndexDoc => vec![docs.join("INDEX.md")],
            Asset::InstructionsDir => vec![docs.join("instructions")],
        }
    }

    /// Locate `asset` on the real filesystem.
    ///
    /// Directories only satisfy [`Asset::InstructionsDir`]; every other asset
    /// must resolve to a regular file.
    pub fn locate(&self, asset: Asset<'_>) -> Option<PathBuf> {
        let candidates = self.candidates(asset);
        let found = match asset {
            Asset::InstructionsDir => first_existing(&candidates, Path::is_dir),
            _ => first_existing(&candidates, Path::is_file),
        };
        match &found {
            Some(path) => tracing::debug!(?asset, path = %path.display(), "located asset"),
            None => tracing::debug!(?asset, "asset not present"),
        }
        found
    }
}

//! # cathedral-core
//!
//! Content tooling for the Cathedral project: packaging curated documents,
//! the codex template and engine prototypes into a static reference bundle,
//! enriching the codex with music bindings, and linting chatmode definitions.
//!
//! Everything here is a single-pass, synchronous file transformation. Missing
//! optional sources are folded into the output (as `null` or omitted entries);
//! only unwritable output or structurally broken required input surfaces as an
//! [`Error`].
//!
//! ## Architecture
//!
//! - **Locating**: ordered candidate paths per asset, first existing wins
//! - **Markdown**: a small rule-ordered markdown to HTML renderer
//! - **Digest**: short SHA-256 prefixes for manifest change detection
//! - **Bundle**: the export pass and its manifest
//! - **Enrich**: music binding fields for codex nodes
//! - **Lint**: required-section and size checks for chatmode files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cathedral_core::{BundleExporter, Config};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = Config::load(root)?;
//! let report = BundleExporter::new(root, &config).export()?;
//! println!("{} instruction pages", report.manifest.instructions.len());
//! # Ok::<(), cathedral_core::Error>(())
//! ```

/// Static reference bundle export
pub mod bundle;
/// Layered configuration
pub mod config;
/// Content digests
pub mod digest;
/// Codex music enrichment
pub mod enrich;
/// Error types and result aliases
pub mod error;
/// Chatmode linting
pub mod lint;
/// Candidate path resolution
pub mod locate;
/// Naive markdown rendering
pub mod markdown;

pub use bundle::{BundleExporter, ExportReport, ReferenceManifest};
pub use config::Config;
pub use enrich::{CodexEnricher, EnrichReport};
pub use error::{Error, Result};
pub use lint::{ChatmodeLinter, LintIssue, LintReport};
pub use locate::{Asset, ContentLocator};

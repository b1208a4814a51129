//! Static reference bundle export.
//!
//! Packages curated content for external hosting: instruction documents and
//! the research index become HTML pages, the codex template, engine prototypes
//! and audio map are copied verbatim, and a manifest plus a small loader module
//! let a consuming site discover everything.
//!
//! ## Output Layout
//!
//! ```text
//! exports/<bundle-name>/
//!   style.css
//!   portal.html
//!   index.html                optional
//!   instructions/<name>.html  one per instruction document
//!   codex/<template>.json     optional
//!   engines/<name>.js         0-2 files
//!   audio-map.json            optional
//!   loader.js
//!   reference-manifest.json
//! ```
//!
//! ## Key Types
//!
//! - [`BundleExporter`]: runs the export for a content root
//! - [`ReferenceManifest`]: the manifest record, assembled once per run
//! - [`BundleWriter`]: write-then-rename file emission with digests

mod assets;
mod exporter;
mod manifest;
mod writer;

pub use assets::{LOADER_JS, STYLE_CSS, portal_html};
pub use exporter::{BundleExporter, ExportReport, INDEX_HTML};
pub use manifest::{
    AUDIO_MAP_FILE, BundleContents, EngineEntry, InstructionEntry, LOADER_FILE, MANIFEST_FILE,
    ReferenceManifest,
};
pub use writer::BundleWriter;

//! The reference manifest written at the end of every export.
//!
//! One JSON record enumerates every emitted artifact with its digest:
//!
//! ```json
//! {
//!   "generated": "2025-03-01T12:00:00.000Z",
//!   "instructions": [{ "file": "intro.md", "html": "intro.html", "hash": "…" }],
//!   "engines": [{ "name": "ambient-engine.js", "hash": "…" }],
//!   "codexTemplate": "codex/codex_144_nodes_template.json",
//!   "audioMap": null,
//!   "loader": "loader.js"
//! }
//! ```
//!
//! Absent optional sources show up as `null` (codex template, audio map) or
//! are missing from their list (engines, instructions). Consumers treat `null`
//! as "not available", never as an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name of the loader stub inside the bundle.
pub const LOADER_FILE: &str = "loader.js";

/// File name of the manifest inside the bundle.
pub const MANIFEST_FILE: &str = "reference-manifest.json";

/// File name of the copied audio map inside the bundle.
pub const AUDIO_MAP_FILE: &str = "audio-map.json";

/// One rendered instruction page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionEntry {
    /// Source file name under `docs/instructions`.
    pub file: String,
    /// Output file name under `instructions/`.
    pub html: String,
    /// Digest of the emitted HTML.
    pub hash: String,
}

/// One copied engine prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEntry {
    /// Engine file name, identical in source and bundle.
    pub name: String,
    /// Digest of the copied bytes.
    pub hash: String,
}

/// Everything an export emitted, collected before the manifest is frozen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleContents {
    /// Rendered instruction pages, sorted by source file name.
    pub instructions: Vec<InstructionEntry>,
    /// Copied engines, in the fixed engine order.
    pub engines: Vec<EngineEntry>,
    /// Bundle-relative path of the copied codex template.
    pub codex_template: Option<String>,
    /// Bundle-relative path of the copied audio map.
    pub audio_map: Option<String>,
}

/// The manifest record serialized to [`MANIFEST_FILE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceManifest {
    /// When the bundle was generated (ISO-8601, UTC, millisecond precision).
    #[serde(with = "iso_millis")]
    pub generated: DateTime<Utc>,
    /// Rendered instruction pages.
    pub instructions: Vec<InstructionEntry>,
    /// Copied engine prototypes.
    pub engines: Vec<EngineEntry>,
    /// Bundle-relative codex template path, `null` when absent.
    pub codex_template: Option<String>,
    /// Audio map file name, `null` when absent.
    pub audio_map: Option<String>,
    /// Loader stub file name (always [`LOADER_FILE`]).
    pub loader: String,
}

impl ReferenceManifest {
    /// Freeze collected contents into a manifest.
    ///
    /// ```rust
    /// use cathedral_core::bundle::{BundleContents, ReferenceManifest};
    /// use chrono::Utc;
    ///
    /// let manifest = ReferenceManifest::new(BundleContents::default(), Utc::now());
    /// let json = serde_json::to_value(&manifest).unwrap();
    /// assert!(json["codexTemplate"].is_null());
    /// assert_eq!(json["loader"], "loader.js");
    /// ```
    #[must_use]
    pub fn new(contents: BundleContents, generated: DateTime<Utc>) -> Self {
        Self {
            generated,
            instructions: contents.instructions,
            engines: contents.engines,
            codex_template: contents.codex_template,
            audio_map: contents.audio_map,
            loader: LOADER_FILE.to_string(),
        }
    }

    /// Codex link target for the portal page, empty when there is no template.
    pub fn codex_href(&self) -> &str {
        self.codex_template.as_deref().unwrap_or("")
    }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_schema_field_names() {
        let contents = BundleContents {
            instructions: vec![InstructionEntry {
                file: "intro.md".into(),
                html: "intro.html".into(),
                hash: "0123456789abcdef".into(),
            }],
            engines: vec![EngineEntry {
                name: "ambient-engine.js".into(),
                hash: "fedcba9876543210".into(),
            }],
            codex_template: Some("codex/codex_144_nodes_template.json".into()),
            audio_map: None,
        };
        let manifest = ReferenceManifest::new(contents, fixed_time());
        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(json["generated"], "2025-03-01T12:00:00.000Z");
        assert_eq!(json["instructions"][0]["file"], "intro.md");
        assert_eq!(json["instructions"][0]["html"], "intro.html");
        assert_eq!(json["engines"][0]["name"], "ambient-engine.js");
        assert_eq!(json["codexTemplate"], "codex/codex_144_nodes_template.json");
        assert!(json["audioMap"].is_null());
        assert_eq!(json["loader"], LOADER_FILE);
    }

    #[test]
    fn test_roundtrip_keeps_timestamp() {
        let manifest = ReferenceManifest::new(BundleContents::default(), fixed_time());
        let text = serde_json::to_string_pretty(&manifest).unwrap();
        let back: ReferenceManifest = serde_json::from_str(&text).unwrap();
        assert_eq!(back, manifest);
    }

    #[test]
    fn test_codex_href_empty_when_absent() {
        let manifest = ReferenceManifest::new(BundleContents::default(), fixed_time());
        assert_eq!(manifest.codex_href(), "");
    }
}

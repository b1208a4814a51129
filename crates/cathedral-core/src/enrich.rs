//! Music binding enrichment for the codex template.
//!
//! Reads the codex node array, attaches a `music` object to every node that
//! lacks one and writes the result to a separate file. The template itself is
//! never modified. Motifs are drawn from the audio map's `motifs[].id` list by
//! numerology; the other fields are simple modular functions of `numerology`
//! and `node_id`.

use crate::config::Config;
use crate::locate::{Asset, ContentLocator};
use crate::{Error, Result};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Motif used when the audio map provides none.
pub const DEFAULT_MOTIF: &str = "primordial-seed";

/// Modes indexed by `numerology mod 5`.
pub const MODES: [&str; 5] = ["aeolian", "dorian", "phrygian", "lydian", "mixolydian"];

/// Instrumentation tags attached to every enriched node.
pub const INSTRUMENTATION_TAGS: [&str; 3] = ["pad", "texture", "safety"];

/// Outcome of an enrichment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichReport {
    /// Template that was read.
    pub source: PathBuf,
    /// File that was written.
    pub output: PathBuf,
    /// Number of nodes in the template.
    pub nodes: usize,
    /// Number of nodes that received a new `music` field.
    pub enriched: usize,
}

/// Motif ids from an audio map document, in declaration order.
pub fn motif_ids(audio_map: &Value) -> Vec<Value> {
    audio_map
        .get("motifs")
        .and_then(Value::as_array)
        .map(|motifs| {
            motifs
                .iter()
                .map(|m| m.get("id").cloned().unwrap_or(Value::Null))
                .collect()
        })
        .unwrap_or_default()
}

/// Read motif ids from an optional audio map file.
///
/// A missing, unreadable or malformed audio map yields no motifs.
pub fn load_motifs(path: Option<&Path>) -> Vec<Value> {
    let Some(path) = path else {
        return Vec::new();
    };
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(value) => motif_ids(&value),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable audio map");
            Vec::new()
        },
    }
}

/// Pick the motif for a node's numerology.
pub fn pick_motif(n: i128, motifs: &[Value]) -> Value {
    if motifs.is_empty() {
        return Value::String(DEFAULT_MOTIF.to_string());
    }
    let len = i128::try_from(motifs.len()).unwrap_or(i128::MAX);
    // rem_euclid keeps the index within 0..len, so the conversion cannot fail
    let idx = usize::try_from((n - 1).rem_euclid(len)).unwrap_or(0);
    motifs[idx].clone()
}

/// Enrich every node that has no truthy `music` field.
///
/// Returns the enriched nodes and how many were changed. Non-object entries
/// pass through untouched.
pub fn enrich_nodes(nodes: Vec<Value>, motifs: &[Value]) -> (Vec<Value>, usize) {
    let mut enriched = 0;
    let nodes: Vec<Value> = nodes
        .into_iter()
        .map(|node| match node {
            Value::Object(mut fields) => {
                if !fields.get("music").is_some_and(is_truthy) {
                    fields.insert("music".to_string(), music_binding(&fields, motifs));
                    enriched += 1;
                }
                Value::Object(fields)
            },
            other => other,
        })
        .collect();
    (nodes, enriched)
}

fn music_binding(node: &Map<String, Value>, motifs: &[Value]) -> Value {
    let numerology = node.get("numerology").and_then(integer);
    let node_id = node.get("node_id").and_then(integer);
    let nonzero = |v: Option<i128>| v.filter(|n| *n != 0);

    let seed = nonzero(numerology).or(nonzero(node_id)).unwrap_or(1);
    let energy_hint = nonzero(numerology)
        .and_then(|_| node.get("numerology").cloned())
        .unwrap_or_else(|| json!(1));
    let energy = nonzero(numerology).unwrap_or(1);
    let mode_idx = usize::try_from(energy.rem_euclid(5)).unwrap_or(0);

    json!({
        "motif": pick_motif(seed, motifs),
        "energy_hint": energy_hint,
        "mode": MODES[mode_idx],
        "instrumentation_tags": INSTRUMENTATION_TAGS,
        "adaptive": {
            "rise": numerology.is_some_and(|n| n % 3 == 0),
            "pulse": numerology.is_some_and(|n| n % 2 == 0),
            "fractalLayer": node_id.is_some_and(|n| n % 7 == 0),
        }
    })
}

/// Integral value of a JSON number, including `u64` values past `i64::MAX`
/// and floats with no fractional part. Anything else counts as missing.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integer(value: &Value) -> Option<i128> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    // i128 spans about 1.7e38; larger floats would saturate
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38)
        .map(|f| f as i128)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Writes an enriched copy of the codex template.
#[derive(Debug, Clone)]
pub struct CodexEnricher {
    locator: ContentLocator,
    output: PathBuf,
}

impl CodexEnricher {
    /// Enricher for `root` writing to the configured output path.
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        let root = root.into();
        let output = config.enrich_output(&root);
        Self {
            locator: ContentLocator::new(root),
            output,
        }
    }

    /// Write somewhere other than the configured output.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Run the enrichment.
    ///
    /// Unlike the bundle export, the template is a required input here: its
    /// absence is [`Error::NotFound`] and a non-array document is
    /// [`Error::MalformedInput`].
    pub fn run(&self) -> Result<EnrichReport> {
        let candidates = self.locator.candidates(Asset::CodexTemplate);
        let source = self.locator.locate(Asset::CodexTemplate).ok_or_else(|| {
            let looked: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
            Error::NotFound(format!(
                "codex template not found. Looked in: {}",
                looked.join(", ")
            ))
        })?;

        let text = fs::read_to_string(&source)?;
        let document: Value = serde_json::from_str(&text).map_err(|e| {
            Error::MalformedInput(format!("{} is not valid JSON: {e}", source.display()))
        })?;
        let Value::Array(nodes) = document else {
            return Err(Error::MalformedInput(format!(
                "codex template {} is not a JSON array",
                source.display()
            )));
        };

        let motifs = load_motifs(self.locator.locate(Asset::AudioMap).as_deref());
        debug!(motifs = motifs.len(), "loaded audio map motifs");

        let total = nodes.len();
        let (nodes, enriched) = enrich_nodes(nodes, &motifs);

        if let Some(parent) = self.output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output, serde_json::to_string_pretty(&nodes)?)?;
        info!(output = %self.output.display(), nodes = total, enriched, "enriched codex written");

        Ok(EnrichReport {
            source,
            output: self.output.clone(),
            nodes: total,
            enriched,
        })
    }
}

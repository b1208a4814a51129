//! Fixed assets emitted into every bundle.

use super::manifest::ReferenceManifest;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write as _;

/// Shared stylesheet for the portal and every rendered page.
pub const STYLE_CSS: &str = "body{font-family:system-ui,Arial,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;line-height:1.5;background:#111;color:#eee}a{color:#6cf}code,pre{background:#222;padding:.25rem .5rem;border-radius:4px}pre{overflow:auto}h1,h2,h3{color:#ffd479;font-weight:600}nav ul{list-style:none;padding:0;display:flex;flex-wrap:wrap;gap:.75rem}nav a{text-decoration:none;background:#222;padding:.5rem .75rem;border-radius:4px}nav a:hover{background:#333}";

/// ES module consumed by external sites.
///
/// `loadReference(base)` resolves to `{ manifest, audioMap }`; a failed audio
/// map fetch yields `audioMap: null` instead of rejecting.
pub const LOADER_JS: &str = "// Dynamic loader for the Cathedral reference bundle
export async function loadReference(base = '.') {
  const manifest = await (await fetch(base + '/reference-manifest.json')).json();
  let audioMap = null;
  try { audioMap = await (await fetch(base + '/audio-map.json')).json(); } catch {}
  return { manifest, audioMap };
}
";

/// Landing page cross-linking the index, instruction pages, engines and codex.
pub fn portal_html(title: &str, manifest: &ReferenceManifest) -> String {
    let mut instructions = String::new();
    for entry in &manifest.instructions {
        let _ = write!(
            instructions,
            "<li><a href=\"instructions/{}\">{}</a></li>",
            attr(&entry.html),
            text(&entry.file)
        );
    }

    let mut engines = String::new();
    for entry in &manifest.engines {
        let _ = write!(
            engines,
            "<li><a href=\"engines/{}\">{}</a></li>",
            attr(&entry.name),
            text(&entry.name)
        );
    }

    format!(
        "<!doctype html><meta charset=\"utf-8\"/><title>{title} Portal</title><link rel=\"stylesheet\" href=\"./style.css\"/><body>\
<h1>{title} Portal</h1><p>Generated static bundle for external site embedding.</p>\
<nav><ul><li><a href=\"index.html\">Index</a></li><li><a href=\"instructions/\">Instructions (raw listing)</a></li>\
<li><a href=\"{codex}\">Codex Template</a></li></ul></nav>\
<section><h2>Instruction Pages</h2><ul>{instructions}</ul><h2>Engines</h2><ul>{engines}</ul></section></body>",
        title = text(title),
        codex = attr(manifest.codex_href()),
    )
}

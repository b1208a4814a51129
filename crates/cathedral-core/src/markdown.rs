//! Naive markdown to HTML conversion for reference pages.
//!
//! This is a fixed sequence of regex substitutions, not a parser. It knows
//! about exactly three constructs:
//!
//! 1. fenced code blocks (triple backtick), rendered as `<pre><code>` with `&`
//!    and `<` escaped,
//! 2. `#`, `##` and `###` heading lines,
//! 3. blank-line separated paragraphs.
//!
//! Everything else (lists, links, emphasis) passes through as literal text.
//! Unbalanced fences are not detected; the substitutions are best effort.
//!
//! The rules run in that order and code blocks are shielded while the later
//! rules run, so a `# comment` inside a fence never becomes a heading and blank
//! lines inside a fence are never collapsed.
//!
//! ```rust
//! use cathedral_core::markdown::{render_document, PageShell};
//!
//! let html = render_document("# Title\n\nBody text.", &PageShell::default());
//! assert!(html.contains("<h1>Title</h1>"));
//! assert!(html.starts_with("<!doctype html>"));
//! ```

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Marker byte surrounding shielded code block indices.
const SHIELD: char = '\u{1}';

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static SHIELDED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<pre>\u{1}([0-9]+)\u{1}</pre>").unwrap());

/// SAFETY: Patterns are compile-time constants that are known to be valid.
#[allow(clippy::unwrap_used)]
static HEADING_RES: LazyLock<[(Regex, &'static str); 3]> = LazyLock::new(|| {
    [
        (Regex::new(r"(?mR)^###[^\S\r\n]+(.+)$").unwrap(), "<h3>${1}</h3>"),
        (Regex::new(r"(?mR)^##[^\S\r\n]+(.+)$").unwrap(), "<h2>${1}</h2>"),
        (Regex::new(r"(?mR)^#[^\S\r\n]+(.+)$").unwrap(), "<h1>${1}</h1>"),
    ]
});

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^>])\n\n([^<])").unwrap());

/// Document shell wrapped around every rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageShell<'a> {
    /// Contents of the `<title>` element.
    pub title: &'a str,
    /// `href` of the external stylesheet, relative to the page.
    pub stylesheet: &'a str,
}

impl Default for PageShell<'_> {
    fn default() -> Self {
        Self {
            title: "Cathedral Reference",
            stylesheet: "./style.css",
        }
    }
}

/// Escape the two characters that matter inside `<pre><code>`.
pub fn escape_code(code: &str) -> String {
    code.replace('&', "&amp;").replace('<', "&lt;")
}

/// Render markdown into the HTML body fragment (outer `<p>` included).
pub fn render_body(markdown: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let shielded = FENCE_RE.replace_all(markdown, |caps: &Captures<'_>| {
        let placeholder = format!("<pre>{SHIELD}{}{SHIELD}</pre>", blocks.len());
        blocks.push(format!(
            "<pre><code>{}</code></pre>",
            escape_code(caps[1].trim())
        ));
        placeholder
    });

    let mut html = shielded.into_owned();
    for (re, replacement) in HEADING_RES.iter() {
        html = re.replace_all(&html, *replacement).into_owned();
    }
    html = BLANK_RUN_RE.replace_all(&html, "\n\n").into_owned();
    html = PARAGRAPH_RE
        .replace_all(&html, "${1}</p><p>${2}")
        .into_owned();

    let restored = SHIELDED_RE.replace_all(&html, |caps: &Captures<'_>| {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|idx| blocks.get(idx))
            .map_or_else(|| caps[0].to_string(), Clone::clone)
    });

    format!("<p>{restored}</p>")
}

/// Render markdown into a complete, self-contained HTML document.
pub fn render_document(markdown: &str, shell: &PageShell<'_>) -> String {
    format!(
        "<!doctype html><meta charset=\"utf-8\"/><title>{}</title><link rel=\"stylesheet\" href=\"{}\"/><body>{}</body>",
        html_escape::encode_text(shell.title),
        html_escape::encode_double_quoted_attribute(shell.stylesheet),
        render_body(markdown)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_headings_each_level() {
        let body = render_body("# One\n## Two\n### Three");
        assert!(body.contains("<h1>One</h1>"));
        assert!(body.contains("<h2>Two</h2>"));
        assert!(body.contains("<h3>Three</h3>"));
    }

    #[test]
    fn test_non_heading_hash_lines_stay_literal() {
        let body = render_body("#hashtag\n#### deep\n text # not heading");
        assert!(!body.contains("<h1>"));
        assert!(!body.contains("<h3>"));
        assert!(body.contains("#hashtag"));
        assert!(body.contains("#### deep"));
    }

    #[test]
    fn test_heading_requires_text() {
        let body = render_body("#\n\nplain");
        assert!(!body.contains("<h1>"));
    }

    #[test]
    fn test_heading_does_not_swallow_next_line() {
        let body = render_body("# \nnext line");
        assert!(!body.contains("<h1>"));
        assert!(body.contains("next line"));
    }

    #[test]
    fn test_crlf_heading_excludes_carriage_return() {
        let body = render_body("# Title\r\nbody");
        assert!(body.contains("<h1>Title</h1>"));
    }

    #[test]
    fn test_code_block_escaping_and_trim() {
        let body = render_body("```\n  a < b && c\n```");
        assert!(body.contains("<pre><code>a &lt; b &amp;&amp; c</code></pre>"));
    }

    #[test]
    fn test_code_block_content_is_shielded() {
        let md = "intro\n\n```\n# not a heading\n\n\n\nstill code\n```\n\nafter";
        let body = render_body(md);
        assert!(body.contains("<pre><code># not a heading\n\n\n\nstill code</code></pre>"));
        assert!(!body.contains("<h1>"));
    }

    #[test]
    fn test_paragraph_breaks() {
        let body = render_body("first\n\n\n\nsecond");
        assert_eq!(body, "<p>first</p><p>second</p>");
    }

    #[test]
    fn test_no_break_adjacent_to_block_tags() {
        let body = render_body("# Title\n\nBody text.");
        assert_eq!(body, "<p><h1>Title</h1>\n\nBody text.</p>");
    }

    #[test]
    fn test_plain_text_only() {
        assert_eq!(render_body("just text"), "<p>just text</p>");
        assert_eq!(render_body(""), "<p></p>");
    }

    #[test]
    fn test_unbalanced_fence_passes_through() {
        let body = render_body("```\nopen fence only");
        assert!(!body.contains("<pre>"));
        assert!(body.contains("```"));
    }

    #[test]
    fn test_document_shell() {
        let shell = PageShell {
            title: "Codex & Notes",
            stylesheet: "../style.css",
        };
        let html = render_document("text", &shell);
        assert!(html.starts_with("<!doctype html><meta charset=\"utf-8\"/>"));
        assert!(html.contains("<title>Codex &amp; Notes</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"../style.css\"/>"));
        assert!(html.ends_with("<body><p>text</p></body>"));
    }

    proptest! {
        #[test]
        fn fenced_blocks_render_one_pre_each(
            codes in proptest::collection::vec("[a-z<&# \n]{0,24}", 0..5),
            prose in "[A-Za-z .]{0,16}",
        ) {
            let mut md = String::new();
            for code in &codes {
                md.push_str(&prose);
                md.push_str("\n\n```");
                md.push_str(code);
                md.push_str("```\n\n");
            }
            let body = render_body(&md);
            prop_assert_eq!(body.matches("<pre><code>").count(), codes.len());
            for code in &codes {
                let expected = format!("<pre><code>{}</code></pre>", escape_code(code.trim()));
                prop_assert!(body.contains(&expected));
            }
        }

        #[test]
        fn heading_lines_become_heading_tags(level in 1usize..=3, text in "[A-Za-z][A-Za-z ]{0,20}") {
            let line = format!("{} {}", "#".repeat(level), text);
            let body = render_body(&line);
            let expected = format!("<h{level}>{text}</h{level}>");
            prop_assert!(body.contains(&expected));
        }
    }
}

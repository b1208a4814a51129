//! Chatmode definition linting.
//!
//! Chatmode files (`*.chatmode.md`) describe assistant personas and must carry
//! a handful of sections. A section counts as present when some line has a `#`
//! followed, later on the same line, by the section name (case-insensitive).
//! Files over the size ceiling are flagged as well.
//!
//! Every file is checked before anything is reported; issues accumulate rather
//! than short-circuiting.

use crate::config::LintConfig;
use crate::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Suffix identifying chatmode files.
pub const CHATMODE_SUFFIX: &str = ".chatmode.md";

/// What is wrong with a chatmode file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintIssueKind {
    /// No heading-like line mentions the section.
    MissingSection {
        /// Required section name.
        section: String,
    },
    /// The file exceeds the character ceiling.
    TooLarge {
        /// Length of the file in characters.
        chars: usize,
    },
}

/// One lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    /// Chatmode file name.
    pub file: String,
    /// The finding.
    #[serde(flatten)]
    pub kind: LintIssueKind,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LintIssueKind::MissingSection { section } => {
                write!(f, "{}: missing section containing '{section}'", self.file)
            },
            LintIssueKind::TooLarge { chars } => {
                write!(f, "{}: file too large ({chars} chars)", self.file)
            },
        }
    }
}

/// Result of linting a chatmodes directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    /// Whether the chatmodes directory exists at all.
    pub directory_found: bool,
    /// Number of chatmode files examined.
    pub files_checked: usize,
    /// Findings, in file order then section order.
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    /// No findings.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Checks chatmode files against required sections and a size ceiling.
#[derive(Debug, Clone)]
pub struct ChatmodeLinter {
    sections: Vec<(String, Regex)>,
    max_chars: usize,
}

impl ChatmodeLinter {
    /// Build a linter from configuration.
    pub fn new(config: &LintConfig) -> Result<Self> {
        let sections = config
            .required_sections
            .iter()
            .map(|name| {
                Regex::new(&format!("(?i)#.*{}", regex::escape(name)))
                    .map(|re| (name.clone(), re))
                    .map_err(|e| Error::Config(format!("invalid section name '{name}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            sections,
            max_chars: config.max_chars,
        })
    }

    /// Lint one file's content.
    pub fn lint_content(&self, file: &str, content: &str) -> Vec<LintIssue> {
        let mut issues: Vec<LintIssue> = self
            .sections
            .iter()
            .filter(|(_, re)| !re.is_match(content))
            .map(|(section, _)| LintIssue {
                file: file.to_string(),
                kind: LintIssueKind::MissingSection {
                    section: section.clone(),
                },
            })
            .collect();

        let chars = content.chars().count();
        if chars > self.max_chars {
            issues.push(LintIssue {
                file: file.to_string(),
                kind: LintIssueKind::TooLarge { chars },
            });
        }
        issues
    }

    /// Lint every `*.chatmode.md` file in `dir`, sorted by name.
    ///
    /// A missing directory is reported through
    /// [`LintReport::directory_found`], not as an error.
    pub fn lint_dir(&self, dir: &Path) -> Result<LintReport> {
        if !dir.is_dir() {
            return Ok(LintReport::default());
        }

        let mut names: Vec<String> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(CHATMODE_SUFFIX))
            .collect();
        names.sort();

        let mut report = LintReport {
            directory_found: true,
            ..LintReport::default()
        };
        for name in names {
            let content = fs::read_to_string(dir.join(&name))?;
            let issues = self.lint_content(&name, &content);
            debug!(file = %name, issues = issues.len(), "linted chatmode");
            report.files_checked += 1;
            report.issues.extend(issues);
        }
        Ok(report)
    }
}

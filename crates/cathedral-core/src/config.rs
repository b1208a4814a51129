//! Configuration for the export, lint and enrich passes.
//!
//! Settings come from four layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `cathedral.toml` at the content root (or the file named by
//!    `CATHEDRAL_CONFIG`)
//! 3. Environment variables (`CATHEDRAL_BUNDLE_NAME`, `CATHEDRAL_OUTPUT_DIR`)
//! 4. CLI flags, applied by the caller
//!
//! A missing config file is not an error. A file that exists but cannot be read
//! or parsed is [`Error::Config`].
//!
//! ## Example Configuration File
//!
//! ```toml
//! [export]
//! output_dir = "exports"
//! bundle_name = "cathedral-site"
//!
//! [lint]
//! chatmodes_dir = ".github/chatmodes"
//! max_chars = 12000
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name looked up at the content root.
pub const CONFIG_FILE_NAME: &str = "cathedral.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CATHEDRAL_CONFIG";

/// Environment override for [`ExportConfig::bundle_name`].
pub const BUNDLE_NAME_ENV: &str = "CATHEDRAL_BUNDLE_NAME";

/// Environment override for [`ExportConfig::output_dir`].
pub const OUTPUT_DIR_ENV: &str = "CATHEDRAL_OUTPUT_DIR";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference bundle export settings.
    pub export: ExportConfig,
    /// Chatmode lint settings.
    pub lint: LintConfig,
    /// Codex enrichment settings.
    pub enrich: EnrichConfig,
}

/// Settings for the reference bundle export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory that holds bundles, relative to the content root unless absolute.
    pub output_dir: PathBuf,
    /// Name of the bundle directory under `output_dir`.
    pub bundle_name: String,
    /// Title used in the shell of rendered markdown pages.
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            bundle_name: "cathedral-site".to_string(),
            title: "Cathedral Reference".to_string(),
        }
    }
}

/// Settings for the chatmode linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Directory scanned for `*.chatmode.md` files, relative to the content root.
    pub chatmodes_dir: PathBuf,
    /// Maximum file length in characters.
    pub max_chars: usize,
    /// Section names that must appear in a heading-like line.
    pub required_sections: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            chatmodes_dir: PathBuf::from(".github").join("chatmodes"),
            max_chars: 12_000,
            required_sections: ["Mode", "Source", "Style", "Refusal"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Settings for the codex music enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// Output file, relative to the content root unless absolute.
    pub output: PathBuf,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("data").join("codex.music.enriched.json"),
        }
    }
}

impl Config {
    /// Load configuration for `root` using the process environment.
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_with_env(root, |key| std::env::var(key).ok())
    }

    /// Load configuration for `root`, reading environment values through `env`.
    ///
    /// Split out from [`Config::load`] so callers and tests can supply their own
    /// environment without mutating the process one.
    pub fn load_with_env<F>(root: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = env(CONFIG_ENV).map_or_else(|| root.join(CONFIG_FILE_NAME), PathBuf::from);
        let mut config = if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Some(name) = env(BUNDLE_NAME_ENV).filter(|v| !v.trim().is_empty()) {
            config.export.bundle_name = name;
        }
        if let Some(dir) = env(OUTPUT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.export.output_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid {}: {e}", path.display())))
    }

    /// Reject values that would write outside the output directory or make
    /// every chatmode fail.
    pub fn validate(&self) -> Result<()> {
        let name = &self.export.bundle_name;
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::Config(format!(
                "bundle_name must be a single directory name, got '{name}'"
            )));
        }
        if self.lint.max_chars == 0 {
            return Err(Error::Config("lint.max_chars must be positive".into()));
        }
        Ok(())
    }

    /// Bundle directory resolved against `root`.
    pub fn bundle_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.export.output_dir).join(&self.export.bundle_name)
    }

    /// Chatmodes directory resolved against `root`.
    pub fn chatmodes_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.lint.chatmodes_dir)
    }

    /// Enrichment output file resolved against `root`.
    pub fn enrich_output(&self, root: &Path) -> PathBuf {
        resolve(root, &self.enrich.output)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

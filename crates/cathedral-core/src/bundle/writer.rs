//! Write-then-rename file emission under a bundle directory.

use crate::digest::content_digest;
use crate::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Emits files under one bundle root.
///
/// Every file is written to a `.tmp` sibling and renamed into place, so an
/// interrupted run never leaves a truncated artifact under its final name.
#[derive(Debug, Clone)]
pub struct BundleWriter {
    root: PathBuf,
}

impl BundleWriter {
    /// Create the bundle root (and parents).
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("cannot create bundle directory {}: {e}", root.display()),
            ))
        })?;
        Ok(Self { root })
    }

    /// The bundle root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure a subdirectory exists and return its path.
    pub fn ensure_dir(&self, rel: &str) -> Result<PathBuf> {
        let dir = self.root.join(rel);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Write `bytes` to `rel` and return their digest.
    pub fn write(&self, rel: &str, bytes: &[u8]) -> Result<String> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut tmp: OsString = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);
        fs::write(&tmp_path, bytes)?;

        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        debug!(file = rel, bytes = bytes.len(), "wrote bundle file");
        Ok(content_digest(bytes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents_and_returns_digest() {
        let dir = TempDir::new().unwrap();
        let writer = BundleWriter::create(dir.path().join("exports/site")).unwrap();

        let digest = writer.write("engines/ambient-engine.js", b"export {}").unwrap();

        let written = fs::read(writer.root().join("engines/ambient-engine.js")).unwrap();
        assert_eq!(written, b"export {}");
        assert_eq!(digest, content_digest(b"export {}"));
        assert!(!writer.root().join("engines/ambient-engine.js.tmp").exists());
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let writer = BundleWriter::create(dir.path()).unwrap();
        writer.write("style.css", b"old").unwrap();
        writer.write("style.css", b"new").unwrap();
        assert_eq!(fs::read(dir.path().join("style.css")).unwrap(), b"new");
    }

    #[test]
    fn test_create_fails_when_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("exports");
        fs::write(&blocker, "not a dir").unwrap();
        let err = BundleWriter::create(blocker.join("site")).unwrap_err();
        assert_eq!(err.category(), "io");
    }
}

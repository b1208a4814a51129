//! Error types for cathedral-core operations.
//!
//! Absence of an optional source is never represented here: locators return
//! `Option` and the bundle simply records the gap. The variants below cover the
//! failures that must reach the caller.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: output directories or files cannot be created or written
//! - **Not Found**: a *required* input (such as the template the enricher
//!   reads) does not exist at any candidate location
//! - **Malformed Input**: a required input exists but has the wrong shape
//! - **Configuration Errors**: `cathedral.toml` is unreadable or invalid
//! - **Serialization Errors**: JSON/TOML conversion failed
//!
//! ```rust
//! use cathedral_core::Error;
//!
//! let err = Error::MalformedInput("codex template is not a JSON array".into());
//! assert_eq!(err.category(), "malformed_input");
//! ```

use thiserror::Error;

/// The main error type for cathedral-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Reading an existing source or creating/writing anything under the output
    /// tree. These abort the run.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required input could not be found at any candidate location.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required input exists but is structurally invalid.
    ///
    /// ## Common Causes
    ///
    /// - Codex template is valid JSON but not an array
    /// - Codex template is not valid JSON at all
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Get the error category as a static identifier for structured logs.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::NotFound(_) => "not_found",
            Self::MalformedInput(_) => "malformed_input",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

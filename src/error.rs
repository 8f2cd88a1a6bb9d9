// src/error.rs

//! Error types for the Poppler recipe
//!
//! Configuration errors are raised during option resolution, before any
//! network or filesystem work. Everything else comes from an external step
//! (fetch, extraction, CMake) and is surfaced to the caller unchanged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Contradictory option/platform combination
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("I/O error: {0}")]
    IoError(String),

    /// An external CMake invocation failed
    #[error("Build failed: {0}")]
    BuildError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Whether this error was raised before any side-effecting step
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

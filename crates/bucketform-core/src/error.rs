//! Error types for generation runs.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors that stop a run before any output is produced.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An exclusion pattern is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Phase of per-entry processing in which a warning was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// The walker could not read the entry, or reading file content failed.
    ReadError,
    /// The entry path could not be made relative to the root.
    RelativePath,
    /// Symbolic link could not be resolved.
    BrokenSymlink,
    /// The resolved file could not be opened.
    OpenError,
    /// Metadata of the opened file could not be read.
    MetadataError,
}

impl WarningKind {
    /// Prefix used when the warning is rendered as a diagnostic line.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::ReadError => "Error reading",
            Self::RelativePath => "Failed to make relative",
            Self::BrokenSymlink => "Failed to resolve symlink",
            Self::OpenError => "Error opening",
            Self::MetadataError => "Error reading stats",
        }
    }
}

/// Non-fatal problem with a single entry. The entry is left out of the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Underlying error text.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a read error warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, error.to_string(), WarningKind::ReadError)
    }

    /// Create a broken symlink warning.
    pub fn broken_symlink(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, error.to_string(), WarningKind::BrokenSymlink)
    }

    /// Create an open error warning.
    pub fn open_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, error.to_string(), WarningKind::OpenError)
    }

    /// Create a metadata error warning.
    pub fn metadata_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, error.to_string(), WarningKind::MetadataError)
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.kind.prefix(),
            self.path.display(),
            self.message
        )
    }
}

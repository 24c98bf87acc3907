// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for Journal Keeper

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type JkResult<T> = Result<T, JkError>;

/// Main error type
#[derive(Error, Debug)]
pub enum JkError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Write failed for {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File content is not valid UTF-8: {0}")]
    NotText(String),

    #[error("Journal corrupt at {path}: {message}")]
    JournalCorrupt { path: PathBuf, message: String },

    #[error("Journal persist failed at {path} (namespace change already applied): {source}")]
    JournalPersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    #[error("Backup write failed for {name}: {source}")]
    BackupWriteFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JkError {
    /// Existence or type checks that failed before anything was touched.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            JkError::NotFound(_) | JkError::AlreadyExists(_) | JkError::NotADirectory(_)
        )
    }

    /// The primary mutation happened but was not made durable.
    pub fn is_durability(&self) -> bool {
        matches!(
            self,
            JkError::JournalPersist { .. } | JkError::BackupWriteFailed { .. }
        )
    }

    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JkError::WriteFailed { path: path.into(), source }
    }

    /// A failed lookup of `path`: missing is `NotFound`, anything else stays `Io`.
    pub fn lookup(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            JkError::NotFound(path.to_string())
        } else {
            JkError::Io(source)
        }
    }
}

//! Error types for the tria-model crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or assembling a report.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid metadata for {path}: {reason}")]
    InvalidMeta { path: String, reason: String },

    #[error("Cannot resolve repository path {}: {source}", .path.display())]
    RepoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

use std::path::{Path, PathBuf};
use thiserror::Error;
use tria_model::ModelError;

use crate::config::ConfigError;
use crate::serializers::SerializeError;
use crate::writer::WriteError;

#[derive(Debug, Error)]
pub enum TriaError {
    #[error("Configuration file not found at {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error(transparent)]
    Config(ConfigError),

    #[error("Failed to load inventory {}: {source}", .path.display())]
    InventoryLoad {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("Failed to load git history {}: {source}", .path.display())]
    GitHistoryLoad {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("No files found to process in {}", .path.display())]
    NoFiles { path: PathBuf },

    #[error("Failed to build report: {0}")]
    Report(#[from] ModelError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("Configuration file already exists: {}. Use --force to overwrite.", .path.display())]
    ConfigExists { path: PathBuf },

    #[error("Failed to write configuration file {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for TriaError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::NotFound(path) => TriaError::ConfigNotFound { path },
            other => TriaError::Config(other),
        }
    }
}

impl TriaError {
    pub fn inventory(path: &Path, source: ModelError) -> Self {
        TriaError::InventoryLoad {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn git_history(path: &Path, source: ModelError) -> Self {
        TriaError::GitHistoryLoad {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Get a suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            TriaError::ConfigNotFound { .. } => Some(
                "Run 'tria init' to create a configuration file, or drop --config to use defaults",
            ),
            TriaError::Config(_) => {
                Some("Check tria.yaml. Valid output formats are: toon, md, json, xml")
            }
            TriaError::InventoryLoad { .. } => Some(
                "The inventory must be JSON of the form {\"repo_path\": ..., \"files\": [...]}",
            ),
            TriaError::GitHistoryLoad { .. } => Some(
                "The git history snapshot must be JSON with summary, branches, commits and contributors.\nOmit --git-history to export without history.",
            ),
            TriaError::NoFiles { .. } => {
                Some("Re-run the scanner and check that the repository contains supported files.")
            }
            TriaError::Write(_) => Some("Check that the output directory is writable, or pick another path with --output."),
            TriaError::ConfigExists { .. } => Some("Pass --force to overwrite it, or --output to write elsewhere."),
            TriaError::Report(_) | TriaError::Serialize(_) | TriaError::ConfigWrite { .. } => None,
        }
    }

    /// Format error with suggestion for CLI output
    pub fn format_for_cli(&self) -> String {
        let mut output = format!("Error: {}", self);

        if let Some(suggestion) = self.suggestion() {
            output.push_str(&format!("\n\nSuggestion: {}", suggestion));
        }

        output
    }
}

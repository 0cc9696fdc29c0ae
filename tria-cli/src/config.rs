//! Configuration loading and validation for tria.
//!
//! This module implements the `tria.yaml` configuration schema. The file is
//! optional: `tria export` reads `./tria.yaml` when it exists, or the file
//! named by `--config`, and otherwise runs on defaults.
//!
//! # Configuration File
//!
//! ```yaml
//! output:
//!   format: toon        # toon | md | json | xml
//!   directory: "."      # where <project>_summary.<ext> is written
//! git:
//!   snapshot: git.json  # history snapshot used when --git-history is omitted
//!   commits_limit: 20
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `TRIA_OUTPUT_FORMAT`: Override the export format
//! - `TRIA_OUTPUT_DIRECTORY`: Override the output directory
//! - `TRIA_GIT_SNAPSHOT`: Override the git history snapshot path
//! - `TRIA_GIT_COMMITS_LIMIT`: Override the number of recent commits

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tria_model::DEFAULT_COMMITS_LIMIT;

use crate::serializers::OutputFormat;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tria.yaml";

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read the configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse the YAML configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root configuration structure for `tria.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriaConfig {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Git history settings.
    #[serde(default)]
    pub git: GitConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Export format name.
    #[serde(default = "default_format")]
    pub format: String,

    /// Directory for the default output file.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_directory(),
        }
    }
}

fn default_format() -> String {
    OutputFormat::default().to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

/// Git history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Snapshot used when `--git-history` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,

    /// Number of recent commits to export.
    #[serde(default = "default_commits_limit")]
    pub commits_limit: usize,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            commits_limit: default_commits_limit(),
        }
    }
}

fn default_commits_limit() -> usize {
    DEFAULT_COMMITS_LIMIT
}

impl TriaConfig {
    /// Load the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `./tria.yaml` is used when
    /// present and defaults otherwise. Environment overrides apply either way.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None if Path::new(CONFIG_FILE_NAME).exists() => Self::load_from_path(Path::new(CONFIG_FILE_NAME)),
            None => Self::default().finish(|key| env::var(key).ok()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)?.finish(|key| env::var(key).ok())
    }

    /// Parse configuration text without applying overrides.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides, expand paths and validate.
    fn finish(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        self.apply_env_overrides(lookup);
        self.expand_paths()?;
        self.validate()?;
        Ok(self)
    }

    /// Apply environment variable overrides read through `lookup`.
    ///
    /// Variables follow the pattern: `TRIA_{SECTION}_{KEY}`
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(format) = lookup("TRIA_OUTPUT_FORMAT") {
            self.output.format = format;
        }

        if let Some(directory) = lookup("TRIA_OUTPUT_DIRECTORY") {
            self.output.directory = PathBuf::from(directory);
        }

        if let Some(snapshot) = lookup("TRIA_GIT_SNAPSHOT") {
            self.git.snapshot = Some(PathBuf::from(snapshot));
        }

        if let Some(limit) = lookup("TRIA_GIT_COMMITS_LIMIT") {
            if let Ok(n) = limit.parse() {
                self.git.commits_limit = n;
            }
        }
    }

    /// Expand `~` in paths to the home directory.
    fn expand_paths(&mut self) -> Result<(), ConfigError> {
        self.output.directory = expand_home(&self.output.directory)?;
        if let Some(snapshot) = &self.git.snapshot {
            self.git.snapshot = Some(expand_home(snapshot)?);
        }
        Ok(())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.output
            .format
            .parse::<OutputFormat>()
            .map_err(ConfigError::ValidationError)?;

        if self.output.directory.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.directory must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// The configured export format.
    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        self.output
            .format
            .parse()
            .map_err(ConfigError::ValidationError)
    }
}

fn expand_home(path: &Path) -> Result<PathBuf, ConfigError> {
    let Some(text) = path.to_str() else {
        return Ok(path.to_path_buf());
    };
    if text != "~" && !text.starts_with("~/") {
        return Ok(path.to_path_buf());
    }

    let home = dirs::home_dir()
        .ok_or_else(|| ConfigError::ValidationError("Cannot determine home directory".into()))?;
    Ok(match text.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => home,
    })
}

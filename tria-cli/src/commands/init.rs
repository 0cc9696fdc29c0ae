//! Implementation of the `tria init` command.
//!
//! Writes a commented `tria.yaml` with every setting at its default.
//!
//! # Usage
//!
//! ```bash
//! # Create tria.yaml in current directory
//! tria init
//!
//! # Pre-select the export format
//! tria init --format md
//!
//! # Overwrite existing file
//! tria init --force
//! ```

use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;
use crate::errors::TriaError;
use crate::output;
use crate::serializers::OutputFormat;

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tria.yaml - tria export configuration
# Command-line flags take precedence over this file, and TRIA_* environment
# variables take precedence over both file and defaults.

# ===============================================================================
# OUTPUT
# ===============================================================================

output:
  # Export format: toon | md | json | xml
  format: "{format}"

  # Directory for <project>_summary.<ext> when --output is not given.
  # Supports ~ for home directory
  directory: "."

# ===============================================================================
# GIT HISTORY
# ===============================================================================
# History comes from a snapshot file produced by a git extractor. Without one,
# the export has no git section.

git:
  # Snapshot to use when --git-history is not given
  # snapshot: "git_history.json"

  # Number of recent commits to include
  commits_limit: 20
"#;

/// Options for the `tria init` command.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Output path for the configuration file.
    pub output: Option<PathBuf>,
    /// Export format to pre-fill.
    pub format: Option<OutputFormat>,
    /// Whether to overwrite an existing file.
    pub force: bool,
}

/// Run the `tria init` command.
///
/// Fails if the file already exists and `force` is not set.
pub fn run_init(options: InitOptions) -> Result<PathBuf, TriaError> {
    let path = options
        .output
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if path.exists() && !options.force {
        return Err(TriaError::ConfigExists { path });
    }

    let write_error = |source| TriaError::ConfigWrite {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
    }

    let format = options.format.unwrap_or_default();
    let content = DEFAULT_CONFIG_TEMPLATE.replace("{format}", format.extension());
    std::fs::write(&path, content).map_err(write_error)?;

    output::success(&format!("Created configuration file: {}", path.display()));
    output::info("Next steps:");
    output::info(&format!("  1. Edit {} to adjust the defaults", path.display()));
    output::info("  2. Run: tria export <inventory.json>");

    Ok(path)
}

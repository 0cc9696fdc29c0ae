//! CLI commands for tria.
//!
//! - `tria init` - Write a default `tria.yaml` configuration file
//! - `tria export` - Render a scanned repository to TOON, Markdown, JSON or XML

pub mod export;
pub mod init;

pub use export::{ExportOptions, ExportSummary, default_output_path, run_export};
pub use init::{InitOptions, run_init};

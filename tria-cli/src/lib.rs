//! tria CLI library - report serializers, export writer and commands.
//!
//! Exposed as a library so the commands can be driven from integration tests.
//!
//! # Modules
//!
//! - [`serializers`]: Render a report as TOON, Markdown, JSON or XML
//! - [`writer`]: Atomic export writer
//! - [`config`]: `tria.yaml` loading and environment overrides
//! - [`commands`]: `tria init` and `tria export`

pub mod commands;
pub mod config;
pub mod errors;
pub mod output;
pub mod serializers;
pub mod writer;

pub use config::{ConfigError, GitConfig, OutputConfig, TriaConfig};
pub use errors::TriaError;
pub use serializers::{
    JsonSerializer, MarkdownSerializer, OutputFormat, SerializeError, Serializer, ToonSerializer,
    XmlSerializer,
};
pub use writer::{ExportWriter, WriteError};

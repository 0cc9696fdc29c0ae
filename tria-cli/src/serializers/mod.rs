//! Serializers for rendering a repository report to the export formats.
//!
//! This module provides one serializer per format of `tria export`:
//!
//! - **TOON**: Compact indentation-based notation with tabular arrays
//! - **Markdown**: Human-readable summary with a box-drawing folder tree
//! - **JSON**: Direct structural serialization of the report
//! - **XML**: Element tree isomorphic to the report, pretty-printed
//!
//! Every serializer is a pure function of the [`Report`]: no I/O, no logging.
//! [`Serializer`] is the closed set of them, selected once from an
//! [`OutputFormat`].

pub mod json;
pub mod markdown;
pub mod toon;
pub mod xml;

pub use json::JsonSerializer;
pub use markdown::MarkdownSerializer;
pub use toon::ToonSerializer;
pub use xml::XmlSerializer;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tria_model::Report;

/// Errors raised while rendering a report.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format output: {0}")]
    Format(#[from] fmt::Error),
}

/// Export format selected on the command line or in `tria.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Token-oriented object notation
    #[default]
    Toon,
    /// Markdown summary
    #[value(alias = "markdown")]
    Md,
    /// Pretty-printed JSON
    Json,
    /// Pretty-printed XML
    Xml,
}

impl OutputFormat {
    /// File extension used for the default output path.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Toon => "toon",
            OutputFormat::Md => "md",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "toon" => Ok(OutputFormat::Toon),
            "md" | "markdown" => Ok(OutputFormat::Md),
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            other => Err(format!(
                "Unknown output format '{}'. Valid formats: toon, md, json, xml",
                other
            )),
        }
    }
}

/// The closed set of report serializers.
#[derive(Debug, Clone)]
pub enum Serializer {
    Markdown(MarkdownSerializer),
    Json(JsonSerializer),
    Xml(XmlSerializer),
    Toon(ToonSerializer),
}

impl Serializer {
    /// Create the serializer for `format` with default settings.
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Toon => Serializer::Toon(ToonSerializer::new()),
            OutputFormat::Md => Serializer::Markdown(MarkdownSerializer::new()),
            OutputFormat::Json => Serializer::Json(JsonSerializer::new()),
            OutputFormat::Xml => Serializer::Xml(XmlSerializer::new()),
        }
    }

    pub fn format(&self) -> OutputFormat {
        match self {
            Serializer::Markdown(_) => OutputFormat::Md,
            Serializer::Json(_) => OutputFormat::Json,
            Serializer::Xml(_) => OutputFormat::Xml,
            Serializer::Toon(_) => OutputFormat::Toon,
        }
    }

    /// Render `report` to text.
    pub fn serialize(&self, report: &Report) -> Result<String, SerializeError> {
        match self {
            Serializer::Markdown(s) => Ok(s.serialize_report(report)),
            Serializer::Json(s) => s.serialize_report(report),
            Serializer::Xml(s) => s.serialize_report(report),
            Serializer::Toon(s) => s.serialize_report(report),
        }
    }
}

/// Git dates render the same way in every format: RFC 3339 with the recorded offset.
pub(crate) fn format_git_date(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

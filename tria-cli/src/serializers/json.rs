//! JSON serializer for repository reports.
//!
//! Serializes the report directly with two-space indentation. Non-ASCII text
//! is kept as-is rather than escaped, and key order follows the report.
//!
//! ## Output Schema
//!
//! ```json
//! {
//!   "repo": { "name": "shop", "path": "/work/shop", "generated_at": "2026-10-15T08:30:00Z", "files_processed": 3 },
//!   "structure": [{ "path": "app", "type": "directory", "children": [...] }],
//!   "files": [{ "path": "app/main.py", "language": "python", "size_bytes": 812, "lines": 40, "metadata": {...} }],
//!   "git_history": { "summary": {...}, "branches": [...], "recent_commits": [...], "contributors": [...] }
//! }
//! ```

use tria_model::Report;

use super::SerializeError;

/// JSON serializer for repository reports.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    /// Pretty-print with two-space indentation
    pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonSerializer {
    /// Create a new JsonSerializer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to pretty-print the output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn serialize_report(&self, report: &Report) -> Result<String, SerializeError> {
        let output = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(output)
    }
}

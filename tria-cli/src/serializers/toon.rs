//! TOON serializer for repository reports.
//!
//! TOON (token-oriented object notation) combines YAML-like indentation with
//! CSV-like rows for arrays of uniform records, so a file list costs one header
//! line plus one row per file instead of repeating every key.
//!
//! ## Encoding Rules
//!
//! - **Scalars**: `null` is empty, booleans and numbers print as-is, strings
//!   are quoted (inner `"` doubled) when they contain `,`, `"`, a newline, or
//!   leading/trailing whitespace
//! - **Mappings**: `key: value` per entry; nested mappings open with `key:` and
//!   indent their entries by two spaces
//! - **Arrays**, first matching form wins:
//!   1. empty: `key[0]: `
//!   2. all mappings with the same key set: `key[n]{k1,k2}:` then one row per element
//!   3. all scalars: `key[n]: v1,v2`
//!   4. anything else: `key[n]:` then each element on its own indented block
//!
//! ```text
//! files[2]{path,lines}:
//!   x,5
//!   y,7
//! ```
//!
//! Every nesting level adds two spaces to its parent's column.

use serde_json::{Map, Value};
use tria_model::Report;

use super::SerializeError;

const INDENT: &str = "  ";

/// TOON serializer for repository reports.
#[derive(Debug, Clone, Default)]
pub struct ToonSerializer;

impl ToonSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a report to TOON. Lines are newline-joined with no trailing newline.
    pub fn serialize_report(&self, report: &Report) -> Result<String, SerializeError> {
        let value = serde_json::to_value(report)?;
        Ok(self.serialize_value(&value))
    }

    /// Serialize any JSON-shaped value.
    pub fn serialize_value(&self, value: &Value) -> String {
        format_element(value).join("\n")
    }
}

/// How an array is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayForm {
    Empty,
    Tabular,
    Inline,
    Block,
}

impl ArrayForm {
    /// Pick the layout for `items`.
    pub fn of(items: &[Value]) -> Self {
        let Some(first) = items.first() else {
            return ArrayForm::Empty;
        };

        if let Value::Object(first) = first {
            let uniform = items.iter().all(|item| match item {
                Value::Object(map) => same_keys(first, map),
                _ => false,
            });
            if uniform {
                return ArrayForm::Tabular;
            }
        }

        if items.iter().all(is_scalar) {
            ArrayForm::Inline
        } else {
            ArrayForm::Block
        }
    }
}

/// Render a scalar as a TOON cell.
///
/// Mappings and arrays only reach this inside tabular rows; they are written
/// as compact JSON text and escaped like any other string.
pub fn escape_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => escape_str(s),
        Value::Array(_) | Value::Object(_) => escape_str(&value.to_string()),
    }
}

fn escape_str(s: &str) -> String {
    let needs_quotes = s.contains(',') || s.contains('\n') || s.contains('"') || s != s.trim();
    if needs_quotes {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn same_keys(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len() && a.keys().all(|key| b.contains_key(key))
}

/// Lines for a value standing on its own, starting at column zero.
fn format_element(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => format_mapping(map),
        Value::Array(items) => format_array(items),
        scalar => vec![escape_value(scalar)],
    }
}

fn format_mapping(map: &Map<String, Value>) -> Vec<String> {
    let mut lines = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                let mut array_lines = format_array(items).into_iter();
                if let Some(header) = array_lines.next() {
                    lines.push(format!("{key}{header}"));
                }
                lines.extend(array_lines);
            }
            Value::Object(nested) => {
                lines.push(format!("{key}:"));
                lines.extend(indented(format_mapping(nested)));
            }
            scalar => lines.push(format!("{key}: {}", escape_value(scalar))),
        }
    }
    lines
}

/// Array lines: the header first (to be joined onto its key), then the body.
fn format_array(items: &[Value]) -> Vec<String> {
    match ArrayForm::of(items) {
        ArrayForm::Empty => vec!["[0]: ".to_string()],
        ArrayForm::Tabular => {
            let keys: Vec<&String> = match items.first() {
                Some(Value::Object(first)) => first.keys().collect(),
                _ => Vec::new(),
            };
            let header = keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(",");

            let mut lines = vec![format!("[{}]{{{}}}:", items.len(), header)];
            for item in items {
                let row: Vec<String> = keys
                    .iter()
                    .map(|key| escape_value(item.get(key.as_str()).unwrap_or(&Value::Null)))
                    .collect();
                lines.push(format!("{INDENT}{}", row.join(",")));
            }
            lines
        }
        ArrayForm::Inline => {
            let values: Vec<String> = items.iter().map(escape_value).collect();
            vec![format!("[{}]: {}", items.len(), values.join(","))]
        }
        ArrayForm::Block => {
            let mut lines = vec![format!("[{}]:", items.len())];
            for item in items {
                lines.extend(indented(format_element(item)));
            }
            lines
        }
    }
}

fn indented(lines: Vec<String>) -> impl Iterator<Item = String> {
    lines.into_iter().map(|line| format!("{INDENT}{line}"))
}

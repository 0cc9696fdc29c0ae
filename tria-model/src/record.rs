//! File inventory records handed over by the repository scanner.
//!
//! A [`FileRecord`] is read-only for the duration of an export. Its metadata is
//! a tagged union keyed by language: each recognised language carries exactly
//! the fields the exporters know how to render, and everything else collapses
//! into [`FileMeta::Other`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ModelError;

/// Language classification of a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Markdown,
    License,
    Dockerfile,
    Other,
}

impl Language {
    /// Get the lowercase tag used in every output format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Markdown => "markdown",
            Language::License => "license",
            Language::Dockerfile => "dockerfile",
            Language::Other => "other",
        }
    }

    /// Classify a scanner language tag. Unknown tags map to [`Language::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "python" => Language::Python,
            "markdown" => Language::Markdown,
            "license" => Language::License,
            "dockerfile" => Language::Dockerfile,
            _ => Language::Other,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language-specific metadata.
///
/// Serializes as a flat mapping holding only the keys of its variant, in the
/// order the exporters emit them (`Other` serializes as `{}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileMeta {
    Python {
        functions: Vec<String>,
        classes: Vec<String>,
    },
    Markdown {
        headers: Vec<String>,
    },
    License {
        header: String,
    },
    Dockerfile {
        image: String,
        workdir: String,
        entrypoint: String,
        cmd: String,
        env: IndexMap<String, String>,
    },
    Other {},
}

impl FileMeta {
    /// The language this metadata belongs to.
    pub fn language(&self) -> Language {
        match self {
            FileMeta::Python { .. } => Language::Python,
            FileMeta::Markdown { .. } => Language::Markdown,
            FileMeta::License { .. } => Language::License,
            FileMeta::Dockerfile { .. } => Language::Dockerfile,
            FileMeta::Other {} => Language::Other,
        }
    }

    /// Decode the loosely-typed scanner mapping for `language`.
    ///
    /// Missing and `null` keys take the empty value of their type; unknown keys
    /// are ignored.
    pub fn from_map(language: Language, mut meta: Map<String, Value>) -> Result<Self, serde_json::Error> {
        meta.retain(|_, value| !value.is_null());
        let value = Value::Object(meta);

        let decoded = match language {
            Language::Python => {
                let fields: PythonFields = serde_json::from_value(value)?;
                FileMeta::Python {
                    functions: fields.functions,
                    classes: fields.classes,
                }
            }
            Language::Markdown => {
                let fields: MarkdownFields = serde_json::from_value(value)?;
                FileMeta::Markdown {
                    headers: fields.headers,
                }
            }
            Language::License => {
                let fields: LicenseFields = serde_json::from_value(value)?;
                FileMeta::License {
                    header: fields.header,
                }
            }
            Language::Dockerfile => {
                let fields: DockerfileFields = serde_json::from_value(value)?;
                FileMeta::Dockerfile {
                    image: fields.image,
                    workdir: fields.workdir,
                    entrypoint: fields.entrypoint,
                    cmd: fields.cmd,
                    env: fields.env,
                }
            }
            Language::Other => FileMeta::Other {},
        };

        Ok(decoded)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PythonFields {
    functions: Vec<String>,
    classes: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MarkdownFields {
    headers: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LicenseFields {
    header: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DockerfileFields {
    image: String,
    workdir: String,
    entrypoint: String,
    cmd: String,
    env: IndexMap<String, String>,
}

/// One scanned file: repo-relative path, counts and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFileRecord")]
pub struct FileRecord {
    /// Repo-relative, slash-separated path.
    pub path: String,
    pub size_bytes: u64,
    pub line_count: u64,
    pub meta: FileMeta,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, size_bytes: u64, line_count: u64, meta: FileMeta) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            line_count,
            meta,
        }
    }

    pub fn language(&self) -> Language {
        self.meta.language()
    }
}

/// Scanner wire shape of a [`FileRecord`].
#[derive(Deserialize)]
struct RawFileRecord {
    path: String,
    language: String,
    #[serde(default)]
    size_bytes: u64,
    #[serde(default, alias = "line_count")]
    lines: u64,
    #[serde(default)]
    meta: Map<String, Value>,
}

impl TryFrom<RawFileRecord> for FileRecord {
    type Error = ModelError;

    fn try_from(raw: RawFileRecord) -> Result<Self, Self::Error> {
        let language = Language::from_tag(&raw.language);
        let meta = FileMeta::from_map(language, raw.meta).map_err(|e| ModelError::InvalidMeta {
            path: raw.path.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            path: raw.path,
            size_bytes: raw.size_bytes,
            line_count: raw.lines,
            meta,
        })
    }
}

/// A scanner's output for one repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Inventory {
    /// Repository root the file paths are relative to.
    pub repo_path: PathBuf,

    /// Files in scan order.
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl Inventory {
    /// Parse an inventory from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|e| ModelError::DeserializationError(e.to_string()))
    }

    /// Load an inventory from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| ModelError::DeserializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_language_from_tag() {
        assert_eq!(Language::from_tag("python"), Language::Python);
        assert_eq!(Language::from_tag("dockerfile"), Language::Dockerfile);
        assert_eq!(Language::from_tag("rust"), Language::Other);
        assert_eq!(Language::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_python_meta_defaults_missing_keys() {
        let meta = json!({ "classes": ["Foo"] });
        let decoded = FileMeta::from_map(Language::Python, meta.as_object().unwrap().clone()).unwrap();

        assert_eq!(
            decoded,
            FileMeta::Python {
                functions: vec![],
                classes: vec!["Foo".to_string()],
            }
        );
    }

    #[test]
    fn test_null_meta_value_is_absent() {
        let meta = json!({ "header": null });
        let decoded = FileMeta::from_map(Language::License, meta.as_object().unwrap().clone()).unwrap();
        assert_eq!(decoded, FileMeta::License { header: String::new() });
    }

    #[test]
    fn test_meta_serializes_language_subset_in_order() {
        let meta = FileMeta::Python {
            functions: vec![],
            classes: vec!["Foo".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"functions":[],"classes":["Foo"]}"#
        );
        assert_eq!(serde_json::to_string(&FileMeta::Other {}).unwrap(), "{}");
    }

    #[test]
    fn test_dockerfile_env_keeps_order() {
        let meta = json!({
            "image": "python:3.12",
            "env": { "ZED": "1", "ALPHA": "2" }
        });
        let decoded = FileMeta::from_map(Language::Dockerfile, meta.as_object().unwrap().clone()).unwrap();

        let FileMeta::Dockerfile { image, env, cmd, .. } = decoded else {
            panic!("expected dockerfile metadata");
        };
        assert_eq!(image, "python:3.12");
        assert_eq!(cmd, "");
        assert_eq!(env.keys().collect::<Vec<_>>(), vec!["ZED", "ALPHA"]);
    }

    #[test]
    fn test_file_record_from_scanner_json() {
        let record: FileRecord = serde_json::from_value(json!({
            "path": "docs/README.md",
            "language": "markdown",
            "size_bytes": 120,
            "lines": 9,
            "meta": { "headers": ["Intro", "Usage"], "ignored": true }
        }))
        .unwrap();

        assert_eq!(record.path, "docs/README.md");
        assert_eq!(record.language(), Language::Markdown);
        assert_eq!(record.line_count, 9);
        assert_eq!(
            record.meta,
            FileMeta::Markdown {
                headers: vec!["Intro".to_string(), "Usage".to_string()],
            }
        );
    }

    #[test]
    fn test_unknown_language_drops_meta() {
        let record: FileRecord = serde_json::from_value(json!({
            "path": "src/main.rs",
            "language": "rust",
            "meta": { "functions": ["main"] }
        }))
        .unwrap();

        assert_eq!(record.language(), Language::Other);
        assert_eq!(record.meta, FileMeta::Other {});
    }

    #[test]
    fn test_wrongly_typed_meta_is_rejected() {
        let result: Result<FileRecord, _> = serde_json::from_value(json!({
            "path": "app.py",
            "language": "python",
            "meta": { "classes": "Foo" }
        }));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("app.py"), "unexpected error: {err}");
    }

    #[test]
    fn test_inventory_from_json() {
        let inventory = Inventory::from_json(
            r#"{
                "repo_path": "/tmp/demo",
                "files": [
                    { "path": "LICENSE", "language": "license", "size_bytes": 1067, "lines": 21,
                      "meta": { "header": "MIT License" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(inventory.repo_path, PathBuf::from("/tmp/demo"));
        assert_eq!(inventory.files.len(), 1);
        assert_eq!(inventory.files[0].language(), Language::License);
    }

    #[test]
    fn test_inventory_invalid_json() {
        let result = Inventory::from_json("{ not json");
        assert!(matches!(result, Err(ModelError::DeserializationError(_))));
    }
}

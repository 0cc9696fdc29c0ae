//! The `tria export` command.
//!
//! Loads a scanner inventory (and optionally a git history snapshot), builds
//! the report and writes it in one of the export formats:
//! - TOON: Compact notation, the default
//! - Markdown: Human-readable summary
//! - JSON / XML: Structured formats for tools

use std::path::{Path, PathBuf};
use tracing::{info_span, warn};
use tria_model::{GitHistory, GitSnapshot, Inventory, Report};

use crate::config::TriaConfig;
use crate::errors::TriaError;
use crate::output;
use crate::serializers::{OutputFormat, Serializer};
use crate::writer::ExportWriter;

/// Options for the export command. Unset fields fall back to `tria.yaml`.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Scanner inventory JSON
    pub inventory: PathBuf,
    pub format: Option<OutputFormat>,
    /// Output file (default: `<directory>/<project>_summary.<ext>`)
    pub output: Option<PathBuf>,
    /// Git history snapshot JSON
    pub git_history: Option<PathBuf>,
    pub git_commits: Option<usize>,
    /// Path to the configuration file
    pub config: Option<PathBuf>,
    /// Render without writing
    pub dry_run: bool,
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub files_processed: usize,
    pub bytes: usize,
    pub written: bool,
}

/// Run the export command.
pub fn run_export(options: ExportOptions) -> Result<ExportSummary, TriaError> {
    let config = TriaConfig::load(options.config.as_deref())?;
    let format = match options.format {
        Some(format) => format,
        None => config.output_format()?,
    };
    let commits_limit = options.git_commits.unwrap_or(config.git.commits_limit);

    let inventory = Inventory::load_from_file(&options.inventory)
        .map_err(|e| TriaError::inventory(&options.inventory, e))?;
    if inventory.files.is_empty() {
        return Err(TriaError::NoFiles {
            path: inventory.repo_path,
        });
    }
    output::detail("Inventory", options.inventory.display());
    output::detail("Files", inventory.files.len());

    let snapshot = match options.git_history.as_ref().or(config.git.snapshot.as_ref()) {
        Some(path) => Some(load_snapshot(path)?),
        None => None,
    };

    let mut builder = Report::builder(&inventory.repo_path, &inventory.files).commits_limit(commits_limit);
    if let Some(snapshot) = &snapshot {
        builder = builder.git_history(snapshot);
    }
    let report = builder.build()?;

    let output_path = options
        .output
        .unwrap_or_else(|| default_output_path(&config.output.directory, &report.repo.name, format));
    let serializer = Serializer::for_format(format);

    output::detail("Format", format);
    output::detail("Output", output_path.display());

    if options.dry_run {
        let bytes = serializer.serialize(&report)?.len();
        output::info(&format!(
            "Dry run: would write {} bytes of {} output to {}",
            bytes,
            format,
            output_path.display()
        ));
        return Ok(ExportSummary {
            output_path,
            format,
            files_processed: report.repo.files_processed,
            bytes,
            written: false,
        });
    }

    let span = info_span!("export", repo = %report.repo.name, format = %format);
    let bytes = ExportWriter::new(span).write(&serializer, &report, &output_path)?;
    output::success(&format!(
        "Exported {} files to {}",
        report.repo.files_processed,
        output_path.display()
    ));

    Ok(ExportSummary {
        output_path,
        format,
        files_processed: report.repo.files_processed,
        bytes,
        written: true,
    })
}

fn load_snapshot(path: &Path) -> Result<GitSnapshot, TriaError> {
    let snapshot = GitSnapshot::load_from_file(path).map_err(|e| TriaError::git_history(path, e))?;
    if !snapshot.is_git_repo() {
        warn!(
            path = %path.display(),
            "Git history snapshot has no summary; exporting without git history"
        );
    }
    Ok(snapshot)
}

/// `<directory>/<project>_summary.<ext>`
pub fn default_output_path(directory: &Path, project: &str, format: OutputFormat) -> PathBuf {
    directory.join(format!("{}_summary.{}", project, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    const INVENTORY: &str = r#"{
        "repo_path": "/work/shop",
        "files": [
            { "path": "app/main.py", "language": "python", "size_bytes": 812, "lines": 40,
              "meta": { "functions": ["main"], "classes": [] } },
            { "path": "README.md", "language": "markdown", "size_bytes": 300, "lines": 12,
              "meta": { "headers": ["Shop"] } }
        ]
    }"#;

    const SNAPSHOT: &str = r#"{
        "summary": { "current_branch": "main", "total_commits": 3, "total_contributors": 1 },
        "commits": [
            { "hash": "c3", "author": "Ada", "email": "ada@example.com", "date": "2024-03-03T10:00:00+00:00",
              "message": "Third", "files_changed": 1, "insertions": 1, "deletions": 0 },
            { "hash": "c2", "author": "Ada", "email": "ada@example.com", "date": "2024-03-02T10:00:00+00:00",
              "message": "Second", "files_changed": 1, "insertions": 1, "deletions": 0 },
            { "hash": "c1", "author": "Ada", "email": "ada@example.com", "date": "2024-03-01T10:00:00+00:00",
              "message": "First", "files_changed": 1, "insertions": 1, "deletions": 0 }
        ]
    }"#;

    struct Fixture {
        dir: TempDir,
        inventory: PathBuf,
        config: PathBuf,
    }

    /// An inventory plus an empty config file so the working directory's
    /// `tria.yaml` never leaks into a test.
    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let inventory = dir.path().join("inventory.json");
        std::fs::write(&inventory, INVENTORY).unwrap();
        let config = dir.path().join("tria.yaml");
        std::fs::write(&config, format!("output:\n  directory: \"{}\"\n", dir.path().display())).unwrap();
        Fixture { dir, inventory, config }
    }

    fn options(fixture: &Fixture) -> ExportOptions {
        ExportOptions {
            inventory: fixture.inventory.clone(),
            config: Some(fixture.config.clone()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("out"), "shop", OutputFormat::Md),
            PathBuf::from("out/shop_summary.md")
        );
    }

    #[test]
    fn test_export_to_explicit_path() {
        let fixture = fixture();
        let output_path = fixture.dir.path().join("summary.json");

        let summary = run_export(ExportOptions {
            format: Some(OutputFormat::Json),
            output: Some(output_path.clone()),
            ..options(&fixture)
        })
        .unwrap();

        assert!(summary.written);
        assert_eq!(summary.files_processed, 2);
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(parsed["repo"]["name"], "shop");
        assert_eq!(parsed["files"][1]["metadata"]["headers"][0], "Shop");
    }

    #[test]
    fn test_export_default_path_and_format() {
        let fixture = fixture();

        let summary = run_export(options(&fixture)).unwrap();

        assert_eq!(summary.format, OutputFormat::Toon);
        assert_eq!(summary.output_path, fixture.dir.path().join("shop_summary.toon"));
        let content = std::fs::read_to_string(&summary.output_path).unwrap();
        assert!(content.starts_with("repo:\n  name: shop\n"));
        assert_eq!(summary.bytes, content.len());
    }

    #[test]
    fn test_export_with_git_history_and_limit() {
        let fixture = fixture();
        let snapshot = fixture.dir.path().join("git.json");
        std::fs::write(&snapshot, SNAPSHOT).unwrap();

        let summary = run_export(ExportOptions {
            format: Some(OutputFormat::Json),
            git_history: Some(snapshot),
            git_commits: Some(2),
            ..options(&fixture)
        })
        .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&summary.output_path).unwrap()).unwrap();
        let commits = parsed["git_history"]["recent_commits"].as_array().unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0]["hash"], "c3");
        assert_eq!(parsed["git_history"]["branches"], serde_json::json!([]));
    }

    #[test]
    fn test_snapshot_without_summary_exports_without_git() {
        let fixture = fixture();
        let snapshot = fixture.dir.path().join("git.json");
        std::fs::write(&snapshot, "{}").unwrap();

        let summary = run_export(ExportOptions {
            format: Some(OutputFormat::Md),
            git_history: Some(snapshot),
            ..options(&fixture)
        })
        .unwrap();

        let content = std::fs::read_to_string(&summary.output_path).unwrap();
        assert!(!content.contains("## Git History"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let fixture = fixture();

        let summary = run_export(ExportOptions {
            dry_run: true,
            ..options(&fixture)
        })
        .unwrap();

        assert!(!summary.written);
        assert!(summary.bytes > 0);
        assert!(!summary.output_path.exists());
    }

    #[test]
    fn test_empty_inventory_is_an_error() {
        let fixture = fixture();
        std::fs::write(&fixture.inventory, r#"{ "repo_path": "/work/empty", "files": [] }"#).unwrap();

        let result = run_export(options(&fixture));
        assert!(matches!(result, Err(TriaError::NoFiles { .. })));
    }

    #[test]
    fn test_missing_inventory() {
        let fixture = fixture();

        let result = run_export(ExportOptions {
            inventory: fixture.dir.path().join("missing.json"),
            ..options(&fixture)
        });
        assert!(matches!(result, Err(TriaError::InventoryLoad { .. })));
    }

    #[test]
    fn test_malformed_snapshot() {
        let fixture = fixture();
        let snapshot = fixture.dir.path().join("git.json");
        std::fs::write(&snapshot, "not json").unwrap();

        let result = run_export(ExportOptions {
            git_history: Some(snapshot),
            ..options(&fixture)
        });
        assert!(matches!(result, Err(TriaError::GitHistoryLoad { .. })));
    }

    #[test]
    fn test_config_supplies_format() {
        let fixture = fixture();
        std::fs::write(
            &fixture.config,
            format!("output:\n  format: xml\n  directory: \"{}\"\n", fixture.dir.path().display()),
        )
        .unwrap();

        let summary = run_export(options(&fixture)).unwrap();
        assert_eq!(summary.format, OutputFormat::Xml);
        assert!(summary.output_path.ends_with("shop_summary.xml"));
    }

    #[test]
    fn test_missing_config_file() {
        let fixture = fixture();

        let result = run_export(ExportOptions {
            config: Some(fixture.dir.path().join("nope.yaml")),
            ..options(&fixture)
        });
        assert!(matches!(result, Err(TriaError::ConfigNotFound { .. })));
    }
}

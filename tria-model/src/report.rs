//! The canonical report every exporter renders from.
//!
//! [`ReportBuilder`] merges the folder tree, per-file metadata and optional git
//! history into one [`Report`]. The report is never mutated after assembly.
//!
//! ## Shape
//!
//! ```json
//! {
//!   "repo": { "name": "demo", "path": "/src/demo", "generated_at": "...", "files_processed": 2 },
//!   "structure": [ { "path": "a", "type": "directory", "children": [...] } ],
//!   "files": [ { "path": "a/b.py", "language": "python", "size_bytes": 10, "lines": 1, "metadata": {...} } ],
//!   "git_history": { "summary": {...}, "branches": [...], "recent_commits": [...], "contributors": [...] }
//! }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::ModelError;
use crate::git::{Branch, Commit, Contributor, GitHistory, GitSummary};
use crate::record::{FileMeta, FileRecord, Language};
use crate::tree::{FileTree, StructureNode};

/// Branches kept in the git section.
pub const MAX_BRANCHES: usize = 10;

/// Contributors kept in the git section.
pub const MAX_CONTRIBUTORS: usize = 10;

/// Commits kept when the caller does not choose a limit.
pub const DEFAULT_COMMITS_LIMIT: usize = 20;

/// Canonical output document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub repo: RepoInfo,
    pub structure: Vec<StructureNode>,
    pub files: Vec<FileEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_history: Option<GitHistorySection>,
    #[serde(skip)]
    tree: FileTree,
}

impl Report {
    pub fn builder<'a>(repo_path: impl Into<PathBuf>, files: &'a [FileRecord]) -> ReportBuilder<'a> {
        ReportBuilder::new(repo_path, files)
    }

    /// The folder tree the structure list was projected from.
    pub fn tree(&self) -> &FileTree {
        &self.tree
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoInfo {
    /// Name of the absolute repository directory.
    pub name: String,
    /// Absolute repository path.
    pub path: String,
    /// UTC, RFC 3339, second precision.
    pub generated_at: String,
    pub files_processed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub language: Language,
    pub size_bytes: u64,
    pub lines: u64,
    pub metadata: FileMeta,
}

impl From<&FileRecord> for FileEntry {
    fn from(record: &FileRecord) -> Self {
        Self {
            path: record.path.clone(),
            language: record.language(),
            size_bytes: record.size_bytes,
            lines: record.line_count,
            metadata: record.meta.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GitHistorySection {
    pub summary: GitSummary,
    pub branches: Vec<Branch>,
    pub recent_commits: Vec<Commit>,
    pub contributors: Vec<Contributor>,
}

impl GitHistorySection {
    /// Collect history from `git`, keeping at most [`MAX_BRANCHES`] branches,
    /// [`MAX_CONTRIBUTORS`] contributors and `commits_limit` commits.
    ///
    /// Returns `None` when `git` does not describe a repository.
    pub fn collect(git: &dyn GitHistory, commits_limit: usize) -> Option<Self> {
        if !git.is_git_repo() {
            return None;
        }

        let mut branches = git.branches();
        branches.truncate(MAX_BRANCHES);

        let mut recent_commits = git.commits(commits_limit);
        recent_commits.truncate(commits_limit);

        let mut contributors = git.contributors();
        contributors.truncate(MAX_CONTRIBUTORS);

        Some(Self {
            summary: git.summary(),
            branches,
            recent_commits,
            contributors,
        })
    }
}

/// Assembles a [`Report`].
pub struct ReportBuilder<'a> {
    repo_path: PathBuf,
    files: &'a [FileRecord],
    git: Option<&'a dyn GitHistory>,
    commits_limit: usize,
    generated_at: Option<DateTime<Utc>>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(repo_path: impl Into<PathBuf>, files: &'a [FileRecord]) -> Self {
        Self {
            repo_path: repo_path.into(),
            files,
            git: None,
            commits_limit: DEFAULT_COMMITS_LIMIT,
            generated_at: None,
        }
    }

    /// Include history from `git` when it describes a repository.
    pub fn git_history(mut self, git: &'a dyn GitHistory) -> Self {
        self.git = Some(git);
        self
    }

    pub fn commits_limit(mut self, limit: usize) -> Self {
        self.commits_limit = limit;
        self
    }

    /// Stamp the report with a fixed time instead of the current one.
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn build(self) -> Result<Report, ModelError> {
        let absolute = absolute_path(&self.repo_path)?;
        let name = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| absolute.display().to_string());

        let generated_at = self
            .generated_at
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let tree = FileTree::build(self.files);

        Ok(Report {
            repo: RepoInfo {
                name,
                path: absolute.display().to_string(),
                generated_at,
                files_processed: self.files.len(),
            },
            structure: tree.to_structure(),
            files: self.files.iter().map(FileEntry::from).collect(),
            git_history: self
                .git
                .and_then(|git| GitHistorySection::collect(git, self.commits_limit)),
            tree,
        })
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf, ModelError> {
    std::path::absolute(path).map_err(|source| ModelError::RepoPath {
        path: path.to_path_buf(),
        source,
    })
}

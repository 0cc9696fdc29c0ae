//! Git history records and the collaborator that supplies them.
//!
//! Extracting history from a repository happens elsewhere; the exporters only
//! consume what a [`GitHistory`] implementation reports. [`GitSnapshot`] is the
//! implementation backed by a pre-extracted JSON document.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ModelError;

/// Repository-wide history summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSummary {
    pub current_branch: String,
    pub total_commits: u64,
    pub total_contributors: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_commit_date: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit_date: Option<DateTime<FixedOffset>>,
}

/// A local branch and its tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub is_current: bool,
    /// Abbreviated hash of the tip commit.
    pub last_commit: String,
    pub last_commit_date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub email: String,
    pub date: DateTime<FixedOffset>,
    pub message: String,
    pub files_changed: u64,
    pub insertions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub email: String,
    pub commits: u64,
    pub insertions: u64,
    pub deletions: u64,
}

/// Source of git history for one repository.
///
/// When `is_git_repo` is false no git section is exported and the other
/// methods are never called.
pub trait GitHistory {
    fn is_git_repo(&self) -> bool;

    fn summary(&self) -> GitSummary;

    /// Branches, current branch first by convention of the extractor.
    fn branches(&self) -> Vec<Branch>;

    /// The most recent commits, newest first, at most `limit` of them.
    fn commits(&self, limit: usize) -> Vec<Commit>;

    /// Contributors ordered by the extractor's ranking.
    fn contributors(&self) -> Vec<Contributor>;
}

/// History captured ahead of time and stored as JSON.
///
/// A snapshot without a `summary` describes a directory that is not under
/// version control.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<GitSummary>,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
}

impl GitSnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|e| ModelError::DeserializationError(e.to_string()))
    }

    /// Load a snapshot from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| ModelError::DeserializationError(e.to_string()))
    }
}

impl GitHistory for GitSnapshot {
    fn is_git_repo(&self) -> bool {
        self.summary.is_some()
    }

    fn summary(&self) -> GitSummary {
        self.summary.clone().unwrap_or_default()
    }

    fn branches(&self) -> Vec<Branch> {
        self.branches.clone()
    }

    fn commits(&self, limit: usize) -> Vec<Commit> {
        self.commits.iter().take(limit).cloned().collect()
    }

    fn contributors(&self) -> Vec<Contributor> {
        self.contributors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SNAPSHOT: &str = r#"{
        "summary": {
            "current_branch": "main",
            "total_commits": 3,
            "total_contributors": 1,
            "first_commit_date": "2024-01-10T09:00:00+00:00"
        },
        "branches": [
            { "name": "main", "is_current": true, "last_commit": "abc1234",
              "last_commit_date": "2024-01-15T10:30:00+02:00" }
        ],
        "commits": [
            { "hash": "abc1234", "author": "Ada", "email": "ada@example.com",
              "date": "2024-01-15T10:30:00+02:00", "message": "Add parser",
              "files_changed": 2, "insertions": 40, "deletions": 3 },
            { "hash": "def5678", "author": "Ada", "email": "ada@example.com",
              "date": "2024-01-12T08:00:00+02:00", "message": "Initial commit",
              "files_changed": 5, "insertions": 120, "deletions": 0 }
        ],
        "contributors": [
            { "name": "Ada", "email": "ada@example.com", "commits": 3,
              "insertions": 160, "deletions": 3 }
        ]
    }"#;

    #[test]
    fn test_snapshot_parses() {
        let snapshot = GitSnapshot::from_json(SNAPSHOT).unwrap();

        assert!(snapshot.is_git_repo());
        let summary = snapshot.summary();
        assert_eq!(summary.current_branch, "main");
        assert_eq!(summary.total_commits, 3);
        assert!(summary.first_commit_date.is_some());
        assert!(summary.last_commit_date.is_none());
        assert_eq!(snapshot.branches()[0].last_commit, "abc1234");
        assert_eq!(snapshot.contributors()[0].insertions, 160);
    }

    #[test]
    fn test_commits_respect_limit() {
        let snapshot = GitSnapshot::from_json(SNAPSHOT).unwrap();

        assert_eq!(snapshot.commits(1).len(), 1);
        assert_eq!(snapshot.commits(1)[0].hash, "abc1234");
        assert_eq!(snapshot.commits(10).len(), 2);
        assert!(snapshot.commits(0).is_empty());
    }

    #[test]
    fn test_snapshot_without_summary_is_not_a_repo() {
        let snapshot = GitSnapshot::from_json("{}").unwrap();
        assert!(!snapshot.is_git_repo());
        assert_eq!(snapshot.summary(), GitSummary::default());
    }

    #[test]
    fn test_dates_keep_offset() {
        let snapshot = GitSnapshot::from_json(SNAPSHOT).unwrap();
        let json = serde_json::to_value(&snapshot.branches()[0]).unwrap();
        assert_eq!(json["last_commit_date"], "2024-01-15T10:30:00+02:00");
    }
}

//! Markdown serializer for repository reports.
//!
//! Produces a human-readable summary. Unlike the structured formats it trims
//! the git data: commit emails are dropped and change counts are only shown
//! for commits that touched files.
//!
//! ## Output Format
//!
//! ````markdown
//! # Repo Summary: shop
//!
//! **Generated:** 2026-10-15T08:30:00Z
//! **Files processed:** 2
//!
//! ## Folder Structure
//!
//! ```
//! ├── app
//! │   └── main.py
//! └── README.md
//! ```
//!
//! ## Files
//!
//! ### app/main.py
//! *Language:* python
//! *Size:* 812 bytes, 40 lines
//! *Classes:* App
//! ````

use tria_model::{FileEntry, FileMeta, GitHistorySection, Report};

/// Markdown serializer for repository reports.
#[derive(Debug, Clone, Default)]
pub struct MarkdownSerializer;

impl MarkdownSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a report to Markdown. The result ends with a newline.
    pub fn serialize_report(&self, report: &Report) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# Repo Summary: {}\n", report.repo.name));
        lines.push(format!("**Generated:** {}  ", report.repo.generated_at));
        lines.push(format!("**Files processed:** {}\n", report.repo.files_processed));

        if let Some(git) = &report.git_history {
            self.write_git_history(&mut lines, git);
        }

        lines.push("## Folder Structure\n".to_string());
        lines.push("```".to_string());
        lines.extend(report.tree().to_text());
        lines.push("```\n".to_string());

        lines.push("## Files\n".to_string());
        for file in &report.files {
            self.write_file(&mut lines, file);
        }

        lines.join("\n")
    }

    fn write_git_history(&self, lines: &mut Vec<String>, git: &GitHistorySection) {
        lines.push("## Git History\n".to_string());

        let summary = &git.summary;
        let branch = if summary.current_branch.is_empty() {
            "N/A"
        } else {
            summary.current_branch.as_str()
        };
        lines.push(format!("**Current Branch:** {}  ", branch));
        lines.push(format!("**Total Commits:** {}  ", summary.total_commits));
        lines.push(format!("**Contributors:** {}  ", summary.total_contributors));
        if let Some(first) = &summary.first_commit_date {
            lines.push(format!("**First Commit:** {}  ", super::format_git_date(first)));
        }
        if let Some(last) = &summary.last_commit_date {
            lines.push(format!("**Last Commit:** {}  ", super::format_git_date(last)));
        }
        lines.push(String::new());

        if !git.branches.is_empty() {
            lines.push("### Branches\n".to_string());
            for branch in &git.branches {
                let marker = if branch.is_current { "* " } else { "- " };
                lines.push(format!(
                    "{}**{}** (Last: {}, {})",
                    marker,
                    branch.name,
                    branch.last_commit,
                    branch.last_commit_date.format("%Y-%m-%d")
                ));
            }
            lines.push(String::new());
        }

        if !git.recent_commits.is_empty() {
            lines.push("### Recent Commits\n".to_string());
            for commit in &git.recent_commits {
                lines.push(format!("- **{}** - {}", commit.hash, commit.message));
                lines.push(format!(
                    "  *{}* on {}",
                    commit.author,
                    commit.date.format("%Y-%m-%d %H:%M")
                ));
                if commit.files_changed > 0 {
                    lines.push(format!(
                        "  {} files: +{}/-{}",
                        commit.files_changed, commit.insertions, commit.deletions
                    ));
                }
            }
            lines.push(String::new());
        }

        if !git.contributors.is_empty() {
            lines.push("### Contributors\n".to_string());
            for contributor in &git.contributors {
                lines.push(format!("- **{}** ({})", contributor.name, contributor.email));
                lines.push(format!(
                    "  {} commits, +{}/-{}",
                    contributor.commits, contributor.insertions, contributor.deletions
                ));
            }
            lines.push(String::new());
        }
    }

    fn write_file(&self, lines: &mut Vec<String>, file: &FileEntry) {
        lines.push(format!("### {}", file.path));
        lines.push(format!("*Language:* {}  ", file.language));
        lines.push(format!("*Size:* {} bytes, {} lines  ", file.size_bytes, file.lines));

        match &file.metadata {
            FileMeta::Python { functions, classes } => {
                push_list(lines, "Classes", classes);
                push_list(lines, "Functions", functions);
            }
            FileMeta::Markdown { headers } => {
                push_list(lines, "Headers", headers);
            }
            FileMeta::License { header } => {
                push_text(lines, "Header", header);
            }
            FileMeta::Dockerfile {
                image,
                workdir,
                entrypoint,
                cmd,
                env,
            } => {
                push_text(lines, "Image", image);
                push_text(lines, "Workdir", workdir);
                push_text(lines, "Entrypoint", entrypoint);
                push_text(lines, "CMD", cmd);
                if !env.is_empty() {
                    let pairs: Vec<String> = env.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                    push_text(lines, "ENV", &pairs.join(", "));
                }
            }
            FileMeta::Other {} => {}
        }

        lines.push(String::new());
    }
}

fn push_list(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if !items.is_empty() {
        lines.push(format!("*{}:* {}  ", label, items.join(", ")));
    }
}

fn push_text(lines: &mut Vec<String>, label: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("*{}:* {}  ", label, value));
    }
}

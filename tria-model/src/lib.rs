//! # tria-model
//!
//! Repository inventory model for tria.
//!
//! This crate holds everything the exporters share:
//!
//! - **Records**: [`FileRecord`] with its language-keyed [`FileMeta`], and the
//!   scanner [`Inventory`] they arrive in
//! - **Git history**: summary, branch, commit and contributor records behind the
//!   [`GitHistory`] collaborator trait
//! - **Folder tree**: [`FileTree`] with its box-drawing and structure-list projections
//! - **Report**: the canonical [`Report`] every output format renders from
//!
//! ## Example
//!
//! ```rust
//! use tria_model::{FileMeta, FileRecord, Report};
//!
//! let files = vec![FileRecord::new(
//!     "a/b.py",
//!     42,
//!     3,
//!     FileMeta::Python { functions: vec![], classes: vec!["Foo".to_string()] },
//! )];
//!
//! let report = Report::builder("/work/demo", &files).build().unwrap();
//!
//! assert_eq!(report.repo.name, "demo");
//! assert_eq!(report.structure[0].path, "a");
//! assert_eq!(report.tree().to_text(), vec!["└── a", "    └── b.py"]);
//! ```

pub mod error;
pub mod git;
pub mod record;
pub mod report;
pub mod tree;

pub use error::ModelError;
pub use git::{Branch, Commit, Contributor, GitHistory, GitSnapshot, GitSummary};
pub use record::{FileMeta, FileRecord, Inventory, Language};
pub use report::{
    DEFAULT_COMMITS_LIMIT, FileEntry, GitHistorySection, MAX_BRANCHES, MAX_CONTRIBUTORS, RepoInfo,
    Report, ReportBuilder,
};
pub use tree::{FileTree, NodeKind, StructureNode, TreeNode};

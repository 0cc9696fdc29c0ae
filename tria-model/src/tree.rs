//! Folder tree built from scanned file paths, and its two projections.
//!
//! The tree keeps insertion order everywhere: files and directories appear in
//! the order the scanner reported them, never sorted. Both projections walk
//! the tree depth-first in that order.
//!
//! ```text
//! src/app.py, src/util/io.py, README.md
//!
//! ├── src
//! │   ├── app.py
//! │   └── util
//! │       └── io.py
//! └── README.md
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::FileRecord;

/// A node of the folder tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File,
    Directory(IndexMap<String, TreeNode>),
}

/// The folder tree of a repository: top-level entries keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    root: IndexMap<String, TreeNode>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tree for a list of scanned files.
    pub fn build(records: &[FileRecord]) -> Self {
        Self::from_paths(records.iter().map(|record| record.path.as_str()))
    }

    /// Build the tree for slash-separated paths.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tree = Self::new();
        for path in paths {
            tree.insert(path);
        }
        tree
    }

    /// Add one file path, creating missing directories.
    ///
    /// Conflicts resolve last-write-wins: the file replaces whatever held its
    /// name, and a file standing where a directory is needed becomes an empty
    /// directory first. Replaced entries keep their position.
    pub fn insert(&mut self, path: &str) {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();
        insert_segments(&mut self.root, &segments);
    }

    /// Top-level entries in insertion order.
    pub fn entries(&self) -> &IndexMap<String, TreeNode> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Box-drawing rendering, one line per entry.
    pub fn to_text(&self) -> Vec<String> {
        let mut lines = Vec::new();
        push_text_lines(&self.root, "", &mut lines);
        lines
    }

    /// Flat node-list projection with accumulated `/`-joined paths.
    pub fn to_structure(&self) -> Vec<StructureNode> {
        collect_structure(&self.root, "")
    }
}

fn insert_segments(children: &mut IndexMap<String, TreeNode>, segments: &[&str]) {
    match segments {
        [] => {}
        [leaf] => {
            children.insert((*leaf).to_string(), TreeNode::File);
        }
        [dir, rest @ ..] => {
            let node = children
                .entry((*dir).to_string())
                .or_insert_with(|| TreeNode::Directory(IndexMap::new()));

            if let TreeNode::Directory(grandchildren) = &mut *node {
                insert_segments(grandchildren, rest);
                return;
            }

            let mut grandchildren = IndexMap::new();
            insert_segments(&mut grandchildren, rest);
            *node = TreeNode::Directory(grandchildren);
        }
    }
}

fn push_text_lines(children: &IndexMap<String, TreeNode>, prefix: &str, lines: &mut Vec<String>) {
    let count = children.len();
    for (index, (name, node)) in children.iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!("{prefix}{connector}{name}"));

        if let TreeNode::Directory(grandchildren) = node {
            let extension = if is_last { "    " } else { "│   " };
            push_text_lines(grandchildren, &format!("{prefix}{extension}"), lines);
        }
    }
}

fn collect_structure(children: &IndexMap<String, TreeNode>, base: &str) -> Vec<StructureNode> {
    children
        .iter()
        .map(|(name, node)| {
            let path = if base.is_empty() {
                name.clone()
            } else {
                format!("{base}/{name}")
            };

            match node {
                TreeNode::File => StructureNode::file(path),
                TreeNode::Directory(grandchildren) => {
                    let nested = collect_structure(grandchildren, &path);
                    StructureNode::directory(path, nested)
                }
            }
        })
        .collect()
}

/// Whether a structure entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
        }
    }
}

/// One entry of the structure list. Only directories carry `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureNode {
    pub path: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<StructureNode>>,
}

impl StructureNode {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::File,
            children: None,
        }
    }

    pub fn directory(path: impl Into<String>, children: Vec<StructureNode>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Directory,
            children: Some(children),
        }
    }

    /// Paths of every file at or below this node, depth-first.
    pub fn file_paths(&self) -> Vec<&str> {
        match (&self.kind, &self.children) {
            (NodeKind::File, _) => vec![self.path.as_str()],
            (NodeKind::Directory, Some(children)) => {
                children.iter().flat_map(StructureNode::file_paths).collect()
            }
            (NodeKind::Directory, None) => Vec::new(),
        }
    }
}

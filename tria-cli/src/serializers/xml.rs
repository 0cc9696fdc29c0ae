//! XML serializer for repository reports.
//!
//! Builds an element tree mirroring the report and pretty-prints it with
//! two-space indentation. There is no XML declaration: the output starts at
//! `<repository>`.
//!
//! ## Output Format
//!
//! ```xml
//! <repository>
//!   <info>
//!     <name>shop</name>
//!     ...
//!   </info>
//!   <git_history>...</git_history>
//!   <structure>
//!     <directory path="app">
//!       <file path="app/main.py"/>
//!     </directory>
//!   </structure>
//!   <files>
//!     <file>
//!       <path>app/main.py</path>
//!       ...
//!       <metadata>
//!         <functions>
//!           <function>main</function>
//!         </functions>
//!         <classes/>
//!       </metadata>
//!     </file>
//!   </files>
//! </repository>
//! ```

use std::fmt::Write;
use tria_model::{FileEntry, FileMeta, GitHistorySection, NodeKind, Report, StructureNode};

use super::{SerializeError, format_git_date};

/// XML serializer for repository reports.
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    /// Spaces per nesting level
    indent: usize,
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl XmlSerializer {
    /// Create a new XmlSerializer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of spaces per nesting level.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn serialize_report(&self, report: &Report) -> Result<String, SerializeError> {
        let root = build_repository(report);
        let mut output = String::new();
        self.write_element(&mut output, &root, 0)?;
        Ok(output)
    }

    fn write_element(&self, out: &mut String, element: &Element, depth: usize) -> Result<(), SerializeError> {
        let pad = " ".repeat(self.indent * depth);
        write!(out, "{}<{}", pad, element.name)?;
        for (name, value) in &element.attributes {
            write!(out, " {}=\"{}\"", name, escape(value))?;
        }

        if element.children.is_empty() {
            if element.text.is_empty() {
                writeln!(out, "/>")?;
            } else {
                writeln!(out, ">{}</{}>", escape(&element.text), element.name)?;
            }
            return Ok(());
        }

        writeln!(out, ">")?;
        for child in &element.children {
            self.write_element(out, child, depth + 1)?;
        }
        writeln!(out, "{}</{}>", pad, element.name)?;
        Ok(())
    }
}

/// A node of the output tree. Elements hold either text or children.
#[derive(Debug)]
struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn text(name: &'static str, text: impl ToString) -> Self {
        let mut element = Self::new(name);
        element.text = text.to_string();
        element
    }

    fn attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}

fn build_repository(report: &Report) -> Element {
    let info = Element::new("info")
        .child(Element::text("name", &report.repo.name))
        .child(Element::text("path", &report.repo.path))
        .child(Element::text("generated_at", &report.repo.generated_at))
        .child(Element::text("files_processed", report.repo.files_processed));

    let mut root = Element::new("repository").child(info);
    if let Some(git) = &report.git_history {
        root = root.child(build_git_history(git));
    }

    root.child(Element::new("structure").children(report.structure.iter().map(build_structure_node)))
        .child(Element::new("files").children(report.files.iter().map(build_file)))
}

fn build_git_history(git: &GitHistorySection) -> Element {
    let summary = &git.summary;
    let mut summary_element = Element::new("summary")
        .child(Element::text("current_branch", &summary.current_branch))
        .child(Element::text("total_commits", summary.total_commits))
        .child(Element::text("total_contributors", summary.total_contributors));
    if let Some(first) = &summary.first_commit_date {
        summary_element = summary_element.child(Element::text("first_commit_date", format_git_date(first)));
    }
    if let Some(last) = &summary.last_commit_date {
        summary_element = summary_element.child(Element::text("last_commit_date", format_git_date(last)));
    }

    let branches = git.branches.iter().map(|branch| {
        Element::new("branch")
            .attribute("current", branch.is_current.to_string())
            .child(Element::text("name", &branch.name))
            .child(Element::text("last_commit", &branch.last_commit))
            .child(Element::text("last_commit_date", format_git_date(&branch.last_commit_date)))
    });

    let commits = git.recent_commits.iter().map(|commit| {
        Element::new("commit")
            .child(Element::text("hash", &commit.hash))
            .child(Element::text("author", &commit.author))
            .child(Element::text("email", &commit.email))
            .child(Element::text("date", format_git_date(&commit.date)))
            .child(Element::text("message", &commit.message))
            .child(Element::text("files_changed", commit.files_changed))
            .child(Element::text("insertions", commit.insertions))
            .child(Element::text("deletions", commit.deletions))
    });

    let contributors = git.contributors.iter().map(|contributor| {
        Element::new("contributor")
            .child(Element::text("name", &contributor.name))
            .child(Element::text("email", &contributor.email))
            .child(Element::text("commits", contributor.commits))
            .child(Element::text("insertions", contributor.insertions))
            .child(Element::text("deletions", contributor.deletions))
    });

    Element::new("git_history")
        .child(summary_element)
        .child(Element::new("branches").children(branches))
        .child(Element::new("recent_commits").children(commits))
        .child(Element::new("contributors").children(contributors))
}

fn build_structure_node(node: &StructureNode) -> Element {
    match node.kind {
        NodeKind::File => Element::new(node.kind.as_str()).attribute("path", node.path.as_str()),
        NodeKind::Directory => Element::new(node.kind.as_str())
            .attribute("path", node.path.as_str())
            .children(node.children.iter().flatten().map(build_structure_node)),
    }
}

fn build_file(file: &FileEntry) -> Element {
    Element::new("file")
        .child(Element::text("path", &file.path))
        .child(Element::text("language", file.language))
        .child(Element::text("size_bytes", file.size_bytes))
        .child(Element::text("lines", file.lines))
        .child(build_metadata(&file.metadata))
}

fn build_metadata(meta: &FileMeta) -> Element {
    let metadata = Element::new("metadata");
    match meta {
        FileMeta::Python { functions, classes } => metadata
            .child(list("functions", "function", functions))
            .child(list("classes", "class", classes)),
        FileMeta::Markdown { headers } => metadata.child(list("headers", "header", headers)),
        FileMeta::License { header } => metadata.child(Element::text("header", header)),
        FileMeta::Dockerfile {
            image,
            workdir,
            entrypoint,
            cmd,
            env,
        } => metadata
            .child(Element::text("image", image))
            .child(Element::text("workdir", workdir))
            .child(Element::text("entrypoint", entrypoint))
            .child(Element::text("cmd", cmd))
            .child(Element::new("env").children(
                env.iter()
                    .map(|(key, value)| Element::text("variable", value).attribute("name", key.as_str())),
            )),
        FileMeta::Other {} => metadata,
    }
}

fn list(wrapper: &'static str, item: &'static str, values: &[String]) -> Element {
    Element::new(wrapper).children(values.iter().map(|value| Element::text(item, value)))
}

/// Escape text and attribute values.
///
/// Characters XML 1.0 cannot carry at all (C0 controls other than tab, LF and
/// CR, and U+FFFE/U+FFFF) become U+FFFD.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c if !is_xml_char(c) => escaped.push(char::REPLACEMENT_CHARACTER),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializers::fixtures;
    use pretty_assertions::assert_eq;
    use tria_model::{FileRecord, GitSnapshot};

    #[test]
    fn test_full_document_without_git() {
        let files = vec![FileRecord::new(
            "a/b.py",
            10,
            1,
            FileMeta::Python {
                functions: vec![],
                classes: vec!["Foo".to_string()],
            },
        )];
        let report = Report::builder("/work/demo", &files)
            .generated_at(fixtures::generated_at())
            .build()
            .unwrap();
        let output = XmlSerializer::new().serialize_report(&report).unwrap();

        let expected = r#"<repository>
  <info>
    <name>demo</name>
    <path>/work/demo</path>
    <generated_at>2026-10-15T08:30:00Z</generated_at>
    <files_processed>1</files_processed>
  </info>
  <structure>
    <directory path="a">
      <file path="a/b.py"/>
    </directory>
  </structure>
  <files>
    <file>
      <path>a/b.py</path>
      <language>python</language>
      <size_bytes>10</size_bytes>
      <lines>1</lines>
      <metadata>
        <functions/>
        <classes>
          <class>Foo</class>
        </classes>
      </metadata>
    </file>
  </files>
</repository>
"#;
        assert_eq!(output, expected);
    }

    #[test]
    fn test_git_history_precedes_structure() {
        let output = XmlSerializer::new()
            .serialize_report(&fixtures::sample_report_with_git())
            .unwrap();

        let info = output.find("</info>").unwrap();
        let git = output.find("<git_history>").unwrap();
        let structure = output.find("<structure>").unwrap();
        assert!(info < git && git < structure);

        assert!(output.contains(
            "      <branch current=\"true\">\n        <name>main</name>\n        <last_commit>a1b2c3d</last_commit>\n        <last_commit_date>2024-03-01T12:05:00+01:00</last_commit_date>\n      </branch>"
        ));
        assert!(output.contains("<email>ada@example.com</email>"));
        assert!(output.contains("<first_commit_date>2024-01-02T09:00:00Z</first_commit_date>"));
    }

    #[test]
    fn test_empty_git_lists_render_empty_elements() {
        let snapshot = GitSnapshot {
            summary: Some(Default::default()),
            ..Default::default()
        };
        let files = fixtures::sample_files();
        let report = Report::builder("/work/shop", &files)
            .git_history(&snapshot)
            .build()
            .unwrap();
        let output = XmlSerializer::new().serialize_report(&report).unwrap();

        assert!(output.contains("    <branches/>\n    <recent_commits/>\n    <contributors/>\n"));
        assert!(output.contains("<current_branch/>"));
        assert!(!output.contains("first_commit_date"));
    }

    #[test]
    fn test_dockerfile_metadata() {
        let output = XmlSerializer::new()
            .serialize_report(&fixtures::sample_report())
            .unwrap();

        let expected = "\
        <image>python:3.12-slim</image>
        <workdir>/app</workdir>
        <entrypoint/>
        <cmd>python app/main.py</cmd>
        <env>
          <variable name=\"PORT\">8080</variable>
          <variable name=\"MODE\">prod</variable>
        </env>
";
        assert!(output.contains(expected), "unexpected output:\n{output}");
    }

    #[test]
    fn test_escapes_markup() {
        let files = vec![FileRecord::new(
            "a&b/<x>.md",
            1,
            1,
            FileMeta::Markdown {
                headers: vec!["Say \"hi\" & <wave>".to_string()],
            },
        )];
        let report = Report::builder("/work/demo", &files).build().unwrap();
        let output = XmlSerializer::new().serialize_report(&report).unwrap();

        assert!(output.contains("<directory path=\"a&amp;b\">"));
        assert!(output.contains("<file path=\"a&amp;b/&lt;x&gt;.md\"/>"));
        assert!(output.contains("<header>Say &quot;hi&quot; &amp; &lt;wave&gt;</header>"));
    }

    #[test]
    fn test_replaces_characters_xml_cannot_carry() {
        let files = vec![FileRecord::new(
            "docs/bell\u{1}.md",
            1,
            1,
            FileMeta::Markdown {
                headers: vec!["Bell\u{7}Form\u{c}".to_string(), "Tab\there\u{FFFF}".to_string()],
            },
        )];
        let report = Report::builder("/work/demo", &files).build().unwrap();
        let output = XmlSerializer::new().serialize_report(&report).unwrap();

        assert!(output.contains("<header>Bell\u{FFFD}Form\u{FFFD}</header>"));
        assert!(output.contains("<header>Tab\there\u{FFFD}</header>"));
        assert!(output.contains("<file path=\"docs/bell\u{FFFD}.md\"/>"));
        assert!(
            !output.chars().any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r')),
            "control characters leaked: {output:?}"
        );
    }

    #[test]
    fn test_structure_paths_are_attributes() {
        let output = XmlSerializer::new()
            .serialize_report(&fixtures::sample_report())
            .unwrap();
        let start = output.find("<structure>").unwrap();
        let end = output.find("</structure>").unwrap();

        for line in output[start..end].lines().skip(1) {
            let line = line.trim();
            if line.is_empty() || line.starts_with("</") {
                continue;
            }
            assert!(line.contains(" path=\""), "missing path attribute: {line}");
            assert!(!line.contains("path=\"\""), "empty path attribute: {line}");
        }
    }

    #[test]
    fn test_output_starts_at_root_element() {
        let output = XmlSerializer::new()
            .with_indent(4)
            .serialize_report(&fixtures::sample_report())
            .unwrap();

        assert!(output.starts_with("<repository>\n    <info>\n"));
        assert!(output.ends_with("</repository>\n"));
    }
}

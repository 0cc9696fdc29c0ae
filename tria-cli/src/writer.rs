//! Export writer: renders a report and writes it to disk in one step.
//!
//! The payload goes to a temporary file beside the destination which is then
//! renamed over it, so a failed export never leaves a half-written file that
//! looks like a finished one.

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{Span, debug, info};
use tria_model::Report;

use crate::serializers::{SerializeError, Serializer};

/// Errors raised by [`ExportWriter::write`].
#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes rendered reports, logging into the span it was created with.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    span: Span,
}

impl ExportWriter {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Render `report` with `serializer` and write it to `output_path`.
    ///
    /// Missing parent directories are created. Returns the number of bytes written.
    pub fn write(&self, serializer: &Serializer, report: &Report, output_path: &Path) -> Result<usize, WriteError> {
        let _entered = self.span.enter();

        debug!(tree = ?report.tree(), "Project structure");
        let rendered = serializer.serialize(report)?;

        write_atomic(output_path, rendered.as_bytes())?;

        info!(
            format = %serializer.format(),
            path = %output_path.display(),
            bytes = rendered.len(),
            "Wrote {} output to {}",
            serializer.format(),
            output_path.display()
        );
        Ok(rendered.len())
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), WriteError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| WriteError::io(path, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| WriteError::io(path, e))?;
    tmp.write_all(data).map_err(|e| WriteError::io(path, e))?;
    tmp.flush().map_err(|e| WriteError::io(path, e))?;
    tmp.persist(path).map_err(|e| WriteError::io(path, e.error))?;
    Ok(())
}

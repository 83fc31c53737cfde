//! Export and clipboard collaborators.
//!
//! The session hands these the finished artifacts: a [`Pagination`] plus a
//! filename for export, the raw assembled text for the clipboard. What they
//! produce from it is theirs to decide.

use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use kontrak_layout::{PageLayout, Pagination, Placement};
use serde::Serialize;
use tracing::info;

use crate::error::DraftError;

/// `kontrak_<unix millis>.pdf`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("kontrak_{}.pdf", now.timestamp_millis())
}

/// Receives a paginated document for rendering
pub trait Exporter {
    /// Produce the artifact; returns where it was written
    fn export(
        &self,
        filename: &str,
        layout: &PageLayout,
        pagination: &Pagination,
    ) -> Result<PathBuf, DraftError>;
}

/// Receives the raw assembled document text
pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<(), DraftError>;
}

/// Layout manifest written by [`LayoutFileExporter`]
#[derive(Debug, Serialize)]
pub struct LayoutManifest<'a> {
    pub filename: &'a str,
    pub page_count: usize,
    pub layout: &'a PageLayout,
    pub placements: &'a [Placement],
}

/// Writes the page layout as JSON next to where the PDF would go
///
/// A PDF renderer draws each placement as-is; the manifest keeps this crate
/// free of a PDF backend.
pub struct LayoutFileExporter {
    dir: PathBuf,
}

impl LayoutFileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Manifest path for an export filename (`kontrak_1.pdf` -> `kontrak_1.layout.json`)
    pub fn manifest_path(&self, filename: &str) -> PathBuf {
        let stem = filename.strip_suffix(".pdf").unwrap_or(filename);
        self.dir.join(format!("{stem}.layout.json"))
    }
}

impl Exporter for LayoutFileExporter {
    fn export(
        &self,
        filename: &str,
        layout: &PageLayout,
        pagination: &Pagination,
    ) -> Result<PathBuf, DraftError> {
        let manifest = LayoutManifest {
            filename,
            page_count: pagination.page_count,
            layout,
            placements: &pagination.placements,
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| DraftError::Export {
            filename: filename.to_string(),
            reason: format!("cannot create {:?}: {}", self.dir, e),
        })?;
        let path = self.manifest_path(filename);
        std::fs::write(&path, serde_json::to_vec_pretty(&manifest)?)?;

        info!(
            pages = pagination.page_count,
            "Exported layout to {:?}", path
        );
        Ok(path)
    }
}

/// Clipboard stand-in for terminals: prints the text to stdout
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn copy(&self, text: &str) -> Result<(), DraftError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

//! The finished, immutable document produced by a build.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::PageGeometry;
use crate::error::ReportError;

use super::canvas::{DrawOp, Page, SectionMark};
use super::pdf;

/// Recovered, non-fatal problems encountered while building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The verification code image could not be generated and was omitted.
    AssetGenerationFailure,
    /// An enumerated level was not recognized and drawn in the neutral color.
    MalformedEnum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Binary export in the shape download/share sinks expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlob {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub(crate) report_id: String,
    pub(crate) title: String,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) geometry: PageGeometry,
    pub(crate) pages: Vec<Page>,
    pub(crate) sections: Vec<SectionMark>,
    pub(crate) verification_payload: Option<String>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl ReportDocument {
    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn sections(&self) -> &[SectionMark] {
        &self.sections
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// JSON encoded in the verification code, when the document carries one.
    pub fn verification_payload(&self) -> Option<&str> {
        self.verification_payload.as_deref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Every text run in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(DrawOp::as_text)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Embedded verification images with the payload each one encodes.
    pub fn code_images(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter(|op| matches!(op, DrawOp::CodeImage { .. }))
    }

    /// `MyMedi-AI-Report-<report id>.pdf`
    pub fn suggested_filename(&self) -> String {
        format!("MyMedi-AI-Report-{}.pdf", self.report_id)
    }

    /// Renders the document to PDF bytes. Safe to call repeatedly.
    pub fn serialize(&self) -> Result<Vec<u8>, ReportError> {
        pdf::render_pdf(self)
    }

    /// Same bytes as [`serialize`](Self::serialize), packaged with a MIME type
    /// and filename. An empty `filename` falls back to the suggested one.
    pub fn export_blob(&self, filename: &str) -> Result<ReportBlob, ReportError> {
        let filename = if filename.trim().is_empty() {
            self.suggested_filename()
        } else {
            pdf::pdf_filename(filename)
        };
        Ok(ReportBlob {
            bytes: self.serialize()?,
            mime_type: pdf::PDF_MIME_TYPE,
            filename,
        })
    }

    /// Writes the PDF into `dir` under a sanitized `filename`.
    pub fn save_to(&self, dir: &Path, filename: &str) -> Result<PathBuf, ReportError> {
        let blob = self.export_blob(filename)?;
        pdf::export_pdf_to_file(&blob.bytes, &blob.filename, dir)
    }
}

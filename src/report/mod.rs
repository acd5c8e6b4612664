//! PDF report generation.
//!
//! [`ReportDocumentBuilder`] turns a [`PatientRecord`] and an [`AiReport`]
//! into a paginated [`ReportDocument`]:
//!
//! 1. Header and patient banner (always a fresh page)
//! 2. Executive summary
//! 3. Symptom analysis
//! 4. Risk assessment
//! 5. Medication recommendations
//! 6. Lifestyle modifications
//! 7. Follow-up plan
//! 8. Emergency protocols
//! 9. Disclaimer, verification code and report metadata
//!
//! Building is pure: no network or disk I/O. Serialization to PDF bytes and
//! file export happen on the finished document.

pub mod canvas;
pub mod document;
pub mod palette;
pub mod pdf;
pub(crate) mod sections;
pub mod verification;

pub use document::{Diagnostic, DiagnosticKind, ReportBlob, ReportDocument};
pub use pdf::{export_pdf_to_file, pdf_safe_text, sanitize_filename, PDF_MIME_TYPE};
pub use sections::SECTION_ORDER;
pub use verification::{CodeImage, CodeImageGenerator, QrCodeGenerator, VerificationPayload};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::models::{AiReport, PatientRecord};

use sections::{
    diagnosis, emergency, follow_up, footer, header, lifestyle, medication, risk, summary,
    ReportWriter,
};

/// `AI-RPT-<unix millis>-<6 hex chars>`
pub fn generate_report_id(at: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(6).collect();
    format!("AI-RPT-{}-{}", at.timestamp_millis(), suffix)
}

/// One-shot builder for a single report. `build` consumes it.
pub struct ReportDocumentBuilder {
    config: ReportConfig,
    report_id: String,
    generated_at: DateTime<Utc>,
    generator: Box<dyn CodeImageGenerator>,
}

impl ReportDocumentBuilder {
    /// Fixes the report id and timestamp from the current clock.
    pub fn new() -> Self {
        let generated_at = Utc::now();
        Self {
            config: ReportConfig::default(),
            report_id: generate_report_id(generated_at),
            generated_at,
            generator: Box::new(QrCodeGenerator::new()),
        }
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_generator(mut self, generator: impl CodeImageGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    /// Pins the generation time; the report id is derived from it again.
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self.report_id = generate_report_id(at);
        self
    }

    pub fn with_report_id(mut self, report_id: impl Into<String>) -> Self {
        self.report_id = report_id.into();
        self
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Lays out every section in order. Fails only when the patient name or
    /// the executive summary is missing; everything else degrades to empty
    /// content, neutral colors or an omitted code image.
    pub fn build(
        self,
        patient: &PatientRecord,
        report: &AiReport,
        insights: Option<&str>,
    ) -> Result<ReportDocument, ReportError> {
        let patient_name = patient.name().ok_or(ReportError::MissingRequiredField {
            field: "patient.personal.name",
        })?;
        let executive = report
            .executive_summary
            .as_ref()
            .ok_or(ReportError::MissingRequiredField {
                field: "report.executiveSummary",
            })?;

        tracing::info!(report_id = %self.report_id, "building report");

        let payload =
            VerificationPayload::new(&self.report_id, patient_name, self.generated_at, &self.config)
                .to_json();

        let mut w = ReportWriter::new(&self.config);
        header::render(&mut w, patient, &self.report_id, self.generated_at);
        summary::render(&mut w, executive, insights);
        diagnosis::render(&mut w, &report.symptom_analysis);
        risk::render(&mut w, &report.risk_assessment);
        medication::render(&mut w, &report.medication_recommendations);
        lifestyle::render(&mut w, &report.lifestyle_modifications);
        follow_up::render(&mut w, &report.follow_up_plan);
        emergency::render(&mut w, &report.emergency_protocols);
        footer::render(
            &mut w,
            &self.report_id,
            self.generated_at,
            &payload,
            self.generator.as_ref(),
        );

        let ReportWriter {
            canvas,
            diagnostics,
            ..
        } = w;
        let (geometry, pages, sections) = canvas.into_parts();

        tracing::info!(
            report_id = %self.report_id,
            pages = pages.len(),
            diagnostics = diagnostics.len(),
            "report built"
        );

        Ok(ReportDocument {
            title: format!("{} Medical Report {}", self.config.brand_name, self.report_id),
            report_id: self.report_id,
            generated_at: self.generated_at,
            geometry,
            pages,
            sections,
            verification_payload: Some(payload),
            diagnostics,
        })
    }
}

impl Default for ReportDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use sections::fixtures::{sample_patient, sample_report};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 20, 9, 30, 0).unwrap()
    }

    #[test]
    fn report_id_format() {
        let id = generate_report_id(at());
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts[0], "AI");
        assert_eq!(parts[1], "RPT");
        assert_eq!(parts[2], at().timestamp_millis().to_string());
        assert_eq!(parts[3].len(), 6);
        assert!(parts[3].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_are_unique_per_builder() {
        assert_ne!(
            ReportDocumentBuilder::new().report_id(),
            ReportDocumentBuilder::new().report_id()
        );
    }

    #[test]
    fn builds_every_section_in_order() {
        let doc = ReportDocumentBuilder::new()
            .with_timestamp(at())
            .build(&sample_patient(), &sample_report(), Some("extra"))
            .unwrap();
        assert_eq!(doc.section_titles(), SECTION_ORDER.to_vec());
        assert!(doc.page_count() >= 2);
        assert!(doc.diagnostics().is_empty());
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut patient = sample_patient();
        patient.personal.name = Some("   ".into());
        let err = ReportDocumentBuilder::new()
            .build(&patient, &sample_report(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingRequiredField { field: "patient.personal.name" }
        ));
    }

    #[test]
    fn missing_summary_is_rejected() {
        let mut report = sample_report();
        report.executive_summary = None;
        let err = ReportDocumentBuilder::new()
            .build(&sample_patient(), &report, None)
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingRequiredField { field: "report.executiveSummary" }
        ));
    }

    #[test]
    fn payload_names_patient_and_report() {
        let builder = ReportDocumentBuilder::new()
            .with_timestamp(at())
            .with_report_id("AI-RPT-1-abcdef");
        let doc = builder
            .build(&sample_patient(), &sample_report(), None)
            .unwrap();
        let payload = VerificationPayload::parse(doc.verification_payload().unwrap()).unwrap();
        assert_eq!(payload.report_id, "AI-RPT-1-abcdef");
        assert_eq!(payload.patient, "Asha Rao");
        assert_eq!(payload.date, "2026-02-20T09:30:00.000Z");
        assert_eq!(payload.url, "https://mymedi.ai/report/AI-RPT-1-abcdef");
    }

    #[test]
    fn custom_config_reaches_the_document() {
        let config = ReportConfig {
            base_url: "https://verify.example.org".into(),
            model_label: "Local Model".into(),
            ..Default::default()
        };
        let doc = ReportDocumentBuilder::new()
            .with_config(config)
            .build(&sample_patient(), &sample_report(), None)
            .unwrap();
        assert!(doc.contains_text("AI Model: Local Model"));
        assert!(doc
            .verification_payload()
            .unwrap()
            .contains("https://verify.example.org/report/"));
    }

    #[test]
    fn serialized_document_is_a_pdf() {
        let doc = ReportDocumentBuilder::new()
            .build(&sample_patient(), &sample_report(), None)
            .unwrap();
        let bytes = doc.serialize().unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let blob = doc.export_blob("").unwrap();
        assert_eq!(blob.mime_type, "application/pdf");
        assert_eq!(blob.filename, doc.suggested_filename());
    }

    #[test]
    fn save_to_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = ReportDocumentBuilder::new()
            .build(&sample_patient(), &sample_report(), None)
            .unwrap();
        let path = doc.save_to(tmp.path(), "asha report").unwrap();
        assert!(path.ends_with("asha_report.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}

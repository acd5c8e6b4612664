//! Verification payload and the code-image generator seam.
//!
//! The payload is a small JSON object a third party can scan to confirm a
//! report's identifier and origin. Image generation may fail (payload too
//! large for any QR version); callers recover and omit the image.

use chrono::{DateTime, SecondsFormat, Utc};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::error::AssetError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub report_id: String,
    pub patient: String,
    /// RFC 3339, UTC.
    pub date: String,
    pub ai_analysis: String,
    pub url: String,
}

impl VerificationPayload {
    pub fn new(
        report_id: &str,
        patient: &str,
        generated_at: DateTime<Utc>,
        config: &ReportConfig,
    ) -> Self {
        Self {
            report_id: report_id.to_string(),
            patient: patient.to_string(),
            date: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ai_analysis: config.analysis_label.clone(),
            url: config.verification_url(report_id),
        }
    }

    /// Compact JSON. Keys come out sorted, so equal payloads encode identically.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "reportId": self.report_id,
            "patient": self.patient,
            "date": self.date,
            "aiAnalysis": self.ai_analysis,
            "url": self.url,
        })
        .to_string()
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Square monochrome raster, row-major, `true` = dark module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeImage {
    pub width: usize,
    #[serde(skip)]
    pub modules: Vec<bool>,
}

impl CodeImage {
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    /// Horizontal runs of dark modules per row as `(row, start, len)`.
    pub fn dark_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for y in 0..self.width {
            let mut x = 0;
            while x < self.width {
                if self.is_dark(x, y) {
                    let start = x;
                    while x < self.width && self.is_dark(x, y) {
                        x += 1;
                    }
                    runs.push((y, start, x - start));
                } else {
                    x += 1;
                }
            }
        }
        runs
    }
}

/// Renders a string payload into a scannable square image.
pub trait CodeImageGenerator: Send + Sync {
    fn generate(&self, payload: &str) -> Result<CodeImage, AssetError>;
}

/// QR code generator backed by the `qrcode` crate.
#[derive(Debug, Clone)]
pub struct QrCodeGenerator {
    ec_level: EcLevel,
    quiet_zone: usize,
}

impl QrCodeGenerator {
    pub fn new() -> Self {
        Self {
            ec_level: EcLevel::M,
            quiet_zone: 1,
        }
    }

    pub fn with_quiet_zone(mut self, modules: usize) -> Self {
        self.quiet_zone = modules;
        self
    }
}

impl Default for QrCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeImageGenerator for QrCodeGenerator {
    fn generate(&self, payload: &str) -> Result<CodeImage, AssetError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ec_level)
            .map_err(|e| match e {
                QrError::DataTooLong => AssetError::PayloadTooLarge(payload.len()),
                other => AssetError::Generation(other.to_string()),
            })?;

        let inner = code.width();
        let colors = code.to_colors();
        let width = inner + 2 * self.quiet_zone;
        let mut modules = vec![false; width * width];
        for y in 0..inner {
            for x in 0..inner {
                if colors[y * inner + x] == qrcode::Color::Dark {
                    modules[(y + self.quiet_zone) * width + x + self.quiet_zone] = true;
                }
            }
        }

        Ok(CodeImage { width, modules })
    }
}

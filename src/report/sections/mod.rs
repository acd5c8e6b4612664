//! Section renderers. Each one draws through the shared [`ReportWriter`] and
//! leaves the cursor below everything it drew.

pub(crate) mod diagnosis;
pub(crate) mod emergency;
pub(crate) mod follow_up;
pub(crate) mod footer;
pub(crate) mod header;
pub(crate) mod lifestyle;
pub(crate) mod medication;
pub(crate) mod risk;
pub(crate) mod summary;

use crate::config::ReportConfig;

use super::canvas::{chars_per_line, Block, BlockLine, Canvas, DrawOp, FontStyle, TextStyle};
use super::document::{Diagnostic, DiagnosticKind};
use super::palette::{Rgb, BLACK, BRAND_BLUE, MUTED, WHITE};

pub const PATIENT_INFORMATION: &str = "PATIENT INFORMATION";
pub const EXECUTIVE_SUMMARY: &str = "EXECUTIVE SUMMARY";
pub const SYMPTOM_ANALYSIS: &str = "SYMPTOM ANALYSIS";
pub const RISK_ASSESSMENT: &str = "RISK ASSESSMENT";
pub const MEDICATION_RECOMMENDATIONS: &str = "AI MEDICATION RECOMMENDATIONS";
pub const LIFESTYLE_MODIFICATIONS: &str = "LIFESTYLE MODIFICATIONS";
pub const FOLLOW_UP_PLAN: &str = "FOLLOW-UP PLAN";
pub const EMERGENCY_PROTOCOLS: &str = "EMERGENCY PROTOCOLS";
pub const MEDICAL_DISCLAIMER: &str = "MEDICAL DISCLAIMER";

/// Section marks of a full report, in drawing order.
pub const SECTION_ORDER: [&str; 9] = [
    PATIENT_INFORMATION,
    EXECUTIVE_SUMMARY,
    SYMPTOM_ANALYSIS,
    RISK_ASSESSMENT,
    MEDICATION_RECOMMENDATIONS,
    LIFESTYLE_MODIFICATIONS,
    FOLLOW_UP_PLAN,
    EMERGENCY_PROTOCOLS,
    MEDICAL_DISCLAIMER,
];

/// Space a section header claims before it may start on the current page.
const HEADER_RESERVE: f32 = 40.0;
const HEADER_BAND: f32 = 22.0;
const HEADER_ADVANCE: f32 = 30.0;

/// Mutable per-document drawing context shared by the section renderers.
pub(crate) struct ReportWriter<'a> {
    pub canvas: Canvas,
    pub config: &'a ReportConfig,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> ReportWriter<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            canvas: Canvas::new(config.page),
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Blue title band across the content width. Returns the band's top y.
    pub fn section_header(&mut self, title: &str, subtitle: Option<&str>) -> f32 {
        self.canvas.ensure_space(HEADER_RESERVE);
        self.canvas.mark_section(title);

        let top = self.canvas.cursor();
        let x = self.canvas.left();
        self.canvas.push(DrawOp::Rect {
            x: x - 5.0,
            y: top,
            width: self.canvas.content_width() + 10.0,
            height: HEADER_BAND,
            fill: Some(BRAND_BLUE),
            stroke: None,
        });
        self.canvas.push(DrawOp::text(
            x,
            top + 9.0,
            TextStyle::bold(16.0).with_color(WHITE),
            title,
        ));
        if let Some(subtitle) = subtitle {
            self.canvas.push(DrawOp::text(
                x,
                top + 17.0,
                TextStyle::body().with_color(WHITE),
                subtitle,
            ));
        }
        self.canvas.advance(HEADER_ADVANCE);
        top
    }

    /// Badge inside the right end of a section header band.
    pub fn header_badge(&mut self, band_top: f32, label: &str, fill: Rgb) {
        let width = 62.0;
        let x = self.canvas.right() - width;
        self.badge(x, band_top + 5.0, width, 12.0, label, fill);
    }

    /// Filled label box. Does not move the cursor.
    pub fn badge(&mut self, x: f32, y: f32, width: f32, height: f32, label: &str, fill: Rgb) {
        let style = TextStyle::bold(8.0).with_color(WHITE);
        let text_width = label.chars().count() as f32 * style.size_mm() * 0.55;
        let text_x = x + ((width - text_width) / 2.0).max(1.0);
        let baseline = y + height / 2.0 + style.size_mm() * 0.35;
        self.canvas.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
        });
        self.canvas.push(DrawOp::text(text_x, baseline, style, label));
    }

    pub fn subheading(&mut self, text: &str) {
        let style = TextStyle::bold(12.0);
        // Keep the heading with at least one body line.
        self.canvas
            .ensure_space(style.line_height + TextStyle::body().line_height + 2.0);
        let x = self.canvas.left();
        self.canvas.text_line(x, text, style);
        self.canvas.advance(2.0);
    }

    pub fn bullets(&mut self, items: &[String]) {
        let x = self.canvas.left() + 5.0;
        let width = self.canvas.content_width() - 5.0;
        self.canvas.bullet_list(x, width, items, TextStyle::body());
    }

    pub fn numbered(&mut self, items: &[String]) {
        let x = self.canvas.left() + 5.0;
        let width = self.canvas.content_width() - 5.0;
        self.canvas.numbered_list(x, width, items, TextStyle::body());
    }

    /// Wrapped body text at `indent` from the left margin.
    pub fn paragraph(&mut self, indent: f32, text: &str, style: TextStyle) {
        let x = self.canvas.left() + indent;
        let width = self.canvas.content_width() - indent;
        self.canvas.paragraph(x, width, text, style);
    }

    pub fn empty_note(&mut self, text: &str) {
        let style = TextStyle::body()
            .with_font(FontStyle::Italic)
            .with_color(MUTED);
        self.paragraph(5.0, text, style);
    }

    /// Highlighted box with a bold title and a bulleted list.
    pub fn alert_box(&mut self, title: &str, title_color: Rgb, fill: Rgb, lead: Option<&str>, items: &[String]) {
        let mut block = Block::panel(fill).line(BlockLine::new(
            title,
            TextStyle::bold(12.0).with_color(title_color),
        ));
        if let Some(lead) = lead {
            block.push(BlockLine::new(lead, TextStyle::body()));
        }
        for item in items {
            block.push(BlockLine::bullet(item.as_str(), TextStyle::body().with_color(BLACK)));
        }
        self.full_width_block(&block);
        self.canvas.advance(5.0);
    }

    pub fn full_width_block(&mut self, block: &Block) {
        let x = self.canvas.left();
        let width = self.canvas.content_width();
        self.canvas.block(x, width, block);
    }

    /// Records an enumerated value that fell back to the neutral color.
    pub fn note_unrecognized(&mut self, field: &str, raw: &str) {
        tracing::warn!(field, value = raw, "unrecognized level, using neutral color");
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::MalformedEnum,
            message: format!("{field}: unrecognized value {raw:?}"),
        });
    }

    pub fn end_section(&mut self) {
        self.canvas.advance(5.0);
        self.canvas.separator();
    }
}

/// `text`, or a placeholder when it is blank.
pub(crate) fn or_unspecified(text: &str) -> &str {
    if text.trim().is_empty() {
        "Not specified"
    } else {
        text
    }
}

/// Cuts `text` to what fits in `width_mm` at `size_pt`, marking the cut.
pub(crate) fn fit_line(text: &str, width_mm: f32, size_pt: f32) -> String {
    let max = chars_per_line(width_mm, size_pt);
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::*;

    pub fn sample_patient() -> PatientRecord {
        serde_json::from_value(serde_json::json!({
            "personalInfo": {
                "name": "Asha Rao",
                "age": 42,
                "gender": "Female",
                "weight": 64.5,
                "height": 160
            },
            "symptoms": {
                "primary": "Persistent headache",
                "secondary": ["Fatigue", "Light sensitivity"],
                "duration": "2 weeks",
                "severity": 6,
                "onset": "gradual"
            },
            "medicalHistory": {
                "conditions": ["Hypertension"],
                "medications": ["Amlodipine"],
                "allergies": [],
                "familyHistory": ["Migraine"]
            },
            "lifestyle": {
                "exercise": "light",
                "diet": "vegetarian",
                "sleep": "6 hours",
                "stress": 7
            }
        }))
        .unwrap()
    }

    pub fn sample_report() -> AiReport {
        serde_json::from_value(serde_json::json!({
            "executiveSummary": {
                "content": "Symptoms are consistent with tension-type headache aggravated by elevated blood pressure and poor sleep.",
                "confidenceScore": 82,
                "keyFindings": ["Headache pattern suggests tension type", "Blood pressure needs review"]
            },
            "symptomAnalysis": {
                "primaryDiagnosis": {
                    "condition": "Tension-type headache",
                    "confidence": 78,
                    "reasoning": "Bilateral pressing pain without aura, worse with stress."
                },
                "differentialDiagnosis": [
                    {"condition": "Migraine without aura", "confidence": 45, "reasoning": "Family history and photophobia."},
                    {"condition": "Hypertensive headache", "confidence": 30, "reasoning": "Known hypertension."}
                ],
                "riskFactors": ["Hypertension", "High stress", "Short sleep"]
            },
            "riskAssessment": {
                "overallRisk": "Moderate",
                "riskScore": 48,
                "specificRisks": [
                    {"category": "Cardiovascular", "level": "Moderate", "description": "Blood pressure control should be reviewed."},
                    {"category": "Neurological", "level": "Low", "description": "No focal deficits reported."}
                ]
            },
            "medicationRecommendations": {
                "primaryMedications": [{
                    "medication": "Paracetamol 500mg",
                    "indianBrands": ["Crocin", "Dolo"],
                    "dosage": "1 tablet every 6 hours as needed",
                    "duration": "Up to 3 days",
                    "cost": "\u{20B9}20-30",
                    "reasoning": "First-line analgesic with a good safety profile."
                }],
                "alternatives": [{"medication": "Ibuprofen 400mg", "reason": "If paracetamol is ineffective"}],
                "interactions": ["Avoid combining NSAIDs with antihypertensives without advice"],
                "contraindications": ["Severe liver disease"]
            },
            "lifestyleModifications": {
                "diet": {
                    "recommendations": ["Reduce salt intake"],
                    "indianFoods": ["Dal", "Curd rice", "Seasonal fruit"],
                    "restrictions": ["Limit pickles and papad"]
                },
                "exercise": {"recommendations": ["30 minutes brisk walking daily"]},
                "lifestyle": {"recommendations": ["Keep a regular sleep schedule"]}
            },
            "followUpPlan": {
                "timeline": [
                    {"timeframe": "3 days", "action": "Review headache diary", "priority": "Medium"},
                    {"timeframe": "1 week", "action": "Blood pressure check with GP", "priority": "High"}
                ],
                "monitoring": ["Daily blood pressure reading"],
                "redFlags": ["Sudden severe headache", "Weakness on one side"]
            },
            "emergencyProtocols": {
                "warningSignsImmediate": ["Worst headache of life", "Loss of consciousness"],
                "warningSignsUrgent": ["Headache with fever and stiff neck"],
                "emergencyContacts": ["Family doctor: +91-9000000000"],
                "actionSteps": ["Call 108", "Note the time symptoms began"]
            }
        }))
        .unwrap()
    }
}

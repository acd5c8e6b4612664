//! Quick health-assessment report.
//!
//! A shorter companion to the full AI report, built from the quick
//! assessment form and its recommendation. Shares the canvas, palette and
//! document types with [`crate::report`]; carries no verification code.

use chrono::{DateTime, Duration, Utc};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::models::{AssessmentRecommendation, AssessmentRecord, MedicationSuggestion};
use crate::report::canvas::{Block, BlockLine, DrawOp, FontStyle, TextStyle};
use crate::report::palette::{
    self, ALERT_RED, BLACK, BORDER, BRAND_BLUE, GREEN, INFO_PANEL, INFO_TEXT, MUTED, PANEL,
    URGENT_TEXT, WHITE,
};
use crate::report::sections::{fit_line, or_unspecified, ReportWriter, MEDICATION_RECOMMENDATIONS};
use crate::report::ReportDocument;

pub const ASSESSMENT_DETAILS: &str = "ASSESSMENT DETAILS";
pub const HEALTH_SUMMARY: &str = "HEALTH SUMMARY";
pub const SYMPTOMS_AND_ANALYSIS: &str = "SYMPTOMS & ANALYSIS";
pub const LIFESTYLE_RECOMMENDATIONS: &str = "LIFESTYLE RECOMMENDATIONS";
pub const ACTION_PLAN: &str = "ACTION PLAN";
pub const MEDICAL_DISCLAIMERS: &str = "MEDICAL DISCLAIMERS";

/// Section marks of an assessment report, in drawing order.
pub const ASSESSMENT_SECTION_ORDER: [&str; 7] = [
    ASSESSMENT_DETAILS,
    HEALTH_SUMMARY,
    SYMPTOMS_AND_ANALYSIS,
    MEDICATION_RECOMMENDATIONS,
    LIFESTYLE_RECOMMENDATIONS,
    ACTION_PLAN,
    MEDICAL_DISCLAIMERS,
];

/// Days until the next recommended assessment.
pub const REASSESSMENT_INTERVAL_DAYS: i64 = 30;

const DEFAULT_DIET: [&str; 3] = [
    "Include turmeric, ginger, and garlic in daily cooking",
    "Replace refined grains with millets (jowar, bajra, ragi)",
    "Drink warm water with lemon and honey in the morning",
];

const DEFAULT_EXERCISE: [&str; 3] = [
    "30-minute brisk walk daily, preferably in the morning",
    "Practice yoga or pranayama for 15 minutes daily",
    "Take stairs instead of elevators when possible",
];

const DEFAULT_IMMEDIATE: [&str; 2] = [
    "Start recommended medications as advised",
    "Monitor symptoms and maintain a health diary",
];

const SHORT_TERM_MONITORING: [&str; 3] = [
    "Track symptom severity daily (1-10 scale)",
    "Monitor medication effectiveness and side effects",
    "Maintain regular sleep and meal timings",
];

const DEFAULT_FOLLOW_UP: [&str; 2] = [
    "Reassess symptoms in 3-5 days",
    "Schedule follow-up if no improvement in 1 week",
];

const EMERGENCY_SIGNS: [&str; 4] = [
    "Severe chest pain or difficulty breathing",
    "High fever (>102\u{00B0}F) with severe symptoms",
    "Severe allergic reactions or medication side effects",
    "Sudden severe headache or vision changes",
];

/// `MA-<last 6 digits of unix millis>`
pub fn generate_assessment_id(at: DateTime<Utc>) -> String {
    format!("MA-{:06}", at.timestamp_millis().rem_euclid(1_000_000))
}

pub struct AssessmentReportBuilder {
    config: ReportConfig,
    assessment_id: String,
    generated_at: DateTime<Utc>,
}

impl AssessmentReportBuilder {
    pub fn new() -> Self {
        let generated_at = Utc::now();
        Self {
            config: ReportConfig::default(),
            assessment_id: generate_assessment_id(generated_at),
            generated_at,
        }
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self.assessment_id = generate_assessment_id(at);
        self
    }

    pub fn assessment_id(&self) -> &str {
        &self.assessment_id
    }

    pub fn next_assessment_date(&self) -> DateTime<Utc> {
        self.generated_at + Duration::days(REASSESSMENT_INTERVAL_DAYS)
    }

    pub fn build(
        self,
        patient_name: &str,
        record: &AssessmentRecord,
        recommendation: &AssessmentRecommendation,
    ) -> Result<ReportDocument, ReportError> {
        let patient_name = patient_name.trim();
        if patient_name.is_empty() {
            return Err(ReportError::MissingRequiredField {
                field: "patient_name",
            });
        }

        tracing::info!(assessment_id = %self.assessment_id, "building assessment report");

        let mut w = ReportWriter::new(&self.config);
        self.header(&mut w, patient_name);
        health_summary(&mut w, recommendation);
        symptoms(&mut w, record);
        medications(&mut w, &recommendation.medication_suggestions);
        lifestyle(&mut w, recommendation);
        action_plan(&mut w, recommendation);
        self.footer(&mut w);

        let ReportWriter {
            canvas,
            diagnostics,
            ..
        } = w;
        let (geometry, pages, sections) = canvas.into_parts();

        tracing::info!(
            assessment_id = %self.assessment_id,
            pages = pages.len(),
            "assessment report built"
        );

        Ok(ReportDocument {
            title: format!(
                "{} Health Assessment {}",
                self.config.brand_name, self.assessment_id
            ),
            report_id: self.assessment_id,
            generated_at: self.generated_at,
            geometry,
            pages,
            sections,
            verification_payload: None,
            diagnostics,
        })
    }

    fn header(&self, w: &mut ReportWriter<'_>, patient_name: &str) {
        w.canvas.start_fresh_page();
        w.canvas.mark_section(ASSESSMENT_DETAILS);

        let page_width = w.canvas.geometry().width_mm;
        let left = w.canvas.left();
        w.canvas.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            width: page_width,
            height: 40.0,
            fill: Some(BRAND_BLUE),
            stroke: None,
        });
        w.canvas.push(DrawOp::text(
            left,
            25.0,
            TextStyle::bold(24.0).with_color(WHITE),
            self.config.brand_name.as_str(),
        ));
        w.canvas.push(DrawOp::text(
            left,
            35.0,
            TextStyle::new(12.0, FontStyle::Regular, WHITE, 6.0),
            "AI-Powered Health Assessment Report",
        ));

        let meta_x = page_width - 80.0;
        let heading = TextStyle::bold(14.0);
        w.canvas.push(DrawOp::text(
            left,
            55.0,
            heading,
            fit_line(&format!("Patient: {patient_name}"), meta_x - left - 5.0, 14.0),
        ));
        let meta = TextStyle::bold(12.0);
        w.canvas.push(DrawOp::text(
            meta_x,
            55.0,
            meta,
            format!("Date: {}", self.generated_at.format("%d/%m/%Y")),
        ));
        w.canvas.push(DrawOp::text(
            meta_x,
            65.0,
            meta,
            format!("Assessment ID: {}", self.assessment_id),
        ));

        w.canvas.set_cursor(75.0);
        w.canvas.separator();
    }

    fn footer(&self, w: &mut ReportWriter<'_>) {
        let brand = &self.config.brand_name;
        let disclaimers = [
            "This AI-generated report is for informational purposes only and should not replace professional medical advice.".to_string(),
            "Always consult with qualified healthcare providers before making medical decisions.".to_string(),
            "Medication recommendations are based on general guidelines and may not suit individual cases.".to_string(),
            "Emergency symptoms require immediate medical attention - do not delay seeking help.".to_string(),
            format!("{brand} is not liable for any medical decisions made based on this report."),
        ];

        let mut block = Block::panel(PANEL).line(BlockLine::new(
            MEDICAL_DISCLAIMERS,
            TextStyle::bold(12.0).with_color(ALERT_RED),
        ));
        for line in disclaimers {
            block.push(BlockLine::bullet(line, TextStyle::small()));
        }
        let width = w.canvas.content_width();
        w.canvas.reserve_block(width, &block);
        w.canvas.mark_section(MEDICAL_DISCLAIMERS);
        w.full_width_block(&block);
        w.canvas.advance(6.0);

        let contacts = Block::panel(INFO_PANEL)
            .line(BlockLine::new(
                format!("EMERGENCY CONTACTS ({})", self.config.region_label.to_uppercase()),
                TextStyle::bold(12.0).with_color(INFO_TEXT),
            ))
            .line(BlockLine::bullet(
                self.config.emergency_contacts_line.as_str(),
                TextStyle::body(),
            ))
            .line(BlockLine::bullet(
                format!("{brand} Support: {}", self.config.contact_line),
                TextStyle::body(),
            ));
        w.full_width_block(&contacts);
        w.canvas.advance(6.0);

        let next = self.next_assessment_date().format("%d/%m/%Y");
        w.paragraph(
            0.0,
            &format!("Next Recommended Assessment: {next}"),
            TextStyle::bold(11.0),
        );
        w.canvas.advance(4.0);
        let small = TextStyle::new(8.0, FontStyle::Regular, palette::NEUTRAL, 4.5);
        w.paragraph(0.0, &format!("Generated by {}", self.config.platform_line), small);
        w.paragraph(
            0.0,
            &format!(
                "Assessment ID: {} | {}",
                self.assessment_id,
                self.generated_at.format("%d/%m/%Y, %H:%M UTC")
            ),
            small,
        );
    }
}

impl Default for AssessmentReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn colored_heading(w: &mut ReportWriter<'_>, text: &str, color: palette::Rgb) {
    let style = TextStyle::bold(11.0).with_color(color);
    w.canvas
        .ensure_space(style.line_height + TextStyle::body().line_height);
    let x = w.canvas.left();
    w.canvas.text_line(x, text, style);
    w.canvas.advance(1.0);
}

fn static_bullets(w: &mut ReportWriter<'_>, items: &[&str]) {
    let owned: Vec<String> = items.iter().map(|s| s.to_string()).collect();
    w.bullets(&owned);
}

fn health_summary(w: &mut ReportWriter<'_>, recommendation: &AssessmentRecommendation) {
    w.section_header(HEALTH_SUMMARY, None);

    let score = recommendation.health_score;
    let score_color = palette::health_score_color(score);
    let risk = &recommendation.risk_level;
    if !risk.is_recognized() && !risk.as_str().is_empty() {
        w.note_unrecognized("riskLevel", risk.as_str());
    }

    let row = TextStyle::new(16.0, FontStyle::Bold, BLACK, 9.0);
    w.canvas.ensure_space(row.line_height + 10.0);
    let top = w.canvas.cursor();
    let left = w.canvas.left();
    w.canvas.push(DrawOp::text(
        left,
        row.baseline(top),
        row.with_color(score_color),
        format!("Health Score: {score}/100"),
    ));
    let risk_label = if risk.as_str().is_empty() { "Unknown" } else { risk.as_str() };
    w.canvas.push(DrawOp::text(
        left + 100.0,
        row.baseline(top),
        row.with_color(palette::risk_level_color(risk)),
        fit_line(&format!("Risk Level: {risk_label}"), 70.0, 16.0),
    ));

    // Score bar under the row.
    let bar_top = top + row.line_height + 1.0;
    w.canvas.push(DrawOp::Rect {
        x: left,
        y: bar_top,
        width: 80.0,
        height: 5.0,
        fill: Some(BORDER),
        stroke: None,
    });
    if score > 0 {
        w.canvas.push(DrawOp::Rect {
            x: left,
            y: bar_top,
            width: 80.0 * f32::from(score) / 100.0,
            height: 5.0,
            fill: Some(score_color),
            stroke: None,
        });
    }
    w.canvas.advance(row.line_height + 10.0);

    let confidence = TextStyle::bold(12.0).with_color(BRAND_BLUE);
    w.canvas.text_line(
        left,
        &format!("AI Confidence: {}%", recommendation.confidence_score),
        confidence,
    );
    w.canvas.advance(4.0);

    let findings: Vec<String> = recommendation.recommendations.iter().take(3).cloned().collect();
    if !findings.is_empty() {
        w.subheading("Key Findings:");
        w.bullets(&findings);
    }

    w.end_section();
}

/// Capitalizes the first letter of every word after replacing the first
/// hyphen with a space: `"type-2 diabetes"` becomes `"Type 2 Diabetes"`.
pub fn title_case(raw: &str) -> String {
    let spaced = raw.replacen('-', " ", 1);
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

fn symptoms(w: &mut ReportWriter<'_>, record: &AssessmentRecord) {
    w.section_header(SYMPTOMS_AND_ANALYSIS, None);

    w.paragraph(
        0.0,
        &format!("Primary Complaint: {}", or_unspecified(&record.primary_symptom)),
        TextStyle::bold(11.0),
    );
    w.canvas.advance(4.0);

    if !record.secondary_symptoms.is_empty() {
        w.subheading("Related Symptoms:");
        w.bullets(&record.secondary_symptoms);
        w.canvas.advance(3.0);
    }

    let row = TextStyle::bold(11.0);
    w.canvas.ensure_space(row.line_height);
    let top = w.canvas.cursor();
    let left = w.canvas.left();
    w.canvas.push(DrawOp::text(
        left,
        row.baseline(top),
        row,
        format!("Severity: {}/10", record.severity),
    ));
    w.canvas.push(DrawOp::text(
        left + 80.0,
        row.baseline(top),
        row,
        fit_line(
            &format!("Duration: {}", or_unspecified(&record.duration)),
            w.canvas.content_width() - 80.0,
            11.0,
        ),
    ));
    w.canvas.advance(row.line_height + 4.0);

    if !record.conditions.is_empty() {
        let conditions: Vec<String> = record.conditions.iter().map(|c| title_case(c)).collect();
        w.subheading("Medical Conditions:");
        w.bullets(&conditions);
    }

    w.end_section();
}

fn medication_block(number: usize, suggestion: &MedicationSuggestion) -> Block {
    let medication = &suggestion.medication;
    let status = if medication.prescription_required {
        "Prescription Required"
    } else {
        "Over-the-Counter"
    };
    let mut block = Block::card(PANEL, BORDER)
        .line(BlockLine::new(
            format!("{number}. {}", or_unspecified(&medication.name)),
            TextStyle::new(13.0, FontStyle::Bold, BLACK, 7.0),
        ))
        .line(BlockLine::new(
            format!("Category: {} | {status}", or_unspecified(&medication.category)),
            TextStyle::body(),
        ))
        .line(BlockLine::new("Recommended Dosage:", TextStyle::bold(10.0)))
        .line(BlockLine::bullet(or_unspecified(&suggestion.dosage), TextStyle::body()))
        .line(BlockLine::bullet(
            format!("Timing: {}", or_unspecified(&suggestion.timing)),
            TextStyle::body(),
        ))
        .line(BlockLine::bullet(
            format!("Duration: {}", or_unspecified(&suggestion.duration)),
            TextStyle::body(),
        ));

    if suggestion.cost_saving > 0.0 {
        block.push(BlockLine::new(
            format!("Save \u{20B9}{} with generic option", suggestion.cost_saving),
            TextStyle::new(10.0, FontStyle::Bold, GREEN, 6.0),
        ));
    }
    if !suggestion.warnings.is_empty() {
        block.push(BlockLine::new(
            "Important Warnings:",
            TextStyle::new(10.0, FontStyle::Bold, URGENT_TEXT, 6.0),
        ));
        for warning in &suggestion.warnings {
            block.push(BlockLine::bullet(warning.as_str(), TextStyle::body()));
        }
    }
    block
}

fn medications(w: &mut ReportWriter<'_>, suggestions: &[MedicationSuggestion]) {
    w.section_header(MEDICATION_RECOMMENDATIONS, None);

    if suggestions.is_empty() {
        w.empty_note("No specific medication recommendations at this time.");
        w.canvas.advance(3.0);
    } else {
        for (i, suggestion) in suggestions.iter().enumerate() {
            w.full_width_block(&medication_block(i + 1, suggestion));
            w.canvas.advance(5.0);
        }
    }

    w.end_section();
}

fn lifestyle(w: &mut ReportWriter<'_>, recommendation: &AssessmentRecommendation) {
    w.section_header(LIFESTYLE_RECOMMENDATIONS, None);

    if recommendation.lifestyle_suggestions.is_empty() {
        let region = w.config.region_label.clone();
        w.subheading(&format!("Diet & Nutrition ({region} Context):"));
        static_bullets(w, &DEFAULT_DIET);
        w.canvas.advance(5.0);
        w.subheading("Exercise & Activity:");
        static_bullets(w, &DEFAULT_EXERCISE);
    } else {
        for suggestion in &recommendation.lifestyle_suggestions {
            w.subheading(&format!("{}:", or_unspecified(&suggestion.category)));
            if suggestion.recommendations.is_empty() {
                w.empty_note("No specific recommendations provided.");
            } else {
                w.bullets(&suggestion.recommendations);
            }
            w.canvas.advance(5.0);
        }
    }

    w.end_section();
}

fn action_plan(w: &mut ReportWriter<'_>, recommendation: &AssessmentRecommendation) {
    w.section_header(ACTION_PLAN, None);

    colored_heading(w, "Immediate Actions (Today):", ALERT_RED);
    if recommendation.emergency_warnings.is_empty() {
        static_bullets(w, &DEFAULT_IMMEDIATE);
    } else {
        w.bullets(&recommendation.emergency_warnings);
    }
    w.canvas.advance(5.0);

    colored_heading(w, "Short-term Monitoring (This Week):", URGENT_TEXT);
    static_bullets(w, &SHORT_TERM_MONITORING);
    w.canvas.advance(5.0);

    colored_heading(w, "Follow-up Timeline:", GREEN);
    if recommendation.follow_up_timeline.is_empty() {
        static_bullets(w, &DEFAULT_FOLLOW_UP);
    } else {
        let items: Vec<String> = recommendation
            .follow_up_timeline
            .iter()
            .map(|entry| format!("{} - {}", entry.action, entry.timeframe))
            .collect();
        w.bullets(&items);
    }
    w.canvas.advance(5.0);

    if !recommendation.next_steps.is_empty() {
        colored_heading(w, "Next Steps:", BLACK);
        w.numbered(&recommendation.next_steps);
        w.canvas.advance(5.0);
    }

    if !recommendation.safety_alerts.is_empty() {
        w.alert_box(
            "Safety Alerts",
            ALERT_RED,
            palette::WARNING_PANEL,
            None,
            &recommendation.safety_alerts,
        );
    }

    colored_heading(
        w,
        "Emergency Warning Signs - Seek Immediate Medical Attention:",
        ALERT_RED,
    );
    static_bullets(w, &EMERGENCY_SIGNS);
    let call = format!("Call {} for any of the above.", w.config.emergency_number);
    w.paragraph(5.0, &call, TextStyle::small().with_color(MUTED));

    w.end_section();
}

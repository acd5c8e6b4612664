use crate::models::SymptomAnalysis;
use crate::report::canvas::{chars_per_line, wrap_text, DrawOp, FontStyle, TextStyle};
use crate::report::palette::{ScoreTier, BLACK, BORDER, MUTED};

use super::{or_unspecified, ReportWriter, SYMPTOM_ANALYSIS};

const BAR_WIDTH: f32 = 100.0;
const BAR_HEIGHT: f32 = 8.0;
/// Differential confidence column, from the left margin.
const CONFIDENCE_COLUMN: f32 = 120.0;

pub(crate) fn render(w: &mut ReportWriter<'_>, analysis: &SymptomAnalysis) {
    w.section_header(SYMPTOM_ANALYSIS, Some("AI Diagnostic Assessment"));

    let primary = &analysis.primary_diagnosis;
    w.subheading("Primary Diagnosis");
    w.paragraph(0.0, or_unspecified(&primary.condition), TextStyle::bold(12.0));
    w.canvas.advance(2.0);
    confidence_bar(w, primary.confidence);

    if !primary.reasoning.trim().is_empty() {
        let style = TextStyle::body().with_color(MUTED);
        w.paragraph(0.0, &format!("AI Reasoning: {}", primary.reasoning), style);
    }
    w.canvas.advance(5.0);

    if !analysis.differential_diagnosis.is_empty() {
        w.subheading("Differential Diagnosis");
        for (i, diagnosis) in analysis.differential_diagnosis.iter().enumerate() {
            let title = format!("{}. {}", i + 1, or_unspecified(&diagnosis.condition));
            differential_row(w, &title, diagnosis.confidence);
            if !diagnosis.reasoning.trim().is_empty() {
                w.paragraph(10.0, &diagnosis.reasoning, TextStyle::body());
            }
            w.canvas.advance(3.0);
        }
    }

    if !analysis.risk_factors.is_empty() {
        w.canvas.advance(2.0);
        w.subheading("Identified Risk Factors");
        w.bullets(&analysis.risk_factors);
    }

    w.end_section();
}

/// Track of fixed width with a fill proportional to `confidence`, followed
/// by the value and its tier.
fn confidence_bar(w: &mut ReportWriter<'_>, confidence: u8) {
    let row = BAR_HEIGHT + 4.0;
    w.canvas.ensure_space(row);

    let tier = ScoreTier::of(confidence);
    let color = tier.confidence_color();
    let x = w.canvas.left();
    let top = w.canvas.cursor();

    w.canvas.push(DrawOp::Rect {
        x,
        y: top,
        width: BAR_WIDTH,
        height: BAR_HEIGHT,
        fill: Some(BORDER),
        stroke: None,
    });
    if confidence > 0 {
        w.canvas.push(DrawOp::Rect {
            x,
            y: top,
            width: BAR_WIDTH * f32::from(confidence) / 100.0,
            height: BAR_HEIGHT,
            fill: Some(color),
            stroke: None,
        });
    }
    let label = TextStyle::bold(10.0).with_color(color);
    w.canvas.push(DrawOp::text(
        x + BAR_WIDTH + 4.0,
        top + BAR_HEIGHT - 1.5,
        label,
        format!("{confidence}% confidence ({})", tier.label()),
    ));
    w.canvas.advance(row);
}

/// Condition title with its confidence value, color-coded by tier, in a
/// right-hand column. Long titles wrap under the first line.
fn differential_row(w: &mut ReportWriter<'_>, title: &str, confidence: u8) {
    let style = TextStyle::new(11.0, FontStyle::Bold, BLACK, 7.0);
    let x = w.canvas.left() + 5.0;
    let lines = wrap_text(title, chars_per_line(CONFIDENCE_COLUMN - 10.0, style.size_pt));

    w.canvas.ensure_space(style.line_height * 2.0);
    let top = w.canvas.cursor();
    let color = ScoreTier::of(confidence).confidence_color();
    let column = w.canvas.left() + CONFIDENCE_COLUMN;
    w.canvas.push(DrawOp::text(
        column,
        style.baseline(top),
        style.with_color(color),
        format!("({confidence}%)"),
    ));
    for line in &lines {
        w.canvas.text_line(x, line, style);
    }
    if lines.is_empty() {
        w.canvas.advance(style.line_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::report::palette::{Rgb, GREEN, RED, YELLOW};
    use crate::report::sections::fixtures::sample_report;

    fn rendered(analysis: &SymptomAnalysis) -> Vec<DrawOp> {
        let config = ReportConfig::default();
        let mut w = ReportWriter::new(&config);
        render(&mut w, analysis);
        w.canvas
            .pages()
            .iter()
            .flat_map(|p| p.ops.iter().cloned())
            .collect()
    }

    fn text_color(ops: &[DrawOp], needle: &str) -> Option<Rgb> {
        ops.iter().find_map(|op| match op {
            DrawOp::Text { text, color, .. } if text == needle => Some(*color),
            _ => None,
        })
    }

    #[test]
    fn bar_length_is_proportional_to_confidence() {
        let mut analysis = sample_report().symptom_analysis;
        analysis.primary_diagnosis.confidence = 78;
        let ops = rendered(&analysis);

        let widths: Vec<f32> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { width, height, .. } if (*height - BAR_HEIGHT).abs() < 0.01 => {
                    Some(*width)
                }
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 2);
        assert!((widths[0] - BAR_WIDTH).abs() < 0.01);
        assert!((widths[1] - 78.0).abs() < 0.01);
        assert_eq!(
            text_color(&ops, "78% confidence (High)"),
            Some(GREEN)
        );
    }

    #[test]
    fn zero_confidence_draws_only_the_track() {
        let mut analysis = sample_report().symptom_analysis;
        analysis.primary_diagnosis.confidence = 0;
        let ops = rendered(&analysis);
        let bars = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { height, .. } if (*height - BAR_HEIGHT).abs() < 0.01))
            .count();
        assert_eq!(bars, 1);
    }

    #[test]
    fn differentials_are_color_coded_by_tier() {
        let ops = rendered(&sample_report().symptom_analysis);
        assert_eq!(text_color(&ops, "(45%)"), Some(YELLOW));
        assert_eq!(text_color(&ops, "(30%)"), Some(RED));
        assert!(text_color(&ops, "1. Migraine without aura").is_some());
    }

    #[test]
    fn empty_lists_skip_subsections() {
        let analysis = SymptomAnalysis::default();
        let ops = rendered(&analysis);
        let texts: Vec<&str> = ops.iter().filter_map(DrawOp::as_text).collect();
        assert!(!texts.contains(&"Differential Diagnosis"));
        assert!(!texts.contains(&"Identified Risk Factors"));
        assert!(texts.contains(&"Not specified"));
    }
}

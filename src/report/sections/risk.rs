use crate::models::{RiskAssessment, RiskLevel};
use crate::report::canvas::{DrawOp, FontStyle, TextStyle};
use crate::report::palette::{self, ScoreTier, BLACK, BORDER, MUTED, WHITE};

use super::{or_unspecified, ReportWriter, RISK_ASSESSMENT};

const GAUGE_RADIUS: f32 = 20.0;
const GAUGE_HOLE: f32 = 13.0;
/// Vertical space the gauge row occupies.
const GAUGE_ROW: f32 = 55.0;
const LEVEL_BADGE_WIDTH: f32 = 30.0;

pub(crate) fn render(w: &mut ReportWriter<'_>, assessment: &RiskAssessment) {
    w.section_header(RISK_ASSESSMENT, Some("AI-Calculated Health Risk Analysis"));

    let overall = &assessment.overall_risk;
    if !overall.is_recognized() && !overall.as_str().is_empty() {
        w.note_unrecognized("riskAssessment.overallRisk", overall.as_str());
    }
    gauge(w, overall, assessment.risk_score);

    if !assessment.specific_risks.is_empty() {
        w.subheading("Specific Risk Categories");
        for (i, risk) in assessment.specific_risks.iter().enumerate() {
            if !risk.level.is_recognized() && !risk.level.as_str().is_empty() {
                w.note_unrecognized(
                    &format!("riskAssessment.specificRisks[{i}].level"),
                    risk.level.as_str(),
                );
            }
            risk_row(w, or_unspecified(&risk.category), &risk.level);
            if !risk.description.trim().is_empty() {
                w.paragraph(10.0, &risk.description, TextStyle::body());
            }
            w.canvas.advance(3.0);
        }
    }

    w.end_section();
}

fn level_label(level: &RiskLevel) -> &str {
    if level.as_str().is_empty() {
        "Unknown"
    } else {
        level.as_str()
    }
}

/// Ring gauge: a track, a sector sweeping `score`% of the circle in the
/// overall level's color, and the numeric score in the middle.
fn gauge(w: &mut ReportWriter<'_>, level: &RiskLevel, score: u8) {
    w.canvas.ensure_space(GAUGE_ROW);
    let top = w.canvas.cursor();
    let cx = w.canvas.left() + 25.0;
    let cy = top + 25.0;
    let color = palette::risk_level_color(level);

    w.canvas.push(DrawOp::Circle {
        cx,
        cy,
        radius: GAUGE_RADIUS,
        fill: BORDER,
    });
    if score > 0 {
        w.canvas.push(DrawOp::Sector {
            cx,
            cy,
            radius: GAUGE_RADIUS,
            sweep_deg: 360.0 * f32::from(score) / 100.0,
            fill: color,
        });
    }
    w.canvas.push(DrawOp::Circle {
        cx,
        cy,
        radius: GAUGE_HOLE,
        fill: WHITE,
    });

    let score_style = TextStyle::bold(16.0);
    let digits = score.to_string();
    let score_width = digits.len() as f32 * score_style.size_mm() * 0.55;
    w.canvas.push(DrawOp::text(cx - score_width / 2.0, cy + 2.0, score_style, digits));
    let unit = TextStyle::new(7.0, FontStyle::Regular, MUTED, 3.0);
    w.canvas.push(DrawOp::text(cx - 2.5, cy + 7.0, unit, "/100"));

    let x = cx + 30.0;
    w.canvas.push(DrawOp::text(
        x,
        cy - 6.0,
        TextStyle::bold(14.0).with_color(BLACK),
        format!("Overall Risk: {}", level_label(level)),
    ));
    w.canvas.push(DrawOp::text(
        x,
        cy + 2.0,
        TextStyle::body(),
        format!("AI Risk Score: {score}/100"),
    ));
    let tier = ScoreTier::of(score);
    w.badge(
        x,
        cy + 6.0,
        45.0,
        8.0,
        &format!("{} score tier", tier.label()),
        tier.severity_color(),
    );

    w.canvas.set_cursor(top + GAUGE_ROW);
}

fn risk_row(w: &mut ReportWriter<'_>, category: &str, level: &RiskLevel) {
    let style = TextStyle::new(11.0, FontStyle::Bold, BLACK, 9.0);
    // Row plus the first description line.
    w.canvas.ensure_space(style.line_height + TextStyle::body().line_height);
    let top = w.canvas.cursor();
    let x = w.canvas.left();

    w.canvas.push(DrawOp::text(
        x + 5.0,
        style.baseline(top),
        style,
        super::fit_line(category, 90.0, style.size_pt),
    ));
    w.badge(
        x + 100.0,
        top,
        LEVEL_BADGE_WIDTH,
        7.0,
        level_label(level),
        palette::risk_level_color(level),
    );
    w.canvas.advance(style.line_height);
}

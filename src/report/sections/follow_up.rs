use crate::models::{FollowUpPlan, Priority, TimelineEntry};
use crate::report::canvas::{chars_per_line, wrap_text, DrawOp, FontStyle, TextStyle};
use crate::report::palette::{self, ALERT_RED, BLACK, WARNING_PANEL};

use super::{ReportWriter, FOLLOW_UP_PLAN};

const ROW_HEIGHT: f32 = 6.0;
const TIMEFRAME_X: f32 = 10.0;
const TIMEFRAME_WIDTH: f32 = 36.0;
const ACTION_X: f32 = 50.0;
const BADGE_WIDTH: f32 = 30.0;

pub(crate) fn render(w: &mut ReportWriter<'_>, plan: &FollowUpPlan) {
    w.section_header(FOLLOW_UP_PLAN, Some("AI-Generated Monitoring Timeline"));

    if !plan.timeline.is_empty() {
        w.subheading("Follow-up Timeline");
        for (i, entry) in plan.timeline.iter().enumerate() {
            if !entry.priority.is_recognized() && !entry.priority.as_str().is_empty() {
                w.note_unrecognized(
                    &format!("followUpPlan.timeline[{i}].priority"),
                    entry.priority.as_str(),
                );
            }
            timeline_row(w, entry);
            w.canvas.advance(3.0);
        }
        w.canvas.advance(4.0);
    }

    if !plan.monitoring.is_empty() {
        w.subheading("Monitoring Requirements");
        w.bullets(&plan.monitoring);
        w.canvas.advance(5.0);
    }

    if !plan.red_flags.is_empty() {
        w.alert_box(
            "Red Flag Symptoms - Seek Immediate Medical Attention",
            ALERT_RED,
            WARNING_PANEL,
            None,
            &plan.red_flags,
        );
    }

    w.end_section();
}

fn priority_label(priority: &Priority) -> &str {
    if priority.as_str().is_empty() {
        "Unspecified"
    } else {
        priority.as_str()
    }
}

/// Dot, timeframe and action columns with a priority badge on the right.
/// Rows wrap in their own column and may continue on the next page.
fn timeline_row(w: &mut ReportWriter<'_>, entry: &TimelineEntry) {
    let left = w.canvas.left();
    let right = w.canvas.right();
    let color = palette::priority_color(&entry.priority);

    let timeframe_style = TextStyle::new(10.0, FontStyle::Bold, BLACK, ROW_HEIGHT);
    let action_style = TextStyle::new(10.0, FontStyle::Regular, BLACK, ROW_HEIGHT);
    let action_width = right - BADGE_WIDTH - 3.0 - (left + ACTION_X);

    let timeframe = if entry.timeframe.trim().is_empty() {
        Vec::new()
    } else {
        wrap_text(
            &format!("{}:", entry.timeframe.trim()),
            chars_per_line(TIMEFRAME_WIDTH, timeframe_style.size_pt),
        )
    };
    let action = wrap_text(&entry.action, chars_per_line(action_width, action_style.size_pt));
    let rows = timeframe.len().max(action.len()).max(1);

    for row in 0..rows {
        // The first row also carries the 7 mm badge.
        let needed = if row == 0 { ROW_HEIGHT.max(7.5) } else { ROW_HEIGHT };
        w.canvas.ensure_space(needed);
        let top = w.canvas.cursor();

        if row == 0 {
            w.canvas.push(DrawOp::Circle {
                cx: left + 4.0,
                cy: top + 3.0,
                radius: 2.5,
                fill: color,
            });
            w.badge(
                right - BADGE_WIDTH,
                top,
                BADGE_WIDTH,
                7.0,
                priority_label(&entry.priority),
                color,
            );
        }
        if let Some(text) = timeframe.get(row) {
            w.canvas.push(DrawOp::text(
                left + TIMEFRAME_X,
                timeframe_style.baseline(top),
                timeframe_style,
                text.as_str(),
            ));
        }
        if let Some(text) = action.get(row) {
            w.canvas.push(DrawOp::text(
                left + ACTION_X,
                action_style.baseline(top),
                action_style,
                text.as_str(),
            ));
        }
        w.canvas.advance(needed);
    }
}

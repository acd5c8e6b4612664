use chrono::{DateTime, Utc};

use crate::config::PageGeometry;
use crate::models::PatientRecord;
use crate::report::canvas::{DrawOp, FontStyle, TextStyle};
use crate::report::palette::{BLACK, BORDER, BRAND_BLUE, GREEN, MUTED, PANEL, WHITE};

use super::{fit_line, or_unspecified, ReportWriter, PATIENT_INFORMATION};

// Offsets below the header origin.
const BAND_HEIGHT: f32 = 50.0;
const BOX_TOP: f32 = 60.0;
const BOX_HEIGHT: f32 = 40.0;
const HEADER_END: f32 = 125.0;

/// Where the header starts. Laid out for the A4 top margin; a deeper top
/// margin pushes the whole header down by the difference.
fn header_origin(geometry: &PageGeometry) -> f32 {
    (geometry.top_mm - PageGeometry::A4.top_mm).max(0.0)
}

/// Brand band, patient box and report metadata. Always starts a fresh page.
///
/// The header needs `HEADER_END` mm above the bottom margin. On shorter
/// pages it is still drawn whole and the canvas warns about the overflow.
pub(crate) fn render(
    w: &mut ReportWriter<'_>,
    patient: &PatientRecord,
    report_id: &str,
    generated_at: DateTime<Utc>,
) {
    w.canvas.start_fresh_page();
    w.canvas.mark_section(PATIENT_INFORMATION);

    let page_width = w.canvas.geometry().width_mm;
    let y0 = header_origin(w.canvas.geometry());
    let left = w.canvas.left();
    let width = w.canvas.content_width();

    w.canvas.push(DrawOp::Rect {
        x: 0.0,
        y: 0.0,
        width: page_width,
        height: y0 + BAND_HEIGHT,
        fill: Some(BRAND_BLUE),
        stroke: None,
    });
    w.canvas.push(DrawOp::text(
        left,
        y0 + 25.0,
        TextStyle::bold(28.0).with_color(WHITE),
        w.config.brand_name.as_str(),
    ));
    w.canvas.push(DrawOp::text(
        left,
        y0 + 35.0,
        TextStyle::new(14.0, FontStyle::Regular, WHITE, 7.0),
        fit_line(&w.config.tagline, page_width - 100.0, 14.0),
    ));
    w.badge(page_width - 80.0, y0 + 15.0, 60.0, 20.0, "AI GENERATED", GREEN);

    // Patient box
    w.canvas.push(DrawOp::Rect {
        x: left,
        y: y0 + BOX_TOP,
        width,
        height: BOX_HEIGHT,
        fill: Some(PANEL),
        stroke: Some(BORDER),
    });
    w.canvas.push(DrawOp::text(
        left + 5.0,
        y0 + 75.0,
        TextStyle::bold(16.0),
        PATIENT_INFORMATION,
    ));

    let personal = &patient.personal;
    let left_col = left + 5.0;
    let right_col = page_width / 2.0 + 10.0;
    let column_width = right_col - left_col - 5.0;
    let detail = TextStyle::new(12.0, FontStyle::Regular, BLACK, 7.0);

    let name = patient.name().unwrap_or("Not specified");
    let age = if personal.age > 0 {
        format!("{} years", personal.age)
    } else {
        "Not specified".to_string()
    };
    let weight = if personal.weight > 0.0 {
        format!("{} kg", personal.weight)
    } else {
        "Not specified".to_string()
    };

    for (x, y, text) in [
        (left_col, y0 + 85.0, format!("Name: {name}")),
        (left_col, y0 + 92.0, format!("Age: {age}")),
        (right_col, y0 + 85.0, format!("Gender: {}", or_unspecified(&personal.gender))),
        (right_col, y0 + 92.0, format!("Weight: {weight}")),
    ] {
        w.canvas
            .push(DrawOp::text(x, y, detail, fit_line(&text, column_width, 12.0)));
    }

    // Report metadata
    let meta = TextStyle::body().with_color(MUTED);
    let meta_right = page_width - 100.0;
    let date = generated_at.format("%d %B %Y").to_string();
    for (x, y, text) in [
        (left, y0 + 110.0, format!("Report ID: {report_id}")),
        (meta_right, y0 + 110.0, format!("Generated: {date}")),
        (left, y0 + 117.0, format!("AI Model: {}", w.config.model_label)),
        (meta_right, y0 + 117.0, format!("Language: {}", w.config.language_label)),
    ] {
        w.canvas.push(DrawOp::text(x, y, meta, text));
    }

    w.canvas.set_cursor(y0 + HEADER_END);
    w.canvas.separator();
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::config::ReportConfig;
    use crate::report::sections::fixtures::sample_patient;

    fn texts(w: &ReportWriter<'_>) -> Vec<String> {
        w.canvas.pages()[0]
            .ops
            .iter()
            .filter_map(|op| op.as_text().map(str::to_string))
            .collect()
    }

    #[test]
    fn header_shows_patient_and_metadata() {
        let config = ReportConfig::default();
        let mut w = ReportWriter::new(&config);
        let at = Utc.with_ymd_and_hms(2026, 3, 5, 8, 0, 0).unwrap();
        render(&mut w, &sample_patient(), "AI-RPT-1-abcdef", at);

        let texts = texts(&w);
        assert!(texts.contains(&"MyMedi.AI".to_string()));
        assert!(texts.contains(&"AI GENERATED".to_string()));
        assert!(texts.contains(&"Name: Asha Rao".to_string()));
        assert!(texts.contains(&"Age: 42 years".to_string()));
        assert!(texts.contains(&"Weight: 64.5 kg".to_string()));
        assert!(texts.contains(&"Report ID: AI-RPT-1-abcdef".to_string()));
        assert!(texts.contains(&"Generated: 05 March 2026".to_string()));
        assert!((w.canvas.cursor() - 135.0).abs() < 0.01);
    }

    #[test]
    fn deeper_top_margin_moves_header_down() {
        let mut config = ReportConfig::default();
        config.page.top_mm = 45.0;
        let mut w = ReportWriter::new(&config);
        render(&mut w, &sample_patient(), "AI-RPT-3", Utc::now());

        let ops = &w.canvas.pages()[0].ops;
        let band = ops.iter().find_map(|op| match op {
            DrawOp::Rect { height, fill: Some(fill), .. } if *fill == BRAND_BLUE => Some(*height),
            _ => None,
        });
        assert_eq!(band, Some(75.0));
        let patient_box = ops.iter().find_map(|op| match op {
            DrawOp::Rect { y, fill: Some(fill), .. } if *fill == PANEL => Some(*y),
            _ => None,
        });
        assert_eq!(patient_box, Some(85.0));
        let report_line = ops.iter().find_map(|op| match op {
            DrawOp::Text { y, text, .. } if text.starts_with("Report ID:") => Some(*y),
            _ => None,
        });
        assert_eq!(report_line, Some(135.0));
        assert!((w.canvas.cursor() - 160.0).abs() < 0.01);
    }

    #[test]
    fn missing_demographics_show_placeholder() {
        let config = ReportConfig::default();
        let mut w = ReportWriter::new(&config);
        let mut patient = sample_patient();
        patient.personal.age = 0;
        patient.personal.gender.clear();
        render(&mut w, &patient, "AI-RPT-2", Utc::now());

        let texts = texts(&w);
        assert!(texts.contains(&"Age: Not specified".to_string()));
        assert!(texts.contains(&"Gender: Not specified".to_string()));
    }
}

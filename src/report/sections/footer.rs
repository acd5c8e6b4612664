use chrono::{DateTime, Utc};

use crate::report::canvas::{Block, BlockLine, DrawOp, FontStyle, TextStyle};
use crate::report::document::{Diagnostic, DiagnosticKind};
use crate::report::palette::{ALERT_RED, BRAND_BLUE, MUTED, PANEL};
use crate::report::verification::CodeImageGenerator;

use super::{ReportWriter, MEDICAL_DISCLAIMER};

const CODE_SIZE: f32 = 40.0;
/// Code image, its caption and the metadata column beside it.
const FOOTER_HEIGHT: f32 = 50.0;

fn disclaimer_lines(brand: &str) -> [String; 5] {
    [
        "This AI-generated report is for informational purposes only and should not replace professional medical advice.".into(),
        "Always consult with qualified healthcare providers before making medical decisions or starting treatments.".into(),
        "AI recommendations are based on general medical knowledge and may not account for individual variations.".into(),
        "In case of emergency symptoms, seek immediate medical attention - do not rely solely on this report.".into(),
        format!("{brand} and its AI systems are not liable for any medical decisions made based on this report."),
    ]
}

fn disclaimer_block(brand: &str) -> Block {
    let mut disclaimer = Block::panel(PANEL).line(BlockLine::new(
        "IMPORTANT MEDICAL DISCLAIMER",
        TextStyle::bold(13.0).with_color(ALERT_RED),
    ));
    for line in disclaimer_lines(brand) {
        disclaimer.push(BlockLine::bullet(line, TextStyle::small()));
    }
    disclaimer
}

/// Disclaimer block, verification code and report metadata.
///
/// A failing code generator only drops the image and its caption; the rest
/// of the footer is always drawn.
pub(crate) fn render(
    w: &mut ReportWriter<'_>,
    report_id: &str,
    generated_at: DateTime<Utc>,
    payload: &str,
    generator: &dyn CodeImageGenerator,
) {
    let disclaimer = disclaimer_block(&w.config.brand_name);
    let width = w.canvas.content_width();
    w.canvas.reserve_block(width, &disclaimer);
    w.canvas.mark_section(MEDICAL_DISCLAIMER);
    w.full_width_block(&disclaimer);
    w.canvas.advance(8.0);

    w.canvas.ensure_space(FOOTER_HEIGHT);
    let top = w.canvas.cursor();
    let code_x = w.canvas.right() - CODE_SIZE;

    match generator.generate(payload) {
        Ok(image) => {
            w.canvas.push(DrawOp::CodeImage {
                x: code_x,
                y: top,
                size: CODE_SIZE,
                payload: payload.to_string(),
                image,
            });
            let caption = TextStyle::new(8.0, FontStyle::Regular, MUTED, 4.0);
            w.canvas.push(DrawOp::text(
                code_x,
                top + CODE_SIZE + 4.0,
                caption,
                "Scan for digital verification",
            ));
        }
        Err(e) => {
            tracing::warn!(report_id, error = %e, "verification code omitted");
            w.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::AssetGenerationFailure,
                message: format!("verification code omitted: {e}"),
            });
        }
    }

    let meta = TextStyle::new(8.0, FontStyle::Regular, MUTED, 6.0);
    let brand = TextStyle::new(8.0, FontStyle::Bold, BRAND_BLUE, 6.0);
    let column = code_x - w.canvas.left() - 5.0;
    let x = w.canvas.left();
    let generated = generated_at.format("%d %B %Y, %H:%M UTC");
    let config = w.config;
    let page = w.canvas.page_count();

    w.canvas.advance(3.0);
    w.canvas.paragraph(x, column, &format!("Report ID: {report_id}"), meta);
    w.canvas.paragraph(
        x,
        column,
        &format!("Generated by {} on {generated}", config.brand_name),
        meta,
    );
    w.canvas.paragraph(
        x,
        column,
        &format!(
            "AI Model: {} | Region: {}",
            config.model_label, config.region_label
        ),
        meta,
    );
    w.canvas.advance(4.0);
    w.canvas.paragraph(x, column, &config.platform_line, brand);
    w.canvas.paragraph(x, column, &config.contact_line, brand);

    // `top` belongs to the page the footer started on.
    let bottom = top + FOOTER_HEIGHT;
    if w.canvas.page_count() == page && w.canvas.cursor() < bottom {
        w.canvas.set_cursor(bottom);
    }
}

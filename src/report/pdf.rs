//! PDF serialization via `printpdf`, plus file export.
//!
//! The display list is in top-down millimetres; PDF user space is bottom-up,
//! so every y is flipped against the page height here and nowhere else.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::lopdf;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use time::OffsetDateTime;

use crate::error::ReportError;

use super::canvas::{DrawOp, FontStyle, PT_TO_MM};
use super::document::ReportDocument;
use super::palette;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Segments used to approximate a full circle.
const CIRCLE_SEGMENTS: usize = 48;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

fn pdf_err(context: &str, e: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(format!("{context}: {e}"))
}

/// Renders a finished document to PDF bytes. The output depends only on the
/// document, so repeated calls return identical bytes.
pub(crate) fn render_pdf(doc: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let geometry = doc.geometry;
    let (width, height) = (Mm(geometry.width_mm), Mm(geometry.height_mm));
    let stamp = OffsetDateTime::from_unix_timestamp(doc.generated_at.timestamp())
        .map_err(|e| pdf_err("PDF date error", e))?;

    let (pdf, page1, layer1) = PdfDocument::new(doc.title.as_str(), width, height, "Layer 1");
    let pdf = pdf
        .with_document_id(doc.report_id.clone())
        .with_creation_date(stamp)
        .with_mod_date(stamp)
        .with_metadata_date(stamp);
    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| pdf_err("PDF font error", e))?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| pdf_err("PDF font error", e))?,
        italic: pdf
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| pdf_err("PDF font error", e))?,
    };

    for (i, page) in doc.pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (page1, layer1)
        } else {
            pdf.add_page(width, height, format!("Page {}", i + 1))
        };
        let layer = pdf.get_page(page_index).get_layer(layer_index);
        for op in &page.ops {
            draw_op(&layer, &fonts, geometry.height_mm, op);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    pdf.save(&mut buf)
        .map_err(|e| pdf_err("PDF save error", e))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| pdf_err("PDF buffer error", e))?;
    pin_trailer_id(&bytes, &doc.report_id)
}

/// printpdf writes a fresh random trailer `/ID` pair on every save and has no
/// setter for it. Both halves are replaced with the report id.
fn pin_trailer_id(bytes: &[u8], report_id: &str) -> Result<Vec<u8>, ReportError> {
    let mut pdf =
        lopdf::Document::load_mem(bytes).map_err(|e| pdf_err("PDF reload error", e))?;
    let id = lopdf::Object::String(report_id.as_bytes().to_vec(), lopdf::StringFormat::Literal);
    pdf.trailer.set("ID", lopdf::Object::Array(vec![id.clone(), id]));

    let mut out = Vec::with_capacity(bytes.len());
    pdf.save_to(&mut out)
        .map_err(|e| pdf_err("PDF save error", e))?;
    Ok(out)
}

fn draw_op(layer: &PdfLayerReference, fonts: &Fonts, page_height: f32, op: &DrawOp) {
    let flip = |x: f32, y: f32| (Point::new(Mm(x), Mm(page_height - y)), false);

    match op {
        DrawOp::Text {
            x,
            y,
            size_pt,
            font,
            color,
            text,
        } => {
            let text = pdf_safe_text(text);
            if text.is_empty() {
                return;
            }
            layer.set_fill_color(to_color(*color));
            layer.use_text(text, *size_pt, Mm(*x), Mm(page_height - y), fonts.get(*font));
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let ring = vec![
                flip(*x, *y),
                flip(x + width, *y),
                flip(x + width, y + height),
                flip(*x, y + height),
            ];
            let mode = match (fill, stroke) {
                (Some(_), Some(_)) => PaintMode::FillStroke,
                (Some(_), None) => PaintMode::Fill,
                (None, Some(_)) => PaintMode::Stroke,
                (None, None) => return,
            };
            if let Some(fill) = fill {
                layer.set_fill_color(to_color(*fill));
            }
            if let Some(stroke) = stroke {
                layer.set_outline_color(to_color(*stroke));
                layer.set_outline_thickness(0.8);
            }
            add_ring(layer, ring, mode);
        }
        DrawOp::Circle {
            cx,
            cy,
            radius,
            fill,
        } => {
            let ring = (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let theta = (i as f32) * std::f32::consts::TAU / CIRCLE_SEGMENTS as f32;
                    flip(cx + radius * theta.sin(), cy - radius * theta.cos())
                })
                .collect();
            layer.set_fill_color(to_color(*fill));
            add_ring(layer, ring, PaintMode::Fill);
        }
        DrawOp::Sector {
            cx,
            cy,
            radius,
            sweep_deg,
            fill,
        } => {
            if *sweep_deg <= 0.0 {
                return;
            }
            let sweep = sweep_deg.min(360.0).to_radians();
            let steps = ((sweep_deg / 4.0).ceil() as usize).max(2);
            let mut ring = vec![flip(*cx, *cy)];
            for i in 0..=steps {
                let theta = sweep * i as f32 / steps as f32;
                ring.push(flip(cx + radius * theta.sin(), cy - radius * theta.cos()));
            }
            layer.set_fill_color(to_color(*fill));
            add_ring(layer, ring, PaintMode::Fill);
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        } => {
            layer.set_outline_color(to_color(*color));
            layer.set_outline_thickness(width / PT_TO_MM);
            layer.add_line(Line {
                points: vec![flip(*x1, *y1), flip(*x2, *y2)],
                is_closed: false,
            });
        }
        DrawOp::CodeImage {
            x, y, size, image, ..
        } => {
            if image.width == 0 {
                return;
            }
            let module = size / image.width as f32;
            layer.set_fill_color(to_color(palette::BLACK));
            for (row, start, len) in image.dark_runs() {
                let left = x + start as f32 * module;
                let top = y + row as f32 * module;
                let right = left + len as f32 * module;
                let bottom = top + module;
                let ring = vec![
                    flip(left, top),
                    flip(right, top),
                    flip(right, bottom),
                    flip(left, bottom),
                ];
                add_ring(layer, ring, PaintMode::Fill);
            }
        }
    }
}

fn add_ring(layer: &PdfLayerReference, ring: Vec<(Point, bool)>, mode: PaintMode) {
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode,
        winding_order: WindingOrder::NonZero,
    });
}

fn to_color(rgb: palette::Rgb) -> Color {
    Color::Rgb(Rgb::new(
        rgb.0 as f32 / 255.0,
        rgb.1 as f32 / 255.0,
        rgb.2 as f32 / 255.0,
        None,
    ))
}

/// Maps text onto what the built-in Helvetica faces can show: typographic
/// punctuation becomes ASCII, the rupee sign becomes "Rs.", and emoji,
/// control characters and anything else outside Latin-1 are dropped.
pub fn pdf_safe_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' => out.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{00B7}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{20B9}' => out.push_str("Rs."),
            '\u{2264}' => out.push_str("<="),
            '\u{2265}' => out.push_str(">="),
            '\u{2192}' => out.push_str("->"),
            '\t' | '\n' | '\r' => out.push(' '),
            c if c.is_control() => {}
            c if (c as u32) <= 0xFF => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Strips path separators and maps anything unusual to `_`.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut sanitized = sanitized;
    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", ".");
    }
    let sanitized = sanitized.trim_start_matches('.').to_string();

    let sanitized: String = sanitized.chars().take(100).collect();

    if sanitized.is_empty() {
        "report".into()
    } else {
        sanitized
    }
}

/// Sanitized filename guaranteed to end in `.pdf`.
pub fn pdf_filename(name: &str) -> String {
    let sanitized = sanitize_filename(name);
    if sanitized.to_ascii_lowercase().ends_with(".pdf") {
        sanitized
    } else {
        format!("{sanitized}.pdf")
    }
}

/// Saves PDF bytes under `dir`, creating it when missing.
pub fn export_pdf_to_file(
    pdf_bytes: &[u8],
    filename: &str,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(pdf_filename(filename));
    std::fs::write(&path, pdf_bytes)?;
    tracing::info!(path = %path.display(), bytes = pdf_bytes.len(), "report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_text_maps_typography() {
        assert_eq!(pdf_safe_text("Cost: \u{20B9}120 \u{2014} generic"), "Cost: Rs.120 - generic");
        assert_eq!(pdf_safe_text("\u{201C}quoted\u{201D}"), "\"quoted\"");
        assert_eq!(pdf_safe_text("\u{1F6A8} EMERGENCY"), "EMERGENCY");
        assert_eq!(pdf_safe_text("caf\u{00E9}"), "caf\u{00E9}");
    }

    #[test]
    fn sanitize_path_traversal() {
        let result = sanitize_filename("../../etc/passwd");
        assert!(!result.contains(".."));
        assert!(!result.contains('/'));
    }

    #[test]
    fn sanitize_special_chars() {
        assert_eq!(sanitize_filename("report (1).pdf"), "report__1_.pdf");
    }

    #[test]
    fn sanitize_long_name() {
        let long = "a".repeat(300);
        assert_eq!(sanitize_filename(&long).len(), 100);
    }

    #[test]
    fn sanitize_empty_name() {
        assert_eq!(sanitize_filename(""), "report");
        assert_eq!(sanitize_filename("///"), "report");
    }

    #[test]
    fn pdf_extension_added_once() {
        assert_eq!(pdf_filename("summary"), "summary.pdf");
        assert_eq!(pdf_filename("summary.PDF"), "summary.PDF");
    }

    #[test]
    fn test_export_pdf_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");
        let pdf_bytes = b"%PDF-1.4 test content";

        let path = export_pdf_to_file(pdf_bytes, "test report", &dir).unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), pdf_bytes);
        assert!(path.ends_with("test_report.pdf"));
    }
}

//! Paginated display list with a single vertical cursor.
//!
//! Coordinates are millimetres from the top-left corner of the page; the PDF
//! serializer flips them. Every helper that draws reserves its height with
//! [`Canvas::ensure_space`] first, so nothing lands below
//! `PageGeometry::content_bottom()`.

use serde::Serialize;

use crate::config::PageGeometry;

use super::palette::{Rgb, BLACK, RULE};
use super::verification::CodeImage;

/// Points to millimetres.
pub const PT_TO_MM: f32 = 0.352_778;

/// Glyph extents relative to the font size, used for layout and bounds.
const ASCENT: f32 = 0.85;
const DESCENT: f32 = 0.25;

/// Average Helvetica advance width as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size_pt: f32,
    pub font: FontStyle,
    pub color: Rgb,
    /// Vertical advance per line, never less than the glyph box.
    pub line_height: f32,
}

impl TextStyle {
    pub fn new(size_pt: f32, font: FontStyle, color: Rgb, line_height: f32) -> Self {
        let glyph_box = size_pt * PT_TO_MM * (ASCENT + DESCENT);
        Self {
            size_pt,
            font,
            color,
            line_height: line_height.max(glyph_box),
        }
    }

    pub fn body() -> Self {
        Self::new(10.0, FontStyle::Regular, BLACK, 6.0)
    }

    pub fn bold(size_pt: f32) -> Self {
        Self::new(size_pt, FontStyle::Bold, BLACK, size_pt * 0.75)
    }

    pub fn small() -> Self {
        Self::new(9.0, FontStyle::Regular, BLACK, 5.0)
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    pub fn size_mm(&self) -> f32 {
        self.size_pt * PT_TO_MM
    }

    /// Baseline for a line whose slot starts at `top`.
    pub fn baseline(&self, top: f32) -> f32 {
        top + self.size_mm() * ASCENT
    }
}

/// A positioned drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        x: f32,
        /// Baseline.
        y: f32,
        size_pt: f32,
        font: FontStyle,
        color: Rgb,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        fill: Rgb,
    },
    /// Pie slice starting at 12 o'clock, sweeping clockwise.
    Sector {
        cx: f32,
        cy: f32,
        radius: f32,
        sweep_deg: f32,
        fill: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
    CodeImage {
        x: f32,
        y: f32,
        size: f32,
        payload: String,
        image: CodeImage,
    },
}

impl DrawOp {
    pub fn text(x: f32, baseline: f32, style: TextStyle, text: impl Into<String>) -> Self {
        Self::Text {
            x,
            y: baseline,
            size_pt: style.size_pt,
            font: style.font,
            color: style.color,
            text: text.into(),
        }
    }

    /// Top and bottom y of the area the operation paints.
    pub fn vertical_extent(&self) -> (f32, f32) {
        match self {
            Self::Text { y, size_pt, .. } => {
                let size = size_pt * PT_TO_MM;
                (y - size * ASCENT, y + size * DESCENT)
            }
            Self::Rect { y, height, .. } => (*y, y + height),
            Self::Circle { cy, radius, .. } | Self::Sector { cy, radius, .. } => {
                (cy - radius, cy + radius)
            }
            Self::Line { y1, y2, width, .. } => {
                (y1.min(*y2) - width / 2.0, y1.max(*y2) + width / 2.0)
            }
            Self::CodeImage { y, size, .. } => (*y, y + size),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Lowest painted y on the page, or `None` for a blank page.
    pub fn lowest_extent(&self) -> Option<f32> {
        self.ops
            .iter()
            .map(|op| op.vertical_extent().1)
            .reduce(f32::max)
    }
}

/// Where a section began, for navigation and structural comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMark {
    pub title: String,
    /// 1-based.
    pub page: usize,
}

/// One line inside a [`Block`].
#[derive(Debug, Clone)]
pub struct BlockLine {
    pub text: String,
    pub style: TextStyle,
    pub indent: f32,
    pub bullet: bool,
}

impl BlockLine {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            indent: 0.0,
            bullet: false,
        }
    }

    pub fn bullet(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            indent: 5.0,
            bullet: true,
        }
    }

    pub fn indented(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }
}

/// A framed run of wrapped text. Kept on one page when it fits on one,
/// otherwise continued across pages with the frame redrawn per page.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub padding: f32,
    pub lines: Vec<BlockLine>,
}

impl Block {
    pub fn panel(fill: Rgb) -> Self {
        Self {
            fill: Some(fill),
            stroke: None,
            padding: 4.0,
            lines: Vec::new(),
        }
    }

    pub fn card(fill: Rgb, stroke: Rgb) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            padding: 4.0,
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, line: BlockLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn push(&mut self, line: BlockLine) {
        self.lines.push(line);
    }
}

/// Single-owner drawing surface for one document.
#[derive(Debug)]
pub struct Canvas {
    geometry: PageGeometry,
    pages: Vec<Page>,
    cursor: f32,
    sections: Vec<SectionMark>,
}

impl Canvas {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            cursor: geometry.top_mm,
            sections: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Space left above the bottom margin on the current page.
    pub fn remaining(&self) -> f32 {
        self.geometry.content_bottom() - self.cursor
    }

    pub fn left(&self) -> f32 {
        self.geometry.margin_mm
    }

    pub fn right(&self) -> f32 {
        self.geometry.width_mm - self.geometry.margin_mm
    }

    pub fn content_width(&self) -> f32 {
        self.geometry.content_width()
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.geometry.top_mm;
        tracing::debug!(page = self.pages.len(), "page break");
    }

    /// Starts a new page unless the current one is still blank.
    pub fn start_fresh_page(&mut self) {
        if self.current_page().ops.is_empty() {
            self.cursor = self.geometry.top_mm;
        } else {
            self.new_page();
        }
    }

    /// Breaks the page when `required` mm do not fit below the cursor.
    /// Returns true when a break happened.
    pub fn ensure_space(&mut self, required: f32) -> bool {
        if self.cursor + required > self.geometry.content_bottom() {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        let bottom = op.vertical_extent().1;
        if bottom > self.geometry.content_bottom() + 0.01 {
            tracing::warn!(
                bottom,
                limit = self.geometry.content_bottom(),
                "draw operation crosses bottom margin"
            );
        }
        self.current_page_mut().ops.push(op);
    }

    pub fn mark_section(&mut self, title: &str) {
        self.sections.push(SectionMark {
            title: title.to_string(),
            page: self.pages.len(),
        });
    }

    // ─── Text ─────────────────────────────────────────────────────────────

    /// Draws one unwrapped line in a slot of `style.line_height`.
    pub fn text_line(&mut self, x: f32, text: &str, style: TextStyle) {
        self.ensure_space(style.line_height);
        let baseline = style.baseline(self.cursor);
        self.push(DrawOp::text(x, baseline, style, text));
        self.cursor += style.line_height;
    }

    /// Word-wrapped paragraph; each line may break the page on its own.
    pub fn paragraph(&mut self, x: f32, width: f32, text: &str, style: TextStyle) {
        for line in wrap_text(text, chars_per_line(width, style.size_pt)) {
            self.text_line(x, &line, style);
        }
    }

    pub fn bullet_list(&mut self, x: f32, width: f32, items: &[String], style: TextStyle) {
        for item in items {
            self.bullet_item(x, width, item, style);
        }
    }

    pub fn bullet_item(&mut self, x: f32, width: f32, item: &str, style: TextStyle) {
        let text_x = x + 4.0;
        let lines = wrap_text(item, chars_per_line(width - 4.0, style.size_pt));
        for (i, line) in lines.iter().enumerate() {
            self.ensure_space(style.line_height);
            if i == 0 {
                self.push(bullet_dot(x + 1.5, self.cursor, style));
            }
            let baseline = style.baseline(self.cursor);
            self.push(DrawOp::text(text_x, baseline, style, line.as_str()));
            self.cursor += style.line_height;
        }
    }

    pub fn numbered_list(&mut self, x: f32, width: f32, items: &[String], style: TextStyle) {
        for (i, item) in items.iter().enumerate() {
            let text = format!("{}. {}", i + 1, item);
            self.paragraph(x, width, &text, style);
        }
    }

    /// Thin horizontal rule across the content width.
    pub fn separator(&mut self) {
        self.ensure_space(1.0);
        let y = self.cursor;
        self.push(DrawOp::Line {
            x1: self.left(),
            y1: y,
            x2: self.right(),
            y2: y,
            color: RULE,
            width: 0.5,
        });
        self.cursor += 10.0;
    }

    // ─── Blocks ───────────────────────────────────────────────────────────

    /// Height the block needs when laid out unbroken at `width`.
    pub fn block_height(&self, width: f32, block: &Block) -> f32 {
        let rows = layout_block_rows(block, width);
        if rows.is_empty() {
            return 0.0;
        }
        rows.iter().map(|r| r.style.line_height).sum::<f32>() + 2.0 * block.padding
    }

    /// Reserves room for `block` when it can fit on one page, so anything
    /// recorded before drawing it lands on the same page.
    pub fn reserve_block(&mut self, width: f32, block: &Block) {
        let total = self.block_height(width, block);
        if total <= self.geometry.usable_height() {
            self.ensure_space(total);
        }
    }

    /// Lays out a framed block at `x` spanning `width`.
    pub fn block(&mut self, x: f32, width: f32, block: &Block) {
        let rows = layout_block_rows(block, width);
        if rows.is_empty() {
            return;
        }

        let total: f32 = rows.iter().map(|r| r.style.line_height).sum::<f32>() + 2.0 * block.padding;
        if total <= self.geometry.usable_height() {
            self.ensure_space(total);
        }

        let mut start = 0;
        while start < rows.len() {
            self.ensure_space(2.0 * block.padding + rows[start].style.line_height);

            let budget = self.remaining() - 2.0 * block.padding;
            let mut end = start;
            let mut used = 0.0;
            while end < rows.len() && used + rows[end].style.line_height <= budget {
                used += rows[end].style.line_height;
                end += 1;
            }
            if end == start {
                used = rows[start].style.line_height;
                end = start + 1;
            }

            let top = self.cursor;
            if block.fill.is_some() || block.stroke.is_some() {
                self.push(DrawOp::Rect {
                    x,
                    y: top,
                    width,
                    height: used + 2.0 * block.padding,
                    fill: block.fill,
                    stroke: block.stroke,
                });
            }

            let mut y = top + block.padding;
            for row in &rows[start..end] {
                let text_x = x + block.padding + row.indent;
                if row.bullet {
                    self.push(bullet_dot(text_x - 2.5, y, row.style));
                }
                self.push(DrawOp::text(text_x, row.style.baseline(y), row.style, row.text.as_str()));
                y += row.style.line_height;
            }

            self.cursor = top + used + 2.0 * block.padding;
            start = end;
            if start < rows.len() {
                self.new_page();
            }
        }
    }

    // ─── Finish ───────────────────────────────────────────────────────────

    fn current_page(&self) -> &Page {
        let last = self.pages.len() - 1;
        &self.pages[last]
    }

    fn current_page_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn sections(&self) -> &[SectionMark] {
        &self.sections
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_parts(self) -> (PageGeometry, Vec<Page>, Vec<SectionMark>) {
        (self.geometry, self.pages, self.sections)
    }
}

struct BlockRow {
    text: String,
    style: TextStyle,
    indent: f32,
    bullet: bool,
}

fn layout_block_rows(block: &Block, width: f32) -> Vec<BlockRow> {
    let mut rows = Vec::new();
    for line in &block.lines {
        let text_width = width - 2.0 * block.padding - line.indent;
        let wrapped = wrap_text(&line.text, chars_per_line(text_width, line.style.size_pt));
        for (i, text) in wrapped.into_iter().enumerate() {
            rows.push(BlockRow {
                text,
                style: line.style,
                indent: line.indent,
                bullet: line.bullet && i == 0,
            });
        }
    }
    rows
}

fn bullet_dot(x: f32, slot_top: f32, style: TextStyle) -> DrawOp {
    let size = style.size_mm();
    DrawOp::Circle {
        cx: x,
        cy: slot_top + size * ASCENT * 0.65,
        radius: (size * 0.18).max(0.5),
        fill: style.color,
    }
}

/// How many average-width characters fit in `width_mm` at `size_pt`.
pub fn chars_per_line(width_mm: f32, size_pt: f32) -> usize {
    let per_char = size_pt * PT_TO_MM * AVG_CHAR_WIDTH;
    if per_char <= 0.0 {
        return 1;
    }
    ((width_mm / per_char).floor() as usize).max(1)
}

/// Simple word-wrap helper. Words longer than a line are split hard.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(max_chars);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
        let word_len = chars.len();
        if word_len == 0 {
            continue;
        }

        if current_len + word_len + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

//! PDF output surface
//!
//! Wraps a [`RecordingSurface`] and, on [`PdfSurface::finish`], turns its
//! display list into one content stream per page with `pdf-writer`. Text is
//! set in the built-in Helvetica font with `WinAnsiEncoding`; characters
//! outside Latin-1 are written as `?`.

use super::metrics;
use super::recording::{DrawOp, RecordingSurface, TextOp};
use super::{Margins, PageGeometry, PageSize, Point, Surface, TextOptions};
use crate::color::Color;
use crate::error::Result;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::path::Path;

const FONT_NAME: Name<'static> = Name(b"F1");

/// Surface producing a PDF document
#[derive(Debug, Clone, Default)]
pub struct PdfSurface {
    recording: RecordingSurface,
}

impl PdfSurface {
    pub fn new(size: PageSize, margins: Margins) -> Self {
        Self {
            recording: RecordingSurface::new(size, margins),
        }
    }

    /// Display list recorded so far
    pub fn recording(&self) -> &RecordingSurface {
        &self.recording
    }

    /// Serialise all pages to PDF bytes
    pub fn finish(&self) -> Vec<u8> {
        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let page_tree_id = alloc();
        let font_id = alloc();

        let pages = self.recording.pages();
        let page_refs: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc())).collect();

        pdf.catalog(catalog_id).pages(page_tree_id);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let count = page_refs.len() as i32;
        pdf.pages(page_tree_id)
            .kids(page_refs.iter().map(|(page_id, _)| *page_id))
            .count(count);

        for (index, (geometry, (page_id, content_id))) in pages.iter().zip(&page_refs).enumerate() {
            {
                let mut page = pdf.page(*page_id);
                page.media_box(Rect::new(0.0, 0.0, geometry.size.width, geometry.size.height));
                page.parent(page_tree_id);
                page.contents(*content_id);
                page.resources().fonts().pair(FONT_NAME, font_id);
            }

            let content = page_content(&self.recording, index, geometry);
            pdf.stream(*content_id, &content.finish());
        }

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        pdf.finish()
    }

    /// Write the document to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.finish();
        std::fs::write(path.as_ref(), &bytes)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            bytes = bytes.len(),
            pages = self.recording.page_count(),
            "saved pdf"
        );
        Ok(())
    }
}

fn page_content(recording: &RecordingSurface, index: usize, geometry: &PageGeometry) -> Content {
    let height = geometry.size.height;
    let mut content = Content::new();

    for op in recording.ops().iter().filter(|op| op.page() == index) {
        match op {
            DrawOp::AddPage { .. } => {}
            DrawOp::Text(text) => write_text(&mut content, text, height),
            DrawOp::Rectangle {
                x,
                y,
                width,
                height: h,
                ..
            } => {
                content.rect(*x, height - y - h, *width, *h);
            }
            DrawOp::Line { x1, y1, x2, y2, .. } => {
                content.move_to(*x1, height - y1);
                content.line_to(*x2, height - y2);
            }
            DrawOp::Stroke { .. } => {
                content.stroke();
            }
        }
    }
    content
}

fn write_text(content: &mut Content, text: &TextOp, page_height: f32) {
    let Color { r, g, b } = text.color;
    let baseline_offset = text.font_size * metrics::ASCENT_RATIO;

    content.save_state();
    content.set_fill_rgb(r, g, b);
    for (i, line) in text.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let x = text.line_left(i);
        let baseline = page_height - (text.line_top(i) + baseline_offset);
        let bytes = encode_win_ansi(line);
        content
            .begin_text()
            .set_font(FONT_NAME, text.font_size)
            .next_line(x, baseline)
            .show(Str(&bytes))
            .end_text();

        if text.underline {
            let underline_y = baseline - text.font_size * 0.1;
            let thickness = if text.font_size < 20.0 {
                0.5
            } else {
                text.font_size / 40.0
            };
            content.set_stroke_rgb(r, g, b);
            content.set_line_width(thickness);
            content.move_to(x, underline_y);
            content.line_to(x + metrics::text_width(line, text.font_size), underline_y);
            content.stroke();
        }
    }
    content.restore_state();
}

/// Characters WinAnsiEncoding places in 0x80..=0x9F
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => u8::try_from(u32::from(c)).unwrap_or(b'?'),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(ch, _)| *ch == c)
            .map_or(b'?', |(_, byte)| *byte),
    }
}

fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

impl Surface for PdfSurface {
    fn page(&self) -> PageGeometry {
        self.recording.page()
    }

    fn set_margins(&mut self, margins: Margins) {
        self.recording.set_margins(margins);
    }

    fn page_count(&self) -> usize {
        self.recording.page_count()
    }

    fn add_page(&mut self) {
        self.recording.add_page();
    }

    fn cursor(&self) -> Point {
        self.recording.cursor()
    }

    fn set_cursor(&mut self, x: f32, y: f32) {
        self.recording.set_cursor(x, y);
    }

    fn font_size(&self) -> f32 {
        self.recording.font_size()
    }

    fn set_font_size(&mut self, size: f32) {
        self.recording.set_font_size(size);
    }

    fn line_gap(&self) -> f32 {
        self.recording.line_gap()
    }

    fn set_line_gap(&mut self, gap: f32) {
        self.recording.set_line_gap(gap);
    }

    fn fill_color(&self) -> Color {
        self.recording.fill_color()
    }

    fn set_fill_color(&mut self, color: Color) {
        self.recording.set_fill_color(color);
    }

    fn line_height(&self) -> f32 {
        self.recording.line_height()
    }

    fn measure_wrapped_height(&self, text: &str, width: f32) -> f32 {
        self.recording.measure_wrapped_height(text, width)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, options: &TextOptions) {
        self.recording.draw_text(text, x, y, options);
    }

    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.recording.draw_rectangle(x, y, width, height);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.recording.draw_line(x1, y1, x2, y2);
    }

    fn stroke(&mut self) {
        self.recording.stroke();
    }
}

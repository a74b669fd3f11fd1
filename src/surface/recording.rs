//! Recording surface
//!
//! Lays text out with the Helvetica metrics and keeps every drawing call as
//! a [`DrawOp`]. The op list is the display list [`PdfSurface`] serialises,
//! and what tests assert against.
//!
//! [`PdfSurface`]: super::PdfSurface

use super::metrics;
use super::{Align, Margins, PageGeometry, PageSize, Point, Surface, TextOptions};
use crate::color::Color;

/// One `draw_text` call after wrapping
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    /// Zero-based page index
    pub page: usize,
    pub x: f32,
    pub y: f32,
    /// Wrap width the text was laid out in
    pub width: f32,
    /// Text as passed to `draw_text`
    pub text: String,
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_gap: f32,
    pub color: Color,
    pub align: Align,
    pub underline: bool,
}

impl TextOp {
    /// Distance between the tops of two consecutive lines
    pub fn line_advance(&self) -> f32 {
        metrics::line_height(self.font_size) + self.line_gap
    }

    /// Top of line `index`
    pub fn line_top(&self, index: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let index = index as f32;
        self.y + index * self.line_advance()
    }

    /// Left edge of line `index` after alignment
    pub fn line_left(&self, index: usize) -> f32 {
        let line_width = self
            .lines
            .get(index)
            .map_or(0.0, |line| metrics::text_width(line, self.font_size));
        let slack = (self.width - line_width).max(0.0);
        match self.align {
            Align::Left => self.x,
            Align::Center => self.x + slack / 2.0,
            Align::Right => self.x + slack,
        }
    }
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    AddPage {
        page: usize,
    },
    Text(TextOp),
    Rectangle {
        page: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Line {
        page: usize,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Stroke {
        page: usize,
    },
}

impl DrawOp {
    pub fn page(&self) -> usize {
        match self {
            DrawOp::AddPage { page }
            | DrawOp::Rectangle { page, .. }
            | DrawOp::Line { page, .. }
            | DrawOp::Stroke { page } => *page,
            DrawOp::Text(text) => text.page,
        }
    }
}

/// Surface that records drawing calls instead of producing output
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    geometry: PageGeometry,
    pages: Vec<PageGeometry>,
    ops: Vec<DrawOp>,
    cursor: Point,
    font_size: f32,
    line_gap: f32,
    fill_color: Color,
}

impl RecordingSurface {
    /// Create a surface with no pages
    pub fn new(size: PageSize, margins: Margins) -> Self {
        let geometry = PageGeometry::new(size, margins);
        Self {
            geometry,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor: Point::new(margins.left, margins.top),
            font_size: 12.0,
            line_gap: 0.0,
            fill_color: Color::BLACK,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Geometry of every page, in page order
    pub fn pages(&self) -> &[PageGeometry] {
        &self.pages
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rectangle_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rectangle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    /// Forget recorded ops, keeping pages and text state
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    fn current_page(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(PageSize::default(), Margins::default())
    }
}

impl Surface for RecordingSurface {
    fn page(&self) -> PageGeometry {
        self.geometry
    }

    fn set_margins(&mut self, margins: Margins) {
        self.geometry.margins = margins;
        if let Some(page) = self.pages.last_mut() {
            page.margins = margins;
        }
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_page(&mut self) {
        self.pages.push(self.geometry);
        self.ops.push(DrawOp::AddPage {
            page: self.current_page(),
        });
        self.cursor = Point::new(self.geometry.content_left(), self.geometry.content_top());
    }

    fn cursor(&self) -> Point {
        self.cursor
    }

    fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Point::new(x, y);
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn line_gap(&self) -> f32 {
        self.line_gap
    }

    fn set_line_gap(&mut self, gap: f32) {
        self.line_gap = gap;
    }

    fn fill_color(&self) -> Color {
        self.fill_color
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn line_height(&self) -> f32 {
        metrics::line_height(self.font_size)
    }

    fn measure_wrapped_height(&self, text: &str, width: f32) -> f32 {
        let lines = metrics::wrap(text, width, self.font_size);
        #[allow(clippy::cast_precision_loss)]
        let count = lines.len() as f32;
        count * (self.line_height() + self.line_gap)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, options: &TextOptions) {
        let width = options
            .width
            .unwrap_or_else(|| self.geometry.content_right() - x)
            .max(0.0);
        let op = TextOp {
            page: self.current_page(),
            x,
            y,
            width,
            text: text.to_string(),
            lines: metrics::wrap(text, width, self.font_size),
            font_size: self.font_size,
            line_gap: self.line_gap,
            color: options.color.unwrap_or(self.fill_color),
            align: options.align,
            underline: options.underline,
        };
        let bottom = op.line_top(op.lines.len());
        self.ops.push(DrawOp::Text(op));
        self.cursor = Point::new(x, bottom);
    }

    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Rectangle {
            page: self.current_page(),
            x,
            y,
            width,
            height,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.push(DrawOp::Line {
            page: self.current_page(),
            x1,
            y1,
            x2,
            y2,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke {
            page: self.current_page(),
        });
    }
}

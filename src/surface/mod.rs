//! Drawing surfaces
//!
//! A [`Surface`] is the page-drawing engine the composition layer sits on.
//! It owns the page list, the text cursor and the current text state, and
//! exposes the primitives tables and headings are built from: wrapped text,
//! text measurement, rectangles, lines and page breaks.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downwards.
//!
//! Two surfaces ship with the crate:
//!
//! - [`RecordingSurface`] - lays text out and records every drawing call as a
//!   [`DrawOp`]; used for tests and dry-run layout
//! - [`PdfSurface`] - a recording surface that serialises to PDF bytes

pub mod metrics;
pub mod pdf;
pub mod recording;

pub use pdf::PdfSurface;
pub use recording::{DrawOp, RecordingSurface, TextOp};

use crate::color::Color;
use serde::{Deserialize, Serialize};

// ============================================================================
// Page Geometry
// ============================================================================

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            bottom: 50.0,
            left: 72.0,
            right: 72.0,
        }
    }
}

/// Size and margins of the current page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins) -> Self {
        Self { size, margins }
    }

    /// Page width minus the left and right margins
    pub fn content_width(&self) -> f32 {
        self.size.width - self.margins.left - self.margins.right
    }

    /// Page height minus the top and bottom margins
    pub fn content_height(&self) -> f32 {
        self.size.height - self.margins.top - self.margins.bottom
    }

    pub fn content_left(&self) -> f32 {
        self.margins.left
    }

    pub fn content_top(&self) -> f32 {
        self.margins.top
    }

    /// Lowest `y` content may reach before a page break
    pub fn content_bottom(&self) -> f32 {
        self.size.height - self.margins.bottom
    }

    pub fn content_right(&self) -> f32 {
        self.size.width - self.margins.right
    }
}

/// A position on the page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Text Options
// ============================================================================

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Options for a single text draw
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextOptions {
    /// Wrap width; defaults to the distance from `x` to the right margin
    pub width: Option<f32>,
    pub align: Align,
    pub underline: bool,
    /// Fill colour for this draw only; the surface colour otherwise
    pub color: Option<Color>,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Layer `other` on top of `self`: set fields in `other` win
    #[must_use]
    pub fn merge(self, other: &TextOptions) -> Self {
        Self {
            width: other.width.or(self.width),
            align: if other.align == Align::Left {
                self.align
            } else {
                other.align
            },
            underline: self.underline || other.underline,
            color: other.color.or(self.color),
        }
    }
}

// ============================================================================
// Surface Trait
// ============================================================================

/// Page-drawing engine consumed by [`Document`](crate::Document).
pub trait Surface {
    /// Geometry of the current page
    fn page(&self) -> PageGeometry;

    /// Replace the margins used for the current and following pages
    fn set_margins(&mut self, margins: Margins);

    /// Number of pages added so far
    fn page_count(&self) -> usize;

    /// Append a page and move the cursor to the top-left of its content area
    fn add_page(&mut self);

    fn cursor(&self) -> Point;

    fn set_cursor(&mut self, x: f32, y: f32);

    fn font_size(&self) -> f32;

    fn set_font_size(&mut self, size: f32);

    /// Extra space added after every wrapped line
    fn line_gap(&self) -> f32;

    fn set_line_gap(&mut self, gap: f32);

    fn fill_color(&self) -> Color;

    fn set_fill_color(&mut self, color: Color);

    /// Height of one line at the current font size, without the line gap
    fn line_height(&self) -> f32;

    /// Height of `text` wrapped at `width`, including the gap after the last line
    fn measure_wrapped_height(&self, text: &str, width: f32) -> f32;

    /// Draw wrapped text with its top-left corner at `(x, y)`.
    ///
    /// Leaves the cursor at `x`, below the last line and its gap.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, options: &TextOptions);

    /// Add a rectangle to the current path
    fn draw_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Add a line segment to the current path
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);

    /// Stroke and clear the current path
    fn stroke(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_geometry_content_box() {
        let geometry = PageGeometry::new(PageSize::LETTER, Margins::default());
        assert_eq!(geometry.content_width(), 612.0 - 144.0);
        assert_eq!(geometry.content_height(), 792.0 - 100.0);
        assert_eq!(geometry.content_bottom(), 742.0);
        assert_eq!(geometry.content_right(), 540.0);
    }

    #[test]
    fn test_text_options_merge() {
        let row = TextOptions::new().underlined();
        let cell = TextOptions::new()
            .with_align(Align::Right)
            .with_color(Color::GRAY);
        let merged = row.merge(&cell);
        assert!(merged.underline);
        assert_eq!(merged.align, Align::Right);
        assert_eq!(merged.color, Some(Color::GRAY));
        assert_eq!(merged.width, None);
    }

    #[test]
    fn test_margins_partial_json() {
        let margins: Margins = serde_json::from_str(r#"{"top": 20}"#).unwrap();
        assert_eq!(margins.top, 20.0);
        assert_eq!(margins.left, 72.0);
    }
}

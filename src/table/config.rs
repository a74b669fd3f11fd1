//! Table configuration

use crate::error::{Error, Result};
use crate::surface::{Align, PageGeometry, Point};
use serde::{Deserialize, Serialize};

// ============================================================================
// Columns
// ============================================================================

/// One table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Row field rendered in this column
    pub key: String,
    /// Header text; the key is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default)]
    pub align: Align,
    /// Share of the table width relative to the other columns
    #[serde(default = "default_col_span")]
    pub col_span: u32,
}

fn default_col_span() -> u32 {
    1
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: None,
            align: Align::Left,
            col_span: 1,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_span(mut self, col_span: u32) -> Self {
        self.col_span = col_span;
        self
    }

    /// Text drawn in the header row
    pub fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.key)
    }
}

// ============================================================================
// Paddings
// ============================================================================

/// Space between a cell's border and its content
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Padding {
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Cell paddings as configured: one number for all sides, or each side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellPaddings {
    Uniform(f32),
    Sides(Padding),
}

impl CellPaddings {
    pub fn resolve(self) -> Padding {
        match self {
            CellPaddings::Uniform(value) => Padding::uniform(value),
            CellPaddings::Sides(padding) => padding,
        }
    }
}

impl Default for CellPaddings {
    fn default() -> Self {
        CellPaddings::Uniform(5.0)
    }
}

impl From<f32> for CellPaddings {
    fn from(value: f32) -> Self {
        CellPaddings::Uniform(value)
    }
}

impl From<Padding> for CellPaddings {
    fn from(padding: Padding) -> Self {
        CellPaddings::Sides(padding)
    }
}

// ============================================================================
// Table Config
// ============================================================================

/// Column width strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Widths from column spans only
    #[default]
    Fixed,
    /// Content-driven widths; not supported
    Auto,
}

/// Options for [`Document::table`](crate::Document::table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Total table width; the page content width when absent
    pub width: Option<f32>,
    /// Left edge; the left margin when absent
    pub x: Option<f32>,
    /// Top edge; the current cursor when absent
    pub y: Option<f32>,
    pub cell_paddings: CellPaddings,
    /// Draw a header row from the column headers
    pub header: bool,
    pub borders: bool,
    pub layout: Layout,
    pub columns: Vec<Column>,
    /// Draw the header row again after each page break
    pub repeat_header: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: None,
            x: None,
            y: None,
            cell_paddings: CellPaddings::default(),
            header: true,
            borders: true,
            layout: Layout::Fixed,
            columns: Vec::new(),
            repeat_header: false,
        }
    }
}

impl TableConfig {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Anchor the table's top-left corner
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_paddings(mut self, paddings: impl Into<CellPaddings>) -> Self {
        self.cell_paddings = paddings.into();
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_borders(mut self, borders: bool) -> Self {
        self.borders = borders;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_repeat_header(mut self, repeat_header: bool) -> Self {
        self.repeat_header = repeat_header;
        self
    }

    /// Fill defaults from the page and cursor and check the result
    pub fn resolve(&self, page: &PageGeometry, cursor: Point) -> Result<ResolvedConfig> {
        if self.layout == Layout::Auto {
            return Err(Error::unsupported("auto table layout"));
        }
        if self.columns.is_empty() {
            return Err(Error::config("table needs at least one column"));
        }
        if let Some(column) = self.columns.iter().find(|c| c.col_span == 0) {
            return Err(Error::config(format!(
                "column '{}' has a col_span of 0",
                column.key
            )));
        }

        let width = self.width.unwrap_or_else(|| page.content_width());
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::config(format!("table width must be positive, got {width}")));
        }

        let padding = self.cell_paddings.resolve();
        let sides = [padding.top, padding.bottom, padding.left, padding.right];
        if sides.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(Error::config("cell paddings must be non-negative"));
        }

        Ok(ResolvedConfig {
            x: self.x.unwrap_or_else(|| page.content_left()),
            y: self.y.unwrap_or(cursor.y),
            width,
            padding,
            header: self.header,
            borders: self.borders,
            // nothing to repeat without a first header row
            repeat_header: self.header && self.repeat_header,
        })
    }
}

/// A [`TableConfig`] with every default filled in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub padding: Padding,
    pub header: bool,
    pub borders: bool,
    pub repeat_header: bool,
}

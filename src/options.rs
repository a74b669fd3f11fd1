//! Document options
//!
//! Every field has a default, so options can be built with
//! `DocumentOptions::default()` and adjusted, or read from partial JSON:
//!
//! ```
//! use easy_pdf::DocumentOptions;
//!
//! let options = DocumentOptions::from_json_str(
//!     r#"{ "header": "Quarterly report", "line_gap": 2 }"#,
//! ).unwrap();
//! assert_eq!(options.margins.left, 72.0);
//! assert_eq!(options.header.unwrap().text, "Quarterly report");
//! ```

use crate::color::Color;
use crate::error::{Error, Result};
use crate::surface::{Margins, PageSize};
use crate::typography::TextSizes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Text repeated at the top of every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HeaderRepr")]
pub struct RunningHeader {
    pub text: String,
    /// Distance from the top edge of the page to the header text
    pub margin_top: f32,
    /// Space between the header text and the body
    pub margin_bottom: f32,
}

impl RunningHeader {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            margin_top: 0.0,
            margin_bottom: 0.0,
        }
    }

    pub fn with_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }
}

/// A header is either plain text or a full object
#[derive(Deserialize)]
#[serde(untagged)]
enum HeaderRepr {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        margin_top: f32,
        #[serde(default)]
        margin_bottom: f32,
    },
}

impl From<HeaderRepr> for RunningHeader {
    fn from(repr: HeaderRepr) -> Self {
        match repr {
            HeaderRepr::Text(text) => RunningHeader::new(text),
            HeaderRepr::Full {
                text,
                margin_top,
                margin_bottom,
            } => RunningHeader::new(text).with_margins(margin_top, margin_bottom),
        }
    }
}

/// Body and muted text colours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub primary: Color,
    /// Used for the running header
    pub secondary: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary: Color::BLACK,
            secondary: Color::GRAY,
        }
    }
}

/// Options fixed when a [`Document`](crate::Document) is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    pub page_size: PageSize,
    pub margins: Margins,
    /// Space added after every line of text
    pub line_gap: f32,
    pub text_sizes: TextSizes,
    pub header: Option<RunningHeader>,
    pub colors: Colors,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margins: Margins::default(),
            line_gap: 4.0,
            text_sizes: TextSizes::default(),
            header: None,
            colors: Colors::default(),
        }
    }
}

impl DocumentOptions {
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_line_gap(mut self, line_gap: f32) -> Self {
        self.line_gap = line_gap;
        self
    }

    pub fn with_text_sizes(mut self, text_sizes: TextSizes) -> Self {
        self.text_sizes = text_sizes;
        self
    }

    pub fn with_header(mut self, header: RunningHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    /// Parse options from JSON, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading document options");
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let PageSize { width, height } = self.page_size;
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::config(format!(
                "page size must be positive, got {width}x{height}"
            )));
        }
        let Margins {
            top,
            bottom,
            left,
            right,
        } = self.margins;
        if [top, bottom, left, right].iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(Error::config("margins must be non-negative"));
        }
        if left + right >= width || top + bottom >= height {
            return Err(Error::config("margins leave no room for content"));
        }
        if !self.line_gap.is_finite() || self.line_gap < 0.0 {
            return Err(Error::config(format!(
                "line gap must be non-negative, got {}",
                self.line_gap
            )));
        }
        self.text_sizes.validate()
    }
}

//! easy-pdf - document composition on top of a PDF drawing surface
//!
//! This crate adds three things to a low-level page-drawing engine:
//!
//! - **Multi-type text**: strings, numbers, booleans, dates, null and
//!   caller-defined values are turned into text by an ordered
//!   [`FormatterChain`]; custom formatters take precedence over the built-ins
//! - **Typography presets**: `h1`..`h6` and body text sizes, plus a running
//!   page header
//! - **Fixed layout tables**: span-weighted column widths, wrapped and padded
//!   cells, borders, per-cell drawing callbacks and automatic page breaks
//!
//! # Modules
//!
//! - `surface` - the [`Surface`] drawing trait, the PDF and recording surfaces
//! - `format` - values and formatters
//! - `table` - table configuration, cells and the row renderer
//! - `typography` - heading levels and presets
//!
//! # Example
//!
//! ```
//! use easy_pdf::table::{Column, Row, TableConfig};
//! use easy_pdf::{Document, DocumentOptions, HeadingLevel, TextOptions};
//!
//! let mut doc = Document::new(DocumentOptions::default())?;
//! doc.heading("Posts", HeadingLevel::H1, TextOptions::new().underlined())?
//!     .move_down(1.0);
//!
//! let config = TableConfig::new(vec![
//!     Column::new("title").with_header("Title").with_span(2),
//!     Column::new("published"),
//! ]);
//! doc.table(&config, vec![Row::new().with("title", "Hello").with("published", true)])?;
//!
//! let bytes = doc.finish();
//! assert!(bytes.starts_with(b"%PDF-"));
//! # Ok::<(), easy_pdf::Error>(())
//! ```

pub mod color;
pub mod document;
pub mod error;
pub mod format;
pub mod options;
pub mod surface;
pub mod table;
pub mod typography;

pub use color::Color;
pub use document::Document;
pub use error::{BoxError, Error, Result};
pub use format::{Formatter, FormatterChain, Value};
pub use options::{Colors, DocumentOptions, RunningHeader};
pub use surface::{
    Align, Margins, PageGeometry, PageSize, PdfSurface, Point, RecordingSurface, Surface,
    TextOptions,
};
pub use table::{Cell, CellArea, CellRenderer, Column, Row, TableConfig};
pub use typography::{HeadingLevel, HeadingPreset, TextSizes};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

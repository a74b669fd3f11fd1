//! Fixed layout tables
//!
//! Columns get a share of the table width proportional to their `col_span`;
//! content never changes column widths. Each row is as tall as its tallest
//! cell plus the vertical paddings, and moves to a new page when it would
//! cross the bottom margin.
//!
//! ```
//! use easy_pdf::surface::Surface;
//! use easy_pdf::table::{Cell, Column, Row, TableConfig};
//! use easy_pdf::{Document, DocumentOptions};
//!
//! let mut doc = Document::new(DocumentOptions::default())?;
//! let config = TableConfig::new(vec![
//!     Column::new("title").with_header("Title").with_span(2),
//!     Column::new("views"),
//! ]);
//! let rows = vec![
//!     Row::new().with("title", "Hello").with("views", 120),
//!     Row::new().with("title", "Chart").with(
//!         "views",
//!         Cell::render(|doc: &mut Document, area| {
//!             let rule = area.y + 4.0;
//!             doc.surface_mut().draw_line(area.x, rule, area.x + area.width, rule);
//!             Ok(8.0)
//!         }),
//!     ),
//! ];
//! doc.table(&config, rows)?;
//! assert_eq!(doc.page_count(), 1);
//! # Ok::<(), easy_pdf::Error>(())
//! ```

pub mod cell;
pub mod config;
pub mod geometry;
mod row;

pub use cell::{Cell, CellArea, CellRenderer, FnRenderer, Row, rows_from_json};
pub use config::{CellPaddings, Column, Layout, Padding, ResolvedConfig, TableConfig};
pub use geometry::ColumnLayout;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::surface::Surface;
use row::RowRenderer;
use tracing::debug;

/// Draw `rows` as a table at the document cursor.
///
/// Every row must have a cell for every column; this is checked for all
/// rows before anything is drawn. Afterwards the cursor is one line below
/// the table, at the table's left edge.
pub fn render_table<'a, S, I>(doc: &mut Document<S>, config: &TableConfig, rows: I) -> Result<()>
where
    S: Surface,
    I: IntoIterator<Item = Row<'a, S>>,
{
    let resolved = config.resolve(&doc.page(), doc.cursor())?;
    let layout = ColumnLayout::compute(&config.columns, resolved.x, resolved.width);
    if layout.narrowest() <= resolved.padding.horizontal() {
        return Err(Error::config(format!(
            "cell paddings ({}) leave no room in a {:.2}pt column",
            resolved.padding.horizontal(),
            layout.narrowest()
        )));
    }

    let rows: Vec<Row<'a, S>> = rows.into_iter().collect();
    for (index, row) in rows.iter().enumerate() {
        if let Some(column) = config.columns.iter().find(|c| !row.contains(&c.key)) {
            return Err(Error::MissingCell {
                column: column.key.clone(),
                row: index,
            });
        }
    }

    debug!(
        columns = config.columns.len(),
        rows = rows.len(),
        x = resolved.x,
        y = resolved.y,
        width = resolved.width,
        "rendering table"
    );

    let mut renderer = RowRenderer::new(&config.columns, layout, resolved);
    if resolved.header {
        renderer.render_header(doc)?;
    }

    for (index, mut row) in rows.into_iter().enumerate() {
        let mut cells = Vec::with_capacity(config.columns.len());
        for column in &config.columns {
            let cell = row.take(&column.key).ok_or_else(|| Error::MissingCell {
                column: column.key.clone(),
                row: index,
            })?;
            cells.push(cell);
        }
        renderer.render_body(doc, index, &mut cells)?;
    }

    doc.set_cursor(resolved.x, renderer.row_y());
    doc.move_down(1.0);
    debug!(page = doc.page_count(), bottom = renderer.row_y(), "table rendered");
    Ok(())
}

//! Row rendering: measure, break the page if needed, draw, advance

use super::cell::{Cell, CellArea};
use super::config::{Column, ResolvedConfig};
use super::geometry::ColumnLayout;
use crate::document::Document;
use crate::error::{BoxError, Error, Result};
use crate::format::Value;
use crate::surface::{PageGeometry, Surface, TextOptions};
use tracing::{debug, trace, warn};

/// Rows starting this close to the content top are treated as already at the top
const TOP_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowKind {
    Header,
    Body(usize),
}

impl RowKind {
    fn index(self) -> usize {
        match self {
            RowKind::Header => 0,
            RowKind::Body(index) => index,
        }
    }
}

/// Formatted text of a value cell
struct PreparedText {
    text: String,
    options: TextOptions,
}

/// Draws the rows of one table, tracking the top of the next row
pub(crate) struct RowRenderer<'c> {
    columns: &'c [Column],
    layout: ColumnLayout,
    config: ResolvedConfig,
    row_y: f32,
}

impl<'c> RowRenderer<'c> {
    pub(crate) fn new(columns: &'c [Column], layout: ColumnLayout, config: ResolvedConfig) -> Self {
        Self {
            columns,
            layout,
            config,
            row_y: config.y,
        }
    }

    pub(crate) fn row_y(&self) -> f32 {
        self.row_y
    }

    /// Header row: every column's header text, underlined
    pub(crate) fn render_header<S: Surface>(&mut self, doc: &mut Document<S>) -> Result<()> {
        let mut cells: Vec<Cell<'_, S>> = self
            .columns
            .iter()
            .map(|column| Cell::Value(Value::from(column.header_text())))
            .collect();
        self.render_row(doc, &mut cells, RowKind::Header, TextOptions::new().underlined())
    }

    pub(crate) fn render_body<S: Surface>(
        &mut self,
        doc: &mut Document<S>,
        index: usize,
        cells: &mut [Cell<'_, S>],
    ) -> Result<()> {
        self.render_row(doc, cells, RowKind::Body(index), TextOptions::new())
    }

    fn render_row<S: Surface>(
        &mut self,
        doc: &mut Document<S>,
        cells: &mut [Cell<'_, S>],
        kind: RowKind,
        row_options: TextOptions,
    ) -> Result<()> {
        let texts = self.format_cells(doc, cells, row_options)?;
        let mut invoked = vec![false; cells.len()];
        let mut height = self.measure(doc, cells, &texts, &mut invoked, kind)?;

        if self.overflows(&doc.page(), height) && !self.at_page_top(&doc.page()) {
            doc.add_page();
            self.row_y = doc.page().content_top();
            debug!(page = doc.page_count(), row = ?kind, "table page break");

            if self.config.repeat_header && kind != RowKind::Header {
                self.render_header(doc)?;
            }
            invoked.fill(false);
            height = self.measure(doc, cells, &texts, &mut invoked, kind)?;
        }

        let page = doc.page();
        if self.overflows(&page, height) {
            warn!(
                row = ?kind,
                height,
                available = page.content_bottom() - self.row_y,
                "row does not fit on a page, drawing past the bottom margin"
            );
        }

        self.draw(doc, cells, &texts, &invoked, kind, height)?;

        self.row_y += height;
        doc.set_cursor(self.config.x, self.row_y);
        trace!(row = ?kind, height, "row drawn");
        Ok(())
    }

    /// Format every value cell before anything is drawn
    fn format_cells<S: Surface>(
        &self,
        doc: &Document<S>,
        cells: &[Cell<'_, S>],
        row_options: TextOptions,
    ) -> Result<Vec<Option<PreparedText>>> {
        cells
            .iter()
            .zip(self.columns)
            .map(|(cell, column)| -> Result<Option<PreparedText>> {
                let base = row_options.with_align(column.align);
                let prepared = match cell {
                    Cell::Value(value) => Some(PreparedText {
                        text: doc.format(value)?,
                        options: base,
                    }),
                    Cell::Styled(value, options) => Some(PreparedText {
                        text: doc.format(value)?,
                        options: base.merge(options),
                    }),
                    Cell::Renderer(_) => None,
                };
                Ok(prepared)
            })
            .collect()
    }

    /// Row height: tallest cell content plus vertical padding
    fn measure<S: Surface>(
        &self,
        doc: &mut Document<S>,
        cells: &mut [Cell<'_, S>],
        texts: &[Option<PreparedText>],
        invoked: &mut [bool],
        kind: RowKind,
    ) -> Result<f32> {
        let mut tallest = 0.0_f32;
        for (index, (cell, text)) in cells.iter_mut().zip(texts).enumerate() {
            let area = self.area(index);
            let height = match (cell, text) {
                (_, Some(prepared)) => doc.height_of_string(&prepared.text, area.width),
                (Cell::Renderer(renderer), None) => {
                    let height = if let Some(height) = renderer.measure(doc, area.width) {
                        height
                    } else {
                        invoked[index] = true;
                        let result = renderer.render(doc, area);
                        self.rendered(result, index, kind)?
                    };
                    self.check_height(height, index, kind)?
                }
                _ => 0.0,
            };
            tallest = tallest.max(height);
        }
        Ok(tallest + self.config.padding.vertical())
    }

    fn draw<S: Surface>(
        &self,
        doc: &mut Document<S>,
        cells: &mut [Cell<'_, S>],
        texts: &[Option<PreparedText>],
        invoked: &[bool],
        kind: RowKind,
        height: f32,
    ) -> Result<()> {
        for (index, (cell, text)) in cells.iter_mut().zip(texts).enumerate() {
            let area = self.area(index);
            match (cell, text) {
                (_, Some(prepared)) => {
                    let options = TextOptions {
                        width: Some(area.width),
                        ..prepared.options
                    };
                    doc.surface_mut()
                        .draw_text(&prepared.text, area.x, area.y, &options);
                }
                (Cell::Renderer(renderer), None) if !invoked[index] => {
                    let result = renderer.render(doc, area);
                    let drawn = self.rendered(result, index, kind)?;
                    self.check_height(drawn, index, kind)?;
                }
                _ => {}
            }
        }

        if self.config.borders {
            let surface = doc.surface_mut();
            surface.draw_rectangle(self.config.x, self.row_y, self.config.width, height);
            surface.stroke();
            for index in 1..self.layout.len() {
                let x = self.layout.x(index);
                surface.draw_line(x, self.row_y, x, self.row_y + height);
                surface.stroke();
            }
        }
        Ok(())
    }

    fn area(&self, index: usize) -> CellArea {
        let padding = self.config.padding;
        CellArea {
            width: self.layout.width(index) - padding.horizontal(),
            x: self.layout.x(index) + padding.left,
            y: self.row_y + padding.top,
        }
    }

    fn overflows(&self, page: &PageGeometry, height: f32) -> bool {
        self.row_y + height > page.content_bottom()
    }

    fn at_page_top(&self, page: &PageGeometry) -> bool {
        self.row_y <= page.content_top() + TOP_TOLERANCE
    }

    fn column_key(&self, index: usize) -> String {
        self.columns
            .get(index)
            .map(|column| column.key.clone())
            .unwrap_or_default()
    }

    fn rendered(
        &self,
        result: std::result::Result<f32, BoxError>,
        index: usize,
        kind: RowKind,
    ) -> Result<f32> {
        result.map_err(|source| Error::Render {
            column: self.column_key(index),
            row: kind.index(),
            source,
        })
    }

    fn check_height(&self, height: f32, index: usize, kind: RowKind) -> Result<f32> {
        if height.is_finite() && height >= 0.0 {
            Ok(height)
        } else {
            Err(Error::InvalidRenderer {
                column: self.column_key(index),
                row: kind.index(),
                reason: format!("renderer returned height {height}"),
            })
        }
    }
}

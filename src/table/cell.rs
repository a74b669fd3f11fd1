//! Table cells and rows

use crate::document::Document;
use crate::error::{BoxError, Error, Result};
use crate::format::Value;
use crate::surface::{PdfSurface, Surface, TextOptions};
use std::collections::HashMap;
use std::fmt;
use time::{Date, OffsetDateTime};

/// Where a cell renderer may draw: the cell's content box left edge, top
/// edge and width, paddings already applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellArea {
    pub width: f32,
    pub x: f32,
    pub y: f32,
}

/// Custom drawing for one cell.
///
/// `render` draws the cell content and returns the height it used. When
/// `measure` returns `None` the renderer is called once to both measure and
/// draw; if its row then moves to a new page it is called a second time
/// there, so content it drew at the first position remains on the previous
/// page. Renderers that can report their height up front implement
/// `measure`, and are then rendered exactly once at the final position.
pub trait CellRenderer<S: Surface = PdfSurface> {
    fn render(&mut self, doc: &mut Document<S>, area: CellArea) -> std::result::Result<f32, BoxError>;

    /// Height `render` will use at `width`, if known without drawing
    fn measure(&mut self, _doc: &Document<S>, _width: f32) -> Option<f32> {
        None
    }
}

/// [`CellRenderer`] from a closure
pub struct FnRenderer<F>(pub F);

impl<S, F> CellRenderer<S> for FnRenderer<F>
where
    S: Surface,
    F: FnMut(&mut Document<S>, CellArea) -> std::result::Result<f32, BoxError>,
{
    fn render(&mut self, doc: &mut Document<S>, area: CellArea) -> std::result::Result<f32, BoxError> {
        (self.0)(doc, area)
    }
}

/// Content of one table cell
pub enum Cell<'a, S: Surface = PdfSurface> {
    /// Formatted and drawn with the column's alignment
    Value(Value),
    /// Formatted value with text options layered over the row's
    Styled(Value, TextOptions),
    /// Drawn by a callback
    Renderer(Box<dyn CellRenderer<S> + 'a>),
}

impl<'a, S: Surface> Cell<'a, S> {
    pub fn value(value: impl Into<Value>) -> Self {
        Cell::Value(value.into())
    }

    pub fn styled(value: impl Into<Value>, options: TextOptions) -> Self {
        Cell::Styled(value.into(), options)
    }

    /// Cell drawn by `f`, which returns the height it used
    pub fn render<F>(f: F) -> Self
    where
        F: FnMut(&mut Document<S>, CellArea) -> std::result::Result<f32, BoxError> + 'a,
    {
        Cell::Renderer(Box::new(FnRenderer(f)))
    }

    pub fn renderer<R: CellRenderer<S> + 'a>(renderer: R) -> Self {
        Cell::Renderer(Box::new(renderer))
    }

    pub fn is_renderer(&self) -> bool {
        matches!(self, Cell::Renderer(_))
    }
}

impl<S: Surface> fmt::Debug for Cell<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Cell::Styled(value, options) => {
                f.debug_tuple("Styled").field(value).field(options).finish()
            }
            Cell::Renderer(_) => f.write_str("Renderer(..)"),
        }
    }
}

impl<S: Surface> From<Value> for Cell<'_, S> {
    fn from(value: Value) -> Self {
        Cell::Value(value)
    }
}

macro_rules! impl_cell_from {
    ($($ty:ty),*) => {
        $(
            impl<S: Surface> From<$ty> for Cell<'_, S> {
                fn from(value: $ty) -> Self {
                    Cell::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_cell_from!(
    &str, String, &String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
    Date, OffsetDateTime
);

impl<S: Surface, T: Into<Value>> From<Option<T>> for Cell<'_, S> {
    fn from(value: Option<T>) -> Self {
        Cell::Value(Value::from(value))
    }
}

/// One record: cells keyed by column key
pub struct Row<'a, S: Surface = PdfSurface> {
    cells: HashMap<String, Cell<'a, S>>,
}

impl<'a, S: Surface> Row<'a, S> {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, cell: impl Into<Cell<'a, S>>) -> Self {
        self.insert(key, cell);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, cell: impl Into<Cell<'a, S>>) {
        self.cells.insert(key.into(), cell.into());
    }

    pub fn get(&self, key: &str) -> Option<&Cell<'a, S>> {
        self.cells.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    pub fn take(&mut self, key: &str) -> Option<Cell<'a, S>> {
        self.cells.remove(key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row from a JSON object; nested objects and arrays are rejected
    pub fn from_json(object: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        Self::from_json_at(object, 0)
    }

    pub(crate) fn from_json_at(
        object: &serde_json::Map<String, serde_json::Value>,
        row: usize,
    ) -> Result<Self> {
        use serde_json::Value as Json;

        let mut cells = HashMap::with_capacity(object.len());
        for (key, json) in object {
            let value = match json {
                Json::Null => Value::Null,
                Json::Bool(b) => Value::Bool(*b),
                Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
                Json::String(s) => Value::String(s.clone()),
                Json::Array(_) | Json::Object(_) => {
                    return Err(Error::InvalidRenderer {
                        column: key.clone(),
                        row,
                        reason: "nested JSON cannot be drawn in a cell".to_string(),
                    });
                }
            };
            cells.insert(key.clone(), Cell::Value(value));
        }
        Ok(Self { cells })
    }
}

impl<S: Surface> Default for Row<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> fmt::Debug for Row<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.cells.iter()).finish()
    }
}

impl<'a, S, K, C> FromIterator<(K, C)> for Row<'a, S>
where
    S: Surface,
    K: Into<String>,
    C: Into<Cell<'a, S>>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, cell) in iter {
            row.insert(key, cell);
        }
        row
    }
}

/// Rows from a JSON array of objects
pub fn rows_from_json<S: Surface>(json: &serde_json::Value) -> Result<Vec<Row<'static, S>>> {
    let items = json
        .as_array()
        .ok_or_else(|| Error::config("table rows must be a JSON array"))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item
                .as_object()
                .ok_or_else(|| Error::config(format!("row {index} is not a JSON object")))?;
            Row::from_json_at(object, index)
        })
        .collect()
}

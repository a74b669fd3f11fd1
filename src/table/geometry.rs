//! Column geometry for fixed layout tables

use super::config::Column;

/// Width and left edge of every column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    widths: Vec<f32>,
    offsets: Vec<f32>,
}

impl ColumnLayout {
    /// Split `total_width` between columns in proportion to their spans
    pub fn compute(columns: &[Column], x: f32, total_width: f32) -> Self {
        let total_span: u32 = columns.iter().map(|c| c.col_span).sum();
        if total_span == 0 {
            return Self {
                widths: Vec::new(),
                offsets: Vec::new(),
            };
        }

        #[allow(clippy::cast_precision_loss)]
        let unit = total_width / total_span as f32;
        #[allow(clippy::cast_precision_loss)]
        let widths: Vec<f32> = columns.iter().map(|c| c.col_span as f32 * unit).collect();

        let offsets = widths
            .iter()
            .scan(x, |left, width| {
                let offset = *left;
                *left += width;
                Some(offset)
            })
            .collect();

        Self { widths, offsets }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    pub fn width(&self, index: usize) -> f32 {
        self.widths.get(index).copied().unwrap_or(0.0)
    }

    /// Left edge of column `index`
    pub fn x(&self, index: usize) -> f32 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }

    pub fn total_width(&self) -> f32 {
        self.widths.iter().sum()
    }

    pub fn narrowest(&self) -> f32 {
        self.widths.iter().copied().fold(f32::INFINITY, f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_uniform_spans_split_evenly() {
        let columns: Vec<Column> = ["a", "b", "c", "d"].into_iter().map(Column::new).collect();
        let layout = ColumnLayout::compute(&columns, 72.0, 468.0);
        assert_eq!(layout.len(), 4);
        assert!(layout.widths().iter().all(|w| close(*w, 117.0)));
        assert!(close(layout.x(0), 72.0));
        assert!(close(layout.x(3), 72.0 + 3.0 * 117.0));
    }

    #[test]
    fn test_double_span_column() {
        let columns = vec![
            Column::new("title").with_span(2),
            Column::new("date"),
            Column::new("is_published"),
            Column::new("views"),
        ];
        let layout = ColumnLayout::compute(&columns, 0.0, 500.0);
        assert!(close(layout.width(0), 2.0 * layout.width(1)));
        assert!(close(layout.total_width(), 500.0));
        assert!(close(layout.x(1), layout.width(0)));
        assert!(close(layout.narrowest(), 100.0));
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let columns = vec![Column::new("a").with_span(3), Column::new("b")];
        let layout = ColumnLayout::compute(&columns, 10.0, 400.0);
        assert!(close(layout.x(1), layout.x(0) + layout.width(0)));
        assert!(close(layout.x(1) + layout.width(1), 410.0));
    }
}

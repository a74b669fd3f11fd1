//! Table rendering against the recording surface
//!
//! Page: Letter with default margins, so the content box spans x 72..540 and
//! y 50..742. Body text is 12pt Helvetica with a 4pt line gap; a one-line
//! row with 5pt paddings is 12 * 1.156 + 10 = 23.872pt tall.

mod common;

use common::{approx_eq, letter_document, summarize, text_op, texts};
use easy_pdf::surface::{DrawOp, Surface, metrics};
use easy_pdf::table::{Padding, rows_from_json};
use easy_pdf::{
    Align, BoxError, Cell, CellArea, CellRenderer, Color, Column, Document, Error,
    RecordingSurface, Row, TableConfig, TextOptions,
};
use std::cell::RefCell;
use std::rc::Rc;
use time::macros::date;

type TestRow = Row<'static, RecordingSurface>;

const ROW_HEIGHT: f32 = 12.0 * 1.156 + 10.0;

fn title_views() -> TableConfig {
    TableConfig::new(vec![
        Column::new("title").with_header("Tite"),
        Column::new("views"),
    ])
}

fn row(title: &str, views: i64) -> TestRow {
    Row::new().with("title", title).with("views", views)
}

mod header_and_borders {
    use super::*;

    #[test]
    fn test_header_uses_header_text_or_key() {
        let mut doc = letter_document();
        doc.table(&title_views(), vec![row("Hello", 3)]).unwrap();

        let tite = text_op(&doc, "Tite");
        let views = text_op(&doc, "views");
        assert!(tite.underline && views.underline);
        assert!(!text_op(&doc, "Hello").underline);
        assert!(approx_eq(tite.y, 50.0 + 5.0));
    }

    #[test]
    fn test_two_columns_one_row_draw_two_rects_and_two_separators() {
        let mut doc = letter_document();
        doc.table(&title_views(), vec![row("Hello", 3)]).unwrap();
        assert_eq!(doc.surface().rectangle_count(), 2);
        assert_eq!(doc.surface().line_count(), 2);
    }

    #[test]
    fn test_recorded_op_sequence() {
        let mut doc = letter_document();
        doc.table(&title_views(), vec![Row::new().with("title", "Hello").with("views", 3.5)])
            .unwrap();

        insta::assert_snapshot!(summarize(doc.surface().ops()), @r#"
        page 0
        text "Tite"
        text "views"
        rect
        stroke
        line
        stroke
        text "Hello"
        text "3.50"
        rect
        stroke
        line
        stroke
        "#);
    }

    #[test]
    fn test_row_rectangles_stack() {
        let mut doc = letter_document();
        doc.table(&title_views(), vec![row("a", 1), row("b", 2)]).unwrap();

        let rects: Vec<(f32, f32, f32, f32)> = doc
            .surface()
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rectangle {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 3);
        for (i, (x, y, width, height)) in rects.into_iter().enumerate() {
            assert!(approx_eq(x, 72.0));
            assert!(approx_eq(width, 468.0));
            assert!(approx_eq(height, ROW_HEIGHT));
            #[allow(clippy::cast_precision_loss)]
            let expected_y = 50.0 + ROW_HEIGHT * i as f32;
            assert!(approx_eq(y, expected_y));
        }
    }

    #[test]
    fn test_no_header_no_borders() {
        let mut doc = letter_document();
        let config = title_views().with_header(false).with_borders(false);
        doc.table(&config, vec![row("Hello", 3)]).unwrap();
        assert_eq!(doc.surface().rectangle_count(), 0);
        assert_eq!(doc.surface().line_count(), 0);
        assert!(doc.surface().texts().all(|t| t.text != "Tite"));
        assert!(approx_eq(text_op(&doc, "Hello").y, 55.0));
    }
}

mod geometry {
    use super::*;

    #[test]
    fn test_span_weighted_separators() {
        let mut doc = letter_document();
        let config = TableConfig::new(vec![
            Column::new("title").with_span(2),
            Column::new("date"),
            Column::new("is_published"),
            Column::new("views"),
        ])
        .with_header(false);
        let record = Row::new()
            .with("title", "Post")
            .with("date", date!(2024 - 09 - 01))
            .with("is_published", true)
            .with("views", 10);
        doc.table(&config, vec![record]).unwrap();

        let separators: Vec<f32> = doc
            .surface()
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { x1, .. } => Some(*x1),
                _ => None,
            })
            .collect();
        // unit width 468 / 5 = 93.6
        let expected = [72.0 + 187.2, 72.0 + 280.8, 72.0 + 374.4];
        assert_eq!(separators.len(), 3);
        for (got, want) in separators.iter().zip(expected) {
            assert!(approx_eq(*got, want), "{got} != {want}");
        }

        let title = text_op(&doc, "Post");
        assert!(approx_eq(title.width, 187.2 - 10.0));
        assert!(approx_eq(text_op(&doc, "01/09/2024").x, 72.0 + 187.2 + 5.0));
        text_op(&doc, "Yes");
    }

    #[test]
    fn test_explicit_anchor_and_width() {
        let mut doc = letter_document();
        let config = title_views().at(100.0, 300.0).with_width(200.0);
        doc.table(&config, vec![row("Hello", 3)]).unwrap();

        let header = text_op(&doc, "Tite");
        assert!(approx_eq(header.x, 105.0));
        assert!(approx_eq(header.y, 305.0));
        assert!(approx_eq(text_op(&doc, "views").x, 205.0));
    }

    #[test]
    fn test_uneven_paddings() {
        let mut doc = letter_document();
        let paddings = Padding {
            top: 2.0,
            bottom: 8.0,
            left: 10.0,
            right: 0.0,
        };
        let config = title_views().with_paddings(paddings).with_header(false);
        doc.table(&config, vec![row("Hello", 3)]).unwrap();

        let hello = text_op(&doc, "Hello");
        assert!(approx_eq(hello.x, 82.0));
        assert!(approx_eq(hello.y, 52.0));
        assert!(approx_eq(hello.width, 234.0 - 10.0));
    }

    #[test]
    fn test_wrapped_cell_sets_row_height() {
        let mut doc = letter_document();
        let config = title_views().with_header(false);
        doc.table(&config, vec![row("first\nsecond\nthird", 1), row("next", 2)])
            .unwrap();

        let line = metrics::line_height(12.0) + 4.0;
        let tall_row = 3.0 * line - 4.0 + 10.0;
        assert!(approx_eq(text_op(&doc, "next").y, 50.0 + tall_row + 5.0));
    }
}

mod pagination {
    use super::*;

    fn many_rows(count: usize) -> Vec<TestRow> {
        (0..count)
            .map(|i| row(&format!("row {i}"), i64::try_from(i).unwrap()))
            .collect()
    }

    #[test]
    fn test_exactly_one_break_at_first_overflowing_row() {
        let mut doc = letter_document();
        doc.table(&title_views(), many_rows(40)).unwrap();

        assert_eq!(doc.page_count(), 2);
        // header + 27 rows fill 28 * 23.872 = 668.4 of the 692pt content height
        assert_eq!(text_op(&doc, "row 26").page, 0);
        let moved = text_op(&doc, "row 27");
        assert_eq!(moved.page, 1);
        assert!(approx_eq(moved.y, 55.0));
        assert_eq!(text_op(&doc, "27").page, 1);
        assert_eq!(text_op(&doc, "row 39").page, 1);

        for op in doc.surface().ops() {
            if let DrawOp::Rectangle { y, height, .. } = op {
                assert!(y + height <= 742.0 + 1e-3);
            }
        }
    }

    #[test]
    fn test_header_not_repeated_by_default() {
        let mut doc = letter_document();
        doc.table(&title_views(), many_rows(40)).unwrap();
        let headers = texts(&doc).into_iter().filter(|t| t.text == "Tite").count();
        assert_eq!(headers, 1);
    }

    #[test]
    fn test_repeat_header_after_break() {
        let mut doc = letter_document();
        let config = title_views().with_repeat_header(true);
        doc.table(&config, many_rows(40)).unwrap();

        let headers: Vec<_> = texts(&doc).into_iter().filter(|t| t.text == "Tite").collect();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].page, 1);
        assert!(approx_eq(headers[1].y, 55.0));
        assert!(headers[1].underline);
        assert!(approx_eq(text_op(&doc, "row 27").y, 50.0 + ROW_HEIGHT + 5.0));
    }

    #[test]
    fn test_repeat_header_ignored_without_header() {
        let mut doc = letter_document();
        let config = title_views().with_header(false).with_repeat_header(true);
        doc.table(&config, many_rows(40)).unwrap();

        assert_eq!(doc.page_count(), 2);
        assert!(texts(&doc).iter().all(|t| t.text != "Tite" && t.text != "views"));
        let first_on_next_page = texts(&doc).into_iter().find(|t| t.page == 1).unwrap();
        assert_eq!(first_on_next_page.text, "row 28");
        assert!(approx_eq(first_on_next_page.y, 55.0));
    }

    #[test]
    fn test_row_taller_than_page_is_forced_once() {
        let mut doc = letter_document();
        let tall = vec![Row::new().with("title", "huge").with(
            "views",
            Cell::render(|_doc: &mut Document<RecordingSurface>, _area| Ok(800.0)),
        )];
        doc.table(&title_views(), tall).unwrap();

        assert_eq!(doc.page_count(), 2);
        let huge = text_op(&doc, "huge");
        assert_eq!(huge.page, 1);
        assert!(approx_eq(huge.y, 55.0));
    }

    #[test]
    fn test_cursor_after_table() {
        let mut doc = letter_document();
        doc.table(&title_views(), vec![row("a", 1)]).unwrap();
        let bottom = 50.0 + 2.0 * ROW_HEIGHT;
        let expected = bottom + metrics::line_height(12.0) + 4.0;
        assert!(approx_eq(doc.cursor().x, 72.0));
        assert!(approx_eq(doc.cursor().y, expected));
    }

    #[test]
    fn test_table_continues_from_previous_content() {
        let mut doc = letter_document();
        doc.h1("Fixed Layout Table").unwrap();
        let start = doc.cursor().y;
        doc.table(&title_views(), vec![row("a", 1)]).unwrap();
        assert!(approx_eq(text_op(&doc, "Tite").y, start + 5.0));
    }
}

mod cells {
    use super::*;

    #[test]
    fn test_missing_cell_fails_before_drawing() {
        let mut doc = letter_document();
        let ops_before = doc.surface().ops().len();
        let rows = vec![row("ok", 1), Row::new().with("title", "no views")];

        let err = doc.table(&title_views(), rows).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCell { ref column, row: 1 } if column == "views"
        ));
        assert_eq!(doc.surface().ops().len(), ops_before);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut doc = letter_document();
        let record = row("Hello", 3).with("unused", "ignored");
        doc.table(&title_views(), vec![record]).unwrap();
        assert!(doc.surface().texts().all(|t| t.text != "ignored"));
    }

    #[test]
    fn test_values_are_formatted() {
        let mut doc = letter_document();
        let config = TableConfig::new(vec![
            Column::new("date"),
            Column::new("flag"),
            Column::new("empty"),
            Column::new("ratio"),
        ]);
        let record = Row::new()
            .with("date", date!(2023 - 12 - 25))
            .with("flag", false)
            .with("empty", None::<String>)
            .with("ratio", 0.5);
        doc.table(&config, vec![record]).unwrap();
        for text in ["25/12/2023", "No", "-", "0.50"] {
            text_op(&doc, text);
        }
    }

    #[test]
    fn test_unformattable_value_fails_without_drawing_row() {
        struct Opaque;
        let mut doc = letter_document();
        let record = Row::new()
            .with("title", "fine")
            .with("views", easy_pdf::Value::custom(Opaque));
        let err = doc.table(&title_views(), vec![record]).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
        assert!(doc.surface().texts().all(|t| t.text != "fine"));
    }

    #[test]
    fn test_column_alignment_and_styled_cell() {
        let mut doc = letter_document();
        let config = TableConfig::new(vec![
            Column::new("title"),
            Column::new("views").with_align(Align::Right),
        ]);
        let record = Row::new()
            .with("title", Cell::styled("Red", TextOptions::new().with_color(Color::from_u8(255, 0, 0))))
            .with("views", 12);
        doc.table(&config, vec![record]).unwrap();

        assert_eq!(text_op(&doc, "views").align, Align::Right);
        assert_eq!(text_op(&doc, "12").align, Align::Right);
        let red = text_op(&doc, "Red");
        assert_eq!(red.color, Color::from_u8(255, 0, 0));
        assert_eq!(red.align, Align::Left);
        assert_eq!(text_op(&doc, "title").color, Color::BLACK);
    }

    #[test]
    fn test_rows_from_json() {
        let mut doc = letter_document();
        let rows = rows_from_json(&serde_json::json!([
            {"title": "Hello World", "views": 100},
            {"title": "Draft", "views": null}
        ]))
        .unwrap();
        doc.table(&title_views(), rows).unwrap();
        text_op(&doc, "Hello World");
        text_op(&doc, "100");
        text_op(&doc, "-");
    }
}

mod renderers {
    use super::*;

    #[test]
    fn test_renderer_area_and_height() {
        let mut doc = letter_document();
        let mut seen = Vec::new();
        let rows = vec![Row::new().with("title", "chart").with(
            "views",
            Cell::render(|doc: &mut Document<RecordingSurface>, area: CellArea| {
                seen.push(area);
                doc.surface_mut()
                    .draw_rectangle(area.x, area.y, area.width, 30.0);
                Ok(30.0)
            }),
        )];
        doc.table(&title_views(), rows).unwrap();

        assert_eq!(seen.len(), 1);
        let area = seen[0];
        assert!(approx_eq(area.x, 72.0 + 234.0 + 5.0));
        assert!(approx_eq(area.y, 50.0 + ROW_HEIGHT + 5.0));
        assert!(approx_eq(area.width, 234.0 - 10.0));

        let body_rect_height = doc
            .surface()
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rectangle { width, height, .. } if approx_eq(*width, 468.0) => Some(*height),
                _ => None,
            })
            .last()
            .unwrap();
        assert!(approx_eq(body_rect_height, 40.0));
    }

    #[test]
    fn test_single_pass_renderer_redrawn_after_break() {
        let mut doc = letter_document();
        let mut calls: Vec<(usize, f32)> = Vec::new();
        let config = title_views().at(72.0, 700.0);
        let rows = vec![Row::new().with("title", "late").with(
            "views",
            Cell::render(|doc: &mut Document<RecordingSurface>, area: CellArea| {
                calls.push((doc.page_count(), area.y));
                Ok(30.0)
            }),
        )];
        doc.table(&config, rows).unwrap();

        assert_eq!(doc.page_count(), 2);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, 1);
        assert!(approx_eq(calls[0].1, 700.0 + ROW_HEIGHT + 5.0));
        assert_eq!(calls[1].0, 2);
        assert!(approx_eq(calls[1].1, 55.0));
    }

    struct Gauge {
        drawn_at: Rc<RefCell<Vec<(usize, f32)>>>,
    }

    impl CellRenderer<RecordingSurface> for Gauge {
        fn render(
            &mut self,
            doc: &mut Document<RecordingSurface>,
            area: CellArea,
        ) -> Result<f32, BoxError> {
            self.drawn_at.borrow_mut().push((doc.page_count(), area.y));
            Ok(30.0)
        }

        fn measure(&mut self, _doc: &Document<RecordingSurface>, _width: f32) -> Option<f32> {
            Some(30.0)
        }
    }

    #[test]
    fn test_two_phase_renderer_drawn_once() {
        let mut doc = letter_document();
        let drawn_at = Rc::new(RefCell::new(Vec::new()));
        let config = title_views().at(72.0, 700.0);
        let rows = vec![Row::new().with("title", "late").with(
            "views",
            Cell::renderer(Gauge {
                drawn_at: Rc::clone(&drawn_at),
            }),
        )];
        doc.table(&config, rows).unwrap();

        let drawn_at = drawn_at.borrow();
        assert_eq!(drawn_at.len(), 1);
        assert_eq!(drawn_at[0].0, 2);
        assert!(approx_eq(drawn_at[0].1, 55.0));
    }

    #[test]
    fn test_renderer_error_names_cell() {
        let mut doc = letter_document();
        let rows = vec![row("ok", 1), Row::new().with("title", "bad").with(
            "views",
            Cell::render(|_doc: &mut Document<RecordingSurface>, _area| {
                Err::<f32, BoxError>("plot failed".into())
            }),
        )];
        let err = doc.table(&title_views(), rows).unwrap_err();
        match err {
            Error::Render { column, row, source } => {
                assert_eq!(column, "views");
                assert_eq!(row, 1);
                assert_eq!(source.to_string(), "plot failed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_height_is_invalid_renderer() {
        let mut doc = letter_document();
        let rows = vec![Row::new().with("title", "bad").with(
            "views",
            Cell::render(|_doc: &mut Document<RecordingSurface>, _area| Ok(-1.0)),
        )];
        let err = doc.table(&title_views(), rows).unwrap_err();
        assert!(matches!(err, Error::InvalidRenderer { row: 0, .. }));
    }
}

mod config_errors {
    use super::*;

    #[test]
    fn test_auto_layout_unsupported() {
        let mut doc = letter_document();
        let config = title_views().with_layout(easy_pdf::table::Layout::Auto);
        let err = doc.table(&config, Vec::<TestRow>::new()).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn test_paddings_wider_than_column() {
        let mut doc = letter_document();
        let config = title_views().with_width(20.0);
        let err = doc.table(&config, vec![row("a", 1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert_eq!(doc.surface().rectangle_count(), 0);
    }

    #[test]
    fn test_empty_table_draws_header_only() {
        let mut doc = letter_document();
        doc.table(&title_views(), Vec::<TestRow>::new()).unwrap();
        assert_eq!(doc.surface().rectangle_count(), 1);
        text_op(&doc, "Tite");
    }
}

//! Shared helpers for integration tests

#![allow(dead_code)]

use easy_pdf::surface::{DrawOp, TextOp};
use easy_pdf::{Document, DocumentOptions, Margins, PageSize, RecordingSurface};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Route library logs to the test output; filter with `RUST_LOG`
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Letter page, default margins (content box 72..540 x 50..742)
pub fn letter_document() -> Document<RecordingSurface> {
    init_tracing();
    let surface = RecordingSurface::new(PageSize::LETTER, Margins::default());
    let options = DocumentOptions::default().with_page_size(PageSize::LETTER);
    Document::with_surface(surface, options).expect("default options are valid")
}

pub fn texts(doc: &Document<RecordingSurface>) -> Vec<&TextOp> {
    doc.surface().texts().collect()
}

pub fn text_op<'d>(doc: &'d Document<RecordingSurface>, text: &str) -> &'d TextOp {
    doc.surface()
        .texts()
        .find(|t| t.text == text)
        .unwrap_or_else(|| panic!("no text op for {text:?}"))
}

/// One line per recorded op, without coordinates
pub fn summarize(ops: &[DrawOp]) -> String {
    ops.iter()
        .map(|op| match op {
            DrawOp::AddPage { page } => format!("page {page}"),
            DrawOp::Text(text) => format!("text {:?}", text.text),
            DrawOp::Rectangle { .. } => "rect".to_string(),
            DrawOp::Line { .. } => "line".to_string(),
            DrawOp::Stroke { .. } => "stroke".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

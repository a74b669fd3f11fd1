//! Document composition
//!
//! [`Document`] owns a [`Surface`] and layers formatting, headings, a running
//! page header and tables on top of its primitives.

use crate::error::Result;
use crate::format::{Formatter, FormatterChain, Value};
use crate::options::DocumentOptions;
use crate::surface::{PageGeometry, PdfSurface, Point, Surface, TextOptions};
use crate::table::{self, Row, TableConfig};
use crate::typography::HeadingLevel;
use std::path::Path;
use tracing::debug;

/// A document being composed on a surface
#[derive(Debug)]
pub struct Document<S: Surface = PdfSurface> {
    surface: S,
    options: DocumentOptions,
    formatters: FormatterChain,
}

impl Document<PdfSurface> {
    /// PDF document with the given options and its first page added
    pub fn new(options: DocumentOptions) -> Result<Self> {
        let surface = PdfSurface::new(options.page_size, options.margins);
        Self::with_surface(surface, options)
    }

    /// PDF bytes of everything drawn so far
    pub fn finish(&self) -> Vec<u8> {
        self.surface.finish()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.surface.save(path)
    }
}

impl<S: Surface> Document<S> {
    /// Compose on `surface`, then add the first page
    pub fn with_surface(mut surface: S, options: DocumentOptions) -> Result<Self> {
        options.validate()?;

        surface.set_line_gap(options.line_gap);
        surface.set_font_size(options.text_sizes.normal.size);
        surface.set_fill_color(options.colors.primary);
        surface.set_margins(options.margins);

        let mut doc = Self {
            surface,
            options,
            formatters: FormatterChain::new(),
        };

        // the body starts below the header only when the header has its own top margin
        if let Some(header) = doc.options.header.clone()
            && header.margin_top != 0.0
        {
            let width = doc.surface.page().content_width();
            let header_height = doc.height_of_string(&header.text, width);
            doc.options.margins.top = header_height + header.margin_top + header.margin_bottom;
            doc.surface.set_margins(doc.options.margins);
        }

        doc.add_page();
        Ok(doc)
    }

    /// Register a custom formatter, consulted before the built-ins
    #[must_use]
    pub fn with_formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatters.push(formatter);
        self
    }

    pub fn add_formatter<F: Formatter + 'static>(&mut self, formatter: F) -> &mut Self {
        self.formatters.push(formatter);
        self
    }

    pub fn formatters(&self) -> &FormatterChain {
        &self.formatters
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn page(&self) -> PageGeometry {
        self.surface.page()
    }

    pub fn page_count(&self) -> usize {
        self.surface.page_count()
    }

    pub fn cursor(&self) -> Point {
        self.surface.cursor()
    }

    pub fn set_cursor(&mut self, x: f32, y: f32) -> &mut Self {
        self.surface.set_cursor(x, y);
        self
    }

    pub fn font_size(&self) -> f32 {
        self.surface.font_size()
    }

    pub fn set_font_size(&mut self, size: f32) -> &mut Self {
        self.surface.set_font_size(size);
        self
    }

    pub fn line_gap(&self) -> f32 {
        self.surface.line_gap()
    }

    pub fn set_line_gap(&mut self, gap: f32) -> &mut Self {
        self.surface.set_line_gap(gap);
        self
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// Start a new page and draw the running header on it
    pub fn add_page(&mut self) -> &mut Self {
        self.surface.add_page();
        self.render_header();
        debug!(page = self.surface.page_count(), "page added");
        self
    }

    fn render_header(&mut self) {
        let Some(header) = &self.options.header else {
            return;
        };
        let left = self.options.margins.left;
        let top = self.options.margins.top;
        let previous_color = self.surface.fill_color();

        self.surface.set_fill_color(self.options.colors.secondary);
        self.surface
            .draw_text(&header.text, left, header.margin_top, &TextOptions::new());
        self.surface.set_fill_color(previous_color);
        self.surface.set_cursor(left, top);
    }

    /// Move the cursor down by `lines` lines of the current font plus one line gap
    pub fn move_down(&mut self, lines: f32) -> &mut Self {
        let Point { x, y } = self.surface.cursor();
        let step = lines * self.surface.line_height() + self.surface.line_gap();
        self.surface.set_cursor(x, y + step);
        self
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Display text for `value` through the formatter chain
    pub fn format(&self, value: &Value) -> Result<String> {
        self.formatters.format(value)
    }

    /// Height of `text` wrapped at `width`, without the gap after the last line
    pub fn height_of_string(&self, text: &str, width: f32) -> f32 {
        let height = self.surface.measure_wrapped_height(text, width) - self.surface.line_gap();
        height.max(0.0)
    }

    /// Draw plain text at the cursor
    pub fn text(&mut self, text: &str, options: &TextOptions) -> &mut Self {
        let Point { x, y } = self.surface.cursor();
        self.surface.draw_text(text, x, y, options);
        self
    }

    /// Format `value` and draw it at the cursor
    pub fn multi_type_text(
        &mut self,
        value: impl Into<Value>,
        options: &TextOptions,
    ) -> Result<&mut Self> {
        let text = self.format(&value.into())?;
        Ok(self.text(&text, options))
    }

    /// Format `value` and draw it at `(x, y)`
    pub fn multi_type_text_at(
        &mut self,
        value: impl Into<Value>,
        x: f32,
        y: f32,
        options: &TextOptions,
    ) -> Result<&mut Self> {
        let text = self.format(&value.into())?;
        self.surface.draw_text(&text, x, y, options);
        Ok(self)
    }

    /// Draw `value` with the preset for `level`, then restore the font size and colour
    pub fn heading(
        &mut self,
        value: impl Into<Value>,
        level: HeadingLevel,
        options: TextOptions,
    ) -> Result<&mut Self> {
        let text = self.format(&value.into())?;
        let preset = *self.options.text_sizes.preset(level);
        let previous_size = self.surface.font_size();
        let previous_color = self.surface.fill_color();

        self.surface.set_font_size(preset.size);
        self.surface
            .set_fill_color(preset.color.unwrap_or(self.options.colors.primary));
        self.text(&text, &preset.text_options().merge(&options));
        self.surface.set_font_size(previous_size);
        self.surface.set_fill_color(previous_color);
        Ok(self)
    }

    pub fn h1(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.heading(value, HeadingLevel::H1, TextOptions::new())
    }

    pub fn h2(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.heading(value, HeadingLevel::H2, TextOptions::new())
    }

    pub fn h3(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.heading(value, HeadingLevel::H3, TextOptions::new())
    }

    pub fn h4(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.heading(value, HeadingLevel::H4, TextOptions::new())
    }

    pub fn h5(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.heading(value, HeadingLevel::H5, TextOptions::new())
    }

    pub fn h6(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.heading(value, HeadingLevel::H6, TextOptions::new())
    }

    pub fn normal(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        self.heading(value, HeadingLevel::Normal, TextOptions::new())
    }

    // ========================================================================
    // Tables
    // ========================================================================

    /// Render a fixed layout table at the cursor
    pub fn table<'a, I>(&mut self, config: &TableConfig, rows: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Row<'a, S>>,
    {
        table::render_table(self, config, rows)?;
        Ok(self)
    }
}

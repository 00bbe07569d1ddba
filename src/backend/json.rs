//! A self-contained backend that stores documents as JSON page models.
//!
//! Each file holds the page sizes, the text spans in emission order, and the
//! shapes and highlights drawn so far. It has no font metrics: inserted text
//! gets an estimated box (half an em of advance per character, ascent 0.8 em,
//! descent 0.2 em). Painting a filled rectangle hides every span that lies
//! entirely inside it, which is how the cover-and-reinsert edits of
//! [`PdfRenderer`](crate::writer::PdfRenderer) become visible on re-extraction.
//!
//! ## Example
//!
//! ```no_run
//! use pdf_retext::backend::{JsonBackend, JsonDocument, RawSpan};
//!
//! # fn main() -> pdf_retext::Result<()> {
//! let doc = JsonDocument::new()
//!     .with_page(612.0, 792.0)
//!     .with_span(RawSpan::new("Hello world", [72.0, 100.0, 138.0, 112.0], "Helvetica", 12.0));
//! doc.save_to("letter.json", false)?;
//!
//! let backend = JsonBackend::new();
//! let text = pdf_retext::extractors::extract_text_from_pdf(&backend, "letter.json", None)?;
//! assert_eq!(text, "Hello world\n");
//! # Ok(())
//! # }
//! ```

use crate::backend::{PdfBackend, PdfDocumentHandle, RawSpan};
use crate::error::{Error, Result};
use crate::fonts::FontFlags;
use crate::geometry::{Point, Rect};
use crate::layout::Color;
use crate::writer::{BuiltinFont, RenderOptions, TextAlign};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Horizontal advance per character, as a fraction of the font size.
const ADVANCE_EM: f32 = 0.5;
/// Ascent above the baseline, as a fraction of the font size.
const ASCENT_EM: f32 = 0.8;
/// Descent below the baseline, as a fraction of the font size.
const DESCENT_EM: f32 = 0.2;
/// Baseline-to-baseline distance, as a fraction of the font size.
const LINE_HEIGHT_EM: f32 = 1.2;
/// Overhang allowed when deciding whether a paint covers a span.
const COVER_SLACK: f32 = 0.01;

/// US Letter in points.
const LETTER: (f32, f32) = (612.0, 792.0);

/// A filled rectangle painted onto a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledRect {
    /// Painted area
    pub rect: Rect,
    /// Fill color
    pub color: Color,
    /// Painted above (true) or below (false) existing content
    pub overlay: bool,
}

/// A highlight annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Highlighted area
    pub rect: Rect,
    /// Stroke color
    pub color: Color,
}

/// One page of a [`JsonDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPage {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Visible text spans in emission order
    #[serde(default)]
    pub spans: Vec<RawSpan>,
    /// Painted rectangles in drawing order
    #[serde(default)]
    pub fills: Vec<FilledRect>,
    /// Highlight annotations
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

impl JsonPage {
    /// Create an empty page.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            spans: Vec::new(),
            fills: Vec::new(),
            highlights: Vec::new(),
        }
    }

    fn next_block(&self) -> usize {
        self.spans.iter().map(|s| s.block + 1).max().unwrap_or(0)
    }

    /// Page text with one newline after each engine line.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        let mut current: Option<(usize, usize)> = None;
        for span in &self.spans {
            let key = (span.block, span.line);
            if current.is_some() && current != Some(key) {
                text.push('\n');
            }
            current = Some(key);
            text.push_str(&span.text);
        }
        if current.is_some() {
            text.push('\n');
        }
        text
    }
}

/// A whole document: pages in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonDocument {
    /// Pages in index order
    pub pages: Vec<JsonPage>,
}

impl JsonDocument {
    /// Create a document with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty page.
    pub fn with_page(mut self, width: f32, height: f32) -> Self {
        self.pages.push(JsonPage::new(width, height));
        self
    }

    /// Append a span to the most recently added page, adding a US Letter
    /// page first if the document has none.
    pub fn with_span(mut self, span: RawSpan) -> Self {
        if self.pages.is_empty() {
            self.pages.push(JsonPage::new(LETTER.0, LETTER.1));
        }
        if let Some(page) = self.pages.last_mut() {
            page.spans.push(span);
        }
        self
    }

    /// Read a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write the document; `compact` writes minified JSON.
    pub fn save_to(&self, path: impl AsRef<Path>, compact: bool) -> Result<()> {
        let bytes = if compact {
            serde_json::to_vec(self)?
        } else {
            serde_json::to_vec_pretty(self)?
        };
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Borrow a page.
    pub fn page(&self, page: usize) -> Result<&JsonPage> {
        self.pages
            .get(page)
            .ok_or_else(|| Error::page_index(page, self.pages.len()))
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut JsonPage> {
        let count = self.pages.len();
        self.pages
            .get_mut(page)
            .ok_or_else(|| Error::page_index(page, count))
    }
}

/// Opens JSON page-model files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend;

impl JsonBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for JsonBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocumentHandle>> {
        let document = JsonDocument::load(path)
            .map_err(|e| Error::Backend(format!("failed to open {}: {}", path.display(), e)))?;
        log::debug!("Loaded {} page(s) from {}", document.pages.len(), path.display());
        Ok(Box::new(JsonHandle::new(document)))
    }

    fn backend_name(&self) -> &str {
        "json"
    }
}

/// Open handle over an in-memory [`JsonDocument`].
///
/// Spans loaded from the file stay at the front of each page's span list;
/// text inserted through the handle is appended after them.
#[derive(Debug)]
pub struct JsonHandle {
    document: JsonDocument,
    /// Per page, how many leading spans came from the file
    loaded: Vec<usize>,
}

impl JsonHandle {
    fn new(document: JsonDocument) -> Self {
        let loaded = document.pages.iter().map(|p| p.spans.len()).collect();
        Self { document, loaded }
    }

    /// The document as currently edited.
    pub fn document(&self) -> &JsonDocument {
        &self.document
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * ADVANCE_EM
}

fn flags_for(font: BuiltinFont) -> u32 {
    match font {
        BuiltinFont::Courier => (FontFlags::MONOSPACE | FontFlags::SERIF).bits(),
        BuiltinFont::TimesRoman => FontFlags::SERIF.bits(),
        _ => 0,
    }
}

fn styled_span(text: &str, bbox: Rect, options: &RenderOptions, block: usize, line: usize) -> RawSpan {
    RawSpan::new(text, bbox.to_array(), options.font.postscript_name(), options.font_size)
        .with_flags(flags_for(options.font))
        .with_color(options.color.to_array())
        .in_line(block, line)
}

/// Greedy word wrap of one paragraph to `max_width`.
fn wrap_paragraph(paragraph: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    lines.push(current);
    lines
}

impl PdfDocumentHandle for JsonHandle {
    fn page_count(&self) -> usize {
        self.document.pages.len()
    }

    fn spans(&self, page: usize) -> Result<Vec<RawSpan>> {
        Ok(self.document.page(page)?.spans.clone())
    }

    fn plain_text(&self, page: usize) -> Result<String> {
        Ok(self.document.page(page)?.plain_text())
    }

    fn page_size(&self, page: usize) -> Result<(f32, f32)> {
        let p = self.document.page(page)?;
        Ok((p.width, p.height))
    }

    /// An overlay fill hides every span inside `rect`. An underlay fill only
    /// hides spans loaded from the file, so text inserted earlier in the
    /// session stays visible.
    fn draw_filled_rect(&mut self, page: usize, rect: Rect, color: Color, overlay: bool) -> Result<()> {
        let p = self.document.page_mut(page)?;
        let loaded = &mut self.loaded[page];
        let before = p.spans.len();
        let mut index = 0;
        let mut loaded_hidden = 0;
        p.spans.retain(|span| {
            let from_file = index < *loaded;
            index += 1;
            if !(overlay || from_file) {
                return true;
            }
            let [x0, y0, x1, y1] = span.bbox;
            let hidden = Rect::new(x0, y0, x1, y1).is_ok_and(|bbox| rect.contains_rect(&bbox, COVER_SLACK));
            if hidden && from_file {
                loaded_hidden += 1;
            }
            !hidden
        });
        *loaded -= loaded_hidden;
        log::debug!("Filled rect on page {} covered {} span(s)", page, before - p.spans.len());
        p.fills.push(FilledRect { rect, color, overlay });
        Ok(())
    }

    fn insert_text(&mut self, page: usize, origin: Point, text: &str, options: &RenderOptions) -> Result<i32> {
        let size = options.font_size;
        if !(size > 0.0 && size.is_finite()) {
            return Ok(-1);
        }
        let p = self.document.page_mut(page)?;
        let block = p.next_block();
        let mut written = 0;
        for (line, content) in text.split('\n').enumerate() {
            let baseline = origin.y + line as f32 * size * LINE_HEIGHT_EM;
            let bbox = Rect::new(
                origin.x,
                baseline - size * ASCENT_EM,
                origin.x + text_width(content, size),
                baseline + size * DESCENT_EM,
            )?;
            p.spans.push(styled_span(content, bbox, options, block, line));
            written += 1;
        }
        Ok(written)
    }

    fn insert_text_box(&mut self, page: usize, rect: Rect, text: &str, options: &RenderOptions) -> Result<f32> {
        let size = options.font_size;
        if !(size > 0.0 && size.is_finite()) {
            return Ok(-1.0);
        }
        let lines: Vec<String> = text
            .split('\n')
            .flat_map(|paragraph| wrap_paragraph(paragraph, size, rect.width()))
            .collect();
        let line_height = size * LINE_HEIGHT_EM;
        let remaining = rect.height() - lines.len() as f32 * line_height;
        if remaining < 0.0 {
            return Ok(remaining);
        }

        let p = self.document.page_mut(page)?;
        let block = p.next_block();
        for (i, content) in lines.iter().enumerate() {
            let width = text_width(content, size).min(rect.width());
            let x = match options.align {
                TextAlign::Center => rect.x0() + (rect.width() - width) / 2.0,
                TextAlign::Right => rect.x1() - width,
                TextAlign::Left | TextAlign::Justify => rect.x0(),
            };
            let top = rect.y0() + i as f32 * line_height;
            let bbox = Rect::new(x, top, x + width, top + size)?;
            p.spans.push(styled_span(content, bbox, options, block, i));
        }
        Ok(remaining)
    }

    fn add_highlight(&mut self, page: usize, rect: Rect, color: Color) -> Result<()> {
        self.document.page_mut(page)?.highlights.push(Highlight { rect, color });
        Ok(())
    }

    fn save(&mut self, path: &Path, compact: bool) -> Result<()> {
        self.document.save_to(path, compact)?;
        log::info!("Saved {} page(s) to {}", self.document.pages.len(), path.display());
        Ok(())
    }
}

//! Capability interfaces for the PDF engine the editor drives.
//!
//! The crate never parses or serialises PDF bytes itself. A [`PdfBackend`]
//! opens documents and hands back a [`PdfDocumentHandle`] that can report
//! positioned spans and execute a small set of drawing commands. Any engine
//! that can provide these calls can be plugged in; [`json::JsonBackend`]
//! is a self-contained implementation that stores pages as JSON.
//!
//! ## Architecture
//!
//! ```text
//! PdfBackend::open(path)
//!     ↓
//! PdfDocumentHandle ──spans/plain_text/page_size──→ TextExtractor, FontDetector
//!     ↑
//! PdfRenderer ──draw_filled_rect/insert_text/insert_text_box/add_highlight/save
//! ```

pub mod json;

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::layout::Color;
use crate::writer::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use json::{JsonBackend, JsonDocument, JsonPage};

/// One positioned text run as reported by the engine.
///
/// The box is kept as raw numbers; extraction validates it when building a
/// [`TextBlock`](crate::layout::TextBlock).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// Text content
    pub text: String,
    /// Bounding box `[x0, y0, x1, y1]`
    pub bbox: [f32; 4],
    /// Font name
    pub font: String,
    /// Font size in points
    pub size: f32,
    /// Font flag word
    #[serde(default)]
    pub flags: u32,
    /// Fill color, channels in 0-1
    #[serde(default)]
    pub color: [f32; 3],
    /// Engine block index on the page
    #[serde(default)]
    pub block: usize,
    /// Line index within the engine block
    #[serde(default)]
    pub line: usize,
}

impl RawSpan {
    /// Create a span with black 0-flag styling in block 0, line 0.
    pub fn new(text: impl Into<String>, bbox: [f32; 4], font: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            bbox,
            font: font.into(),
            size,
            flags: 0,
            color: [0.0, 0.0, 0.0],
            block: 0,
            line: 0,
        }
    }

    /// Set the flag word.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Set the engine block and line indices.
    pub fn in_line(mut self, block: usize, line: usize) -> Self {
        self.block = block;
        self.line = line;
        self
    }
}

/// Opens documents.
pub trait PdfBackend {
    /// Open the document at `path`.
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocumentHandle>>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// An open document.
///
/// Page-scoped methods return [`Error::PageIndex`](crate::Error::PageIndex)
/// for pages outside `[0, page_count)`.
pub trait PdfDocumentHandle {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Text spans on a page, in emission order.
    fn spans(&self, page: usize) -> Result<Vec<RawSpan>>;

    /// Plain text of a page in emission order.
    fn plain_text(&self, page: usize) -> Result<String>;

    /// Page `(width, height)` in points.
    fn page_size(&self, page: usize) -> Result<(f32, f32)>;

    /// Paint an opaque filled rectangle.
    fn draw_filled_rect(&mut self, page: usize, rect: Rect, color: Color, overlay: bool) -> Result<()>;

    /// Insert text with its baseline starting at `origin`.
    ///
    /// Returns the engine status; negative means the insertion failed.
    fn insert_text(&mut self, page: usize, origin: Point, text: &str, options: &RenderOptions) -> Result<i32>;

    /// Insert text wrapped inside `rect`.
    ///
    /// Returns the unused height of the box; negative means the text did not
    /// fit and nothing was written.
    fn insert_text_box(&mut self, page: usize, rect: Rect, text: &str, options: &RenderOptions) -> Result<f32>;

    /// Add a highlight annotation over `rect`.
    fn add_highlight(&mut self, page: usize, rect: Rect, color: Color) -> Result<()>;

    /// Serialise the document to `path`. `compact` asks for garbage
    /// collection and stream deflation.
    fn save(&mut self, path: &Path, compact: bool) -> Result<()>;

    /// Release engine resources. Called once when the owner closes the handle.
    fn close(&mut self) {}
}

//! Text block representation for layout analysis.
//!
//! A [`TextBlock`] is one span as the PDF engine emits it: a contiguous run
//! of text sharing a single font, size and color, plus its page position.
//! Blocks are plain values. Editing a page never mutates a block; it writes
//! a new file which is then extracted again.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
}

impl Color {
    /// Create a new color.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a black color.
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Create a white color.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Create a yellow color (the default highlight).
    pub fn yellow() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }

    /// Channels as an array.
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// One extracted text run with its geometry and style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    /// Text content of the run
    pub text: String,
    /// Bounding box in page points
    pub bbox: Rect,
    /// Font name as reported by the engine
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Raw font flag word (see [`FontFlags`](crate::fonts::FontFlags))
    pub font_flags: u32,
    /// Fill color
    pub color: Color,
    /// Page index (0-based)
    pub page: usize,
    /// Block index within the page, in emission order
    pub block: usize,
    /// Line index within the block
    pub line: usize,
}

impl TextBlock {
    /// Create a block on page 0 with default style (12pt Helvetica, black).
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_retext::geometry::Rect;
    /// use pdf_retext::layout::TextBlock;
    ///
    /// let block = TextBlock::new("Hello", Rect::new(72.0, 100.0, 150.0, 115.0).unwrap())
    ///     .with_font("Times-Roman", 14.0, 0)
    ///     .at(2, 0, 1);
    /// assert_eq!(block.width(), 78.0);
    /// assert_eq!(block.position(), (72.0, 100.0));
    /// assert_eq!(block.page, 2);
    /// ```
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_name: "Helvetica".to_string(),
            font_size: 12.0,
            font_flags: 0,
            color: Color::black(),
            page: 0,
            block: 0,
            line: 0,
        }
    }

    /// Set font name, size and flag word.
    pub fn with_font(mut self, name: impl Into<String>, size: f32, flags: u32) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self.font_flags = flags;
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set page, block and line indices.
    pub fn at(mut self, page: usize, block: usize, line: usize) -> Self {
        self.page = page;
        self.block = block;
        self.line = line;
        self
    }

    /// Left edge.
    pub fn x0(&self) -> f32 {
        self.bbox.x0()
    }

    /// Top edge.
    pub fn y0(&self) -> f32 {
        self.bbox.y0()
    }

    /// Right edge.
    pub fn x1(&self) -> f32 {
        self.bbox.x1()
    }

    /// Bottom edge.
    pub fn y1(&self) -> f32 {
        self.bbox.y1()
    }

    /// Width of the block (>= 0).
    pub fn width(&self) -> f32 {
        self.bbox.width()
    }

    /// Height of the block (>= 0).
    pub fn height(&self) -> f32 {
        self.bbox.height()
    }

    /// Top-left corner as `(x0, y0)`.
    pub fn position(&self) -> (f32, f32) {
        (self.bbox.x0(), self.bbox.y0())
    }

    /// Center point of the block.
    pub fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Number of characters in the run.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

//! Font style classification and aggregation.
//!
//! Styles are decoded from the span flag word. Only four bits are
//! meaningful here; the rest are reserved and ignored.

use crate::backend::{PdfBackend, RawSpan};
use crate::error::Result;
use crate::extractors::TextExtractor;
use crate::geometry::{Point, Rect};
use crate::layout::{Color, TextBlock};
use bitflags::bitflags;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

bitflags! {
    /// Style bits of a span flag word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FontFlags: u32 {
        /// Bit 0: fixed pitch
        const MONOSPACE = 1 << 0;
        /// Bit 1: italic
        const ITALIC = 1 << 1;
        /// Bit 3: serifed
        const SERIF = 1 << 3;
        /// Bit 4: bold
        const BOLD = 1 << 4;
    }
}

/// Style descriptor for one span.
///
/// Two descriptors name the same font when their [`key`](FontInfo::key)
/// matches; color is not part of identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontInfo {
    /// Reported font name
    pub name: String,
    /// Size in points
    pub size: f32,
    /// Raw flag word
    pub flags: u32,
    /// Bold bit set
    pub is_bold: bool,
    /// Italic bit set
    pub is_italic: bool,
    /// Monospace bit set
    pub is_monospace: bool,
    /// Serif bit set
    pub is_serif: bool,
    /// Fill color of the span
    pub color: Color,
}

/// Identity of a font: name, size bits, flag word.
pub type FontKey = (String, u32, u32);

impl FontInfo {
    /// Decode a descriptor from its parts.
    pub fn new(name: impl Into<String>, size: f32, flags: u32, color: Color) -> Self {
        let style = FontFlags::from_bits_truncate(flags);
        Self {
            name: name.into(),
            size,
            flags,
            is_bold: style.contains(FontFlags::BOLD),
            is_italic: style.contains(FontFlags::ITALIC),
            is_monospace: style.contains(FontFlags::MONOSPACE),
            is_serif: style.contains(FontFlags::SERIF),
            color,
        }
    }

    /// Descriptor of an extracted block.
    pub fn from_block(block: &TextBlock) -> Self {
        Self::new(block.font_name.clone(), block.font_size, block.font_flags, block.color)
    }

    /// Descriptor of an engine span.
    pub fn from_span(span: &RawSpan) -> Self {
        Self::new(span.font.clone(), span.size, span.flags, Color::from(span.color))
    }

    /// Decoded style bits.
    pub fn style(&self) -> FontFlags {
        FontFlags::from_bits_truncate(self.flags)
    }

    /// Identity key `(name, size, flags)`.
    pub fn key(&self) -> FontKey {
        (self.name.clone(), self.size.to_bits(), self.flags)
    }
}

/// Reports fonts used in a document.
pub struct FontDetector<'a> {
    extractor: TextExtractor<'a>,
}

impl<'a> FontDetector<'a> {
    /// Create a closed detector for `path`.
    pub fn new(backend: &'a dyn PdfBackend, path: impl AsRef<Path>) -> Self {
        Self {
            extractor: TextExtractor::new(backend, path),
        }
    }

    /// Create a detector and open its document.
    pub fn opened(backend: &'a dyn PdfBackend, path: impl AsRef<Path>) -> Result<Self> {
        let mut detector = Self::new(backend, path);
        detector.open()?;
        Ok(detector)
    }

    /// Open the document.
    pub fn open(&mut self) -> Result<()> {
        self.extractor.open()
    }

    /// Close the document.
    pub fn close(&mut self) {
        self.extractor.close();
    }

    /// Whether a document handle is held.
    pub fn is_open(&self) -> bool {
        self.extractor.is_open()
    }

    fn spans_in_scope(&self, page: Option<usize>, operation: &'static str) -> Result<Vec<RawSpan>> {
        let mut spans = Vec::new();
        for p in self.extractor.page_range(page, operation)? {
            spans.extend(self.extractor.raw_spans(p, operation)?);
        }
        Ok(spans)
    }

    /// One descriptor per span on the page, duplicates kept.
    pub fn get_fonts_on_page(&self, page: usize) -> Result<Vec<FontInfo>> {
        Ok(self
            .spans_in_scope(Some(page), "get_fonts_on_page")?
            .iter()
            .map(FontInfo::from_span)
            .collect())
    }

    /// Distinct fonts in first-seen order.
    pub fn get_unique_fonts(&self, page: Option<usize>) -> Result<Vec<FontInfo>> {
        let mut unique: IndexMap<FontKey, FontInfo> = IndexMap::new();
        for span in self.spans_in_scope(page, "get_unique_fonts")? {
            let info = FontInfo::from_span(&span);
            unique.entry(info.key()).or_insert(info);
        }
        Ok(unique.into_values().collect())
    }

    /// Font of the first span whose box contains the point, edges inclusive.
    pub fn get_font_at_position(&self, page: usize, x: f32, y: f32) -> Result<Option<FontInfo>> {
        let point = Point::new(x, y);
        for span in self.spans_in_scope(Some(page), "get_font_at_position")? {
            let [x0, y0, x1, y1] = span.bbox;
            if Rect::new(x0, y0, x1, y1)?.contains_point(&point) {
                return Ok(Some(FontInfo::from_span(&span)));
            }
        }
        Ok(None)
    }

    /// Font covering the most characters.
    ///
    /// Weight is the character count of each run. Equal totals go to the
    /// lowest `(name, size, flags)`.
    pub fn get_dominant_font(&self, page: Option<usize>) -> Result<Option<FontInfo>> {
        let spans = self.spans_in_scope(page, "get_dominant_font")?;
        Ok(dominant_font(spans.iter().map(|s| (FontInfo::from_span(s), s.text.chars().count()))))
    }
}

impl Drop for FontDetector<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Character-weighted argmax over `(font, weight)` pairs.
pub(crate) fn dominant_font(runs: impl IntoIterator<Item = (FontInfo, usize)>) -> Option<FontInfo> {
    let mut totals: IndexMap<FontKey, (FontInfo, usize)> = IndexMap::new();
    for (info, weight) in runs {
        totals.entry(info.key()).or_insert_with(|| (info, 0)).1 += weight;
    }

    totals
        .into_values()
        .max_by(|(a, wa), (b, wb)| {
            wa.cmp(wb).then_with(|| {
                // reversed so the lowest key wins a tie
                (&b.name, b.size, b.flags)
                    .partial_cmp(&(&a.name, a.size, a.flags))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        })
        .map(|(info, _)| info)
}

/// List the distinct fonts of a document in one call.
pub fn detect_fonts_in_pdf(
    backend: &dyn PdfBackend,
    path: impl AsRef<Path>,
    page: Option<usize>,
) -> Result<Vec<FontInfo>> {
    FontDetector::opened(backend, path)?.get_unique_fonts(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{JsonBackend, JsonDocument};
    use crate::error::Error;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_doc(doc: JsonDocument) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.json");
        doc.save_to(&path, false).unwrap();
        (dir, path)
    }

    #[test]
    fn test_flag_decoding() {
        let info = FontInfo::new("Courier-BoldOblique", 10.0, 0b1_1011, Color::black());
        assert!(info.is_bold);
        assert!(info.is_italic);
        assert!(info.is_monospace);
        assert!(info.is_serif);

        let plain = FontInfo::new("Helvetica", 10.0, 1 << 2 | 1 << 5, Color::black());
        assert!(!plain.is_bold && !plain.is_italic && !plain.is_monospace && !plain.is_serif);
        assert_eq!(plain.style(), FontFlags::empty());
    }

    #[test]
    fn test_key_ignores_color() {
        let red = FontInfo::new("Helvetica", 12.0, 0, Color::new(1.0, 0.0, 0.0));
        let black = FontInfo::new("Helvetica", 12.0, 0, Color::black());
        assert_eq!(red.key(), black.key());
        assert_ne!(red.key(), FontInfo::new("Helvetica", 12.5, 0, Color::black()).key());
    }

    #[test]
    fn test_dominant_by_characters() {
        let (_dir, path) = write_doc(
            JsonDocument::new()
                .with_page(612.0, 792.0)
                .with_span(RawSpan::new("short", [72.0, 72.0, 120.0, 88.0], "Helvetica-Bold", 16.0))
                .with_span(
                    RawSpan::new("a much longer run of text", [72.0, 100.0, 300.0, 112.0], "Helvetica", 12.0)
                        .in_line(1, 0),
                ),
        );
        let backend = JsonBackend::new();
        let detector = FontDetector::opened(&backend, &path).unwrap();
        let dominant = detector.get_dominant_font(Some(0)).unwrap().unwrap();
        assert_eq!(dominant.size, 12.0);
        assert_eq!(dominant.name, "Helvetica");
    }

    #[test]
    fn test_dominant_tie_prefers_lowest_key() {
        let runs = vec![
            (FontInfo::new("Times-Roman", 12.0, 0, Color::black()), 4),
            (FontInfo::new("Arial", 12.0, 0, Color::black()), 4),
        ];
        assert_eq!(dominant_font(runs).unwrap().name, "Arial");
        assert!(dominant_font(Vec::new()).is_none());
    }

    #[test]
    fn test_unique_and_positional_lookup() {
        let (_dir, path) = write_doc(
            JsonDocument::new()
                .with_page(612.0, 792.0)
                .with_span(RawSpan::new("one", [0.0, 0.0, 50.0, 12.0], "Helvetica", 12.0))
                .with_span(RawSpan::new("two", [40.0, 0.0, 90.0, 12.0], "Times-Bold", 12.0).with_flags(24))
                .with_span(RawSpan::new("three", [0.0, 20.0, 50.0, 32.0], "Helvetica", 12.0).in_line(0, 1)),
        );
        let backend = JsonBackend::new();
        let detector = FontDetector::opened(&backend, &path).unwrap();

        assert_eq!(detector.get_fonts_on_page(0).unwrap().len(), 3);
        let unique = detector.get_unique_fonts(None).unwrap();
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "Helvetica");
        assert!(unique[1].is_bold && unique[1].is_serif);

        // overlap at x=45: the first emitted span wins
        let hit = detector.get_font_at_position(0, 45.0, 6.0).unwrap().unwrap();
        assert_eq!(hit.name, "Helvetica");
        // edges are inclusive
        assert!(detector.get_font_at_position(0, 90.0, 12.0).unwrap().is_some());
        assert!(detector.get_font_at_position(0, 300.0, 300.0).unwrap().is_none());
    }

    #[test]
    fn test_page_out_of_range() {
        let (_dir, path) = write_doc(JsonDocument::new().with_page(612.0, 792.0));
        let backend = JsonBackend::new();
        let detector = FontDetector::opened(&backend, &path).unwrap();
        assert!(matches!(detector.get_fonts_on_page(1), Err(Error::PageIndex { .. })));
        assert!(detector.get_dominant_font(None).unwrap().is_none());
    }
}

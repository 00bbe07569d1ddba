//! Span extraction into [`TextBlock`]s.
//!
//! The extractor owns a document handle for as long as it is open. Dropping
//! it closes the handle, so every exit path (early `?` return included)
//! releases the engine's resources.

use crate::backend::{PdfBackend, PdfDocumentHandle, RawSpan};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::layout::{Color, TextBlock};
use std::path::{Path, PathBuf};

/// Build a block from an engine span, rejecting malformed boxes.
pub fn text_block_from_span(span: &RawSpan, page: usize) -> Result<TextBlock> {
    let [x0, y0, x1, y1] = span.bbox;
    let bbox = Rect::new(x0, y0, x1, y1)?;
    Ok(TextBlock::new(span.text.clone(), bbox)
        .with_font(span.font.clone(), span.size, span.flags)
        .with_color(Color::from(span.color))
        .at(page, span.block, span.line))
}

/// Extracts positioned text from one document.
pub struct TextExtractor<'a> {
    backend: &'a dyn PdfBackend,
    path: PathBuf,
    document: Option<Box<dyn PdfDocumentHandle>>,
}

impl<'a> TextExtractor<'a> {
    /// Create a closed extractor for `path`.
    pub fn new(backend: &'a dyn PdfBackend, path: impl AsRef<Path>) -> Self {
        Self {
            backend,
            path: path.as_ref().to_path_buf(),
            document: None,
        }
    }

    /// Create an extractor and open its document.
    pub fn opened(backend: &'a dyn PdfBackend, path: impl AsRef<Path>) -> Result<Self> {
        let mut extractor = Self::new(backend, path);
        extractor.open()?;
        Ok(extractor)
    }

    /// Open the document. Opening an already open extractor is a no-op.
    pub fn open(&mut self) -> Result<()> {
        if self.document.is_none() {
            log::debug!("Opening {} with {}", self.path.display(), self.backend.backend_name());
            self.document = Some(self.backend.open(&self.path)?);
        }
        Ok(())
    }

    /// Close the document handle if open.
    pub fn close(&mut self) {
        if let Some(mut document) = self.document.take() {
            document.close();
            log::debug!("Closed {}", self.path.display());
        }
    }

    /// Whether a document handle is held.
    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    /// Path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn document(&self, operation: &'static str) -> Result<&dyn PdfDocumentHandle> {
        self.document
            .as_deref()
            .ok_or(Error::DocumentNotOpen(operation))
    }

    /// Pages selected by an optional page index, validated against the count.
    pub(crate) fn page_range(&self, page: Option<usize>, operation: &'static str) -> Result<Vec<usize>> {
        let count = self.document(operation)?.page_count();
        match page {
            Some(p) => {
                Error::check_page(p, count)?;
                Ok(vec![p])
            },
            None => Ok((0..count).collect()),
        }
    }

    /// Raw spans of one page.
    pub(crate) fn raw_spans(&self, page: usize, operation: &'static str) -> Result<Vec<RawSpan>> {
        let document = self.document(operation)?;
        Error::check_page(page, document.page_count())?;
        document.spans(page)
    }

    /// Extract blocks from one page, or from every page in index order.
    ///
    /// Blocks keep the engine's emission order; they are not re-sorted.
    pub fn extract_text_blocks(&self, page: Option<usize>) -> Result<Vec<TextBlock>> {
        let mut blocks = Vec::new();
        for p in self.page_range(page, "extract_text_blocks")? {
            for span in self.raw_spans(p, "extract_text_blocks")? {
                blocks.push(text_block_from_span(&span, p)?);
            }
        }
        log::debug!("Extracted {} text blocks from {}", blocks.len(), self.path.display());
        Ok(blocks)
    }

    /// Plain text of one page, or all pages concatenated in index order.
    pub fn extract_text(&self, page: Option<usize>) -> Result<String> {
        let document = self.document("extract_text")?;
        let mut text = String::new();
        for p in self.page_range(page, "extract_text")? {
            text.push_str(&document.plain_text(p)?);
        }
        Ok(text)
    }

    /// Number of pages.
    pub fn get_page_count(&self) -> Result<usize> {
        Ok(self.document("get_page_count")?.page_count())
    }

    /// Page `(width, height)` in points.
    pub fn get_page_dimensions(&self, page: usize) -> Result<(f32, f32)> {
        let document = self.document("get_page_dimensions")?;
        Error::check_page(page, document.page_count())?;
        document.page_size(page)
    }
}

impl Drop for TextExtractor<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Extract plain text from a document in one call.
pub fn extract_text_from_pdf(
    backend: &dyn PdfBackend,
    path: impl AsRef<Path>,
    page: Option<usize>,
) -> Result<String> {
    TextExtractor::opened(backend, path)?.extract_text(page)
}

/// Extract text blocks from a document in one call.
pub fn extract_text_blocks_from_pdf(
    backend: &dyn PdfBackend,
    path: impl AsRef<Path>,
    page: Option<usize>,
) -> Result<Vec<TextBlock>> {
    TextExtractor::opened(backend, path)?.extract_text_blocks(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{JsonBackend, JsonDocument};
    use tempfile::TempDir;

    fn sample_backend() -> (JsonBackend, TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        JsonDocument::new()
            .with_page(612.0, 792.0)
            .with_span(RawSpan::new("Title", [72.0, 72.0, 200.0, 96.0], "Helvetica-Bold", 24.0).with_flags(16))
            .with_span(RawSpan::new("Body text", [72.0, 110.0, 300.0, 122.0], "Times-Roman", 12.0).in_line(1, 0))
            .with_page(612.0, 792.0)
            .with_span(RawSpan::new("Second page", [72.0, 72.0, 200.0, 84.0], "Times-Roman", 12.0))
            .save_to(&path, false)
            .unwrap();
        (JsonBackend::new(), dir, path)
    }

    #[test]
    fn test_operations_require_open_document() {
        let (backend, _dir, path) = sample_backend();
        let extractor = TextExtractor::new(&backend, &path);
        assert!(!extractor.is_open());
        assert!(matches!(extractor.extract_text_blocks(None), Err(Error::DocumentNotOpen(_))));
        assert!(matches!(extractor.extract_text(None), Err(Error::DocumentNotOpen(_))));
        assert!(matches!(extractor.get_page_count(), Err(Error::DocumentNotOpen(_))));
    }

    #[test]
    fn test_extract_blocks_all_pages() {
        let (backend, _dir, path) = sample_backend();
        let extractor = TextExtractor::opened(&backend, &path).unwrap();
        let blocks = extractor.extract_text_blocks(None).unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text, "Title");
        assert_eq!(blocks[0].font_flags, 16);
        assert_eq!(blocks[1].block, 1);
        assert_eq!(blocks[2].page, 1);
    }

    #[test]
    fn test_extract_single_page_and_bounds() {
        let (backend, _dir, path) = sample_backend();
        let extractor = TextExtractor::opened(&backend, &path).unwrap();
        let blocks = extractor.extract_text_blocks(Some(1)).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Second page");

        assert!(matches!(
            extractor.extract_text_blocks(Some(2)),
            Err(Error::PageIndex {
                page: 2,
                page_count: 2
            })
        ));
        assert!(matches!(extractor.get_page_dimensions(9), Err(Error::PageIndex { .. })));
    }

    #[test]
    fn test_page_queries() {
        let (backend, _dir, path) = sample_backend();
        let extractor = TextExtractor::opened(&backend, &path).unwrap();
        assert_eq!(extractor.get_page_count().unwrap(), 2);
        assert_eq!(extractor.get_page_dimensions(0).unwrap(), (612.0, 792.0));
    }

    #[test]
    fn test_close_releases_handle() {
        let (backend, _dir, path) = sample_backend();
        let mut extractor = TextExtractor::opened(&backend, &path).unwrap();
        extractor.close();
        assert!(!extractor.is_open());
        assert!(extractor.get_page_count().is_err());
        extractor.open().unwrap();
        assert!(extractor.get_page_count().is_ok());
    }

    #[test]
    fn test_malformed_span_rejected() {
        let span = RawSpan::new("bad", [100.0, 0.0, 50.0, 10.0], "Helvetica", 12.0);
        assert!(matches!(text_block_from_span(&span, 0), Err(Error::MalformedGeometry { .. })));
    }
}

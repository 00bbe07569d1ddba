//! Style-preserving mutations on an open document.
//!
//! Replacing text is done by covering the old run with an opaque white
//! rectangle and inserting the new text at the run's approximate baseline,
//! `(x0, y0 + font_size)`. Nothing is re-flowed: new text that is wider or
//! taller than the covered box overflows into whatever is next to it.
//!
//! A renderer moves through three states:
//!
//! ```text
//! Closed ──open──→ Open ──save──→ Saved ──save──→ Saved
//!    ↑               │               │
//!    └────close/drop─┴───────────────┘
//! ```
//!
//! Mutations are accepted in `Open` and `Saved`. Nothing is written until
//! [`PdfRenderer::save`] is called, and every save re-encodes the whole
//! document.

use crate::backend::{PdfBackend, PdfDocumentHandle};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::layout::{Color, TextBlock};
use crate::writer::render_options::{RenderOptions, TextAlign};
use std::path::{Path, PathBuf};

/// Lifecycle state of a [`PdfRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    /// No document handle held
    Closed,
    /// Handle held, not saved since opening
    Open,
    /// Handle held, saved at least once
    Saved,
}

/// Executes drawing commands against one document.
pub struct PdfRenderer<'a> {
    backend: &'a dyn PdfBackend,
    source: PathBuf,
    output: PathBuf,
    compact: bool,
    document: Option<Box<dyn PdfDocumentHandle>>,
    state: RendererState,
}

impl<'a> PdfRenderer<'a> {
    /// Create a closed renderer. Without an explicit output path, saving
    /// overwrites the source.
    pub fn new(backend: &'a dyn PdfBackend, source: impl AsRef<Path>, output: Option<&Path>) -> Self {
        let source = source.as_ref().to_path_buf();
        let output = output.map(Path::to_path_buf).unwrap_or_else(|| source.clone());
        Self {
            backend,
            source,
            output,
            compact: true,
            document: None,
            state: RendererState::Closed,
        }
    }

    /// Create a renderer and open its document.
    pub fn opened(backend: &'a dyn PdfBackend, source: impl AsRef<Path>, output: Option<&Path>) -> Result<Self> {
        let mut renderer = Self::new(backend, source, output);
        renderer.open()?;
        Ok(renderer)
    }

    /// Whether saves request compaction and stream deflation (default true).
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Open the source document. No-op when already open.
    pub fn open(&mut self) -> Result<()> {
        if self.document.is_none() {
            log::debug!("Opening {} for rendering", self.source.display());
            self.document = Some(self.backend.open(&self.source)?);
            self.state = RendererState::Open;
        }
        Ok(())
    }

    /// Release the document handle. Unsaved changes are discarded.
    pub fn close(&mut self) {
        if let Some(mut document) = self.document.take() {
            if self.state == RendererState::Open {
                log::debug!("Closing {} without saving", self.source.display());
            }
            document.close();
        }
        self.state = RendererState::Closed;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RendererState {
        self.state
    }

    /// Default output path.
    pub fn output_path(&self) -> &Path {
        &self.output
    }

    fn document_mut(&mut self, operation: &'static str) -> Result<&mut dyn PdfDocumentHandle> {
        match self.document.as_mut() {
            Some(document) => Ok(document.as_mut()),
            None => Err(Error::DocumentNotOpen(operation)),
        }
    }

    /// Number of pages.
    pub fn get_page_count(&self) -> Result<usize> {
        self.document
            .as_deref()
            .map(|d| d.page_count())
            .ok_or(Error::DocumentNotOpen("get_page_count"))
    }

    /// Insert text with its baseline starting at `(x, y)`.
    ///
    /// Returns `false` when `page` is past the last page.
    pub fn insert_text(
        &mut self,
        page: usize,
        text: &str,
        x: f32,
        y: f32,
        options: Option<&RenderOptions>,
    ) -> Result<bool> {
        let default_options = RenderOptions::default();
        let options = options.unwrap_or(&default_options);
        let document = self.document_mut("insert_text")?;
        if page >= document.page_count() {
            log::warn!("insert_text: page {} out of range", page);
            return Ok(false);
        }
        let status = document.insert_text(page, Point::new(x, y), text, options)?;
        if status < 0 {
            return Err(Error::Backend(format!("text insertion failed with status {}", status)));
        }
        Ok(true)
    }

    /// Insert text wrapped inside `rect` using the options' alignment.
    ///
    /// Returns `false` when `page` is past the last page.
    pub fn insert_textbox(
        &mut self,
        page: usize,
        text: &str,
        rect: Rect,
        options: Option<&RenderOptions>,
    ) -> Result<bool> {
        let default_options = RenderOptions::default();
        let options = options.unwrap_or(&default_options);
        let document = self.document_mut("insert_textbox")?;
        if page >= document.page_count() {
            log::warn!("insert_textbox: page {} out of range", page);
            return Ok(false);
        }
        let remaining = document.insert_text_box(page, rect, text, options)?;
        if remaining < 0.0 {
            return Err(Error::Backend(format!(
                "text does not fit in a {}x{} box ({} pt short)",
                rect.width(),
                rect.height(),
                -remaining
            )));
        }
        Ok(true)
    }

    /// Paint the block's box white, below later content.
    fn cover_block(&mut self, block: &TextBlock, operation: &'static str) -> Result<()> {
        let document = self.document_mut(operation)?;
        Error::check_page(block.page, document.page_count())?;
        document.draw_filled_rect(block.page, block.bbox, Color::white(), false)
    }

    /// Replace a block's text in place.
    ///
    /// Without options the block's own style is reused.
    pub fn replace_text_block(
        &mut self,
        block: &TextBlock,
        new_text: &str,
        options: Option<&RenderOptions>,
    ) -> Result<bool> {
        let options = match options {
            Some(options) => options.clone(),
            None => RenderOptions::from_text_block(block, TextAlign::Left),
        };
        self.cover_block(block, "replace_text_block")?;
        self.insert_text(
            block.page,
            new_text,
            block.x0(),
            block.y0() + block.font_size,
            Some(&options),
        )
    }

    /// Cover a block without inserting anything.
    pub fn remove_text_block(&mut self, block: &TextBlock) -> Result<()> {
        self.cover_block(block, "remove_text_block")
    }

    /// Add a highlight annotation over a block (yellow by default).
    pub fn highlight_text_block(&mut self, block: &TextBlock, color: Option<Color>) -> Result<()> {
        let document = self.document_mut("highlight_text_block")?;
        Error::check_page(block.page, document.page_count())?;
        document.add_highlight(block.page, block.bbox, color.unwrap_or_else(Color::yellow))
    }

    /// Write the document to `path`, or to the configured output path.
    pub fn save(&mut self, path: Option<&Path>) -> Result<PathBuf> {
        let target = path.map(Path::to_path_buf).unwrap_or_else(|| self.output.clone());
        let compact = self.compact;
        self.document_mut("save")?.save(&target, compact)?;
        self.state = RendererState::Saved;
        log::info!("Saved {}", target.display());
        Ok(target)
    }
}

impl Drop for PdfRenderer<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Insert one piece of text and save, in one call.
pub fn render_text_to_pdf(
    backend: &dyn PdfBackend,
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    page: usize,
    text: &str,
    x: f32,
    y: f32,
    options: Option<&RenderOptions>,
) -> Result<bool> {
    let mut renderer = PdfRenderer::opened(backend, source, Some(output.as_ref()))?;
    if !renderer.insert_text(page, text, x, y, options)? {
        return Ok(false);
    }
    renderer.save(None)?;
    Ok(true)
}

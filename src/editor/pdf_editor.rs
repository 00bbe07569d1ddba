//! Page-level editing operations for one document.
//!
//! [`PdfEditor`] ties extraction, layout, font detection, spell checking and
//! rendering together. It caches the extracted blocks of the current file
//! version. Mutating operations always write to a separate output path and
//! leave the cache alone; call [`PdfEditor::set_path`] and reload to work on
//! the new version.

use crate::backend::PdfBackend;
use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::extractors::TextExtractor;
use crate::fonts::{FontDetector, FontInfo};
use crate::layout::{Color, LayoutMapper, TextBlock};
use crate::spelling::{Mistake, SpellChecker, SpellEngine};
use crate::text::replace_occurrences;
use crate::writer::{BuiltinFont, PdfRenderer, RenderOptions, TextAlign};
use std::path::{Path, PathBuf};

fn block_failed(block: &TextBlock, source: Error) -> Error {
    Error::BlockFailed {
        page: block.page,
        block: block.block,
        line: block.line,
        source: Box::new(source),
    }
}

/// Single-owner editing session for one document.
pub struct PdfEditor {
    path: PathBuf,
    backend: Box<dyn PdfBackend>,
    spell_checker: SpellChecker,
    config: EditorConfig,
    layout: LayoutMapper,
    blocks: Option<Vec<TextBlock>>,
    page_count: usize,
}

impl PdfEditor {
    /// Create an editor for `path`. Nothing is read until the first call
    /// that needs blocks.
    pub fn new(path: impl AsRef<Path>, backend: Box<dyn PdfBackend>, engine: Box<dyn SpellEngine>) -> Self {
        let config = EditorConfig::default();
        Self {
            path: path.as_ref().to_path_buf(),
            backend,
            spell_checker: SpellChecker::new(engine),
            layout: LayoutMapper::with_config(config.layout.clone()),
            config,
            blocks: None,
            page_count: 0,
        }
    }

    /// Use a custom configuration.
    pub fn with_config(mut self, config: EditorConfig) -> Result<Self> {
        config.validate()?;
        self.layout = LayoutMapper::with_config(config.layout.clone());
        self.config = config;
        self.blocks = None;
        Ok(self)
    }

    /// Seed the custom spelling dictionary.
    pub fn with_dictionary<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.spell_checker.add_to_dictionary(word.as_ref());
        }
        self
    }

    /// Path of the current file version.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration in use.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Layout map of the loaded version (empty before loading).
    pub fn layout(&self) -> &LayoutMapper {
        &self.layout
    }

    /// Spell checker in use.
    pub fn spell_checker(&self) -> &SpellChecker {
        &self.spell_checker
    }

    /// Whether blocks are cached.
    pub fn is_loaded(&self) -> bool {
        self.blocks.is_some()
    }

    /// Switch to another file version. The cache and layout map are dropped.
    pub fn set_path(&mut self, path: impl AsRef<Path>) {
        self.path = path.as_ref().to_path_buf();
        self.blocks = None;
        self.page_count = 0;
        self.layout = LayoutMapper::with_config(self.config.layout.clone());
    }

    /// Extract every block and rebuild the layout map.
    pub fn load(&mut self) -> Result<()> {
        let extractor = TextExtractor::opened(self.backend.as_ref(), &self.path)?;
        let page_count = extractor.get_page_count()?;
        let blocks = extractor.extract_text_blocks(None)?;
        drop(extractor);

        let mut layout = LayoutMapper::with_config(self.config.layout.clone());
        layout.add_text_blocks(blocks.iter().cloned());
        log::info!(
            "Loaded {}: {} pages, {} blocks, {} regions",
            self.path.display(),
            page_count,
            blocks.len(),
            layout.region_count()
        );

        self.layout = layout;
        self.page_count = page_count;
        self.blocks = Some(blocks);
        Ok(())
    }

    fn ensure_loaded(&mut self, page: Option<usize>) -> Result<()> {
        if self.blocks.is_none() {
            self.load()?;
        }
        if let Some(p) = page {
            Error::check_page(p, self.page_count)?;
        }
        Ok(())
    }

    fn cached_blocks(&self, page: Option<usize>) -> Vec<&TextBlock> {
        self.blocks
            .iter()
            .flatten()
            .filter(|b| page.map_or(true, |p| b.page == p))
            .collect()
    }

    fn renderer(&self, output: &Path) -> Result<PdfRenderer<'_>> {
        Ok(PdfRenderer::opened(self.backend.as_ref(), &self.path, Some(output))?
            .with_compact(self.config.compact_on_save))
    }

    /// Cached blocks of one page or the whole document, loading if needed.
    pub fn get_text_blocks(&mut self, page: Option<usize>) -> Result<Vec<&TextBlock>> {
        self.ensure_loaded(page)?;
        Ok(self.cached_blocks(page))
    }

    /// Blocks with at least one misspelled word, with their mistakes.
    pub fn check_spelling(&mut self, page: Option<usize>) -> Result<Vec<(TextBlock, Vec<Mistake>)>> {
        self.ensure_loaded(page)?;
        Ok(self
            .cached_blocks(page)
            .into_iter()
            .filter_map(|block| {
                let mistakes = self.spell_checker.check_text(&block.text);
                (!mistakes.is_empty()).then(|| (block.clone(), mistakes))
            })
            .collect())
    }

    /// Rewrite every block whose corrected text differs, in its own style,
    /// and save to `output`.
    ///
    /// Returns the number of rewritten blocks. A failing block aborts the
    /// run and nothing is saved.
    pub fn correct_spelling(&mut self, output: impl AsRef<Path>, page: Option<usize>) -> Result<usize> {
        self.ensure_loaded(page)?;
        let edits: Vec<(&TextBlock, String)> = self
            .cached_blocks(page)
            .into_iter()
            .filter_map(|block| {
                let corrected = self.spell_checker.correct_text(&block.text);
                (corrected != block.text).then_some((block, corrected))
            })
            .collect();

        let mut renderer = self.renderer(output.as_ref())?;
        for (block, corrected) in &edits {
            let options = RenderOptions::from_text_block(block, TextAlign::Left);
            let written = renderer
                .replace_text_block(block, corrected, Some(&options))
                .map_err(|e| block_failed(block, e))?;
            if !written {
                return Err(block_failed(block, Error::page_index(block.page, self.page_count)));
            }
            log::debug!("Corrected '{}' -> '{}'", block.text, corrected);
        }
        renderer.save(None)?;
        log::info!("Corrected {} block(s)", edits.len());
        Ok(edits.len())
    }

    /// Insert text at `(x, y)` on `page` and save to `output`.
    ///
    /// A missing size or font name is taken from the page's dominant font,
    /// or from the defaults when the page has no text. `font_name` may be a
    /// built-in id (`"tiro"`) or a family name (`"Times New Roman"`).
    pub fn insert_text(
        &self,
        output: impl AsRef<Path>,
        page: usize,
        text: &str,
        x: f32,
        y: f32,
        font_size: Option<f32>,
        font_name: Option<&str>,
    ) -> Result<bool> {
        Error::check_page(page, self.get_page_count()?)?;

        let mut options = if font_size.is_some() && font_name.is_some() {
            RenderOptions::default()
        } else {
            let dominant = FontDetector::opened(self.backend.as_ref(), &self.path)?.get_dominant_font(Some(page))?;
            match dominant {
                Some(info) => RenderOptions::from_font_info(&info, TextAlign::Left),
                None => RenderOptions::default().with_font_size(self.config.default_font_size),
            }
        };
        if let Some(size) = font_size {
            options.font_size = size;
        }
        if let Some(name) = font_name {
            options.font = BuiltinFont::resolve(name);
        }

        let mut renderer = self.renderer(output.as_ref())?;
        let inserted = renderer.insert_text(page, text, x, y, Some(&options))?;
        if inserted {
            renderer.save(None)?;
        }
        Ok(inserted)
    }

    /// Replace every occurrence of `old` with `new` in the blocks that
    /// contain it, and save to `output`.
    ///
    /// Blocks are found case-insensitively; the substitution itself is
    /// case-sensitive, so a block only counts when its text changed. With
    /// `preserve_style` off, rewritten blocks use the default style.
    ///
    /// An empty `old` matches nothing: the call returns 0 and writes no output.
    pub fn replace_text(
        &mut self,
        output: impl AsRef<Path>,
        old: &str,
        new: &str,
        page: Option<usize>,
        preserve_style: bool,
    ) -> Result<usize> {
        if old.is_empty() {
            log::warn!("replace_text: empty search string, nothing replaced");
            return Ok(0);
        }
        self.ensure_loaded(page)?;
        let default_options = RenderOptions::default().with_font_size(self.config.default_font_size);

        let mut renderer = self.renderer(output.as_ref())?;
        let mut count = 0;
        for block in self.layout.find_blocks_by_text(old, page) {
            let modified = replace_occurrences(&block.text, old, new, None);
            if modified == block.text {
                continue;
            }
            let options = if preserve_style {
                RenderOptions::from_text_block(block, TextAlign::Left)
            } else {
                default_options.clone()
            };
            let written = renderer
                .replace_text_block(block, &modified, Some(&options))
                .map_err(|e| block_failed(block, e))?;
            if !written {
                return Err(block_failed(block, Error::page_index(block.page, self.page_count)));
            }
            count += 1;
        }
        renderer.save(None)?;
        log::info!("Replaced '{}' in {} block(s)", old, count);
        Ok(count)
    }

    /// Highlight every block containing `search` and save to `output`.
    pub fn highlight_text(
        &mut self,
        output: impl AsRef<Path>,
        search: &str,
        page: Option<usize>,
        color: Option<Color>,
    ) -> Result<usize> {
        self.ensure_loaded(page)?;
        let blocks = self.layout.find_blocks_by_text(search, page);
        let mut renderer = self.renderer(output.as_ref())?;
        for block in &blocks {
            renderer
                .highlight_text_block(block, color)
                .map_err(|e| block_failed(block, e))?;
        }
        renderer.save(None)?;
        Ok(blocks.len())
    }

    /// Blocks whose text contains `search`, ignoring case.
    pub fn find_text(&mut self, search: &str, page: Option<usize>) -> Result<Vec<&TextBlock>> {
        self.ensure_loaded(page)?;
        Ok(self.layout.find_blocks_by_text(search, page))
    }

    /// Distinct fonts of one page or the whole document.
    pub fn get_fonts(&self, page: Option<usize>) -> Result<Vec<FontInfo>> {
        FontDetector::opened(self.backend.as_ref(), &self.path)?.get_unique_fonts(page)
    }

    /// Number of pages of the current file version.
    pub fn get_page_count(&self) -> Result<usize> {
        TextExtractor::opened(self.backend.as_ref(), &self.path)?.get_page_count()
    }

    /// Page `(width, height)` in points.
    pub fn get_page_dimensions(&self, page: usize) -> Result<(f32, f32)> {
        TextExtractor::opened(self.backend.as_ref(), &self.path)?.get_page_dimensions(page)
    }

    /// Plain text of one page or the whole document.
    pub fn extract_text(&self, page: Option<usize>) -> Result<String> {
        TextExtractor::opened(self.backend.as_ref(), &self.path)?.extract_text(page)
    }

    /// Accept `word` in every later spelling check.
    pub fn add_word_to_dictionary(&mut self, word: &str) {
        self.spell_checker.add_to_dictionary(word);
    }

    /// Remove `word` from the custom dictionary.
    pub fn remove_word_from_dictionary(&mut self, word: &str) {
        self.spell_checker.remove_from_dictionary(word);
    }

    /// Up to `max` corrections for `word`.
    pub fn get_spelling_suggestions(&self, word: &str, max: usize) -> Vec<String> {
        self.spell_checker.get_suggestions(word, max)
    }
}

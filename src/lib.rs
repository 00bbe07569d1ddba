// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unnecessary_map_or)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Retext
//!
//! Layout-aware, style-preserving text editing for PDF pages.
//!
//! ## Core Features
//!
//! - **Text Block Model**: every positioned span becomes an immutable [`layout::TextBlock`]
//!   with validated geometry, font, size, flags and color
//! - **Layout Reconstruction**: region clustering, alignment detection, line spacing
//!   and column grouping from geometry alone ([`layout::LayoutMapper`])
//! - **Font Detection**: style decoding from the span flag word, unique and
//!   character-weighted dominant fonts ([`fonts::FontDetector`])
//! - **Style-Preserving Rewrites**: cover-and-reinsert replacement that keeps the
//!   original font family, size and color ([`writer::PdfRenderer`])
//! - **Spell Correction**: pluggable engine with a custom dictionary and case
//!   preservation ([`spelling::SpellChecker`])
//!
//! ## Architecture
//!
//! ```text
//! PdfBackend ──spans──→ TextExtractor ──TextBlock[]──→ LayoutMapper / FontDetector
//!                                                        ↓
//!                                         PdfEditor (search, spell check, decisions)
//!                                                        ↓
//! PdfBackend ←──draw/insert/save── PdfRenderer ←── RenderOptions
//! ```
//!
//! The PDF engine is reached through the [`backend::PdfBackend`] and
//! [`backend::PdfDocumentHandle`] traits. [`backend::JsonBackend`] is a
//! self-contained engine that stores page models as JSON.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_retext::backend::JsonBackend;
//! use pdf_retext::editor::PdfEditor;
//! use pdf_retext::spelling::WordListSpellEngine;
//!
//! # fn main() -> pdf_retext::Result<()> {
//! let engine = WordListSpellEngine::new(["hello", "world"]);
//! let mut editor = PdfEditor::new("letter.json", Box::new(JsonBackend::new()), Box::new(engine));
//!
//! let replaced = editor.replace_text("letter.out.json", "world", "there", None, true)?;
//! println!("rewrote {} blocks", replaced);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Layout analysis
pub mod geometry;
pub mod layout;

// PDF engine interface
pub mod backend;

// Text extraction
pub mod extractors;
pub mod fonts;
pub mod text;

// Spell checking
pub mod spelling;

// Writing text back
pub mod writer;

// Editing sessions
pub mod editor;

// Re-exports
pub use backend::{JsonBackend, PdfBackend, PdfDocumentHandle, RawSpan};
pub use config::{EditorConfig, LayoutConfig};
pub use editor::PdfEditor;
pub use error::{Error, Result};
pub use fonts::{FontDetector, FontInfo};
pub use geometry::{Point, Rect};
pub use layout::{Alignment, Color, LayoutMapper, LayoutRegion, TextBlock};
pub use spelling::{Mistake, SpellChecker, SpellEngine, WordListSpellEngine};
pub use writer::{PdfRenderer, RenderOptions};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Total order on floats for sorting.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Document-level editing sessions.
//!
//! ```ignore
//! use pdf_retext::backend::JsonBackend;
//! use pdf_retext::editor::PdfEditor;
//! use pdf_retext::spelling::WordListSpellEngine;
//!
//! let engine = WordListSpellEngine::new(["invoice", "total"]);
//! let mut editor = PdfEditor::new("invoice.json", Box::new(JsonBackend::new()), Box::new(engine));
//! for (block, mistakes) in editor.check_spelling(None)? {
//!     println!("page {}: {:?}", block.page, mistakes);
//! }
//! let corrected = editor.correct_spelling("invoice.fixed.json", None)?;
//! editor.set_path("invoice.fixed.json");
//! ```

pub mod pdf_editor;

pub use pdf_editor::PdfEditor;

//! Writing text back into documents.
//!
//! ## Architecture
//!
//! ```text
//! TextBlock / FontInfo
//!     ↓
//! [RenderOptions] (built-in font mapping, size, color, alignment)
//!     ↓
//! [PdfRenderer] (cover-and-reinsert, insertion, highlight)
//!     ↓
//! PdfDocumentHandle drawing commands → save
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use pdf_retext::writer::{PdfRenderer, RenderOptions};
//!
//! let mut renderer = PdfRenderer::opened(&backend, "in.json", Some("out.json".as_ref()))?;
//! renderer.insert_text(0, "Hello, World!", 72.0, 720.0, Some(&RenderOptions::default()))?;
//! renderer.save(None)?;
//! ```

pub mod render_options;
pub mod renderer;

pub use render_options::{BuiltinFont, RenderOptions, TextAlign};
pub use renderer::{render_text_to_pdf, PdfRenderer, RendererState};

//! Text extraction from documents.
//!
//! Turns the engine's positioned spans into [`TextBlock`](crate::layout::TextBlock)s.

pub mod text;

pub use text::{extract_text_blocks_from_pdf, extract_text_from_pdf, text_block_from_span, TextExtractor};

//! Font detection.
//!
//! Classifies span styles from the flag word and aggregates the fonts used
//! on a page or across a document.

pub mod detector;

pub use detector::{detect_fonts_in_pdf, FontDetector, FontFlags, FontInfo, FontKey};

//! Error types for the editing pipeline.
//!
//! Every fallible operation in the crate returns [`Result`]. Extraction,
//! layout and rendering calls fail fast with the first error they meet;
//! batch operations in the editor wrap the failing block's error in
//! [`Error::BlockFailed`] so callers can tell which block aborted the run.

/// Result type alias for editing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting, analysing or rewriting a PDF.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation that needs an open document handle was called on a closed one
    #[error("Document not open: {0} requires an open document")]
    DocumentNotOpen(&'static str),

    /// Page index outside `[0, page_count)`
    #[error("Page index {page} out of range (document has {page_count} pages)")]
    PageIndex {
        /// Requested page (0-based)
        page: usize,
        /// Number of pages in the document
        page_count: usize,
    },

    /// Text positions violate `0 <= start <= end <= len` or split a character
    #[error("Invalid position range [{start}, {end}] for text of length {len}")]
    InvalidRange {
        /// Start offset (bytes)
        start: usize,
        /// End offset (bytes)
        end: usize,
        /// Length of the text (bytes)
        len: usize,
    },

    /// A bounding box with `x1 < x0` or `y1 < y0`
    #[error("Malformed bounding box ({x0}, {y0}, {x1}, {y1})")]
    MalformedGeometry {
        /// Left edge
        x0: f32,
        /// Top edge
        y0: f32,
        /// Right edge
        x1: f32,
        /// Bottom edge
        y1: f32,
    },

    /// The PDF engine collaborator reported a failure
    #[error("PDF backend error: {0}")]
    Backend(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A batch operation aborted on one block
    #[error("Failed on block {block} line {line} of page {page}: {source}")]
    BlockFailed {
        /// Page of the failing block
        page: usize,
        /// Block index of the failing block
        block: usize,
        /// Line index of the failing block
        line: usize,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::PageIndex`] error.
    pub fn page_index(page: usize, page_count: usize) -> Self {
        Error::PageIndex { page, page_count }
    }

    /// Check a page index against a page count.
    pub fn check_page(page: usize, page_count: usize) -> Result<()> {
        if page < page_count {
            Ok(())
        } else {
            Err(Error::page_index(page, page_count))
        }
    }
}

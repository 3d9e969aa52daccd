//! Document error types
//!
//! Errors raised by document sources while opening a file or answering
//! page, text and annotation queries.

use thiserror::Error;

/// Unified document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to open or parse the document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Page index outside the document
    #[error("Page {0} not found (document has {1} pages)")]
    PageNotFound(usize, usize),

    /// Text extraction failed for a page or region
    #[error("Text extraction error: {0}")]
    TextExtractionError(String),

    /// Outline (bookmarks) could not be read
    #[error("Outline error: {0}")]
    OutlineError(String),

    /// Annotation dictionary is missing required entries
    #[error("Malformed annotation on page {page}: {reason}")]
    MalformedAnnotation { page: usize, reason: String },

    /// MuPDF context error
    #[error("MuPDF error: {0}")]
    MuPdf(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Alias for Result (reads better at call sites outside this module)
pub type DocumentResult<T> = Result<T>;

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::MuPdf(err.to_string())
    }
}

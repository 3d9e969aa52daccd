//! Error types for pdf-comments

use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;
use crate::report::ReportError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File does not exist: {0}")]
    FileNotFound(PathBuf),

    #[error("Path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("File must be a PDF (.pdf extension): {0}")]
    NotPdf(PathBuf),

    #[error("Invalid path {path}: {source}")]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File size ({size_mb:.1} MB) exceeds maximum allowed size ({max_mb} MB)")]
    FileTooLarge { size_mb: f64, max_mb: u64 },

    #[error("Page count ({count}) exceeds maximum allowed ({max})")]
    TooManyPages { count: usize, max: usize },

    #[error("Output path exists but is not a directory: {0}")]
    OutputNotDirectory(PathBuf),

    #[error("No write permission in output directory {path}: {source}")]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

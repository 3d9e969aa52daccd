//! Report error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Formatting into the report buffer failed
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Writing a report file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

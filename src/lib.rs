//! PDF Comments Library
//!
//! Extracts reviewer annotations from a marked-up PDF and turns them into
//! three markdown reports: every comment, corrections for the student and
//! questions for the examiner.
//!
//! # Modules
//!
//! - `document`: Document abstraction the pipeline reads through
//! - `mupdf`: MuPDF implementation of that abstraction
//! - `comments`: Chapter map, context, classification and the pipeline
//! - `report`: Grouping and markdown rendering
//! - `config`, `validation`, `error`: Limits, path checks and app errors

pub mod comments;
pub mod config;
pub mod document;
pub mod error;
pub mod mupdf;
pub mod report;
pub mod validation;

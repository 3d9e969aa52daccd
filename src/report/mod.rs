//! Markdown reports
//!
//! Groups extracted comments by chapter (or page) and renders the three
//! review documents: all comments, student corrections and examiner
//! questions.

mod error;
pub mod grouper;
pub mod markdown;
pub mod writer;

pub use error::{ReportError, Result};
pub use grouper::{group_and_order, CategorySection, CommentGroup};
pub use markdown::{render_reports, Reports};
pub use writer::write_reports;

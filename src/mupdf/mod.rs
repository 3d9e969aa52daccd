//! MuPDF document source
//!
//! Reads PDFs through MuPDF: word layouts come from structured text, the
//! outline from the document's bookmarks and annotations from the raw
//! `/Annots` dictionaries.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pdf_comments::mupdf::MupdfSource;
//! use pdf_comments::comments;
//!
//! let source = MupdfSource::open("thesis.pdf")?;
//! let extraction = comments::extract(&source)?;
//! ```

mod annots;
mod source;
mod stext;

pub use annots::{PageBox, PageGeometry};
pub use source::MupdfSource;

//! Document abstraction
//!
//! Format-agnostic interface the comment pipeline reads through, plus the
//! geometry and text-layer types shared by every source.
//!
//! ```text
//!   ┌──────────────────────┐     ┌──────────────────────┐
//!   │     MupdfSource      │     │    MemoryDocument    │
//!   │  (PDF via MuPDF)     │     │ (strings and rects)  │
//!   └──────────┬───────────┘     └──────────┬───────────┘
//!              └─────────────┬──────────────┘
//!                            ▼
//!              ┌──────────────────────────┐
//!              │      DocumentSource      │
//!              │ outline · text · annots  │
//!              └──────────────────────────┘
//! ```

mod error;
mod memory;
mod traits;
mod types;

pub use error::{DocumentError, DocumentResult, Result};
pub use memory::{MemoryDocument, MemoryPage};
pub use traits::DocumentSource;
pub use types::{
    AnnotationKind, OutlineEntry, PageLayout, RawAnnotation, Rect, TextLine, Word,
};

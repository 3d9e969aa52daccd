//! Comment extraction
//!
//! Turns reviewer annotations into categorized comments:
//!
//! - [`chapters`]: page to chapter lookup from the document outline
//! - [`context`]: surrounding text, bold emphasis and line estimates
//! - [`classifier`]: prefix-based categories
//! - [`pipeline`]: the per-page, per-annotation driver

pub mod chapters;
pub mod classifier;
pub mod context;
pub mod pipeline;
mod types;

pub use chapters::ChapterMap;
pub use classifier::classify;
pub use context::ContextResolver;
pub use pipeline::{extract, AnnotationPipeline, Extraction, ExtractionStats, SkipTally};
pub use types::{Category, Comment};

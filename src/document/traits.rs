//! Document traits
//!
//! The capability the comment pipeline needs from a paginated document.

use super::error::Result;
use super::types::{OutlineEntry, RawAnnotation, Rect, Word};

/// Page/rectangle-addressable view of a document
///
/// Page indices are 0-based. Implementations are queried synchronously and
/// strictly in document order.
pub trait DocumentSource {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Flattened outline in document order (may be empty)
    fn outline(&self) -> Result<Vec<OutlineEntry>>;

    /// Page bounds in page space
    fn page_bounds(&self, page_index: usize) -> Result<Rect>;

    /// Plain text inside `region`, lines separated by newlines
    fn page_text_in_region(&self, page_index: usize, region: &Rect) -> Result<String>;

    /// Words whose boxes intersect `region`, in reading order
    fn page_words_in_region(&self, page_index: usize, region: &Rect) -> Result<Vec<Word>>;

    /// Annotations on a page, in document order
    fn annotations(&self, page_index: usize) -> Result<Vec<RawAnnotation>>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn outline(&self) -> Result<Vec<OutlineEntry>> {
        (**self).outline()
    }

    fn page_bounds(&self, page_index: usize) -> Result<Rect> {
        (**self).page_bounds(page_index)
    }

    fn page_text_in_region(&self, page_index: usize, region: &Rect) -> Result<String> {
        (**self).page_text_in_region(page_index, region)
    }

    fn page_words_in_region(&self, page_index: usize, region: &Rect) -> Result<Vec<Word>> {
        (**self).page_words_in_region(page_index, region)
    }

    fn annotations(&self, page_index: usize) -> Result<Vec<RawAnnotation>> {
        (**self).annotations(page_index)
    }
}

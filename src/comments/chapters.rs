//! Page to chapter lookup built from the document outline

use std::collections::{BTreeMap, BTreeSet};

use crate::document::OutlineEntry;

/// Title given to pages reached by sub-section entries before any chapter
pub const UNKNOWN_CHAPTER: &str = "Unknown Chapter";

/// Outline entries at this depth or shallower start a new chapter
const CHAPTER_MAX_LEVEL: u32 = 2;

/// Page number (1-indexed) to chapter title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterMap {
    pages: BTreeMap<u32, String>,
}

impl ChapterMap {
    /// Build the map from outline entries in document order.
    ///
    /// An entry covers its start page up to the page before the next later
    /// entry that starts further on (or the last page). Pages are filled
    /// insert-if-absent, so the first entry to reach a page owns it.
    pub fn build<I>(outline: I, page_count: u32) -> Self
    where
        I: IntoIterator<Item = OutlineEntry>,
    {
        let entries: Vec<OutlineEntry> = outline.into_iter().collect();
        let mut pages = BTreeMap::new();
        let mut current_chapter = UNKNOWN_CHAPTER;

        for (idx, entry) in entries.iter().enumerate() {
            if entry.level <= CHAPTER_MAX_LEVEL {
                current_chapter = &entry.title;
            }
            if entry.page == 0 || entry.page > page_count {
                continue;
            }

            let end = entries[idx + 1..]
                .iter()
                .map(|later| later.page)
                .find(|&start| start > entry.page)
                .map(|start| (start - 1).min(page_count))
                .unwrap_or(page_count);

            for page in entry.page..=end {
                pages
                    .entry(page)
                    .or_insert_with(|| current_chapter.to_string());
            }
        }

        Self { pages }
    }

    /// Chapter title for a page, or `"Page N"` when the page is unmapped
    pub fn lookup(&self, page: u32) -> String {
        self.pages
            .get(&page)
            .cloned()
            .unwrap_or_else(|| format!("Page {}", page))
    }

    /// Whether grouping by chapter tells the reader more than one title
    pub fn is_useful(&self) -> bool {
        self.chapter_count() > 1
    }

    /// Number of distinct titles
    pub fn chapter_count(&self) -> usize {
        self.pages.values().collect::<BTreeSet<_>>().len()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

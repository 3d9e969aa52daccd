//! In-memory document source
//!
//! A [`DocumentSource`] assembled from plain strings and rectangles. Lines are
//! laid out with fixed glyph metrics so callers can aim annotations at known
//! words without a real PDF.

use super::error::{DocumentError, Result};
use super::traits::DocumentSource;
use super::types::{OutlineEntry, PageLayout, RawAnnotation, Rect, TextLine, Word};

/// US Letter in points
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

const LEFT_MARGIN: f32 = 72.0;
const GLYPH_WIDTH: f32 = 5.0;
const GLYPH_HEIGHT: f32 = 12.0;

/// One page of a [`MemoryDocument`]
#[derive(Debug, Clone)]
pub struct MemoryPage {
    layout: PageLayout,
    annotations: Vec<RawAnnotation>,
    fail_text: bool,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            layout: PageLayout::new(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT)),
            annotations: Vec::new(),
            fail_text: false,
        }
    }

    /// Add a line of text whose top edge sits at `y`
    pub fn text_line(mut self, y: f32, text: &str) -> Self {
        let mut x = LEFT_MARGIN;
        let mut words = Vec::new();
        for token in text.split_whitespace() {
            let width = token.chars().count() as f32 * GLYPH_WIDTH;
            words.push(Word::new(token, Rect::new(x, y, width, GLYPH_HEIGHT)));
            x += width + GLYPH_WIDTH;
        }
        if let Some(first) = words.first() {
            let bbox = words.iter().fold(first.bbox, |acc, w| acc.union(&w.bbox));
            self.layout.lines.push(TextLine { bbox, words });
        }
        self
    }

    pub fn annotation(mut self, annotation: RawAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Make every text query on this page fail
    pub fn failing_text(mut self) -> Self {
        self.fail_text = true;
        self
    }

    /// Bounding box of the first run of consecutive words on one line
    /// matching `phrase`
    pub fn phrase_rect(&self, phrase: &str) -> Option<Rect> {
        let needle: Vec<&str> = phrase.split_whitespace().collect();
        if needle.is_empty() {
            return None;
        }
        self.layout.lines.iter().find_map(|line| {
            line.words
                .windows(needle.len())
                .find(|window| window.iter().map(|w| w.text.as_str()).eq(needle.iter().copied()))
                .map(|window| {
                    window
                        .iter()
                        .fold(window[0].bbox, |acc, w| acc.union(&w.bbox))
                })
        })
    }

    fn check_text(&self, page_index: usize) -> Result<()> {
        if self.fail_text {
            return Err(DocumentError::TextExtractionError(format!(
                "text layer unavailable on page {}",
                page_index + 1
            )));
        }
        Ok(())
    }
}

/// Document held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pages: Vec<MemoryPage>,
    outline: Vec<OutlineEntry>,
    broken_outline: bool,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: MemoryPage) -> Self {
        self.pages.push(page);
        self
    }

    pub fn outline_entry(mut self, level: u32, title: &str, page: u32) -> Self {
        self.outline.push(OutlineEntry::new(level, title, page));
        self
    }

    /// Make outline retrieval fail
    pub fn broken_outline(mut self) -> Self {
        self.broken_outline = true;
        self
    }

    fn get(&self, page_index: usize) -> Result<&MemoryPage> {
        self.pages
            .get(page_index)
            .ok_or(DocumentError::PageNotFound(page_index, self.pages.len()))
    }
}

impl DocumentSource for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn outline(&self) -> Result<Vec<OutlineEntry>> {
        if self.broken_outline {
            return Err(DocumentError::OutlineError("outline is corrupt".into()));
        }
        Ok(self.outline.clone())
    }

    fn page_bounds(&self, page_index: usize) -> Result<Rect> {
        Ok(self.get(page_index)?.layout.bounds)
    }

    fn page_text_in_region(&self, page_index: usize, region: &Rect) -> Result<String> {
        let page = self.get(page_index)?;
        page.check_text(page_index)?;
        Ok(page.layout.text_in(region))
    }

    fn page_words_in_region(&self, page_index: usize, region: &Rect) -> Result<Vec<Word>> {
        let page = self.get(page_index)?;
        page.check_text(page_index)?;
        Ok(page.layout.words_in(region))
    }

    fn annotations(&self, page_index: usize) -> Result<Vec<RawAnnotation>> {
        Ok(self.get(page_index)?.annotations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_rect() {
        let page = MemoryPage::new().text_line(100.0, "the quick brown fox");
        let rect = page.phrase_rect("quick brown").unwrap();
        // "the " = 3 glyphs + gap
        assert_eq!(rect.x, 72.0 + 4.0 * GLYPH_WIDTH);
        assert_eq!(rect.width, 11.0 * GLYPH_WIDTH);
        assert_eq!(rect.y, 100.0);
        assert!(page.phrase_rect("slow fox").is_none());
    }

    #[test]
    fn test_page_not_found() {
        let doc = MemoryDocument::new().page(MemoryPage::new());
        assert!(matches!(
            doc.annotations(3),
            Err(DocumentError::PageNotFound(3, 1))
        ));
    }

    #[test]
    fn test_failing_text() {
        let doc = MemoryDocument::new().page(MemoryPage::new().text_line(100.0, "x").failing_text());
        let region = Rect::new(0.0, 0.0, 612.0, 792.0);
        assert!(doc.page_text_in_region(0, &region).is_err());
        assert!(doc.page_words_in_region(0, &region).is_err());
    }
}

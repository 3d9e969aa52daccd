//! Annotation pipeline
//!
//! Walks every page of a document, keeps the annotations that can carry a
//! reviewer comment and turns each into a [`Comment`] with its highlighted
//! words, surrounding context, line estimate and category.
//!
//! A single bad annotation never stops the run: it is logged, counted and
//! skipped. Only failing to list a page's annotations is fatal.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::chapters::ChapterMap;
use super::classifier::classify;
use super::context::{collapse_whitespace, estimate_line, ContextResolver};
use super::types::Comment;
use crate::document::{
    AnnotationKind, DocumentError, DocumentResult, DocumentSource, RawAnnotation, Rect,
};

/// Annotation kinds that can carry a comment
pub const ALLOWED_KINDS: [AnnotationKind; 5] = [
    AnnotationKind::Text,
    AnnotationKind::FreeText,
    AnnotationKind::Popup,
    AnnotationKind::Highlight,
    AnnotationKind::Ink,
];

/// Skipped annotation count per reason
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipTally {
    reasons: BTreeMap<String, usize>,
}

impl SkipTally {
    pub fn record(&mut self, reason: impl Into<String>) {
        *self.reasons.entry(reason.into()).or_insert(0) += 1;
    }

    pub fn count(&self, reason: &str) -> usize {
        self.reasons.get(reason).copied().unwrap_or(0)
    }

    /// Total skipped annotations
    pub fn total(&self) -> usize {
        self.reasons.values().sum()
    }

    /// Reasons in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.reasons.iter().map(|(reason, count)| (reason.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Extraction statistics
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub pages: usize,
    pub total_annotations: usize,
    pub extracted: usize,
    /// Annotations dropped because building the comment failed
    pub failed: usize,
    pub skipped: SkipTally,
}

/// Result of running the pipeline over one document
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Comments in document order
    pub comments: Vec<Comment>,
    pub chapters: ChapterMap,
    pub stats: ExtractionStats,
}

/// Turns a document's annotations into comments
pub struct AnnotationPipeline<'a, S: ?Sized> {
    source: &'a S,
    context: ContextResolver<'a, S>,
}

impl<'a, S: DocumentSource + ?Sized> AnnotationPipeline<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            context: ContextResolver::new(source),
        }
    }

    /// Extract every comment in document order
    pub fn extract(&self) -> DocumentResult<Extraction> {
        let page_count = self.source.page_count();
        info!("Extracting comments from {} pages", page_count);

        let chapters = self.build_chapter_map(page_count);
        let mut stats = ExtractionStats {
            pages: page_count,
            ..Default::default()
        };
        let mut comments = Vec::new();

        for page_index in 0..page_count {
            trace!("Processing page {}/{}", page_index + 1, page_count);

            for annotation in self.source.annotations(page_index)? {
                stats.total_annotations += 1;
                if let Some(comment) = self.process_annotation(page_index, &annotation, &mut stats) {
                    comments.push(comment);
                }
            }
        }

        stats.extracted = comments.len();
        info!(
            "Extracted {} comments from {} pages ({} annotations found)",
            stats.extracted, page_count, stats.total_annotations
        );
        for (reason, count) in stats.skipped.iter() {
            debug!("Skipped {}: {}", reason, count);
        }

        Ok(Extraction {
            comments,
            chapters,
            stats,
        })
    }

    fn build_chapter_map(&self, page_count: usize) -> ChapterMap {
        match self.source.outline() {
            Ok(outline) if outline.is_empty() => {
                debug!("No table of contents found");
                ChapterMap::default()
            }
            Ok(outline) => {
                let map = ChapterMap::build(outline, page_count as u32);
                debug!("Built chapter map with {} chapters", map.chapter_count());
                map
            }
            Err(e) => {
                warn!("Could not read outline, grouping by page: {}", e);
                ChapterMap::default()
            }
        }
    }

    /// Screen one annotation and build its comment, recording why it was
    /// dropped otherwise
    fn process_annotation(
        &self,
        page_index: usize,
        annotation: &RawAnnotation,
        stats: &mut ExtractionStats,
    ) -> Option<Comment> {
        let kind = annotation.kind;
        let page_number = page_index + 1;
        debug!(
            page = page_number,
            kind = kind.name(),
            code = kind.code(),
            "Annotation found"
        );

        if !ALLOWED_KINDS.contains(&kind) {
            let reason = format!("Type {} ({}) not in allowed types", kind.code(), kind.name());
            debug!(page = page_number, "Skipped: {}", reason);
            stats.skipped.record(reason);
            return None;
        }

        let comment_text = annotation.content.trim();
        if comment_text.is_empty() {
            let reason = format!("No content text (Type {}: {})", kind.code(), kind.name());
            debug!(page = page_number, "Skipped: {}", reason);
            stats.skipped.record(reason);
            return None;
        }

        match self.build_comment(page_index, annotation, comment_text) {
            Ok(comment) => Some(comment),
            Err(e) => {
                warn!("Error processing annotation on page {}: {}", page_number, e);
                stats.failed += 1;
                None
            }
        }
    }

    fn build_comment(
        &self,
        page_index: usize,
        annotation: &RawAnnotation,
        comment_text: &str,
    ) -> DocumentResult<Comment> {
        let rect = annotation
            .rect
            .filter(Rect::is_valid)
            .ok_or_else(|| DocumentError::MalformedAnnotation {
                page: page_index + 1,
                reason: format!("{} annotation has no usable /Rect", annotation.kind.name()),
            })?;

        let highlighted_text = self.highlighted_text(page_index, &rect);
        let context_text = self
            .context
            .resolve_context(page_index, &rect, &highlighted_text);

        Ok(Comment {
            page_number: (page_index + 1) as u32,
            estimated_line_number: estimate_line(&rect),
            comment_text: comment_text.to_string(),
            highlighted_text,
            context_text,
            category: classify(comment_text),
        })
    }

    /// Words under the annotation, empty if the text layer can't be read
    fn highlighted_text(&self, page_index: usize, rect: &Rect) -> String {
        match self.source.page_words_in_region(page_index, rect) {
            Ok(words) => collapse_whitespace(
                &words
                    .iter()
                    .map(|word| word.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Err(e) => {
                debug!(page = page_index + 1, error = %e, "Word extraction failed");
                String::new()
            }
        }
    }
}

/// Run the pipeline over `source`
pub fn extract<S: DocumentSource + ?Sized>(source: &S) -> DocumentResult<Extraction> {
    AnnotationPipeline::new(source).extract()
}

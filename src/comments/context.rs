//! Context around an annotation
//!
//! Reconstructs the lines of text surrounding an annotated rectangle, marks
//! the highlighted words in bold and estimates which line of the page the
//! annotation sits on.

use tracing::debug;

use crate::document::{DocumentSource, Rect, Result};

/// Assumed height of one text line, independent of the actual fonts
pub const NOMINAL_LINE_HEIGHT: f32 = 20.0;

/// Assumed distance from the top of the page to the first text line (1 inch)
pub const TOP_MARGIN: f32 = 72.0;

/// Longest context returned, not counting ellipses
pub const MAX_CONTEXT_CHARS: usize = 300;

const ELLIPSIS: &str = "...";
const BOLD: &str = "**";

/// Resolves context text and line numbers against a document source
pub struct ContextResolver<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: DocumentSource + ?Sized> ContextResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Context text for an annotation on `page_index`.
    ///
    /// Falls back to `highlighted_text` when the page text cannot be read or
    /// the region holds no text.
    pub fn resolve_context(&self, page_index: usize, rect: &Rect, highlighted_text: &str) -> String {
        match self.try_resolve(page_index, rect, highlighted_text) {
            Ok(context) if !context.is_empty() => context,
            Ok(_) => highlighted_text.to_string(),
            Err(e) => {
                debug!(page = page_index + 1, error = %e, "Context extraction failed, using highlighted text");
                highlighted_text.to_string()
            }
        }
    }

    fn try_resolve(&self, page_index: usize, rect: &Rect, highlighted_text: &str) -> Result<String> {
        let bounds = self.source.page_bounds(page_index)?;
        let region = context_region(rect, &bounds);
        let raw = self.source.page_text_in_region(page_index, &region)?;

        let context = collapse_whitespace(&raw);
        let emphasized = emphasize(&context, highlighted_text);
        Ok(limit_length(&context, emphasized))
    }
}

/// Best-effort line number of the annotation's top edge (1-indexed)
pub fn estimate_line(rect: &Rect) -> u32 {
    let offset = (rect.top() - TOP_MARGIN).max(0.0);
    let line = (offset / NOMINAL_LINE_HEIGHT).floor() as u32 + 1;
    line.max(1)
}

/// Full page width, annotation height plus one nominal line either side
pub fn context_region(rect: &Rect, page_bounds: &Rect) -> Rect {
    Rect::from_ltrb(
        page_bounds.x,
        rect.top() - NOMINAL_LINE_HEIGHT,
        page_bounds.right(),
        rect.bottom() + NOMINAL_LINE_HEIGHT,
    )
    .clip_to(page_bounds)
}

/// Replace every whitespace run (newlines included) with a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Context with the highlighted span marked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emphasized {
    pub text: String,
    /// Char range of the bold span, markers included
    pub bold: Option<(usize, usize)>,
}

/// Wrap every occurrence of `highlighted` in bold markers.
///
/// Literal `*` in the highlighted words is escaped so the markers stay
/// balanced. `bold` records the first span, which anchors truncation.
pub fn emphasize(context: &str, highlighted: &str) -> Emphasized {
    let needle = collapse_whitespace(highlighted);
    let found = if needle.is_empty() {
        None
    } else {
        context.find(&needle)
    };

    let Some(pos) = found else {
        return Emphasized {
            text: context.to_string(),
            bold: None,
        };
    };

    let escaped = needle.replace('*', "\\*");
    let marked = format!("{BOLD}{escaped}{BOLD}");
    let text = context.replace(&needle, &marked);

    let start = context[..pos].chars().count();
    let end = start + marked.chars().count();
    Emphasized {
        text,
        bold: Some((start, end)),
    }
}

/// Cap context at [`MAX_CONTEXT_CHARS`].
///
/// With a bold span the window runs from half the limit before the span's
/// start to half the limit after it, pushed forward when the span would be
/// cut. Without one, or when the span alone exceeds the limit, the plain
/// context is cut from the start.
pub fn limit_length(plain: &str, emphasized: Emphasized) -> String {
    let chars: Vec<char> = emphasized.text.chars().collect();
    if chars.len() <= MAX_CONTEXT_CHARS {
        return emphasized.text;
    }

    match emphasized.bold {
        Some((span_start, span_end)) if span_end - span_start <= MAX_CONTEXT_CHARS => {
            let half = MAX_CONTEXT_CHARS / 2;
            let mut start = span_start.saturating_sub(half);
            let mut end = (span_start + half).min(chars.len());
            if end < span_end {
                end = span_end;
                start = start.max(end - MAX_CONTEXT_CHARS);
            }

            let mut out = String::new();
            if start > 0 {
                out.push_str(ELLIPSIS);
            }
            out.extend(&chars[start..end]);
            if end < chars.len() {
                out.push_str(ELLIPSIS);
            }
            out
        }
        _ => truncate_plain(plain),
    }
}

fn truncate_plain(plain: &str) -> String {
    if plain.chars().count() <= MAX_CONTEXT_CHARS {
        return plain.to_string();
    }
    let mut out: String = plain.chars().take(MAX_CONTEXT_CHARS).collect();
    out.push_str(ELLIPSIS);
    out
}

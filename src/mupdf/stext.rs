//! Structured text helpers
//!
//! Builds a [`PageLayout`] of whitespace-separated words from MuPDF's
//! structured text, with each word boxed by the union of its character quads.

use mupdf::{Page, Quad, TextPageOptions};

use crate::document::{PageLayout, Rect, Result, TextLine, Word};

/// Word-level layout of one page
pub fn page_layout(page: &Page) -> Result<PageLayout> {
    let bounds = page.bounds()?;
    let mut layout = PageLayout::new(Rect::from_ltrb(bounds.x0, bounds.y0, bounds.x1, bounds.y1));

    let text_page = page.to_text_page(TextPageOptions::empty())?;
    for block in text_page.blocks() {
        for line in block.lines() {
            let mut words = Vec::new();
            let mut current = WordBuilder::default();

            for ch in line.chars() {
                match ch.char() {
                    Some(c) if c.is_whitespace() => current.finish_into(&mut words),
                    Some(c) => current.push(c, quad_rect(&ch.quad())),
                    None => {}
                }
            }
            current.finish_into(&mut words);

            if !words.is_empty() {
                let b = line.bounds();
                layout.lines.push(TextLine {
                    bbox: Rect::from_ltrb(b.x0, b.y0, b.x1, b.y1),
                    words,
                });
            }
        }
    }

    Ok(layout)
}

/// Axis-aligned box around a character quad
fn quad_rect(quad: &Quad) -> Rect {
    let left = quad.ul.x.min(quad.ll.x);
    let top = quad.ul.y.min(quad.ur.y);
    let right = quad.ur.x.max(quad.lr.x).max(left);
    let bottom = quad.ll.y.max(quad.lr.y).max(top);
    Rect::from_ltrb(left, top, right, bottom)
}

#[derive(Default)]
struct WordBuilder {
    text: String,
    bbox: Option<Rect>,
}

impl WordBuilder {
    fn push(&mut self, c: char, rect: Rect) {
        self.text.push(c);
        self.bbox = Some(match self.bbox {
            Some(bbox) => bbox.union(&rect),
            None => rect,
        });
    }

    fn finish_into(&mut self, words: &mut Vec<Word>) {
        let text = std::mem::take(&mut self.text);
        if let Some(bbox) = self.bbox.take() {
            words.push(Word::new(text, bbox));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mupdf::Point;

    #[test]
    fn test_quad_rect_normalizes_corners() {
        let quad = Quad {
            ul: Point { x: 10.0, y: 20.0 },
            ur: Point { x: 18.0, y: 20.0 },
            ll: Point { x: 10.0, y: 32.0 },
            lr: Point { x: 18.0, y: 32.0 },
        };
        assert_eq!(quad_rect(&quad), Rect::new(10.0, 20.0, 8.0, 12.0));
    }

    #[test]
    fn test_word_builder_unions_chars() {
        let mut words = Vec::new();
        let mut builder = WordBuilder::default();
        builder.push('o', Rect::new(0.0, 0.0, 5.0, 10.0));
        builder.push('k', Rect::new(5.0, 1.0, 5.0, 10.0));
        builder.finish_into(&mut words);
        builder.finish_into(&mut words);

        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "ok");
        assert_eq!(words[0].bbox, Rect::new(0.0, 0.0, 10.0, 11.0));
    }
}

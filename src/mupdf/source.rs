//! MuPDF-backed document source

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use mupdf::pdf::PdfDocument;
use mupdf::Document;
use tracing::{debug, warn};

use super::annots::{self, PageNode};
use super::stext;
use crate::document::{
    DocumentError, DocumentResult, DocumentSource, OutlineEntry, PageLayout, RawAnnotation, Rect,
    Result, Word,
};

/// A PDF opened through MuPDF
///
/// Text layers are built on demand and the most recent page's layout is
/// kept, since the pipeline asks several questions of each page in turn.
pub struct MupdfSource {
    doc: Document,
    pages: Vec<PageNode>,
    page_count: usize,
    last_layout: RefCell<Option<(usize, Rc<PageLayout>)>>,
}

impl MupdfSource {
    /// Open a PDF file
    pub fn open<P: AsRef<Path>>(path: P) -> DocumentResult<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Open a PDF held in memory
    pub fn from_bytes(data: &[u8]) -> DocumentResult<Self> {
        let doc = Document::from_bytes(data, "application/pdf")
            .map_err(|e| DocumentError::ParseError(e.to_string()))?;
        let page_count = doc.page_count()? as usize;

        let pdf = PdfDocument::from_bytes(data).map_err(|e| DocumentError::ParseError(e.to_string()))?;
        let pages = annots::collect_pages(&pdf)?;
        if pages.len() != page_count {
            warn!(
                "Page tree lists {} pages but the document reports {}",
                pages.len(),
                page_count
            );
        }
        debug!("Opened PDF with {} pages", page_count);

        Ok(Self {
            doc,
            pages,
            page_count,
            last_layout: RefCell::new(None),
        })
    }

    fn check_page(&self, page_index: usize) -> Result<()> {
        if page_index >= self.page_count {
            return Err(DocumentError::PageNotFound(page_index, self.page_count));
        }
        Ok(())
    }

    fn layout(&self, page_index: usize) -> Result<Rc<PageLayout>> {
        self.check_page(page_index)?;
        if let Some((cached, layout)) = self.last_layout.borrow().as_ref() {
            if *cached == page_index {
                return Ok(Rc::clone(layout));
            }
        }

        let page = self.doc.load_page(page_index as i32)?;
        let layout = Rc::new(
            stext::page_layout(&page)
                .map_err(|e| DocumentError::TextExtractionError(format!("page {}: {}", page_index + 1, e)))?,
        );
        *self.last_layout.borrow_mut() = Some((page_index, Rc::clone(&layout)));
        Ok(layout)
    }
}

impl DocumentSource for MupdfSource {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn outline(&self) -> Result<Vec<OutlineEntry>> {
        let outlines = self
            .doc
            .outlines()
            .map_err(|e| DocumentError::OutlineError(e.to_string()))?;
        let mut entries = Vec::new();
        flatten_outline(&outlines, 1, &mut entries);
        Ok(entries)
    }

    fn page_bounds(&self, page_index: usize) -> Result<Rect> {
        Ok(self.layout(page_index)?.bounds)
    }

    fn page_text_in_region(&self, page_index: usize, region: &Rect) -> Result<String> {
        Ok(self.layout(page_index)?.text_in(region))
    }

    fn page_words_in_region(&self, page_index: usize, region: &Rect) -> Result<Vec<Word>> {
        Ok(self.layout(page_index)?.words_in(region))
    }

    fn annotations(&self, page_index: usize) -> Result<Vec<RawAnnotation>> {
        self.check_page(page_index)?;
        match self.pages.get(page_index) {
            Some(page) => annots::read_annotations(page),
            None => {
                debug!(page = page_index + 1, "Page missing from page tree, no annotations");
                Ok(Vec::new())
            }
        }
    }
}

/// Depth-first flattening; depth 1 is the top level
fn flatten_outline(outlines: &[mupdf::Outline], level: u32, out: &mut Vec<OutlineEntry>) {
    for outline in outlines {
        // Entries without a destination get page 0 and assign nothing
        let page = outline.page.map(|p| p as u32 + 1).unwrap_or(0);
        out.push(OutlineEntry::new(level, outline.title.clone(), page));
        flatten_outline(&outline.down, level + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::AnnotationKind;

    /// Serialize numbered objects with a correct xref table
    fn build_pdf(objects: &[String]) -> Vec<u8> {
        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref
            )
            .as_bytes(),
        );
        out
    }

    fn annotated_pdf() -> Vec<u8> {
        annotated_pdf_with("")
    }

    /// One Helvetica line at y=700 and three annotations; `page_extra` is
    /// spliced into the page dictionary
    fn annotated_pdf_with(page_extra: &str) -> Vec<u8> {
        let content = "BT /F1 12 Tf 72 700 Td (hello reviewer world) Tj ET";
        build_pdf(&[
            "<< /Type /Catalog /Pages 2 0 R >>".into(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 /MediaBox [0 0 612 792] >>".into(),
            format!(
                "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 5 0 R >> >> \
                 /Contents 4 0 R /Annots [6 0 R 7 0 R 8 0 R] {} >>",
                page_extra
            ),
            format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".into(),
            "<< /Type /Annot /Subtype /Text /Rect [100 690 120 710] /Contents (Q why?) >>".into(),
            "<< /Type /Annot /Subtype /Link /Rect [0 0 10 10] >>".into(),
            "<< /Type /Annot /Subtype /Highlight /Contents (Typo) >>".into(),
        ])
    }

    #[test]
    fn test_reads_annotations() {
        let source = MupdfSource::from_bytes(&annotated_pdf()).unwrap();
        assert_eq!(source.page_count(), 1);

        let annotations = source.annotations(0).unwrap();
        assert_eq!(annotations.len(), 3);

        assert_eq!(annotations[0].kind, AnnotationKind::Text);
        assert_eq!(annotations[0].content, "Q why?");
        assert_eq!(
            annotations[0].rect,
            Some(Rect::from_ltrb(100.0, 82.0, 120.0, 102.0))
        );

        assert_eq!(annotations[1].kind, AnnotationKind::Link);
        assert_eq!(annotations[1].content, "");

        assert_eq!(annotations[2].kind, AnnotationKind::Highlight);
        assert_eq!(annotations[2].rect, None);
    }

    #[test]
    fn test_text_layer() {
        let source = MupdfSource::from_bytes(&annotated_pdf()).unwrap();
        let bounds = source.page_bounds(0).unwrap();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 612.0, 792.0));

        let text = source.page_text_in_region(0, &bounds).unwrap();
        assert_eq!(text.trim(), "hello reviewer world");

        let words = source
            .page_words_in_region(0, &Rect::from_ltrb(100.0, 82.0, 120.0, 102.0))
            .unwrap();
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["reviewer"]);
    }

    #[test]
    fn test_crop_box_keeps_annotations_on_their_words() {
        let source = MupdfSource::from_bytes(&annotated_pdf_with("/CropBox [0 0 612 742]")).unwrap();
        assert_eq!(source.page_bounds(0).unwrap(), Rect::new(0.0, 0.0, 612.0, 742.0));

        let rect = source.annotations(0).unwrap()[0].rect.unwrap();
        assert_eq!(rect, Rect::from_ltrb(100.0, 32.0, 120.0, 52.0));

        let words = source.page_words_in_region(0, &rect).unwrap();
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["reviewer"]);
    }

    #[test]
    fn test_no_outline() {
        let source = MupdfSource::from_bytes(&annotated_pdf()).unwrap();
        assert!(source.outline().unwrap().is_empty());
    }

    #[test]
    fn test_page_out_of_range() {
        let source = MupdfSource::from_bytes(&annotated_pdf()).unwrap();
        assert!(matches!(
            source.annotations(1),
            Err(DocumentError::PageNotFound(1, 1))
        ));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert!(matches!(
            MupdfSource::from_bytes(b"not a pdf"),
            Err(DocumentError::ParseError(_))
        ));
    }
}

//! Page tree and annotation dictionaries
//!
//! Annotations are read straight from the PDF objects: the page tree is
//! walked from the catalog so each page keeps its inherited `/MediaBox`,
//! `/CropBox` and `/Rotate`, and every `/Annots` entry yields its
//! `/Subtype`, `/Contents` and `/Rect`.

use mupdf::pdf::{PdfDocument, PdfObject};

use crate::document::{AnnotationKind, DocumentError, RawAnnotation, Rect, Result};

/// Page trees nested deeper than this are treated as cyclic
const MAX_TREE_DEPTH: usize = 64;

/// US Letter, used when no `/MediaBox` is inherited
const DEFAULT_MEDIA_BOX: PageBox = PageBox {
    x0: 0.0,
    y0: 0.0,
    x1: 612.0,
    y1: 792.0,
};

/// Page boundary in PDF user space (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl PageBox {
    fn intersect(&self, other: &PageBox) -> Option<PageBox> {
        let clipped = PageBox {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (clipped.x1 > clipped.x0 && clipped.y1 > clipped.y0).then_some(clipped)
    }
}

impl From<[f32; 4]> for PageBox {
    fn from(coords: [f32; 4]) -> Self {
        let [ax, ay, bx, by] = coords;
        PageBox {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }
}

/// Inheritable page attributes that place user space on the rendered page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub media_box: PageBox,
    pub crop_box: Option<PageBox>,
    /// Clockwise rotation, one of 0, 90, 180, 270
    pub rotate: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            media_box: DEFAULT_MEDIA_BOX,
            crop_box: None,
            rotate: 0,
        }
    }
}

impl PageGeometry {
    /// Visible area: the crop box clipped to the media box
    pub fn visible_box(&self) -> PageBox {
        self.crop_box
            .and_then(|crop| crop.intersect(&self.media_box))
            .unwrap_or(self.media_box)
    }

    /// Convert a user-space rectangle `[llx lly urx ury]` (corners in any
    /// order) to top-left page space, the space word boxes are reported in.
    pub fn to_page_space(&self, coords: [f32; 4]) -> Rect {
        let origin = self.transform_box(&self.visible_box());
        let rect = self.transform_box(&PageBox::from(coords));
        Rect::from_ltrb(
            rect.x0 - origin.x0,
            rect.y0 - origin.y0,
            rect.x1 - origin.x0,
            rect.y1 - origin.y0,
        )
    }

    /// Rotate clockwise in user space, then flip y downwards
    fn transform(&self, x: f32, y: f32) -> (f32, f32) {
        match self.rotate {
            90 => (y, x),
            180 => (-x, y),
            270 => (-y, -x),
            _ => (x, -y),
        }
    }

    fn transform_box(&self, b: &PageBox) -> PageBox {
        let corners = [
            self.transform(b.x0, b.y0),
            self.transform(b.x0, b.y1),
            self.transform(b.x1, b.y0),
            self.transform(b.x1, b.y1),
        ];
        let (xs, ys): (Vec<f32>, Vec<f32>) = corners.iter().copied().unzip();
        let min = |v: &[f32]| v.iter().copied().fold(f32::INFINITY, f32::min);
        let max = |v: &[f32]| v.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        PageBox {
            x0: min(&xs),
            y0: min(&ys),
            x1: max(&xs),
            y1: max(&ys),
        }
    }
}

/// Snap a `/Rotate` value to a quarter turn in `0..360`
fn normalize_rotation(raw: i32) -> u32 {
    let degrees = raw.rem_euclid(360) as u32;
    ((degrees + 45) / 90 * 90) % 360
}

/// A leaf of the page tree
pub struct PageNode {
    pub object: PdfObject,
    pub geometry: PageGeometry,
}

/// Every page in document order
pub fn collect_pages(pdf: &PdfDocument) -> Result<Vec<PageNode>> {
    let trailer = pdf.trailer()?;
    let root = trailer
        .get_dict("Root")?
        .ok_or_else(|| DocumentError::ParseError("document has no /Root".into()))?;
    let pages = root
        .get_dict("Pages")?
        .ok_or_else(|| DocumentError::ParseError("catalog has no /Pages".into()))?;

    let mut out = Vec::new();
    walk(pages, PageGeometry::default(), 0, &mut out)?;
    Ok(out)
}

fn walk(node: PdfObject, inherited: PageGeometry, depth: usize, out: &mut Vec<PageNode>) -> Result<()> {
    if depth > MAX_TREE_DEPTH {
        return Err(DocumentError::ParseError("page tree too deep".into()));
    }

    let mut geometry = inherited;
    if let Some(media_box) = read_page_box(&node, "MediaBox")? {
        geometry.media_box = media_box;
    }
    if let Some(crop_box) = read_page_box(&node, "CropBox")? {
        geometry.crop_box = Some(crop_box);
    }
    if let Some(rotate) = node.get_dict("Rotate")? {
        geometry.rotate = normalize_rotation(rotate.as_int()?);
    }

    let kids = match node.get_dict("Kids")? {
        Some(kids) if is_pages_node(&node)? => kids,
        _ => {
            out.push(PageNode {
                object: node,
                geometry,
            });
            return Ok(());
        }
    };

    for i in 0..kids.len()? {
        if let Some(kid) = kids.get_array(i as i32)? {
            walk(kid, geometry, depth + 1, out)?;
        }
    }
    Ok(())
}

fn read_page_box(node: &PdfObject, key: &str) -> Result<Option<PageBox>> {
    Ok(match node.get_dict(key)? {
        Some(obj) => read_box(&obj)?.map(PageBox::from),
        None => None,
    })
}

fn is_pages_node(node: &PdfObject) -> Result<bool> {
    Ok(match node.get_dict("Type")? {
        Some(t) => t.as_name().map(|name| name == b"Pages").unwrap_or(false),
        None => true,
    })
}

/// Four numbers from a rectangle array, `None` when it isn't one
fn read_box(obj: &PdfObject) -> Result<Option<[f32; 4]>> {
    if !obj.is_array()? || obj.len()? != 4 {
        return Ok(None);
    }
    let mut coords = [0.0f32; 4];
    for (i, slot) in coords.iter_mut().enumerate() {
        match obj.get_array(i as i32)? {
            Some(value) => *slot = value.as_float()?,
            None => return Ok(None),
        }
    }
    Ok(coords.iter().all(|v| v.is_finite()).then_some(coords))
}

/// Annotations attached to one page, in `/Annots` order
pub fn read_annotations(page: &PageNode) -> Result<Vec<RawAnnotation>> {
    let annots = match page.object.get_dict("Annots")? {
        Some(annots) if annots.is_array()? => annots,
        _ => return Ok(Vec::new()),
    };

    let mut out = Vec::with_capacity(annots.len()?);
    for i in 0..annots.len()? {
        if let Some(annot) = annots.get_array(i as i32)? {
            out.push(read_annotation(&annot, &page.geometry)?);
        }
    }
    Ok(out)
}

fn read_annotation(annot: &PdfObject, geometry: &PageGeometry) -> Result<RawAnnotation> {
    let kind = match annot.get_dict("Subtype")? {
        Some(subtype) => subtype
            .as_name()
            .map(AnnotationKind::from_subtype)
            .unwrap_or(AnnotationKind::Unknown),
        None => AnnotationKind::Unknown,
    };

    let content = match annot.get_dict("Contents")? {
        Some(contents) => contents.as_string().map(str::to_string).unwrap_or_default(),
        None => String::new(),
    };

    // Bad /Rect entries are kept as None so the pipeline can count them
    let rect = match annot.get_dict("Rect")? {
        Some(obj) => read_box(&obj).ok().flatten().map(|c| geometry.to_page_space(c)),
        None => None,
    };

    Ok(RawAnnotation {
        kind,
        content,
        rect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(media_box: [f32; 4], crop_box: Option<[f32; 4]>, rotate: u32) -> PageGeometry {
        PageGeometry {
            media_box: PageBox::from(media_box),
            crop_box: crop_box.map(PageBox::from),
            rotate,
        }
    }

    #[test]
    fn test_to_page_space_flips_y() {
        let rect = PageGeometry::default().to_page_space([100.0, 690.0, 120.0, 710.0]);
        assert_eq!(rect, Rect::from_ltrb(100.0, 82.0, 120.0, 102.0));
    }

    #[test]
    fn test_to_page_space_swapped_corners() {
        let rect = PageGeometry::default().to_page_space([120.0, 710.0, 100.0, 690.0]);
        assert_eq!(rect, Rect::from_ltrb(100.0, 82.0, 120.0, 102.0));
    }

    #[test]
    fn test_to_page_space_offset_media_box() {
        let shifted = geometry([50.0, 40.0, 662.0, 832.0], None, 0);
        let rect = shifted.to_page_space([150.0, 730.0, 170.0, 750.0]);
        assert_eq!(rect, Rect::from_ltrb(100.0, 82.0, 120.0, 102.0));
    }

    #[test]
    fn test_crop_box_moves_origin() {
        let cropped = geometry([0.0, 0.0, 612.0, 792.0], Some([0.0, 0.0, 612.0, 742.0]), 0);
        let rect = cropped.to_page_space([100.0, 690.0, 120.0, 710.0]);
        assert_eq!(rect, Rect::from_ltrb(100.0, 32.0, 120.0, 52.0));

        let offset = geometry([0.0, 0.0, 612.0, 792.0], Some([50.0, 20.0, 562.0, 742.0]), 0);
        let rect = offset.to_page_space([100.0, 690.0, 120.0, 710.0]);
        assert_eq!(rect, Rect::from_ltrb(50.0, 32.0, 70.0, 52.0));
    }

    #[test]
    fn test_crop_box_clipped_to_media_box() {
        let oversized = geometry([0.0, 0.0, 612.0, 792.0], Some([-100.0, -100.0, 700.0, 900.0]), 0);
        assert_eq!(oversized.visible_box(), PageBox::from([0.0, 0.0, 612.0, 792.0]));

        let disjoint = geometry([0.0, 0.0, 612.0, 792.0], Some([700.0, 0.0, 800.0, 100.0]), 0);
        assert_eq!(disjoint.visible_box(), disjoint.media_box);
    }

    #[test]
    fn test_rotated_pages() {
        // 612 x 792 portrait, annotation 82..102 below the top edge
        let user = [100.0, 690.0, 120.0, 710.0];

        let rect = geometry([0.0, 0.0, 612.0, 792.0], None, 90).to_page_space(user);
        assert_eq!(rect, Rect::from_ltrb(690.0, 100.0, 710.0, 120.0));

        let rect = geometry([0.0, 0.0, 612.0, 792.0], None, 180).to_page_space(user);
        assert_eq!(rect, Rect::from_ltrb(492.0, 690.0, 512.0, 710.0));

        let rect = geometry([0.0, 0.0, 612.0, 792.0], None, 270).to_page_space(user);
        assert_eq!(rect, Rect::from_ltrb(82.0, 492.0, 102.0, 512.0));
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(0), 0);
        assert_eq!(normalize_rotation(90), 90);
        assert_eq!(normalize_rotation(-90), 270);
        assert_eq!(normalize_rotation(450), 90);
        assert_eq!(normalize_rotation(100), 90);
        assert_eq!(normalize_rotation(350), 0);
    }
}

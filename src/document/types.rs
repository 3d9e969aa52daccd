//! Core document types
//!
//! Page geometry, the positioned text layer, outline entries and raw
//! annotations as reported by a [`DocumentSource`](super::DocumentSource).
//!
//! All coordinates use the page space with the origin at the top-left
//! corner and y growing downward.

use serde::{Deserialize, Serialize};

/// Rectangle (bounding box)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Intersection with `bounds`; an empty result collapses to zero size.
    pub fn clip_to(&self, bounds: &Rect) -> Rect {
        let left = self.x.max(bounds.x);
        let top = self.y.max(bounds.y);
        let right = self.right().min(bounds.right()).max(left);
        let bottom = self.bottom().min(bounds.bottom()).max(top);
        Rect::from_ltrb(left, top, right, bottom)
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_ltrb(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Finite coordinates and a non-negative extent
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// A single word of page text with its bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub bbox: Rect,
}

impl Word {
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// Text line, words in reading order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextLine {
    pub bbox: Rect,
    pub words: Vec<Word>,
}

/// Positioned text layer of one page
///
/// Both document sources reduce their native text representation to this
/// shape so region queries behave identically regardless of backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page bounds
    pub bounds: Rect,
    /// Lines in reading order
    pub lines: Vec<TextLine>,
}

impl PageLayout {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            lines: Vec::new(),
        }
    }

    /// Words whose boxes intersect `region`, in reading order
    pub fn words_in(&self, region: &Rect) -> Vec<Word> {
        self.lines
            .iter()
            .flat_map(|line| line.words.iter())
            .filter(|word| word.bbox.intersects(region))
            .cloned()
            .collect()
    }

    /// Text inside `region`, one output line per intersecting text line
    pub fn text_in(&self, region: &Rect) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let words: Vec<&str> = line
                .words
                .iter()
                .filter(|word| word.bbox.intersects(region))
                .map(|word| word.text.as_str())
                .collect();
            if words.is_empty() {
                continue;
            }
            out.push_str(&words.join(" "));
            out.push('\n');
        }
        out
    }
}

/// Outline (bookmark) entry, flattened in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Nesting depth, 1 for top level entries
    pub level: u32,
    pub title: String,
    /// Target page (1-indexed, 0 when the entry has no destination)
    pub page: u32,
}

impl OutlineEntry {
    pub fn new(level: u32, title: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }
}

/// PDF annotation subtype, numbered as MuPDF numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    Text,
    Link,
    FreeText,
    Line,
    Square,
    Circle,
    Polygon,
    PolyLine,
    Highlight,
    Underline,
    Squiggly,
    StrikeOut,
    Redact,
    Stamp,
    Caret,
    Ink,
    Popup,
    FileAttachment,
    Sound,
    Movie,
    RichMedia,
    Widget,
    Screen,
    PrinterMark,
    TrapNet,
    Watermark,
    ThreeD,
    Projection,
    Unknown,
}

impl AnnotationKind {
    /// Every known subtype, indexed by its code
    pub const ALL: [AnnotationKind; 28] = [
        Self::Text,
        Self::Link,
        Self::FreeText,
        Self::Line,
        Self::Square,
        Self::Circle,
        Self::Polygon,
        Self::PolyLine,
        Self::Highlight,
        Self::Underline,
        Self::Squiggly,
        Self::StrikeOut,
        Self::Redact,
        Self::Stamp,
        Self::Caret,
        Self::Ink,
        Self::Popup,
        Self::FileAttachment,
        Self::Sound,
        Self::Movie,
        Self::RichMedia,
        Self::Widget,
        Self::Screen,
        Self::PrinterMark,
        Self::TrapNet,
        Self::Watermark,
        Self::ThreeD,
        Self::Projection,
    ];

    /// Numeric kind code (-1 for unknown subtypes)
    pub fn code(&self) -> i32 {
        Self::ALL
            .iter()
            .position(|kind| kind == self)
            .map(|idx| idx as i32)
            .unwrap_or(-1)
    }

    /// PDF `/Subtype` name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Link => "Link",
            Self::FreeText => "FreeText",
            Self::Line => "Line",
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Polygon => "Polygon",
            Self::PolyLine => "PolyLine",
            Self::Highlight => "Highlight",
            Self::Underline => "Underline",
            Self::Squiggly => "Squiggly",
            Self::StrikeOut => "StrikeOut",
            Self::Redact => "Redact",
            Self::Stamp => "Stamp",
            Self::Caret => "Caret",
            Self::Ink => "Ink",
            Self::Popup => "Popup",
            Self::FileAttachment => "FileAttachment",
            Self::Sound => "Sound",
            Self::Movie => "Movie",
            Self::RichMedia => "RichMedia",
            Self::Widget => "Widget",
            Self::Screen => "Screen",
            Self::PrinterMark => "PrinterMark",
            Self::TrapNet => "TrapNet",
            Self::Watermark => "Watermark",
            Self::ThreeD => "3D",
            Self::Projection => "Projection",
            Self::Unknown => "Unknown",
        }
    }

    /// Detect kind from a `/Subtype` name
    pub fn from_subtype(name: &[u8]) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().as_bytes() == name)
            .unwrap_or(Self::Unknown)
    }
}

/// Annotation as reported by a document source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnnotation {
    pub kind: AnnotationKind,
    /// Author-entered content (`/Contents`), untrimmed
    pub content: String,
    /// Annotation rectangle in page space, `None` if absent or unreadable
    pub rect: Option<Rect>,
}

impl RawAnnotation {
    pub fn new(kind: AnnotationKind, content: impl Into<String>, rect: Rect) -> Self {
        Self {
            kind,
            content: content.into(),
            rect: Some(rect),
        }
    }
}

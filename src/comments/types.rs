//! Comment records and categories

use serde::{Deserialize, Serialize};

/// Reviewer intent, derived from the comment's prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Question,
    Note,
    Correction,
    Error,
    Typo,
}

impl Category {
    /// Singular display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Question => "Question",
            Category::Note => "Note",
            Category::Correction => "Correction",
            Category::Error => "Error",
            Category::Typo => "Typo",
        }
    }
}

/// A comment extracted from one annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Estimated line on the page (1-indexed, best-effort)
    pub estimated_line_number: u32,
    /// Author-entered note, trimmed
    pub comment_text: String,
    /// Words under the annotation
    pub highlighted_text: String,
    /// Surrounding text with the highlighted span in bold
    pub context_text: String,
    pub category: Category,
}

//! Comment classification
//!
//! Maps free comment text to a [`Category`] by prefix. Rules are checked in
//! table order and the first match wins; text matching no rule is a Note.

use super::types::Category;

/// (accepted prefixes, category), in precedence order
const RULES: &[(&[&str], Category)] = &[
    (&["Q ", "Q-"], Category::Question),
    (&["CORRECTION"], Category::Correction),
    (&["ERROR"], Category::Error),
    (&["TYPO"], Category::Typo),
    (&["NOTE"], Category::Note),
];

/// Classify a comment by its (case-insensitive) prefix
pub fn classify(raw_text: &str) -> Category {
    let normalized = raw_text.trim().to_uppercase();

    RULES
        .iter()
        .find(|(prefixes, _)| prefixes.iter().any(|p| normalized.starts_with(p)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Note)
}

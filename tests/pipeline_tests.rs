//! End-to-end tests: in-memory documents through extraction and reports

use pdf_comments::comments::{self, Category};
use pdf_comments::config::OutputConfig;
use pdf_comments::document::{AnnotationKind, MemoryDocument, MemoryPage, RawAnnotation, Rect};
use pdf_comments::report::{render_reports, write_reports};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Fixtures
// ============================================================================

fn highlight_on(page: MemoryPage, phrase: &str, comment: &str) -> MemoryPage {
    let rect = page.phrase_rect(phrase).expect("phrase on page");
    page.annotation(RawAnnotation::new(AnnotationKind::Highlight, comment, rect))
}

/// Three pages, two chapters, one question, one correction, one bare note
fn thesis() -> MemoryDocument {
    let intro = MemoryPage::new().text_line(100.0, "the method section describes sampling");
    let results = MemoryPage::new().text_line(300.0, "results show a typo here");
    let discussion = MemoryPage::new().annotation(RawAnnotation::new(
        AnnotationKind::Ink,
        "random note",
        Rect::new(72.0, 500.0, 40.0, 20.0),
    ));

    MemoryDocument::new()
        .page(highlight_on(intro, "sampling", "Q why?"))
        .page(highlight_on(results, "typo", "Correction: typo"))
        .page(discussion)
        .outline_entry(1, "Introduction", 1)
        .outline_entry(1, "Results", 2)
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_thesis_extraction() {
    let extraction = comments::extract(&thesis()).unwrap();

    assert!(extraction.chapters.is_useful());
    assert_eq!(extraction.chapters.lookup(1), "Introduction");
    assert_eq!(extraction.chapters.lookup(2), "Results");
    assert_eq!(extraction.chapters.lookup(3), "Results");

    let categories: Vec<Category> = extraction.comments.iter().map(|c| c.category).collect();
    assert_eq!(
        categories,
        vec![Category::Question, Category::Correction, Category::Note]
    );
    assert_eq!(extraction.stats.extracted, 3);
    assert_eq!(extraction.stats.failed, 0);
    assert!(extraction.stats.skipped.is_empty());
}

#[test]
fn test_thesis_reports() {
    let extraction = comments::extract(&thesis()).unwrap();
    let reports = render_reports(&extraction.comments, &extraction.chapters).unwrap();

    assert_eq!(
        reports.examiner_questions,
        "# Examiner Questions\n\n\
         Questions to ask during the viva examination.\n\n\
         ## Introduction\n\n\
         - **Page 1, Line 2**\n\
         \x20 - Comment: Q why?\n\
         \x20 - Highlighted: sampling\n\
         \x20 - Context: the method section describes **sampling**\n\n\
         \n---\n\n\
         **Total questions: 1**\n"
    );

    assert_eq!(
        reports.student_corrections,
        "# Student Corrections\n\n\
         This document contains notes, corrections, errors, and typos identified in the thesis.\n\n\
         ## Corrections\n\n\
         ### Results\n\n\
         - **Page 2, Line 12**\n\
         \x20 - Comment: Correction: typo\n\
         \x20 - Highlighted: typo\n\
         \x20 - Context: results show a **typo** here\n\n\
         ## Notes\n\n\
         ### Results\n\n\
         - **Page 3, Line 22**\n\
         \x20 - Comment: random note\n\n\
         \n---\n\n\
         **Total corrections: 2**\n"
    );

    let intro = reports.comments.find("## Introduction").unwrap();
    let results = reports.comments.find("## Results").unwrap();
    assert!(intro < results);
    assert!(reports.comments.ends_with("**Total comments: 3**\n"));
}

#[test]
fn test_empty_document_writes_placeholders() {
    let doc = MemoryDocument::new().page(MemoryPage::new()).page(MemoryPage::new());
    let extraction = comments::extract(&doc).unwrap();
    assert!(extraction.comments.is_empty());

    let dir = TempDir::new().unwrap();
    let reports = render_reports(&extraction.comments, &extraction.chapters).unwrap();
    let paths = write_reports(dir.path(), &OutputConfig::default(), &reports).unwrap();
    assert_eq!(paths.len(), 3);

    let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
    assert_eq!(
        read("comments.md"),
        "# All Comments\n\nNo comments found.\n\n---\n\n**Total comments: 0**\n"
    );
    assert!(read("student_corrections.md").contains("No student corrections found."));
    assert!(read("student_corrections.md").ends_with("**Total corrections: 0**\n"));
    assert!(read("examiner_questions.md").contains("No questions found."));
    assert!(read("examiner_questions.md").ends_with("**Total questions: 0**\n"));
}

#[test]
fn test_single_chapter_groups_by_page() {
    let page = MemoryPage::new().text_line(100.0, "alpha beta gamma");
    let doc = MemoryDocument::new()
        .page(highlight_on(page, "beta", "Error: wrong symbol"))
        .outline_entry(1, "Thesis", 1);

    let extraction = comments::extract(&doc).unwrap();
    assert!(!extraction.chapters.is_useful());

    let reports = render_reports(&extraction.comments, &extraction.chapters).unwrap();
    assert!(reports.comments.contains("## Page 1\n"));
    assert!(reports.student_corrections.contains("## Errors\n\n### Page 1\n"));
}

#[test]
fn test_chapter_keys_sort_as_text() {
    let mut doc = MemoryDocument::new();
    for page in 1..=3u32 {
        let p = MemoryPage::new().text_line(100.0, "some words on the page");
        doc = doc.page(highlight_on(p, "words", &format!("note {}", page)));
    }
    let doc = doc
        .outline_entry(1, "Chapter 1", 1)
        .outline_entry(1, "Chapter 10", 2)
        .outline_entry(1, "Chapter 2", 3);

    let extraction = comments::extract(&doc).unwrap();
    let reports = render_reports(&extraction.comments, &extraction.chapters).unwrap();

    let positions: Vec<usize> = ["## Chapter 1\n", "## Chapter 10\n", "## Chapter 2\n"]
        .iter()
        .map(|heading| reports.comments.find(heading).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

// ============================================================================
// Skip accounting
// ============================================================================

fn any_kind() -> impl Strategy<Value = AnnotationKind> {
    prop::sample::select(AnnotationKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn every_annotation_is_accounted_for(
        raw in prop::collection::vec((any_kind(), prop::option::of("[a-z ]{0,12}"), any::<bool>()), 0..30),
    ) {
        let mut page = MemoryPage::new().text_line(100.0, "body text for context");
        let mut expected_comments = 0;
        for (kind, content, has_rect) in &raw {
            let content = content.clone().unwrap_or_default();
            let mut annotation = RawAnnotation::new(*kind, content.clone(), Rect::new(72.0, 100.0, 40.0, 12.0));
            if !has_rect {
                annotation.rect = None;
            }
            let accepted = comments::pipeline::ALLOWED_KINDS.contains(kind) && !content.trim().is_empty();
            if accepted && *has_rect {
                expected_comments += 1;
            }
            page = page.annotation(annotation);
        }

        let extraction = comments::extract(&MemoryDocument::new().page(page)).unwrap();
        let stats = &extraction.stats;

        prop_assert_eq!(stats.total_annotations, raw.len());
        prop_assert_eq!(extraction.comments.len(), expected_comments);
        prop_assert_eq!(
            stats.extracted + stats.failed + stats.skipped.total(),
            stats.total_annotations
        );
    }
}

//! Markdown rendering of the three reports
//!
//! Every report has the same frame: a title, an optional intro line, the
//! grouped entries and a footer with the item total.

use std::fmt::Write;

use super::error::Result;
use super::grouper::{self, CategorySection, CommentGroup};
use crate::comments::{Category, ChapterMap, Comment};

/// Highlighted text longer than this is shown without context
pub const HIGHLIGHT_CONTEXT_LIMIT: usize = 150;

/// Context must be this many chars longer than the highlight to be shown
const CONTEXT_MIN_EXTRA: usize = 20;

/// Fixed text of one report
#[derive(Debug, Clone, Copy)]
pub struct ReportText {
    pub title: &'static str,
    pub intro: Option<&'static str>,
    pub total_label: &'static str,
    pub empty: &'static str,
}

pub const ALL_COMMENTS: ReportText = ReportText {
    title: "All Comments",
    intro: None,
    total_label: "comments",
    empty: "No comments found.",
};

pub const STUDENT_CORRECTIONS: ReportText = ReportText {
    title: "Student Corrections",
    intro: Some("This document contains notes, corrections, errors, and typos identified in the thesis."),
    total_label: "corrections",
    empty: "No student corrections found.",
};

pub const EXAMINER_QUESTIONS: ReportText = ReportText {
    title: "Examiner Questions",
    intro: Some("Questions to ask during the viva examination."),
    total_label: "questions",
    empty: "No questions found.",
};

/// Rendered report bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reports {
    pub comments: String,
    pub student_corrections: String,
    pub examiner_questions: String,
}

/// Render all three reports, grouping by chapter when the outline is useful
pub fn render_reports(comments: &[Comment], chapters: &ChapterMap) -> Result<Reports> {
    let use_chapters = chapters.is_useful();
    Ok(Reports {
        comments: render_all_comments(comments, chapters, use_chapters)?,
        student_corrections: render_student_corrections(comments, chapters, use_chapters)?,
        examiner_questions: render_examiner_questions(comments, chapters, use_chapters)?,
    })
}

pub fn render_all_comments(comments: &[Comment], chapters: &ChapterMap, use_chapters: bool) -> Result<String> {
    let groups = grouper::all_comments(comments, chapters, use_chapters);
    render_grouped(&ALL_COMMENTS, &groups, comments.len())
}

pub fn render_student_corrections(
    comments: &[Comment],
    chapters: &ChapterMap,
    use_chapters: bool,
) -> Result<String> {
    let sections = grouper::student_corrections(comments, chapters, use_chapters);
    let total: usize = sections.iter().map(CategorySection::len).sum();

    let mut out = String::new();
    write_header(&mut out, &STUDENT_CORRECTIONS)?;
    if sections.is_empty() {
        writeln!(out, "{}", STUDENT_CORRECTIONS.empty)?;
    }
    for section in &sections {
        writeln!(out, "## {}\n", section_title(section.category))?;
        write_groups(&mut out, "###", &section.groups)?;
    }
    write_footer(&mut out, &STUDENT_CORRECTIONS, total)?;
    Ok(out)
}

pub fn render_examiner_questions(
    comments: &[Comment],
    chapters: &ChapterMap,
    use_chapters: bool,
) -> Result<String> {
    let groups = grouper::examiner_questions(comments, chapters, use_chapters);
    let total = groups.iter().map(|g| g.comments.len()).sum();
    render_grouped(&EXAMINER_QUESTIONS, &groups, total)
}

fn render_grouped(text: &ReportText, groups: &[CommentGroup<'_>], total: usize) -> Result<String> {
    let mut out = String::new();
    write_header(&mut out, text)?;
    if groups.is_empty() {
        writeln!(out, "{}", text.empty)?;
    }
    write_groups(&mut out, "##", groups)?;
    write_footer(&mut out, text, total)?;
    Ok(out)
}

fn section_title(category: Category) -> String {
    format!("{}s", category.label())
}

fn write_header(out: &mut String, text: &ReportText) -> std::fmt::Result {
    writeln!(out, "# {}\n", text.title)?;
    if let Some(intro) = text.intro {
        writeln!(out, "{}\n", intro)?;
    }
    Ok(())
}

fn write_groups(out: &mut String, heading: &str, groups: &[CommentGroup<'_>]) -> std::fmt::Result {
    for group in groups {
        writeln!(out, "{} {}\n", heading, group.key)?;
        for comment in &group.comments {
            write_entry(out, comment)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_footer(out: &mut String, text: &ReportText, total: usize) -> std::fmt::Result {
    writeln!(out, "\n---\n")?;
    writeln!(out, "**Total {}: {}**", text.total_label, total)
}

/// One list entry: location, comment, then highlighted words and context
/// when they add something
pub fn write_entry(out: &mut String, comment: &Comment) -> std::fmt::Result {
    writeln!(
        out,
        "- **Page {}, Line {}**",
        comment.page_number, comment.estimated_line_number
    )?;
    writeln!(out, "  - Comment: {}", comment.comment_text)?;

    let highlighted = comment.highlighted_text.trim();
    let context = comment.context_text.trim();

    if !highlighted.is_empty() {
        writeln!(out, "  - Highlighted: {}", highlighted)?;
        let highlighted_len = highlighted.chars().count();
        if highlighted_len <= HIGHLIGHT_CONTEXT_LIMIT
            && context.chars().count() > highlighted_len + CONTEXT_MIN_EXTRA
        {
            writeln!(out, "  - Context: {}", comment.context_text)?;
        }
    } else if !context.is_empty() {
        writeln!(out, "  - Context: {}", comment.context_text)?;
    }
    Ok(())
}

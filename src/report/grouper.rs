//! Grouping and ordering of comments for the reports

use std::collections::BTreeMap;

use crate::comments::{Category, ChapterMap, Comment};

/// Student-facing categories in report order
pub const STUDENT_CATEGORIES: [Category; 4] = [
    Category::Error,
    Category::Correction,
    Category::Typo,
    Category::Note,
];

/// Comments sharing a chapter (or page) heading
#[derive(Debug, Clone, PartialEq)]
pub struct CommentGroup<'a> {
    pub key: String,
    pub comments: Vec<&'a Comment>,
}

/// One category of the student corrections report
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection<'a> {
    pub category: Category,
    pub groups: Vec<CommentGroup<'a>>,
}

impl CategorySection<'_> {
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.comments.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.comments.is_empty())
    }
}

/// Group key for a comment: its chapter, or `"Page N"`
pub fn group_key(comment: &Comment, chapters: &ChapterMap, use_chapters: bool) -> String {
    if use_chapters {
        chapters.lookup(comment.page_number)
    } else {
        format!("Page {}", comment.page_number)
    }
}

/// Bucket comments by key.
///
/// Keys come back in lexicographic order ("Chapter 10" sorts before
/// "Chapter 2"); each group is stably sorted by page, then line.
pub fn group_and_order<'a, I>(comments: I, chapters: &ChapterMap, use_chapters: bool) -> Vec<CommentGroup<'a>>
where
    I: IntoIterator<Item = &'a Comment>,
{
    let mut buckets: BTreeMap<String, Vec<&'a Comment>> = BTreeMap::new();
    for comment in comments {
        buckets
            .entry(group_key(comment, chapters, use_chapters))
            .or_default()
            .push(comment);
    }

    buckets
        .into_iter()
        .map(|(key, mut comments)| {
            comments.sort_by_key(|c| (c.page_number, c.estimated_line_number));
            CommentGroup { key, comments }
        })
        .collect()
}

/// Every comment
pub fn all_comments<'a>(comments: &'a [Comment], chapters: &ChapterMap, use_chapters: bool) -> Vec<CommentGroup<'a>> {
    group_and_order(comments, chapters, use_chapters)
}

/// Errors, corrections, typos and notes, one section per non-empty category
pub fn student_corrections<'a>(
    comments: &'a [Comment],
    chapters: &ChapterMap,
    use_chapters: bool,
) -> Vec<CategorySection<'a>> {
    STUDENT_CATEGORIES
        .iter()
        .map(|&category| CategorySection {
            category,
            groups: group_and_order(
                comments.iter().filter(|c| c.category == category),
                chapters,
                use_chapters,
            ),
        })
        .filter(|section| !section.is_empty())
        .collect()
}

/// Questions for the examiner
pub fn examiner_questions<'a>(
    comments: &'a [Comment],
    chapters: &ChapterMap,
    use_chapters: bool,
) -> Vec<CommentGroup<'a>> {
    group_and_order(
        comments.iter().filter(|c| c.category == Category::Question),
        chapters,
        use_chapters,
    )
}

use std::sync::OnceLock;

use regex::Regex;

use crate::models::GeneratedPost;

/// Markdown-bold headers the model puts in front of each post: `**Post 3:**`.
fn delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*Post \d+:\*\*").expect("valid post delimiter regex"))
}

/// Split model output into posts.
///
/// Segments are trimmed and empty ones dropped. Titles are reassigned in
/// output order, so the model's own numbering is not preserved when a
/// segment is dropped.
pub fn parse_posts(text: &str) -> Vec<GeneratedPost> {
    delimiter()
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(i, segment)| GeneratedPost::numbered(i, segment))
        .collect()
}

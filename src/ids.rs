use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex is valid"));

/// Turns a title into a lowercase, hyphen-separated identifier.
///
/// Every run of characters outside `[a-z0-9]` collapses into one hyphen, so
/// `"My Book!"` becomes `"my-book"`. Non-ASCII letters are separators, not
/// transliterated.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

pub fn chapter_id(chapter: usize) -> String {
    format!("ch{:02}", chapter)
}

pub fn section_id(chapter: usize, section: usize) -> String {
    format!("ch{:02}-sec{:02}", chapter, section)
}

pub fn section_number(chapter: usize, section: usize) -> String {
    format!("{}.{}", chapter, section)
}

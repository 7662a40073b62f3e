//! Weighted keyword search over an exported book.
//!
//! Each query term adds to a section's score when it appears in one of the
//! section's fields. Matching ignores case and accents.

use serde::Serialize;
use slug::slugify;

use crate::book::Book;

const SECTION_TITLE_WEIGHT: u32 = 10;
const CHAPTER_TITLE_WEIGHT: u32 = 8;
const KEYWORD_WEIGHT: u32 = 8;
const SUMMARY_WEIGHT: u32 = 2;
const CONTENT_WEIGHT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub section_id: String,
    pub chapter_number: usize,
    pub chapter_title: String,
    pub section_number: String,
    pub section_title: String,
    pub keywords: Vec<String>,
    pub summary: String,
    pub score: u32,
}

#[derive(Debug)]
struct IndexedSection {
    hit: SearchHit,
    section_title: String,
    chapter_title: String,
    keywords: Vec<String>,
    summary: String,
    content: String,
}

/// Flattened, pre-normalized view of every section in a book.
#[derive(Debug)]
pub struct SearchIndex {
    entries: Vec<IndexedSection>,
}

/// Lowercases and strips accents from Latin letters. Punctuation and
/// spacing are kept, so a term like `c++` only matches `c++`.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        match strip_accent(c) {
            Some(base) => out.push(base),
            None => out.push(c),
        }
    }
    out
}

/// `é` → `e`. Letters outside the Latin blocks, and ligatures such as `æ`,
/// are left alone.
fn strip_accent(c: char) -> Option<char> {
    if c.is_ascii() || c >= '\u{0250}' || !c.is_alphabetic() {
        return None;
    }
    let mut buf = [0u8; 4];
    let base = slugify(c.encode_utf8(&mut buf));
    let mut chars = base.chars();
    match (chars.next(), chars.next()) {
        (Some(b), None) => Some(b),
        _ => None,
    }
}

impl SearchIndex {
    pub fn new(book: &Book) -> Self {
        let mut entries = Vec::new();

        for chapter in &book.chapters {
            for section in &chapter.sections {
                entries.push(IndexedSection {
                    hit: SearchHit {
                        section_id: section.section_id.clone(),
                        chapter_number: chapter.chapter_number,
                        chapter_title: chapter.chapter_title.clone(),
                        section_number: section.section_number.clone(),
                        section_title: section.section_title.clone(),
                        keywords: section.keywords.clone(),
                        summary: section.summary.clone(),
                        score: 0,
                    },
                    section_title: normalize(&section.section_title),
                    chapter_title: normalize(&chapter.chapter_title),
                    keywords: section.keywords.iter().map(|k| normalize(k)).collect(),
                    summary: normalize(&section.summary),
                    content: normalize(&section.content.join(" ")),
                });
            }
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hits with a positive score, best first. Equal scores keep book order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(normalize)
            .collect();

        if terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = terms.iter().map(|term| entry.score(term)).sum::<u32>();
                (score > 0).then(|| SearchHit {
                    score,
                    ..entry.hit.clone()
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits
    }
}

impl IndexedSection {
    fn score(&self, term: &str) -> u32 {
        let mut score = 0;
        if self.section_title.contains(term) {
            score += SECTION_TITLE_WEIGHT;
        }
        if self.chapter_title.contains(term) {
            score += CHAPTER_TITLE_WEIGHT;
        }
        if self.keywords.iter().any(|k| k.contains(term)) {
            score += KEYWORD_WEIGHT;
        }
        if self.summary.contains(term) {
            score += SUMMARY_WEIGHT;
        }
        if self.content.contains(term) {
            score += CONTENT_WEIGHT;
        }
        score
    }
}

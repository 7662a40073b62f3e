use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const AUTHOR: &str = "Parsed by LEO AI";
pub const DESCRIPTION: &str = "Generated from MkDocs markdown project";
pub const FORMAT_VERSION: &str = "1.1.0";

/// The exported document: book metadata followed by its chapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub book: BookInfo,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub book_id: String,
    pub title: String,
    pub image_cover_url: Option<String>,
    pub author: String,
    pub description: String,
    pub version: String,
}

impl BookInfo {
    /// Metadata for a site. The id is always derived from the site name.
    pub fn new(site_name: &str, image_cover_url: Option<String>) -> Self {
        Self {
            book_id: crate::ids::slugify(site_name),
            title: site_name.to_string(),
            image_cover_url,
            author: AUTHOR.to_string(),
            description: DESCRIPTION.to_string(),
            version: FORMAT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_id: String,
    pub chapter_number: usize,
    pub chapter_title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub section_id: String,
    pub section_number: String,
    pub section_title: String,
    /// Front matter `video`, passed through untouched.
    pub summary_video: Option<Value>,
    pub keywords: Vec<String>,
    pub summary: String,
    pub content: Vec<String>,
}

impl Book {
    pub fn section_count(&self) -> usize {
        self.chapters.iter().map(|c| c.sections.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_book() -> Book {
        Book {
            book: BookInfo::new("Mon Livre Été", Some("https://example.com/cover.png".into())),
            chapters: vec![Chapter {
                chapter_id: "ch01".into(),
                chapter_number: 1,
                chapter_title: "Début".into(),
                sections: vec![Section {
                    section_id: "ch01-sec01".into(),
                    section_number: "1.1".into(),
                    section_title: "Intro".into(),
                    summary_video: Some(json!({ "youtube_id": "abc123", "start": 1.5 })),
                    keywords: vec!["x".into(), "y".into()],
                    summary: "First para.".into(),
                    content: vec!["First para.".into(), "Second para.".into()],
                }],
            }],
        }
    }

    #[test]
    fn test_book_info_fixed_fields() {
        let info = BookInfo::new("My Book", None);
        assert_eq!(info.book_id, "my-book");
        assert_eq!(info.title, "My Book");
        assert_eq!(info.author, "Parsed by LEO AI");
        assert_eq!(info.description, "Generated from MkDocs markdown project");
        assert_eq!(info.version, "1.1.0");
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(sample_book()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(value["book"]["book_id"], "mon-livre-t");
        assert_eq!(value["book"]["image_cover_url"], "https://example.com/cover.png");
        assert_eq!(value["chapters"][0]["chapter_number"], 1);
        assert_eq!(value["chapters"][0]["sections"][0]["section_number"], "1.1");
        assert_eq!(value["chapters"][0]["sections"][0]["summary_video"]["youtube_id"], "abc123");
    }

    #[test]
    fn test_absent_optionals_serialize_as_null() {
        let mut book = sample_book();
        book.book.image_cover_url = None;
        book.chapters[0].sections[0].summary_video = None;
        let value = serde_json::to_value(&book).unwrap();
        assert!(value["book"]["image_cover_url"].is_null());
        assert!(value["chapters"][0]["sections"][0]["summary_video"].is_null());
    }

    #[test]
    fn test_json_round_trip() {
        let book = sample_book();
        let text = serde_json::to_string_pretty(&book).unwrap();
        let parsed: Book = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, book);
        assert_eq!(parsed.section_count(), 1);
    }
}

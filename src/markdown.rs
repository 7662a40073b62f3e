//! Front matter and paragraph extraction for a single markdown page.
//!
//! A page may open with a YAML block fenced by `---`:
//!
//! ```markdown
//! ---
//! video:
//!   youtube_id: dQw4w9WgXcQ
//! keywords: [install, setup]
//! ---
//!
//! First paragraph becomes the summary.
//! ```
//!
//! Only top-level paragraphs are kept, as their trimmed markdown source.
//! Headings, lists, block quotes, tables and code blocks are skipped.

use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde_json::Value;
use serde_yaml::{Mapping, Value as Yaml};
use thiserror::Error;
use tracing::debug;

use crate::error::{ExportError, Result};

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter must be a mapping")]
    NotAMapping,

    #[error("front matter `keywords` {0}")]
    Keywords(&'static str),

    #[error("front matter `video` cannot be represented as JSON: {0}")]
    Video(serde_yaml::Error),
}

/// Front matter keys the exporter consumes. Everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub video: Option<Value>,
    pub keywords: Vec<String>,
}

impl FrontMatter {
    fn from_yaml(source: &str) -> std::result::Result<Self, FrontMatterError> {
        match serde_yaml::from_str::<Yaml>(source)? {
            Yaml::Null => Ok(Self::default()),
            Yaml::Mapping(map) => Self::from_mapping(&map),
            _ => Err(FrontMatterError::NotAMapping),
        }
    }

    fn from_mapping(map: &Mapping) -> std::result::Result<Self, FrontMatterError> {
        let video = match map.get("video") {
            None | Some(Yaml::Null) => None,
            Some(v) => Some(serde_yaml::from_value::<Value>(v.clone()).map_err(FrontMatterError::Video)?),
        };

        let keywords = match map.get("keywords") {
            None | Some(Yaml::Null) => Vec::new(),
            Some(Yaml::Sequence(items)) => items
                .iter()
                .map(keyword_text)
                .collect::<std::result::Result<Vec<_>, _>>()?,
            Some(_) => return Err(FrontMatterError::Keywords("must be a list")),
        };

        Ok(Self { video, keywords })
    }
}

fn keyword_text(item: &Yaml) -> std::result::Result<String, FrontMatterError> {
    match item {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        _ => Err(FrontMatterError::Keywords("entries must be scalars")),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMarkdown {
    pub front_matter: FrontMatter,
    pub paragraphs: Vec<String>,
}

impl ParsedMarkdown {
    /// First paragraph, or an empty string for a page without prose.
    pub fn summary(&self) -> String {
        self.paragraphs.first().cloned().unwrap_or_default()
    }
}

/// Stateless CommonMark reader with YAML front matter support.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES,
        }
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedMarkdown> {
        let source = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        let parsed = self.parse(&source).map_err(|e| ExportError::MarkdownParseFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(
            "Parsed {}: {} paragraphs, {} keywords",
            path.display(),
            parsed.paragraphs.len(),
            parsed.front_matter.keywords.len()
        );
        Ok(parsed)
    }

    pub fn parse(&self, source: &str) -> std::result::Result<ParsedMarkdown, FrontMatterError> {
        let (front_matter_source, body) = split_front_matter(source);
        let front_matter = match front_matter_source {
            Some(yaml) if !yaml.trim().is_empty() => FrontMatter::from_yaml(yaml)?,
            _ => FrontMatter::default(),
        };

        let mut paragraphs = Vec::new();
        // Paragraphs inside lists, quotes and footnotes are not captured.
        let mut container_depth = 0usize;

        for (event, range) in Parser::new_ext(body, self.options).into_offset_iter() {
            match event {
                Event::Start(Tag::List(_) | Tag::BlockQuote(_) | Tag::FootnoteDefinition(_)) => {
                    container_depth += 1;
                }
                Event::End(TagEnd::List(_) | TagEnd::BlockQuote(_) | TagEnd::FootnoteDefinition) => {
                    container_depth = container_depth.saturating_sub(1);
                }
                Event::Start(Tag::Paragraph) if container_depth == 0 => {
                    let text = body[range].trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                }
                _ => {}
            }
        }

        Ok(ParsedMarkdown {
            front_matter,
            paragraphs,
        })
    }
}

/// Splits a leading `---` fenced block off the page.
///
/// The closing fence needs at least as many dashes as the opening one. A
/// block that is never closed runs to the end of the page.
fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, source);
    };
    let fence = first.trim_end();
    if fence.len() < 3 || !fence.bytes().all(|b| b == b'-') {
        return (None, source);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let marker = line.trim_end();
        if marker.len() >= fence.len() && marker.bytes().all(|b| b == b'-') {
            return (Some(&source[start..offset]), &source[offset + line.len()..]);
        }
        offset += line.len();
    }
    (Some(&source[start..]), "")
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

use std::path::{Path, PathBuf};

use colored::*;
use tracing::{debug, info};

use crate::book::{Book, BookInfo, Chapter, Section};
use crate::error::{ExportError, Result};
use crate::ids::{chapter_id, section_id, section_number};
use crate::manifest::{Manifest, NavEntry, SectionRef};
use crate::markdown::MarkdownParser;

pub const DOCS_DIR: &str = "docs";

/// Converts the MkDocs project at `project_root` into a [`Book`].
pub fn convert_project(project_root: &Path) -> Result<Book> {
    if !project_root.exists() {
        return Err(ExportError::missing("Project root", project_root));
    }
    let project_root = project_root
        .canonicalize()
        .map_err(|e| ExportError::io(project_root, e))?;

    let docs_dir = project_root.join(DOCS_DIR);
    if !docs_dir.exists() {
        return Err(ExportError::missing("docs directory", docs_dir));
    }

    let manifest = Manifest::load(&project_root)?;
    BookAssembler::new(docs_dir).assemble(&manifest)
}

/// Walks the navigation tree and builds numbered chapters and sections.
pub struct BookAssembler {
    docs_dir: PathBuf,
    parser: MarkdownParser,
}

impl BookAssembler {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            parser: MarkdownParser::new(),
        }
    }

    pub fn assemble(&self, manifest: &Manifest) -> Result<Book> {
        info!("Assembling \"{}\"", manifest.site_name.green());

        let mut chapters = Vec::new();

        for entry in &manifest.nav {
            match entry {
                NavEntry::Chapter { title, sections } => {
                    let number = chapters.len() + 1;
                    chapters.push(self.build_chapter(number, title, sections)?);
                }
                NavEntry::SinglePage { title, path } => {
                    debug!("Skipping single page \"{}\" ({})", title, path);
                }
                NavEntry::Malformed => {
                    debug!("Skipping navigation entry that is not a single-key mapping");
                }
            }
        }

        let book = Book {
            book: BookInfo::new(&manifest.site_name, manifest.image_cover_url.clone()),
            chapters,
        };

        info!(
            "Assembled {} chapters with {} sections",
            book.chapters.len(),
            book.section_count()
        );
        Ok(book)
    }

    fn build_chapter(&self, number: usize, title: &str, refs: &[SectionRef]) -> Result<Chapter> {
        info!("Chapter {}: {}", number, title.blue());

        let sections = refs
            .iter()
            .enumerate()
            .map(|(index, section)| self.build_section(number, index + 1, section))
            .collect::<Result<Vec<_>>>()?;

        Ok(Chapter {
            chapter_id: chapter_id(number),
            chapter_number: number,
            chapter_title: title.to_string(),
            sections,
        })
    }

    fn build_section(&self, chapter: usize, number: usize, section: &SectionRef) -> Result<Section> {
        let md_path = self.docs_dir.join(&section.path);
        if !md_path.exists() {
            return Err(ExportError::missing(
                format!("Markdown file for {}", section.title),
                md_path,
            ));
        }

        debug!("Reading {}", md_path.display());
        let parsed = self.parser.parse_file(&md_path)?;
        let summary = parsed.summary();

        Ok(Section {
            section_id: section_id(chapter, number),
            section_number: section_number(chapter, number),
            section_title: section.title.clone(),
            summary_video: parsed.front_matter.video,
            keywords: parsed.front_matter.keywords,
            summary,
            content: parsed.paragraphs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn project(manifest: &str, pages: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mkdocs.yml"), manifest).unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        for (path, body) in pages {
            let full = docs.join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, body).unwrap();
        }
        dir
    }

    #[test]
    fn test_convert_full_project() {
        let dir = project(
            r#"
site_name: My Book
image_cover_url: https://example.com/cover.png
nav:
  - Introduction: index.md
  - Getting Started:
      - Install: start/07-install.md
      - Configure: start/03-configure.md
  - Reference:
      - API: ref/api.md
"#,
            &[
                ("index.md", "Welcome.\n"),
                (
                    "start/07-install.md",
                    "---\ntitle: t\nkeywords: [x, y]\nvideo:\n  youtube_id: abc\n---\n\nFirst para.\n\nSecond para.\n",
                ),
                ("start/03-configure.md", "# Only a heading\n"),
                ("ref/api.md", "Café au lait ☕.\n"),
            ],
        );

        let book = convert_project(dir.path()).unwrap();

        assert_eq!(book.book.book_id, "my-book");
        assert_eq!(book.book.title, "My Book");
        assert_eq!(
            book.book.image_cover_url.as_deref(),
            Some("https://example.com/cover.png")
        );
        assert_eq!(book.chapters.len(), 2);

        let first = &book.chapters[0];
        assert_eq!(first.chapter_id, "ch01");
        assert_eq!(first.chapter_number, 1);
        assert_eq!(first.chapter_title, "Getting Started");
        assert_eq!(first.sections.len(), 2);

        let install = &first.sections[0];
        assert_eq!(install.section_id, "ch01-sec01");
        assert_eq!(install.section_number, "1.1");
        assert_eq!(install.section_title, "Install");
        assert_eq!(install.summary_video, Some(json!({ "youtube_id": "abc" })));
        assert_eq!(install.keywords, vec!["x", "y"]);
        assert_eq!(install.summary, "First para.");
        assert_eq!(install.content, vec!["First para.", "Second para."]);

        let configure = &first.sections[1];
        assert_eq!(configure.section_id, "ch01-sec02");
        assert_eq!(configure.summary, "");
        assert!(configure.content.is_empty());
        assert!(configure.keywords.is_empty());
        assert_eq!(configure.summary_video, None);

        let second = &book.chapters[1];
        assert_eq!(second.chapter_id, "ch02");
        assert_eq!(second.chapter_number, 2);
        assert_eq!(second.sections[0].section_id, "ch02-sec01");
        assert_eq!(second.sections[0].section_number, "2.1");
        assert_eq!(second.sections[0].summary, "Café au lait ☕.");
    }

    #[test]
    fn test_single_page_entries_produce_no_chapter() {
        let dir = project(
            "site_name: S\nnav:\n  - Intro: index.md\n  - About: about.md\n",
            &[("index.md", "Hi.\n")],
        );
        let book = convert_project(dir.path()).unwrap();
        assert!(book.chapters.is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped_without_gaps() {
        let dir = project(
            "site_name: S\nnav:\n  - stray.md\n  - A:\n      - One: a.md\n  - X: x.md\n    Y: y.md\n  - B:\n      - Two: b.md\n",
            &[("a.md", "A.\n"), ("b.md", "B.\n")],
        );
        let book = convert_project(dir.path()).unwrap();
        let ids: Vec<_> = book.chapters.iter().map(|c| c.chapter_id.as_str()).collect();
        assert_eq!(ids, vec!["ch01", "ch02"]);
        assert_eq!(book.chapters[1].chapter_title, "B");
    }

    #[test]
    fn test_empty_chapter_is_kept() {
        let dir = project("site_name: S\nnav:\n  - Empty: []\n", &[]);
        let book = convert_project(dir.path()).unwrap();
        assert_eq!(book.chapters.len(), 1);
        assert!(book.chapters[0].sections.is_empty());
    }

    #[test]
    fn test_missing_section_file_names_section() {
        let dir = project(
            "site_name: S\nnav:\n  - A:\n      - Ghost Page: ghost.md\n",
            &[],
        );
        let err = convert_project(dir.path()).unwrap_err();
        match &err {
            ExportError::MissingPath { what, .. } => assert!(what.contains("Ghost Page")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("Ghost Page"));
    }

    #[test]
    fn test_missing_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_project(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ExportError::MissingPath { ref what, .. } if what == "Project root"));
    }

    #[test]
    fn test_missing_docs_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mkdocs.yml"), "site_name: S\nnav: []\n").unwrap();
        let err = convert_project(dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::MissingPath { ref what, .. } if what == "docs directory"));
    }

    #[test]
    fn test_bad_front_matter_aborts() {
        let dir = project(
            "site_name: S\nnav:\n  - A:\n      - Bad: bad.md\n",
            &[("bad.md", "---\nkeywords: [oops\n---\n\nText.\n")],
        );
        let err = convert_project(dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::MarkdownParseFailure { .. }));
    }
}

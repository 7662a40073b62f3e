//! # mkdocs2book
//!
//! Turns an MkDocs project (`mkdocs.yml` plus a `docs/` tree of markdown
//! pages) into a single JSON "book" of numbered chapters and sections.
//!
//! ## Features
//!
//! - Navigation-driven chapter and section numbering
//! - Front matter `video` and `keywords` carried into each section
//! - Paragraph extraction with the first paragraph as summary
//! - Weighted keyword search over an exported book
//!
//! ## Usage
//!
//! ```bash
//! mkdocs2book export ../sample-data/sample-book
//! mkdocs2book search ../sample-data/sample-book/book-demo.json install
//! ```

mod assembler;
mod book;
mod error;
mod export;
mod ids;
mod manifest;
mod markdown;
mod search;

pub use assembler::{convert_project, BookAssembler};
pub use book::{Book, BookInfo, Chapter, Section};
pub use error::{ExportError, Result};
pub use export::{read_book, write_book, Exporter, OUTPUT_FILE};
pub use ids::slugify;
pub use manifest::{Manifest, NavEntry, SectionRef};
pub use markdown::{FrontMatter, FrontMatterError, MarkdownParser, ParsedMarkdown};
pub use search::{SearchHit, SearchIndex};

use std::fs;
use std::path::{Path, PathBuf};

use colored::*;
use tracing::info;

use crate::assembler::convert_project;
use crate::book::Book;
use crate::error::{ExportError, Result};

pub const OUTPUT_FILE: &str = "book-demo.json";

/// Converts a project and writes the book as indented JSON.
pub struct Exporter {
    project_root: PathBuf,
    output: Option<PathBuf>,
}

impl Exporter {
    pub fn new(project_root: impl Into<PathBuf>, output: Option<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            output,
        }
    }

    /// `--output` if given, otherwise `book-demo.json` inside the project root.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.project_root.join(OUTPUT_FILE))
    }

    pub fn run(&self) -> Result<PathBuf> {
        info!("Project root: {}", self.project_root.display().to_string().blue());

        let book = convert_project(&self.project_root)?;
        let output_path = self.output_path();
        write_book(&book, &output_path)?;

        info!("Output file: {}", output_path.display().to_string().green());
        Ok(output_path)
    }
}

/// Serializes the whole book before touching the file system, so a failure
/// never leaves a partial file behind.
pub fn write_book(book: &Book, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    fs::write(path, json).map_err(|e| ExportError::io(path, e))
}

pub fn read_book(path: &Path) -> Result<Book> {
    if !path.exists() {
        return Err(ExportError::missing("Book JSON", path));
    }
    let json = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}

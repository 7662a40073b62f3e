use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning an MkDocs project into a book.
///
/// Every variant is fatal: conversion stops at the first one.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A required file or directory does not exist.
    #[error("{what} not found: {}", path.display())]
    MissingPath { what: String, path: PathBuf },

    /// `mkdocs.yml` is unreadable or lacks a required key.
    #[error("invalid mkdocs.yml: {0}")]
    InvalidManifest(String),

    /// A navigation entry has a shape the assembler cannot walk.
    #[error("invalid navigation under chapter '{chapter}': {reason}")]
    InvalidNavigationShape { chapter: String, reason: String },

    /// A markdown file carries front matter that cannot be parsed.
    #[error("failed to parse markdown {}: {reason}", path.display())]
    MarkdownParseFailure { path: PathBuf, reason: String },

    #[error("failed to access {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to serialize book: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    pub(crate) fn missing(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingPath {
            what: what.into(),
            path: path.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

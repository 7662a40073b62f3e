//! Loading and validating `mkdocs.yml`.
//!
//! Only `nav`, `site_name` and `image_cover_url` are read. The navigation
//! list is classified once here so the assembler walks typed entries.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value as Yaml};
use tracing::debug;

use crate::error::{ExportError, Result};

pub const MANIFEST_FILE: &str = "mkdocs.yml";

/// One item of the `nav` list.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEntry {
    /// `Title: [ {Section: page.md}, ... ]`
    Chapter {
        title: String,
        sections: Vec<SectionRef>,
    },
    /// `Title: page.md`, a page outside any chapter.
    SinglePage { title: String, path: String },
    /// Anything that is not a single-key mapping with a string key.
    Malformed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionRef {
    pub title: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub site_name: String,
    pub image_cover_url: Option<String>,
    pub nav: Vec<NavEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    nav: Option<Yaml>,
    site_name: Option<Yaml>,
    image_cover_url: Option<Yaml>,
}

impl Manifest {
    /// Reads `<project_root>/mkdocs.yml`.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ExportError::missing(MANIFEST_FILE, path));
        }

        let source = fs::read_to_string(&path).map_err(|e| ExportError::io(&path, e))?;
        let manifest = Self::from_yaml(&source)?;
        debug!(
            "Loaded {} with {} navigation entries",
            path.display(),
            manifest.nav.len()
        );
        Ok(manifest)
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        let document: Yaml = serde_yaml::from_str(source)
            .map_err(|e| ExportError::InvalidManifest(e.to_string()))?;
        let raw = match document {
            Yaml::Null => RawManifest::default(),
            doc @ Yaml::Mapping(_) => serde_yaml::from_value(doc)
                .map_err(|e| ExportError::InvalidManifest(e.to_string()))?,
            _ => {
                return Err(ExportError::InvalidManifest(
                    "top level must be a mapping".to_string(),
                ))
            }
        };

        let nav = match raw.nav {
            Some(Yaml::Sequence(items)) => items
                .iter()
                .map(NavEntry::classify)
                .collect::<Result<Vec<_>>>()?,
            _ => {
                return Err(ExportError::InvalidManifest(
                    "`nav` must be a list".to_string(),
                ))
            }
        };

        let site_name = match raw.site_name {
            Some(Yaml::String(name)) if !name.is_empty() => name,
            _ => {
                return Err(ExportError::InvalidManifest(
                    "`site_name` must be defined".to_string(),
                ))
            }
        };

        let image_cover_url = match raw.image_cover_url {
            None | Some(Yaml::Null) => None,
            Some(Yaml::String(url)) => Some(url),
            Some(_) => {
                return Err(ExportError::InvalidManifest(
                    "`image_cover_url` must be a string".to_string(),
                ))
            }
        };

        Ok(Self {
            site_name,
            image_cover_url,
            nav,
        })
    }
}

impl NavEntry {
    fn classify(item: &Yaml) -> Result<Self> {
        let Some((title, value)) = item.as_mapping().and_then(single_entry) else {
            return Ok(Self::Malformed);
        };

        match value {
            Yaml::String(path) => Ok(Self::SinglePage {
                title,
                path: path.clone(),
            }),
            Yaml::Sequence(items) => {
                let sections = items
                    .iter()
                    .map(|section| SectionRef::classify(&title, section))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Chapter { title, sections })
            }
            _ => Err(ExportError::InvalidNavigationShape {
                chapter: title,
                reason: "sections must be a list".to_string(),
            }),
        }
    }
}

impl SectionRef {
    fn classify(chapter: &str, item: &Yaml) -> Result<Self> {
        let invalid = |reason: &str| ExportError::InvalidNavigationShape {
            chapter: chapter.to_string(),
            reason: reason.to_string(),
        };

        let (title, value) = item
            .as_mapping()
            .and_then(single_entry)
            .ok_or_else(|| invalid("section entry must be a single `title: path` mapping"))?;

        match value {
            Yaml::String(path) => Ok(Self {
                title,
                path: PathBuf::from(path),
            }),
            _ => Err(invalid(&format!("section '{title}' must map to a markdown path"))),
        }
    }
}

/// The key and value of a one-entry mapping with a string key.
fn single_entry(map: &Mapping) -> Option<(String, &Yaml)> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    key.as_str().map(|k| (k.to_string(), value))
}

//! Ordinal-keyed filename catalogs
//!
//! A catalog maps an identifier's ordinal to the bare filename (no path,
//! no extension) it is stored under. Catalogs are loaded once and are
//! immutable afterwards; they know nothing about locale or paths.

use crate::{AssetError, AssetId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a catalog data file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog '{category}' has an empty filename at row {row}")]
    EmptyEntry { category: String, row: usize },
}

/// On-disk form: `{ "category": "ui", "entries": ["title", "logo"] }`.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    category: String,
    entries: Vec<String>,
}

/// Filename table for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    category: String,
    entries: Vec<String>,
}

impl Catalog {
    pub fn from_static(category: &str, entries: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            entries: entries.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogLoadError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        if let Some(row) = file.entries.iter().position(|e| e.is_empty()) {
            return Err(CatalogLoadError::EmptyEntry {
                category: file.category,
                row,
            });
        }
        tracing::debug!(
            category = %file.category,
            rows = file.entries.len(),
            "loaded catalog"
        );
        Ok(Self {
            category: file.category,
            entries: file.entries,
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filename stored at `ordinal`.
    ///
    /// A missing row means the identifier enumeration and the catalog
    /// have drifted apart.
    pub fn filename(&self, ordinal: usize) -> Result<&str, AssetError> {
        match self.entries.get(ordinal) {
            Some(name) => Ok(name),
            None => {
                tracing::error!(
                    category = %self.category,
                    ordinal,
                    rows = self.entries.len(),
                    "catalog is out of sync with its identifiers"
                );
                Err(AssetError::ConfigurationDrift {
                    category: self.category.clone(),
                    ordinal,
                    rows: self.entries.len(),
                })
            }
        }
    }
}

/// One catalog per category, keyed by category name.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    tables: HashMap<String, Catalog>,
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a catalog, replacing any previous table for the same
    /// category.
    pub fn insert(&mut self, catalog: Catalog) -> Option<Catalog> {
        self.tables.insert(catalog.category.clone(), catalog)
    }

    pub fn with(mut self, catalog: Catalog) -> Self {
        self.insert(catalog);
        self
    }

    pub fn get(&self, category: &'static str) -> Result<&Catalog, AssetError> {
        self.tables
            .get(category)
            .ok_or(AssetError::MissingCatalog { category })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Checks that the catalog for `I` has a row for every identifier.
    pub fn verify<I: AssetId>(&self) -> Result<(), AssetError> {
        let category = I::CATEGORY.name;
        let catalog = self.get(category)?;
        let needed = I::IDS.len();
        if catalog.len() < needed {
            tracing::error!(
                category,
                rows = catalog.len(),
                identifiers = needed,
                "catalog is shorter than its identifier set"
            );
            return Err(AssetError::ConfigurationDrift {
                category: category.to_string(),
                ordinal: catalog.len(),
                rows: catalog.len(),
            });
        }
        if catalog.len() > needed {
            tracing::warn!(
                category,
                rows = catalog.len(),
                identifiers = needed,
                "catalog has rows no identifier refers to"
            );
        }
        Ok(())
    }
}

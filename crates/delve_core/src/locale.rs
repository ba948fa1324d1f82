//! Localized string table
//!
//! Read-only key -> literal lookup for already-translated strings. The
//! table is loaded once per locale and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a locale table.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read locale table '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed locale table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("locale table has an empty locale tag")]
    EmptyLocale,
}

/// Strings for a single locale.
///
/// On disk this is a JSON object:
///
/// ```json
/// { "locale": "en", "strings": { "asset.image.path": "/images/" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleStrings {
    locale: String,
    #[serde(default)]
    strings: HashMap<String, String>,
}

impl LocaleStrings {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            strings: HashMap::new(),
        }
    }

    /// Built-in English table, used when no locale file is shipped.
    pub fn english() -> Self {
        Self::new("en")
            .with("asset.image.path", "/images/")
            .with("asset.image.extension", ".png")
            .with("asset.audio.path", "/audio/")
            .with("asset.audio.extension", ".ogg")
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, LocaleError> {
        let table: LocaleStrings = serde_json::from_str(json)?;
        if table.locale.is_empty() {
            return Err(LocaleError::EmptyLocale);
        }
        tracing::debug!(
            locale = %table.locale,
            entries = table.strings.len(),
            "loaded locale table"
        );
        Ok(table)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, LocaleError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

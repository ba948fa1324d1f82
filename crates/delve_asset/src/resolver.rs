//! Locale-dependent path resolution
//!
//! [`LocaleConfig`] holds the path prefix and file extension in effect
//! for each [`AssetKind`]. [`AssetContext`] bundles it with the catalogs
//! and is passed explicitly to every resolution, so a resolution pass
//! always sees one consistent configuration.

use crate::{AssetError, AssetKind, Catalogs, Category};
use delve_core::LocaleStrings;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

type Kinds = BTreeMap<AssetKind, KindPaths>;

/// Epoch assigned to each distinct configuration seen by the process.
static EPOCHS: Lazy<Mutex<HashMap<(String, Kinds), u64>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn stamp(locale: &str, kinds: &Kinds) -> u64 {
    let mut epochs = EPOCHS.lock().unwrap_or_else(|e| e.into_inner());
    let next = epochs.len() as u64 + 1;
    *epochs
        .entry((locale.to_string(), kinds.clone()))
        .or_insert(next)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct KindPaths {
    prefix: String,
    extension: String,
}

/// Per-kind prefix and extension for one locale.
///
/// The epoch identifies the content: configurations with the same locale
/// tag and the same per-kind paths share one, any difference yields a new
/// one. Caches key their entries on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    locale: String,
    kinds: Kinds,
    epoch: u64,
}

impl LocaleConfig {
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        let kinds = Kinds::new();
        let epoch = stamp(&locale, &kinds);
        Self {
            locale,
            kinds,
            epoch,
        }
    }

    pub fn with_kind(
        mut self,
        kind: AssetKind,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        self.kinds.insert(
            kind,
            KindPaths {
                prefix: prefix.into(),
                extension: extension.into(),
            },
        );
        self.epoch = stamp(&self.locale, &self.kinds);
        self
    }

    /// Reads `asset.<kind>.path` and `asset.<kind>.extension` for every
    /// kind. A kind with neither key stays unconfigured; a kind with only
    /// one of them is an error.
    pub fn from_strings(strings: &LocaleStrings) -> Result<Self, AssetError> {
        let mut config = Self::new(strings.locale());
        for kind in AssetKind::ALL {
            let path_key = kind.path_key();
            let extension_key = kind.extension_key();
            match (strings.get(&path_key), strings.get(&extension_key)) {
                (Some(prefix), Some(extension)) => {
                    config = config.with_kind(kind, prefix, extension);
                }
                (None, None) => {
                    tracing::debug!(locale = strings.locale(), %kind, "kind not configured");
                }
                (None, Some(_)) => return Err(config.missing_key(path_key)),
                (Some(_), None) => return Err(config.missing_key(extension_key)),
            }
        }
        Ok(config)
    }

    fn missing_key(&self, key: String) -> AssetError {
        tracing::error!(locale = %self.locale, %key, "locale table is incomplete");
        AssetError::MissingLocaleKey {
            locale: self.locale.clone(),
            key,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn paths(&self, kind: AssetKind) -> Result<&KindPaths, AssetError> {
        self.kinds.get(&kind).ok_or_else(|| AssetError::UnconfiguredKind {
            locale: self.locale.clone(),
            kind,
        })
    }

    pub fn path_prefix(&self, kind: AssetKind) -> Result<&str, AssetError> {
        self.paths(kind).map(|paths| paths.prefix.as_str())
    }

    pub fn extension(&self, kind: AssetKind) -> Result<&str, AssetError> {
        self.paths(kind).map(|paths| paths.extension.as_str())
    }

    /// Kind prefix followed by the category's subdirectory.
    pub fn category_prefix(&self, category: &Category) -> Result<String, AssetError> {
        let prefix = self.path_prefix(category.kind)?;
        Ok(format!("{prefix}{}", category.subdir))
    }
}

/// Everything a resolution needs: the active locale and the catalogs.
#[derive(Debug, Clone)]
pub struct AssetContext {
    locale: Arc<LocaleConfig>,
    catalogs: Catalogs,
}

impl AssetContext {
    pub fn new(locale: LocaleConfig, catalogs: Catalogs) -> Self {
        Self {
            locale: Arc::new(locale),
            catalogs,
        }
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn epoch(&self) -> u64 {
        self.locale.epoch()
    }

    pub(crate) fn shared_locale(&self) -> &Arc<LocaleConfig> {
        &self.locale
    }

    /// Replaces the active locale. Assets cached under the old one are no
    /// longer reachable through this context, and loaders evict them once
    /// no context uses that configuration.
    pub fn switch_locale(&mut self, locale: LocaleConfig) {
        tracing::info!(
            from = self.locale.locale(),
            to = locale.locale(),
            "switching asset locale"
        );
        self.locale = Arc::new(locale);
    }
}

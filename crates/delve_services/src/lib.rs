//! Delve Services Layer
//!
//! Settings and localized strings, loaded once at startup and read-only
//! afterwards.

pub mod settings;

pub use settings::{Settings, SettingsError};

use delve_core::{LocaleError, LocaleStrings};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// Where the services read their files from.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub settings_path: PathBuf,
    pub locale_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from("settings.json"),
            locale_dir: PathBuf::from("locale"),
        }
    }
}

/// Loaded services.
#[derive(Debug, Clone)]
pub struct Services {
    pub settings: Settings,
    pub strings: LocaleStrings,
}

/// Loads settings, then the string table for the configured locale.
///
/// A missing locale file falls back to the built-in English table; a
/// malformed one is an error.
pub fn init_services(config: &ServiceConfig) -> Result<Services, ServiceError> {
    let settings = Settings::load(&config.settings_path)?;
    let strings = load_strings(config, &settings.gameplay.locale)?;
    Ok(Services { settings, strings })
}

fn load_strings(config: &ServiceConfig, locale: &str) -> Result<LocaleStrings, LocaleError> {
    let path = config.locale_dir.join(format!("{locale}.json"));
    if !path.is_file() {
        tracing::warn!(
            path = %path.display(),
            locale,
            "locale table not found, using built-in English strings"
        );
        return Ok(LocaleStrings::english());
    }
    LocaleStrings::from_json_file(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_with_nothing_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            settings_path: dir.path().join("settings.json"),
            locale_dir: dir.path().join("locale"),
        };
        let services = init_services(&config).unwrap();
        assert_eq!(services.settings, Settings::default());
        assert_eq!(services.strings, LocaleStrings::english());
    }

    #[test]
    fn test_init_reads_configured_locale() {
        let dir = tempfile::tempdir().unwrap();
        let locale_dir = dir.path().join("locale");
        std::fs::create_dir_all(&locale_dir).unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "gameplay": { "locale": "ja" } }"#,
        )
        .unwrap();
        std::fs::write(
            locale_dir.join("ja.json"),
            r#"{ "locale": "ja", "strings": { "asset.image.path": "/images/ja/" } }"#,
        )
        .unwrap();

        let services = init_services(&ServiceConfig {
            settings_path: dir.path().join("settings.json"),
            locale_dir,
        })
        .unwrap();
        assert_eq!(services.strings.locale(), "ja");
        assert_eq!(services.strings.get("asset.image.path"), Some("/images/ja/"));
    }

    #[test]
    fn test_malformed_locale_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let locale_dir = dir.path().join("locale");
        std::fs::create_dir_all(&locale_dir).unwrap();
        std::fs::write(locale_dir.join("en.json"), "not json").unwrap();

        let err = init_services(&ServiceConfig {
            settings_path: dir.path().join("settings.json"),
            locale_dir,
        })
        .unwrap_err();
        assert!(matches!(err, ServiceError::Locale(_)));
    }
}

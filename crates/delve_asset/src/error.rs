use crate::{AssetKind, ResourceLocator};
use thiserror::Error;

/// Errors that can occur while resolving or loading an asset.
///
/// The first four variants mean the shipped data and the identifier
/// enumerations disagree. They are never recovered from at runtime.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("catalog '{category}' has no row for ordinal {ordinal} ({rows} rows)")]
    ConfigurationDrift {
        category: String,
        ordinal: usize,
        rows: usize,
    },

    #[error("no catalog registered for category '{category}'")]
    MissingCatalog { category: &'static str },

    #[error("locale '{locale}' is missing key '{key}'")]
    MissingLocaleKey { locale: String, key: String },

    #[error("locale '{locale}' does not configure {kind} assets")]
    UnconfiguredKind { locale: String, kind: AssetKind },

    #[error("resource not found: {locator}")]
    ResourceNotFound { locator: ResourceLocator },

    #[error("failed to decode {locator}")]
    DecodeFailure {
        locator: ResourceLocator,
        #[source]
        source: DecodeError,
    },
}

impl AssetError {
    /// Configuration errors indicate a build-time inconsistency.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AssetError::ConfigurationDrift { .. }
                | AssetError::MissingCatalog { .. }
                | AssetError::MissingLocaleKey { .. }
                | AssetError::UnconfiguredKind { .. }
        )
    }

    /// Load failures are not cached and may succeed on a later call.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AssetError::ResourceNotFound { .. } | AssetError::DecodeFailure { .. }
        )
    }
}

/// Failure reported by a [`Decoder`](crate::Decoder).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data: {0}")]
    Malformed(String),
}

impl DecodeError {
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        DecodeError::Malformed(reason.to_string())
    }

    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, DecodeError::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

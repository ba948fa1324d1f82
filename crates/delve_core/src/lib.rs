//! Delve Core
//!
//! Shared foundations for the game crates:
//! - Localized string table
//! - Deterministic time and battle pacing

pub mod locale;
pub mod time;

pub use locale::{LocaleError, LocaleStrings};

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

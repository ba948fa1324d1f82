//! Settings management

use delve_core::time;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub graphics: GraphicsSettings,
    pub audio: AudioSettings,
    pub gameplay: GameplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsSettings {
    pub resolution_width: u32,
    pub resolution_height: u32,
    pub fullscreen: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub master_volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// 1 (slowest) to 6 (fastest); out-of-range values are clamped on use.
    pub battle_speed: u32,
    /// Locale tag selecting `<locale>.json` in the locale directory.
    pub locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graphics: GraphicsSettings::default(),
            audio: AudioSettings::default(),
            gameplay: GameplaySettings::default(),
        }
    }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            resolution_width: 1280,
            resolution_height: 720,
            fullscreen: false,
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { master_volume: 1.0 }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            battle_speed: 3,
            locale: "en".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads settings from `path`, falling back to defaults when the file
    /// does not exist. Any other failure is reported.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "settings file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        let settings = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            locale = %settings.gameplay.locale,
            battle_speed = settings.gameplay.battle_speed,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Simulation ticks between battle actions at the configured speed.
    pub fn battle_step_ticks(&self) -> u32 {
        time::battle_step_ticks(self.gameplay.battle_speed)
    }
}

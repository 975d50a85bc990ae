//! The `config.toml` file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use motes_core::ThemeMode;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Frames per second when the config does not say otherwise.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Highest accepted frame rate.
const MAX_FRAME_RATE: u32 = 240;

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persisted theme. Absent until the user toggles it once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
    /// Keep particles still.
    pub reduced_motion: bool,
    /// Target frames per second.
    pub frame_rate: u32,
    /// Large foreground line.
    pub headline: String,
    /// Smaller line under the headline.
    pub tagline: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            reduced_motion: false,
            frame_rate: DEFAULT_FRAME_RATE,
            headline: "Welcome".to_string(),
            tagline: "Move the mouse through the field".to_string(),
        }
    }
}

/// `<config dir>/motes/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "motes").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, logging and falling back to defaults on error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Time between frames for the configured rate.
    pub fn frame_interval(&self) -> Duration {
        let rate = self.frame_rate.clamp(1, MAX_FRAME_RATE);
        Duration::from_secs(1) / rate
    }
}

//! Configuration for KatPhone.
//!
//! Read from `~/.katphone/config.toml`. Every section and key is optional:
//!
//! ```toml
//! [app]
//! ascii_only = false
//! high_contrast = false
//! reduced_motion = false
//! data_dir = "~/.katphone"
//!
//! [display]
//! width = 400
//! height = 800
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use katphone_types::DisplaySize;

const CONFIG_DIR_NAME: &str = ".katphone";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KatConfig {
    pub app: Option<AppConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for app icons and chrome.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Skip the unlock and settle-back animations.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Directory holding `store.json`. `~` expands to the home directory.
    pub data_dir: Option<String>,
}

/// Size of the virtual phone screen in gesture and game units.
#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// UI options resolved from config, with defaults applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

impl KatConfig {
    /// Load the user config. `Ok(None)` when no config file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Failed to read config: {err}");
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        Self::parse(&content).map_err(|err| {
            tracing::warn!(path = %path.display(), "Failed to parse config: {err}");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app.as_ref().map_or_else(UiOptions::default, |app| UiOptions {
            ascii_only: app.ascii_only,
            high_contrast: app.high_contrast,
            reduced_motion: app.reduced_motion,
        })
    }

    #[must_use]
    pub fn display_size(&self) -> DisplaySize {
        let defaults = DisplaySize::default();
        match &self.display {
            Some(display) => DisplaySize::new(
                display.width.unwrap_or(defaults.width),
                display.height.unwrap_or(defaults.height),
            ),
            None => defaults,
        }
    }

    /// Directory for the persistent store, falling back to the config directory.
    #[must_use]
    pub fn data_dir(&self) -> Option<PathBuf> {
        let configured = self.app.as_ref().and_then(|app| app.data_dir.as_deref());
        match configured {
            Some(raw) => Some(expand_home(raw)),
            None => default_data_dir(),
        }
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    default_data_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME))
}

fn expand_home(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    if trimmed == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }
    PathBuf::from(trimmed)
}

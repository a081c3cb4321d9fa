use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::lang::Language;

pub const CONFIG_FILE: &str = "audio_switcher_config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lang: Language,
    #[serde(default)]
    pub path: String,
}

impl Config {
    pub fn new(lang: Language, path: impl Into<String>) -> Self {
        Self {
            lang,
            path: path.into(),
        }
    }

    pub fn with_lang(&self, lang: Language) -> Self {
        Self::new(lang, self.path.clone())
    }

    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self::new(self.lang, path)
    }
}

/// The JSON file holding the user's settings.
///
/// Reads are forgiving: anything that can't be turned into a `Config` counts as
/// "no config yet". Writes replace the whole file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(CONFIG_FILE)
    }
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` for a missing, unreadable, corrupt or empty config.
    pub fn load(&self) -> Option<Config> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No usable config at {:?}: {}", self.path, e);
                return None;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse config file {:?}: {}", self.path, e);
                return None;
            }
        };

        // An empty record means setup never finished
        if value.as_object().map_or(true, |map| map.is_empty()) {
            return None;
        }

        match serde_json::from_value::<Config>(value) {
            Ok(config) => {
                debug!("Loaded config: {:?}", config);
                Some(config)
            }
            Err(e) => {
                warn!("Config file {:?} has unexpected contents: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved config: {:?}", config);
        Ok(())
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::model::DurationUnit;

pub const SETTINGS_FILE: &str = "settings.json";
pub const STORE_FILE: &str = "intimations.json";

/// Alert sound settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Audio file to play; a short tone when absent
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_enabled() -> bool {
    true
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The single store slot. Relative to the config dir unless absolute.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default)]
    pub sound: SoundSettings,
    /// Unit used when an intake gives no duration unit
    #[serde(default)]
    pub default_duration_unit: DurationUnit,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(STORE_FILE)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            sound: SoundSettings::default(),
            default_duration_unit: DurationUnit::Days,
        }
    }
}

/// Default config directory: `INTIMATIONS_HOME`, else `~/.config/intimations`.
pub fn default_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("INTIMATIONS_HOME") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("intimations")
}

pub struct ConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            config_path: config_dir.join(SETTINGS_FILE),
            config_dir,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Settings {
        if self.config_path.exists() {
            if let Ok(content) = fs::read_to_string(&self.config_path) {
                match serde_json::from_str(&content) {
                    Ok(settings) => return settings,
                    Err(e) => log::warn!("Ignoring invalid {:?}: {}", self.config_path, e),
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        // Ensure directory exists
        fs::create_dir_all(&self.config_dir)?;
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.config_path, content)
    }

    /// Absolute location of the store slot for `settings`.
    pub fn store_path(&self, settings: &Settings) -> PathBuf {
        if settings.store_path.is_absolute() {
            settings.store_path.clone()
        } else {
            self.config_dir.join(&settings.store_path)
        }
    }
}

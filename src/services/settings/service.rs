use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

pub const SETTINGS_FILE_NAME: &str = "schedulr.toml";

pub struct SettingsService;

impl SettingsService {
    /// Platform config location, e.g. `~/.config/schedulr/schedulr.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "Schedulr", "Schedulr")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    /// Load and validate settings. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let raw = fs::read_to_string(path)
            .context(format!("Failed to read settings from {}", path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .context(format!("Failed to parse settings in {}", path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", path.display(), e))?;

        Ok(settings)
    }

    /// Like [`SettingsService::load_from`], falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Settings {
        let Some(path) = path else {
            log::warn!("No config directory available, using default settings");
            return Settings::default();
        };

        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                Settings::default()
            }
        }
    }

    pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(path, raw).context(format!("Failed to write settings to {}", path.display()))?;

        Ok(())
    }
}

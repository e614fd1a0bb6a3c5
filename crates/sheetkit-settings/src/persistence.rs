//! Settings Persistence
//!
//! Resolves the platform settings location and loads or saves
//! [`EngineSettings`] there. A missing file yields defaults.

use crate::config::EngineSettings;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "sheetkit";
const SETTINGS_FILE: &str = "settings.toml";

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    settings: EngineSettings,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Persistence bound to `path` with default settings
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            settings: EngineSettings::default(),
            path: path.into(),
        }
    }

    /// Platform settings file, e.g. `~/.config/sheetkit/settings.toml` on Linux
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::new(path));
        }
        let settings = EngineSettings::load_from_file(&path)?;
        Ok(Self { settings, path })
    }

    /// Save to the bound path, creating parent directories
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.settings.save_to_file(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get reference to settings
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Get mutable reference to settings
    pub fn settings_mut(&mut self) -> &mut EngineSettings {
        &mut self.settings
    }
}

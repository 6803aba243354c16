// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Config and state file locations.

use crate::config::AppConfig;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Knows where the config file and the log live.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    state_dir: PathBuf,
}

impl ConfigManager {
    /// Locate the per-user directories. Nothing is created until a file is
    /// written.
    pub fn new() -> Result<Self, ConfigError> {
        let project_dirs =
            ProjectDirs::from("", "", "pulsedeck").ok_or(ConfigError::NoConfigDir)?;

        let config_dir = project_dirs.config_dir().to_path_buf();
        let state_dir = project_dirs
            .state_dir()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| config_dir.join("state"));

        Ok(Self {
            config_path: config_dir.join("config.toml"),
            state_dir,
        })
    }

    /// Use an explicit config file; the log goes next to it.
    pub fn with_config_path(path: impl Into<PathBuf>) -> Self {
        let config_path = path.into();
        let state_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            config_path,
            state_dir,
        }
    }

    /// Get the path to the main config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join("pulsedeck.log")
    }

    /// Load the application config. A missing file yields the defaults.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            Ok(AppConfig::from_toml(&content)?)
        } else {
            Ok(AppConfig::default())
        }
    }

    /// Save the application config.
    pub fn save_config(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, config.to_toml()?)?;
        Ok(())
    }

    /// Rewrite the config file with every setting spelled out.
    ///
    /// A file that exists but cannot be loaded is left untouched and the load
    /// error is returned.
    pub fn write_effective(&self) -> Result<(), ConfigError> {
        let config = self.load_config()?;
        self.save_config(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_path(dir.path().join("config.toml"));
        let config = manager.load_config().unwrap();
        assert_eq!(config.settings.items, 4);
        assert_eq!(manager.log_path(), dir.path().join("pulsedeck.log"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_path(dir.path().join("nested/config.toml"));
        let mut config = AppConfig::default();
        config.settings.volume_limit = 150;
        config.style.border = "rounded".to_string();
        manager.save_config(&config).unwrap();

        let loaded = manager.load_config().unwrap();
        assert_eq!(loaded.settings.volume_limit, 150);
        assert_eq!(loaded.style.border, "rounded");
    }

    #[test]
    fn test_write_effective_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nitems = 6\n").unwrap();
        let manager = ConfigManager::with_config_path(&path);

        manager.write_effective().unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("items = 6"));
        assert!(written.contains("volume_limit = 110"));
        assert!(written.contains("[colors]"));
    }

    #[test]
    fn test_write_effective_keeps_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let broken = "[settings\nitems = 3\nwidth = 120\n";
        fs::write(&path, broken).unwrap();
        let manager = ConfigManager::with_config_path(&path);

        assert!(matches!(
            manager.write_effective(),
            Err(ConfigError::TomlParse(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings\nitems = 3").unwrap();
        let manager = ConfigManager::with_config_path(&path);
        assert!(matches!(
            manager.load_config(),
            Err(ConfigError::TomlParse(_))
        ));
    }
}

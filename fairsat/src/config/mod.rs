//! Configuration file handling for ~/.fairsat/config.ini.
//!
//! Loads and saves user configuration with sensible defaults. A missing
//! file yields defaults; sections or keys absent from the file fall back
//! individually.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    Read(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    Write(String),

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    Directory(std::io::Error),
}

/// Imagery provider settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// API key for the static-map endpoint.
    pub api_key: Option<String>,
}

/// Cache storage settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Root directory of the satellite image cache.
    pub directory: PathBuf,
}

/// Companion transfer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferSettings {
    /// Outbox spool directory of the companion messaging channel.
    pub outbox: PathBuf,
}

/// User configuration loaded from the INI file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub provider: ProviderSettings,
    pub cache: CacheSettings,
    pub transfer: TransferSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderSettings { api_key: None },
            cache: CacheSettings {
                directory: config_directory().join("cache"),
            },
            transfer: TransferSettings {
                outbox: config_directory().join("outbox"),
            },
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path (~/.fairsat/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        let defaults = Self::default();

        let api_key = ini
            .section(Some("provider"))
            .and_then(|s| s.get("api_key"))
            .map(str::to_string);
        let directory = ini
            .section(Some("cache"))
            .and_then(|s| s.get("directory"))
            .map(PathBuf::from)
            .unwrap_or(defaults.cache.directory);
        let outbox = ini
            .section(Some("transfer"))
            .and_then(|s| s.get("outbox"))
            .map(PathBuf::from)
            .unwrap_or(defaults.transfer.outbox);

        Ok(Self {
            provider: ProviderSettings { api_key },
            cache: CacheSettings { directory },
            transfer: TransferSettings { outbox },
        })
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::Directory)?;
        }

        let mut ini = Ini::new();
        if let Some(key) = &self.provider.api_key {
            ini.with_section(Some("provider")).set("api_key", key.as_str());
        }
        ini.with_section(Some("cache"))
            .set("directory", self.cache.directory.display().to_string());
        ini.with_section(Some("transfer"))
            .set("outbox", self.transfer.outbox.display().to_string());

        ini.write_to_file(path)
            .map_err(|e| ConfigFileError::Write(e.to_string()))
    }
}

/// Get the path to the config directory (~/.fairsat).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fairsat")
}

/// Get the path to the config file (~/.fairsat/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert!(config.provider.api_key.is_none());
        assert!(config.cache.directory.ends_with("cache"));
        assert!(config.transfer.outbox.ends_with("outbox"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("nonexistent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        let config = ConfigFile {
            provider: ProviderSettings {
                api_key: Some("secret".to_string()),
            },
            cache: CacheSettings {
                directory: PathBuf::from("/tmp/fairsat-cache"),
            },
            transfer: TransferSettings {
                outbox: PathBuf::from("/tmp/fairsat-outbox"),
            },
        };
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_falls_back_per_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[provider]\napi_key = abc\n").unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.provider.api_key.as_deref(), Some("abc"));
        assert_eq!(loaded.cache.directory, ConfigFile::default().cache.directory);
    }
}

//! Core `Config` struct and its persistence.
//!
//! Covers:
//! - the `Config` fields and `impl Default`
//! - `load` / `save` (YAML file I/O with atomic write)
//! - path helpers (`config_path`, `config_dir`)
//! - semantic validation

use crate::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
const APP_DIR: &str = "worktree-mux";

/// Multiplexer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Tabs
    // ========================================================================
    /// Title given to newly created tabs
    #[serde(default = "crate::defaults::default_tab_title")]
    pub default_tab_title: String,

    /// Icon name given to newly created tabs (None = no icon)
    #[serde(default = "crate::defaults::default_tab_icon")]
    pub default_tab_icon: Option<String>,

    // ========================================================================
    // Run script
    // ========================================================================
    /// Title of the dedicated tab opened by `run_script`
    #[serde(default = "crate::defaults::run_script_tab_title")]
    pub run_script_tab_title: String,

    /// Icon of the dedicated tab opened by `run_script`
    #[serde(default = "crate::defaults::run_script_tab_icon")]
    pub run_script_tab_icon: String,

    // ========================================================================
    // Notifications
    // ========================================================================
    /// Whether desktop notifications from surfaces are recorded at all
    #[serde(default = "crate::defaults::bool_true")]
    pub notifications_enabled: bool,

    /// Per-worktree notification log capacity
    #[serde(default = "crate::defaults::max_notifications")]
    pub max_notifications: usize,

    // ========================================================================
    // Event stream
    // ========================================================================
    /// Events buffered for replay while no subscriber is attached
    #[serde(default = "crate::defaults::event_buffer_capacity")]
    pub event_buffer_capacity: usize,

    // ========================================================================
    // Debug logging
    // ========================================================================
    /// Level for the categorized debug log file (0-4)
    #[serde(default = "crate::defaults::debug_level")]
    pub debug_level: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tab_title: crate::defaults::default_tab_title(),
            default_tab_icon: crate::defaults::default_tab_icon(),
            run_script_tab_title: crate::defaults::run_script_tab_title(),
            run_script_tab_icon: crate::defaults::run_script_tab_icon(),
            notifications_enabled: crate::defaults::bool_true(),
            max_notifications: crate::defaults::max_notifications(),
            event_buffer_capacity: crate::defaults::event_buffer_capacity(),
            debug_level: crate::defaults::debug_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        log::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check field values that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_notifications == 0 {
            return Err(ConfigError::Validation(
                "max_notifications must be at least 1".to_string(),
            ));
        }
        if self.event_buffer_capacity == 0 {
            return Err(ConfigError::Validation(
                "event_buffer_capacity must be at least 1".to_string(),
            ));
        }
        if self.debug_level > 4 {
            return Err(ConfigError::Validation(format!(
                "debug_level must be between 0 and 4, got {}",
                self.debug_level
            )));
        }
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("."))
        }
        #[cfg(not(target_os = "windows"))]
        {
            // XDG convention on all unix platforms: ~/.config/worktree-mux
            dirs::home_dir()
                .map(|home| home.join(".config").join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = "max_notifications: 5\n";
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.max_notifications, 5);
        assert_eq!(config.default_tab_title, "Terminal");
        assert!(config.notifications_enabled);
        assert_eq!(config.event_buffer_capacity, 256);
    }

    #[test]
    fn save_then_load_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            run_script_tab_title: "Dev Server".to_string(),
            notifications_enabled: false,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert!(!path.with_extension("yaml.tmp").exists());
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "max_notifications: 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Validation(msg)) => assert!(msg.contains("max_notifications")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_yaml_surfaces_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "max_notifications: [not a number\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }
}

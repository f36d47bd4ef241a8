//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_SETTLE_DELAY_MS, MAX_SETTLE_DELAY_MS,
};
use crate::kanban::ColumnKey;
use crate::theme::StoredPreferences;

/// One Kanban lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Status value stored on items in this lane
    pub key: ColumnKey,
    /// Display title
    pub title: String,
}

impl ColumnConfig {
    fn new(key: &str, title: &str) -> Self {
        Self {
            key: ColumnKey::from(key),
            title: title.to_string(),
        }
    }
}

/// Kanban board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Lanes in display order
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnConfig>,
    /// Delay between a drop and the drag state clearing, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("todo", "To do"),
        ColumnConfig::new("doing", "In progress"),
        ColumnConfig::new("done", "Done"),
    ]
}

const fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl BoardConfig {
    /// Settle delay as a [`Duration`].
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Returns true if `key` names a configured lane.
    #[must_use]
    pub fn has_column(&self, key: &ColumnKey) -> bool {
        self.columns.iter().any(|column| &column.key == key)
    }

    /// Comma-separated list of lane keys, for messages.
    #[must_use]
    pub fn column_keys(&self) -> String {
        self.columns
            .iter()
            .map(|column| column.key.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Whether preference changes are written back
    #[serde(default = "default_sync_enabled")]
    pub sync_enabled: bool,
    /// Last saved preferences, resolved leniently when read
    #[serde(default)]
    pub preferences: Option<StoredPreferences>,
}

const fn default_sync_enabled() -> bool {
    true
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            sync_enabled: default_sync_enabled(),
            preferences: None,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/SmartPlanner/config.toml`
/// - macOS: `~/Library/Application Support/SmartPlanner/config.toml`
/// - Windows: `%APPDATA%\SmartPlanner\config.toml`
///
/// `SMARTPLANNER_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - at least one column, keys non-empty and unique
/// - `settle_delay_ms` at most 10 000
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Kanban board settings
    #[serde(default)]
    pub board: BoardConfig,
    /// Theme settings
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Uses `SMARTPLANNER_CONFIG_DIR` when set, otherwise the platform
    /// config directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.board.columns.is_empty() {
            anyhow::bail!("Board must define at least one column");
        }

        let mut seen = HashSet::new();
        for column in &self.board.columns {
            if column.key.as_str().trim().is_empty() {
                anyhow::bail!("Column keys cannot be empty (title: '{}')", column.title);
            }
            if !seen.insert(column.key.as_str()) {
                anyhow::bail!("Duplicate column key: {}", column.key);
            }
        }

        if self.board.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            anyhow::bail!(
                "settle_delay_ms must be at most {} (got {})",
                MAX_SETTLE_DELAY_MS,
                self.board.settle_delay_ms
            );
        }

        Ok(())
    }
}

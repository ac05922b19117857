//! Application configuration
//!
//! Read from `config.toml` in the platform config directory (or a path given
//! on the command line). Every key is optional.

use crate::models::history::DEFAULT_DISPLAY_LIMIT;
use crate::models::storage::write_atomic;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub history_display_limit: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            data_dir: None,
            history_display_limit: DEFAULT_DISPLAY_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("phonetrack").join("config.toml"))
    }

    /// Missing file means defaults; a file that exists must parse
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        if config.history_display_limit == 0 {
            config.history_display_limit = DEFAULT_DISPLAY_LIMIT;
        }
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_atomic(path, content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_use_defaults_for_missing_keys() {
        let config = AppConfig::parse("theme = \"light\"").expect("parse");
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.history_display_limit, 10);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_should_reject_unknown_themes() {
        assert!(AppConfig::parse("theme = \"neon\"").is_err());
    }

    #[test]
    fn test_should_replace_a_zero_display_limit() {
        let config = AppConfig::parse("history_display_limit = 0").expect("parse");
        assert_eq!(config.history_display_limit, 10);
    }

    #[test]
    fn test_should_return_defaults_when_the_file_is_missing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load(&tmp.path().join("config.toml")).expect("load");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_should_persist_a_toggled_theme() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.theme = config.theme.toggled();
        config.save(&path).expect("save");

        assert_eq!(AppConfig::load(&path).expect("load").theme, Theme::Light);
    }
}

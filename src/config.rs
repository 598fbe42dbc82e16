//! Configuration file handling
//!
//! Settings live in `<config_dir>/loopviz/config.toml`. A missing file means
//! defaults; missing keys fall back to their defaults and unknown keys are
//! ignored, so old files keep loading as new settings appear.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::clock::clamp_speed;
use crate::tui::theme::Theme;

/// Directory name under the platform config and data directories
const APP_DIR: &str = "loopviz";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Playback speed multiplier, clamped to 0.1..=16
    pub speed: f64,
    /// Scenario selected when `play` is given none
    pub default_scenario: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            default_scenario: "timeout".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// One of `default`, `classic`, `ocean`
    pub theme: String,
    /// Redraw interval of the board
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            tick_ms: 33,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when neither `RUST_LOG` nor `--verbose` is given
    pub level: String,
    /// Write a log file while the board owns the terminal
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: true,
        }
    }
}

impl Config {
    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to `path`, creating the directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// `<config_dir>/loopviz/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join(APP_DIR).join("config.toml"))
    }

    /// Directory for the log file.
    pub fn data_dir() -> Result<PathBuf> {
        let dir = dirs::data_local_dir().context("Could not determine data directory")?;
        Ok(dir.join(APP_DIR))
    }

    pub fn speed(&self) -> f64 {
        clamp_speed(self.playback.speed)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms.max(1))
    }

    /// The configured theme. Unknown names fall back to the default.
    pub fn theme(&self) -> Theme {
        Theme::from_name(&self.ui.theme).unwrap_or_else(|| {
            warn!(theme = %self.ui.theme, known = ?Theme::NAMES, "unknown theme, using default");
            Theme::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.playback.speed, 1.0);
        assert_eq!(config.playback.default_scenario, "timeout");
        assert_eq!(config.ui.tick_ms, 33);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml("[playback]\nspeed = 2.0\n").unwrap();
        assert_eq!(config.playback.speed, 2.0);
        assert_eq!(config.playback.default_scenario, "timeout");
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = Config::from_toml("[ui]\ntheme = \"ocean\"\nsparkles = true\n").unwrap();
        assert_eq!(config.ui.theme, "ocean");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("[playback\n").is_err());
        assert!(Config::from_toml("[playback]\nspeed = \"fast\"\n").is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.playback.default_scenario = "worker".to_string();
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn speed_is_clamped() {
        let config = Config::from_toml("[playback]\nspeed = 99.0\n").unwrap();
        assert_eq!(config.speed(), 16.0);
    }

    #[test]
    fn timing_windows_are_not_configurable() {
        let config =
            Config::from_toml("[playback]\nstep_delay_ms = 1\ntransfer_ms = 1\n").unwrap();
        assert_eq!(config.playback, PlaybackConfig::default());
        let toml = config.to_toml().unwrap();
        assert!(!toml.contains("step_delay_ms"));
        assert!(!toml.contains("transfer_ms"));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config::from_toml("[ui]\ntheme = \"neon\"\n").unwrap();
        assert_eq!(config.theme(), Theme::default());
    }
}

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::{
    DEFAULT_COUNTER_BASE_URL, DEFAULT_COUNTER_TIMEOUT_SECONDS, DEFAULT_SOURCE,
    DEFAULT_VOLUME, DEFAULT_WATCH_THRESHOLD,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub counter: CounterConfig,

    #[serde(default)]
    pub player: PlayerOptions,

    #[serde(default)]
    pub tracking: TrackingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CounterConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Feature set for a player instance. Two variants of the same widget used to
/// exist, differing only in these switches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerOptions {
    #[serde(default = "default_source")]
    pub default_source: String,

    #[serde(default)]
    pub show_stop_button: bool,

    #[serde(default)]
    pub show_loop_toggle: bool,

    #[serde(default)]
    pub show_mute_toggle: bool,

    #[serde(default)]
    pub verbose_logging: bool,

    /// Whether the embedded player draws its own native controls
    #[serde(default)]
    pub controls_visible: bool,

    #[serde(default)]
    pub light_mode: bool,

    #[serde(default = "default_true")]
    pub autoplay: bool,

    #[serde(default = "default_volume")]
    pub initial_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingConfig {
    #[serde(default = "default_threshold")]
    pub watch_threshold: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config = Self::from_toml_str(&contents)?;
        info!("Config loaded successfully");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.counter.base_url)
            .with_context(|| format!("Invalid counter base URL: {}", self.counter.base_url))?;

        let threshold = self.tracking.watch_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            bail!("watch_threshold must be between 0 and 1, got {}", threshold);
        }

        if !(0.0..=1.0).contains(&self.player.initial_volume) {
            bail!(
                "initial_volume must be between 0 and 1, got {}",
                self.player.initial_volume
            );
        }

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("ledge").join("config.toml"))
    }
}

impl CounterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            counter: CounterConfig::default(),
            player: PlayerOptions::default(),
            tracking: TrackingConfig::default(),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            default_source: default_source(),
            show_stop_button: false,
            show_loop_toggle: false,
            show_mute_toggle: false,
            verbose_logging: false,
            controls_visible: false,
            light_mode: false,
            autoplay: default_true(),
            initial_volume: default_volume(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            watch_threshold: default_threshold(),
        }
    }
}

// Default value functions
fn default_base_url() -> String { DEFAULT_COUNTER_BASE_URL.to_string() }
fn default_timeout() -> u64 { DEFAULT_COUNTER_TIMEOUT_SECONDS }
fn default_source() -> String { DEFAULT_SOURCE.to_string() }
fn default_true() -> bool { true }
fn default_volume() -> f64 { DEFAULT_VOLUME }
fn default_threshold() -> f64 { DEFAULT_WATCH_THRESHOLD }

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.counter.base_url, "http://localhost:8080");
        assert_eq!(config.tracking.watch_threshold, 0.6);
        assert_eq!(config.player.initial_volume, 0.8);
        assert!(config.player.autoplay);
        assert!(!config.player.show_stop_button);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [player]
            show_stop_button = true
            show_loop_toggle = true
            show_mute_toggle = true
            verbose_logging = true
            default_source = "https://example.com/clip.mp4"

            [counter]
            base_url = "http://counter.internal:9000"
            "#,
        )
        .unwrap();

        assert!(config.player.show_stop_button);
        assert!(config.player.verbose_logging);
        assert_eq!(config.player.default_source, "https://example.com/clip.mp4");
        assert_eq!(config.counter.base_url, "http://counter.internal:9000");
        assert_eq!(config.counter.timeout_seconds, 30);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Config::from_toml_str("[counter]\nbase_url = \"not a url\"").is_err());
        assert!(Config::from_toml_str("[tracking]\nwatch_threshold = 1.5").is_err());
        assert!(Config::from_toml_str("[tracking]\nwatch_threshold = 0.0").is_err());
        assert!(Config::from_toml_str("[player]\ninitial_volume = 2.0").is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.player.show_mute_toggle = true;
        config.counter.timeout_seconds = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.counter.timeout(), Duration::from_secs(5));
    }
}

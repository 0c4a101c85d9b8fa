use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,

    #[serde(default = "default_volume")]
    pub default_volume: f64,

    #[serde(default = "default_controls_hide_delay")]
    pub controls_hide_delay_ms: u64,

    #[serde(default = "default_double_tap_min")]
    pub double_tap_min_ms: u64,

    #[serde(default = "default_double_tap_max")]
    pub double_tap_max_ms: u64,

    #[serde(default = "default_overlay_switch_delay")]
    pub overlay_switch_delay_ms: u64,

    #[serde(default = "default_orientation_settle")]
    pub orientation_settle_ms: u64,

    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_url")]
    pub base_url: String,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    #[serde(default = "default_object_prefix")]
    pub object_prefix: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Confirm stored objects exist with a HEAD request before handing out their URL.
    #[serde(default)]
    pub verify_objects: bool,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
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
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        info!("Config loaded successfully");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("cinema-player").join("config.toml"))
    }
}

impl PlayerConfig {
    pub fn controls_hide_delay(&self) -> Duration {
        Duration::from_millis(self.controls_hide_delay_ms)
    }

    pub fn double_tap_window(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.double_tap_min_ms),
            Duration::from_millis(self.double_tap_max_ms),
        )
    }

    pub fn overlay_switch_delay(&self) -> Duration {
        Duration::from_millis(self.overlay_switch_delay_ms)
    }

    pub fn orientation_settle(&self) -> Duration {
        Duration::from_millis(self.orientation_settle_ms)
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            skip_seconds: default_skip_seconds(),
            default_volume: default_volume(),
            controls_hide_delay_ms: default_controls_hide_delay(),
            double_tap_min_ms: default_double_tap_min(),
            double_tap_max_ms: default_double_tap_max(),
            overlay_switch_delay_ms: default_overlay_switch_delay(),
            orientation_settle_ms: default_orientation_settle(),
            mobile_breakpoint_px: default_mobile_breakpoint(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: default_storage_url(),
            bucket: default_bucket(),
            object_prefix: default_object_prefix(),
            api_key: None,
            verify_objects: false,
            timeout_secs: default_timeout(),
        }
    }
}

// Default value functions
fn default_skip_seconds() -> f64 { constants::SKIP_SECONDS }
fn default_volume() -> f64 { constants::DEFAULT_VOLUME }
fn default_controls_hide_delay() -> u64 { constants::CONTROLS_HIDE_DELAY_MS }
fn default_double_tap_min() -> u64 { constants::DOUBLE_TAP_MIN_MS }
fn default_double_tap_max() -> u64 { constants::DOUBLE_TAP_MAX_MS }
fn default_overlay_switch_delay() -> u64 { constants::OVERLAY_SWITCH_DELAY_MS }
fn default_orientation_settle() -> u64 { constants::ORIENTATION_SETTLE_MS }
fn default_mobile_breakpoint() -> f64 { constants::MOBILE_BREAKPOINT_PX }
fn default_storage_url() -> String { "http://localhost:54321".to_string() }
fn default_bucket() -> String { constants::STORAGE_BUCKET.to_string() }
fn default_object_prefix() -> String { constants::STORAGE_OBJECT_PREFIX.to_string() }
fn default_timeout() -> u64 { constants::STORAGE_TIMEOUT_SECS }

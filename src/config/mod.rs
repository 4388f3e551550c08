// SPDX-License-Identifier: MPL-2.0
//! This module handles the notification center's configuration, including
//! loading and saving it to a `settings.toml` file.
//!
//! The running center never snapshots its configuration: it holds a
//! [`SharedConfig`] and reads the current values each time it needs one, so
//! the embedding application may change any knob at any moment.
//!
//! # Examples
//!
//! ```no_run
//! use humane::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.wait_for_activity = true;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert!(loaded_config.wait_for_activity);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

pub use defaults::{
    DEFAULT_DWELL_TIMEOUT_MS, DEFAULT_FADE_INTERVAL_MS, DEFAULT_FADE_STEP,
    DEFAULT_SETTLE_DELAY_MS,
};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Humane";

/// Which animation strategy to use once a surface is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    /// Probe the surface for native transition support.
    #[default]
    Auto,
    /// Always delegate to the surface's own transitions.
    Native,
    /// Always step opacity manually.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum time a notice stays visible, in milliseconds.
    pub dwell_timeout_ms: u64,
    /// After the dwell, keep the notice up until the user does something.
    pub wait_for_activity: bool,
    /// Let a new notice interrupt the one currently on screen.
    pub force_restart_on_busy: bool,
    /// Pause between an exit animation finishing and the next notice.
    pub settle_delay_ms: u64,
    /// Opacity increment per manual animation step.
    pub fade_step: f32,
    /// Period between manual animation steps, in milliseconds.
    pub fade_interval_ms: u64,
    pub animation: AnimationMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dwell_timeout_ms: DEFAULT_DWELL_TIMEOUT_MS,
            wait_for_activity: false,
            force_restart_on_busy: false,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            fade_step: DEFAULT_FADE_STEP,
            fade_interval_ms: DEFAULT_FADE_INTERVAL_MS,
            animation: AnimationMode::Auto,
        }
    }
}

impl Config {
    #[must_use]
    pub fn dwell_timeout(&self) -> Duration {
        Duration::from_millis(self.dwell_timeout_ms)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Opacity step clamped to the accepted range.
    ///
    /// A non-finite value falls back to the default.
    #[must_use]
    pub fn fade_step(&self) -> f32 {
        if self.fade_step.is_finite() {
            self.fade_step
                .clamp(defaults::MIN_FADE_STEP, defaults::MAX_FADE_STEP)
        } else {
            DEFAULT_FADE_STEP
        }
    }

    #[must_use]
    pub fn fade_interval(&self) -> Duration {
        Duration::from_millis(self.fade_interval_ms.max(defaults::MIN_FADE_INTERVAL_MS))
    }
}

/// Cheaply clonable handle to a configuration that can change at any time.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<Config>>,
}

impl SharedConfig {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Returns the current values.
    #[must_use]
    pub fn get(&self) -> Config {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the whole configuration.
    pub fn set(&self, config: Config) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Applies an in-place change.
    ///
    /// ```
    /// use humane::config::SharedConfig;
    ///
    /// let config = SharedConfig::default();
    /// config.update(|c| c.dwell_timeout_ms = 4000);
    /// assert_eq!(config.get().dwell_timeout_ms, 4000);
    /// ```
    pub fn update(&self, f: impl FnOnce(&mut Config)) {
        f(&mut self.inner.write().unwrap_or_else(PoisonError::into_inner));
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_knobs() {
        let config = Config {
            dwell_timeout_ms: 1200,
            wait_for_activity: true,
            force_restart_on_busy: true,
            animation: AnimationMode::Manual,
            ..Config::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_path_fills_missing_fields_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "wait_for_activity = true\nanimation = \"native\"\n")
            .expect("failed to write partial toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.wait_for_activity);
        assert_eq!(loaded.animation, AnimationMode::Native);
        assert_eq!(loaded.dwell_timeout_ms, DEFAULT_DWELL_TIMEOUT_MS);
        assert_eq!(loaded.settle_delay_ms, DEFAULT_SETTLE_DELAY_MS);
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = Config::default();
        assert_eq!(config.dwell_timeout(), Duration::from_millis(2500));
        assert_eq!(config.settle_delay(), Duration::from_millis(500));
        assert!(!config.wait_for_activity);
        assert!(!config.force_restart_on_busy);
        assert_eq!(config.animation, AnimationMode::Auto);
    }

    #[test]
    fn fade_values_are_clamped() {
        let config = Config {
            fade_step: 7.0,
            fade_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.fade_step(), defaults::MAX_FADE_STEP);
        assert_eq!(config.fade_interval(), Duration::from_millis(1));

        let config = Config {
            fade_step: f32::NAN,
            ..Config::default()
        };
        assert_eq!(config.fade_step(), DEFAULT_FADE_STEP);
    }

    #[test]
    fn shared_config_changes_are_visible_to_clones() {
        let shared = SharedConfig::default();
        let other = shared.clone();

        shared.update(|c| c.force_restart_on_busy = true);
        assert!(other.get().force_restart_on_busy);

        other.set(Config::default());
        assert!(!shared.get().force_restart_on_busy);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration, including loading and saving
//! tuning values to a `settings.toml` file.
//!
//! Every field has a default, so partial files are accepted. Values are not
//! clamped here; [`PlaybackOptions`](crate::playback::PlaybackOptions) clamps
//! them through the domain newtypes when the session is built.
//!
//! # Examples
//!
//! ```no_run
//! use playsync::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.playback.preferred_forward_buffer_secs = 5.0;
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
//! assert_eq!(loaded_config.playback.preferred_forward_buffer_secs, 5.0);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::EventCapacity;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Playsync";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// `[playback]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub preferred_forward_buffer_secs: f64,
    pub max_buffer_secs: f64,
    /// Start playback as soon as any stream is ready after open or seek.
    pub second_open: bool,
    pub sync_decode_audio: bool,
    pub sync_decode_video: bool,
    pub video_delay_secs: f64,
    pub output_latency_secs: f64,
    pub video_adaptable: bool,
    /// Decode and present audio only; also turns bitrate adaptation off.
    pub video_disabled: bool,
    pub is_live: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            preferred_forward_buffer_secs: DEFAULT_FORWARD_BUFFER_SECS,
            max_buffer_secs: DEFAULT_MAX_BUFFER_SECS,
            second_open: false,
            sync_decode_audio: false,
            sync_decode_video: false,
            video_delay_secs: DEFAULT_VIDEO_DELAY_SECS,
            output_latency_secs: DEFAULT_OUTPUT_LATENCY_SECS,
            video_adaptable: true,
            video_disabled: false,
            is_live: false,
        }
    }
}

/// `[diagnostics]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub buffer_capacity: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl From<&DiagnosticsConfig> for EventCapacity {
    /// Out-of-range capacities are clamped to the supported range.
    fn from(config: &DiagnosticsConfig) -> Self {
        EventCapacity::new(config.buffer_capacity)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the platform config directory.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Saves the configuration to the platform config directory.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a settings file. Unparseable content falls back to the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

/// Writes a settings file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/runlens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/runlens/` (~/.config/runlens/)
//! - State/Logs: `$XDG_STATE_HOME/runlens/` (~/.local/state/runlens/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Synthetic data seeding
    #[serde(default)]
    pub synthetic: SyntheticConfig,

    /// Simulated chat playground
    #[serde(default)]
    pub chat: ChatConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Synthetic run seeding configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SyntheticConfig {
    /// Number of runs generated on first load of an empty store
    #[serde(default = "default_synthetic_count")]
    pub count: usize,

    /// Fixed RNG seed for reproducible synthetic data (entropy if unset)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            count: default_synthetic_count(),
            seed: None,
        }
    }
}

fn default_synthetic_count() -> usize {
    15
}

/// Simulated chat configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Name reported for the simulated model
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Artificial round-trip delay before the canned reply, in milliseconds
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_chat_model(),
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo-sim".to_string()
}

fn default_reply_delay_ms() -> u64 {
    800
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/runlens/config.toml` (~/.config/runlens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("runlens").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/runlens/` (~/.local/state/runlens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("runlens")
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("runlens.log")
    }
}

//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Pomodoro length
//! - Breathing phase dwell times
//! - Completion notification preferences
//! - Quote endpoint and rotation period
//!
//! Configuration is stored at `~/.config/zenflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{PhaseDwell, DEFAULT_DWELL_MS, DEFAULT_PHASE_TICK_MS};

pub const DEFAULT_QUOTE_ENDPOINT: &str = "https://api.quotable.io/random?tags=wisdom|inspire";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_dwell_ms")]
    pub inhale_ms: u64,
    #[serde(default = "default_dwell_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_dwell_ms")]
    pub exhale_ms: u64,
    /// Resolution of the tick that checks for phase changes.
    #[serde(default = "default_phase_tick_ms")]
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    #[serde(default = "default_quote_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_rotation_ms")]
    pub rotation_ms: u64,
    /// Never hit the network; use the local list only.
    #[serde(default)]
    pub offline: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/zenflow/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
}

fn default_focus_minutes() -> u64 {
    25
}
fn default_dwell_ms() -> u64 {
    DEFAULT_DWELL_MS
}
fn default_phase_tick_ms() -> u64 {
    DEFAULT_PHASE_TICK_MS
}
fn default_true() -> bool {
    true
}
fn default_quote_endpoint() -> String {
    DEFAULT_QUOTE_ENDPOINT.into()
}
fn default_rotation_ms() -> u64 {
    120_000
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            inhale_ms: DEFAULT_DWELL_MS,
            hold_ms: DEFAULT_DWELL_MS,
            exhale_ms: DEFAULT_DWELL_MS,
            tick_ms: DEFAULT_PHASE_TICK_MS,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
        }
    }
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_quote_endpoint(),
            rotation_ms: default_rotation_ms(),
            offline: false,
        }
    }
}

impl TimerConfig {
    /// Countdown length in seconds, never below one.
    pub fn duration_secs(&self) -> u64 {
        self.focus_minutes.saturating_mul(60).max(1)
    }
}

impl BreathingConfig {
    pub fn dwell(&self) -> PhaseDwell {
        PhaseDwell {
            inhale_ms: self.inhale_ms,
            hold_ms: self.hold_ms,
            exhale_ms: self.exhale_ms,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// `<data_dir>/config.toml`
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key in memory. Callers persist with
    /// [`Config::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse as
    /// the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default timeline granularity
//! - Time zone used for bucket boundaries
//! - Text chart column widths
//!
//! Configuration is stored at `~/.config/planline/config.toml`.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::timeline::Granularity;

/// Timeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub default_granularity: Granularity,
    /// `local`, `utc`, or a fixed offset such as `+05:30`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Text chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_label_width")]
    pub label_width: u32,
    #[serde(default = "default_unit_width_day")]
    pub unit_width_day: u32,
    #[serde(default = "default_unit_width_week")]
    pub unit_width_week: u32,
    #[serde(default = "default_unit_width_month")]
    pub unit_width_month: u32,
    #[serde(default = "default_true")]
    pub show_today: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/planline/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Time zone selection resolved from [`TimelineConfig::timezone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Local,
    Utc,
    Fixed(FixedOffset),
}

// Default functions
fn default_timezone() -> String {
    "local".into()
}
fn default_label_width() -> u32 {
    24
}
fn default_unit_width_day() -> u32 {
    4
}
fn default_unit_width_week() -> u32 {
    8
}
fn default_unit_width_month() -> u32 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            default_granularity: Granularity::default(),
            timezone: default_timezone(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            label_width: default_label_width(),
            unit_width_day: default_unit_width_day(),
            unit_width_week: default_unit_width_week(),
            unit_width_month: default_unit_width_month(),
            show_today: true,
        }
    }
}

impl ChartConfig {
    /// Character width of one bucket column.
    pub fn unit_width(&self, granularity: Granularity) -> u32 {
        match granularity {
            Granularity::Day => self.unit_width_day,
            Granularity::Week => self.unit_width_week,
            Granularity::Month => self.unit_width_month,
        }
    }
}

impl Zone {
    /// Parse `local`, `utc`/`z`, or an offset in `+HH:MM` / `-HHMM` form.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for anything else.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::Utc),
            _ => {}
        }

        trimmed
            .parse::<FixedOffset>()
            .map(Self::Fixed)
            .map_err(|e| ConfigError::InvalidValue {
                key: "timeline.timezone".into(),
                message: format!("'{value}' is not local, utc or a +HH:MM offset: {e}"),
            })
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
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) => return Err(unknown()),
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.zone()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default configuration");
            Self::default()
        })
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

    /// Set a config value by dot-separated key, in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.zone()?;
        *self = updated;
        Ok(())
    }

    /// Resolve the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if `timeline.timezone` is not recognized.
    pub fn zone(&self) -> Result<Zone, ConfigError> {
        Zone::parse(&self.timeline.timezone)
    }
}

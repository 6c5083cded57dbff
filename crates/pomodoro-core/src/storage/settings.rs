//! TOML-based user settings.
//!
//! Holds the phase lengths and notification preference. Stored at
//! `~/.config/pomodoro/settings.toml` unless POMODORO_SETTINGS points
//! elsewhere.
//!
//! Numbers are kept signed and unvalidated; they go through [`RawFields`]
//! when a phase begins, so a bad value falls back to its default there
//! instead of failing the load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::settings_path;
use crate::error::{Result, SettingsError};
use crate::timer::{
    ConfigProvider, PhaseConfig, RawFields, DEFAULT_BREAK_MINUTES, DEFAULT_LONG_BREAK_INTERVAL,
    DEFAULT_LONG_BREAK_MINUTES, DEFAULT_WORK_MINUTES,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationSettings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: i64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: i64,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub durations: DurationSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

fn default_work_minutes() -> i64 {
    DEFAULT_WORK_MINUTES as i64
}
fn default_break_minutes() -> i64 {
    DEFAULT_BREAK_MINUTES as i64
}
fn default_long_break_minutes() -> i64 {
    DEFAULT_LONG_BREAK_MINUTES as i64
}
fn default_long_break_interval() -> i64 {
    DEFAULT_LONG_BREAK_INTERVAL as i64
}
fn default_true() -> bool {
    true
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_interval: default_long_break_interval(),
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let settings = toml::from_str(&content)
                    .map_err(|e| SettingsError::ParseFailed(e.to_string()))?;
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(SettingsError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| SettingsError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from the default location, writing defaults there on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// defaults cannot be written.
    pub fn load() -> Result<Self> {
        let path = settings_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let settings = Self::default();
            settings.save_to(&path)?;
            Ok(settings)
        }
    }

    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&settings_path()?)
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default settings");
            Self::default()
        })
    }

    /// The duration fields as a user would have typed them.
    pub fn raw_fields(&self) -> RawFields {
        let d = &self.durations;
        RawFields::new(
            d.work_minutes.to_string(),
            d.break_minutes.to_string(),
            d.long_break_minutes.to_string(),
            d.long_break_interval.to_string(),
        )
    }

    /// Dot-separated keys of every setting, e.g. `durations.work_minutes`.
    pub fn keys() -> Vec<String> {
        let mut keys = Vec::new();
        if let Ok(serde_json::Value::Object(sections)) = serde_json::to_value(Self::default()) {
            for (section, fields) in sections {
                if let serde_json::Value::Object(fields) = fields {
                    keys.extend(fields.keys().map(|field| format!("{section}.{field}")));
                }
            }
        }
        keys
    }

    /// Get a value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&json, |node, part| node.get(part))?;
        match value {
            serde_json::Value::Object(_) => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        let (section, field) = key
            .split_once('.')
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        let slot = json
            .get_mut(section)
            .and_then(|s| s.get_mut(field))
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;

        let invalid = |message: String| SettingsError::InvalidValue {
            key: key.to_string(),
            message,
        };
        *slot = match &*slot {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.trim().parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| invalid(e.to_string()))?
                    .into(),
            ),
            _ => return Err(SettingsError::UnknownKey(key.to_string()).into()),
        };

        *self = serde_json::from_value(json)?;
        Ok(())
    }
}

/// Re-reads the settings file every time a phase begins.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// # Errors
    ///
    /// Returns an error if the default settings path cannot be resolved.
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(settings_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> Settings {
        Settings::load_from(&self.path).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "unreadable settings, using defaults");
            Settings::default()
        })
    }
}

impl ConfigProvider for SettingsFile {
    fn phase_config(&self) -> PhaseConfig {
        self.settings().raw_fields().parse()
    }
}

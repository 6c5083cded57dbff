mod settings;

pub use settings::{DurationSettings, NotificationSettings, Settings, SettingsFile};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/pomodoro[-dev]/` based on POMODORO_ENV.
///
/// Set POMODORO_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMODORO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomodoro-dev")
    } else {
        base_dir.join("pomodoro")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Path of the settings file. POMODORO_SETTINGS overrides the data directory.
///
/// # Errors
/// Returns an error if the data directory cannot be created.
pub fn settings_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os("POMODORO_SETTINGS") {
        return Ok(PathBuf::from(path));
    }
    Ok(data_dir()?.join("settings.toml"))
}

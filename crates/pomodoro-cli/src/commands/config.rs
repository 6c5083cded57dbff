use clap::Subcommand;
use pomodoro_core::storage::settings_path;
use pomodoro_core::{Settings, SettingsError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "durations.work_minutes", "notifications.enabled")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// List all settings values
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reset settings to defaults
    Reset,
    /// Print the settings file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let settings = Settings::load()?;
            let value = settings
                .get(&key)
                .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load()?;
            settings.set(&key, &value)?;
            settings.save()?;
            tracing::info!(%key, %value, "settings updated");
            println!("ok");
        }
        ConfigAction::List { json } => {
            let settings = Settings::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                for key in Settings::keys() {
                    println!("{key} = {}", settings.get(&key).unwrap_or_default());
                }
            }
        }
        ConfigAction::Reset => {
            Settings::default().save()?;
            println!("settings reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", settings_path()?.display());
        }
    }
    Ok(())
}

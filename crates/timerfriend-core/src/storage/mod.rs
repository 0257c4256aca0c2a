mod config;

pub use config::{AnimationConfig, Config, CountdownConfig, GestureConfig, LayoutConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/timerfriend[-dev]/` based on TIMERFRIEND_ENV.
///
/// Set TIMERFRIEND_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;

    let env = std::env::var("TIMERFRIEND_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timerfriend-dev")
    } else {
        base_dir.join("timerfriend")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

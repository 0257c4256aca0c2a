pub mod config;
pub mod countdown;
pub mod simulate;

use std::path::Path;

use timerfriend_core::{Config, ConfigError};

/// Load the config from `--config` if given, else from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Print a serializable value as one JSON line on stdout.
pub fn print_json_line<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

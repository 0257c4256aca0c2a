//! Core error types for timerfriend-core.
//!
//! This module defines the error hierarchy using thiserror. None of these
//! errors is fatal to the host: gesture and tick paths degrade to no-ops,
//! only API-boundary validation and configuration I/O surface to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timerfriend-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The overlay was dismissed and accepts no further commands
    #[error("Overlay has been torn down")]
    OverlayClosed,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No home or config directory could be resolved
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Failures reported by an [`OverlayPresenter`](crate::presenter::OverlayPresenter).
///
/// The core never propagates these; they are logged and the affected
/// surface is treated as gone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenterError {
    /// The surface was already removed from the screen
    #[error("surface is no longer attached")]
    SurfaceGone,

    /// The host refused the update for another reason
    #[error("presenter rejected update: {0}")]
    Rejected(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

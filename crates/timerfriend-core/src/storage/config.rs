//! TOML-based application configuration.
//!
//! Stores tunables for:
//! - Gesture thresholds (drag threshold, fade distance, density, hit test)
//! - Dismiss animation timing
//! - Countdown cadence and default duration
//! - Screen layout used by headless hosts
//!
//! Configuration is stored at `~/.config/timerfriend/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::geometry::Position;
use crate::gesture::{IntersectionMode, DEFAULT_DISMISS_DURATION_MS};
use crate::presenter::ScreenLayout;
use crate::timer::TICK_MS;

/// Gesture recognition tunables, in device-independent pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold_dp: f32,
    /// Downward travel over which the dismiss zone fades fully in.
    #[serde(default = "default_fade_distance")]
    pub fade_distance_dp: f32,
    /// Raw pixels per dp.
    #[serde(default = "default_density")]
    pub density: f32,
    #[serde(default)]
    pub intersection: IntersectionMode,
}

/// Dismiss animation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_dismiss_duration")]
    pub dismiss_duration_ms: u64,
    /// Sampling interval for hosts that step the animation themselves.
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

/// Countdown configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Real-time spacing of ticks. Each tick always removes one second.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
}

/// Where the surface starts and how big things are on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub initial_x: i32,
    #[serde(default = "default_initial_y")]
    pub initial_y: i32,
    #[serde(default = "default_screen_width")]
    pub screen_width: i32,
    #[serde(default = "default_screen_height")]
    pub screen_height: i32,
    #[serde(default = "default_surface_size")]
    pub surface_size: i32,
    #[serde(default = "default_zone_size")]
    pub zone_size: i32,
    #[serde(default = "default_zone_bottom_margin")]
    pub zone_bottom_margin: i32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timerfriend/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

// Default functions
fn default_drag_threshold() -> f32 {
    10.0
}
fn default_fade_distance() -> f32 {
    300.0
}
fn default_density() -> f32 {
    1.0
}
fn default_dismiss_duration() -> u64 {
    DEFAULT_DISMISS_DURATION_MS
}
fn default_frame_interval() -> u64 {
    16
}
fn default_tick_interval() -> u64 {
    TICK_MS
}
fn default_minutes() -> u32 {
    5
}
fn default_initial_y() -> i32 {
    100
}
fn default_screen_width() -> i32 {
    1080
}
fn default_screen_height() -> i32 {
    1920
}
fn default_surface_size() -> i32 {
    200
}
fn default_zone_size() -> i32 {
    160
}
fn default_zone_bottom_margin() -> i32 {
    150
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold_dp: default_drag_threshold(),
            fade_distance_dp: default_fade_distance(),
            density: default_density(),
            intersection: IntersectionMode::default(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            dismiss_duration_ms: default_dismiss_duration(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            default_minutes: default_minutes(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            initial_x: 0,
            initial_y: default_initial_y(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            surface_size: default_surface_size(),
            zone_size: default_zone_size(),
            zone_bottom_margin: default_zone_bottom_margin(),
        }
    }
}

impl LayoutConfig {
    pub fn initial_position(&self) -> Position {
        Position::new(self.initial_x, self.initial_y)
    }

    pub fn screen_layout(&self) -> ScreenLayout {
        ScreenLayout {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            surface_width: self.surface_size,
            surface_height: self.surface_size,
            zone_width: self.zone_size,
            zone_height: self.zone_size,
            zone_bottom_margin: self.zone_bottom_margin,
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
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
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

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved or created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// See [`Config::save`].
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

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type or range (see [`Config::validate`]). The config is
    /// unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check the ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        positive_finite("gesture.drag_threshold_dp", g.drag_threshold_dp)?;
        positive_finite("gesture.fade_distance_dp", g.fade_distance_dp)?;
        positive_finite("gesture.density", g.density)?;

        let a = &self.animation;
        in_range(
            "animation.dismiss_duration_ms",
            a.dismiss_duration_ms,
            1,
            MAX_DISMISS_DURATION_MS,
        )?;
        in_range("animation.frame_interval_ms", a.frame_interval_ms, 1, MAX_DISMISS_DURATION_MS)?;

        let c = &self.countdown;
        at_least("countdown.tick_interval_ms", c.tick_interval_ms, 1)?;
        at_least("countdown.default_minutes", u64::from(c.default_minutes), 1)?;

        let l = &self.layout;
        in_range("layout.screen_width", l.screen_width, 1, MAX_LAYOUT_PX)?;
        in_range("layout.screen_height", l.screen_height, 1, MAX_LAYOUT_PX)?;
        in_range("layout.surface_size", l.surface_size, 1, MAX_LAYOUT_PX)?;
        in_range("layout.zone_size", l.zone_size, 1, MAX_LAYOUT_PX)?;
        in_range("layout.zone_bottom_margin", l.zone_bottom_margin, 0, MAX_LAYOUT_PX)?;
        in_range("layout.initial_x", l.initial_x, -MAX_LAYOUT_PX, MAX_LAYOUT_PX)?;
        in_range("layout.initial_y", l.initial_y, -MAX_LAYOUT_PX, MAX_LAYOUT_PX)?;
        Ok(())
    }
}

/// Upper bound for the dismiss animation, which hosts may sample frame by frame.
pub const MAX_DISMISS_DURATION_MS: u64 = 10_000;
/// Upper bound for any layout dimension or coordinate, in pixels.
pub const MAX_LAYOUT_PX: i32 = 100_000;

fn positive_finite(key: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("must be a finite number greater than 0, got {value}"),
        })
    }
}

fn at_least(key: &str, value: u64, min: u64) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("must be at least {min}, got {value}"),
        });
    }
    Ok(())
}

fn in_range<T>(key: &str, value: T, min: T, max: T) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("must be between {min} and {max}, got {value}"),
        });
    }
    Ok(())
}

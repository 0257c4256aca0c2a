//! Integration tests for loading and saving the config file.

use timerfriend_core::{Config, ConfigError, IntersectionMode};

#[test]
fn test_missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
}

#[test]
fn test_set_and_save_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = Config::load_from(&path).unwrap();
    cfg.set("gesture.intersection", "center").unwrap();
    cfg.set("layout.initial_y", "240").unwrap();
    cfg.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.gesture.intersection, IntersectionMode::Center);
    assert_eq!(reloaded.layout.initial_y, 240);
    assert_eq!(reloaded.get("layout.initial_y").as_deref(), Some("240"));
}

#[test]
fn test_corrupt_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[gesture\ndensity = ").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseFailed(_))
    ));
}

#[test]
fn test_out_of_range_file_values_are_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    for body in [
        "[gesture]\ndensity = -1.0\n",
        "[gesture]\ndrag_threshold_dp = 0.0\n",
        "[gesture]\ndrag_threshold_dp = nan\n",
        "[layout]\nzone_bottom_margin = -2147483648\n",
        "[animation]\ndismiss_duration_ms = 86400000\n",
    ] {
        std::fs::write(&path, body).unwrap();
        assert!(
            matches!(Config::load_from(&path), Err(ConfigError::InvalidValue { .. })),
            "accepted {body:?}"
        );
    }
}

#[test]
fn test_rejected_set_leaves_saved_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = Config::load_from(&path).unwrap();
    assert!(cfg.set("gesture.density", "-1").is_err());
    cfg.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.gesture.density, 1.0);
}

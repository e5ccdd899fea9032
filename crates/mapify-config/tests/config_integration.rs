// Integration tests for the config file lifecycle on a real filesystem.

use mapify_config::{AppConfig, HexColor};

#[test]
fn test_load_or_create_writes_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapify.json");

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config, AppConfig::default());
    assert!(path.exists());

    // File contents parse back to the same config
    let reloaded = AppConfig::load_or_create(&path);
    assert_eq!(reloaded, config);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("mapify.json");

    AppConfig::default().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_modified_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapify.json");

    let mut config = AppConfig::default();
    config.styles.line.base.stroke_color = HexColor::rgb(1, 2, 3);
    config.history_depth = 25;
    config.save(&path).unwrap();

    let reloaded = AppConfig::load_or_create(&path);
    assert_eq!(reloaded.styles.line.base.stroke_color, HexColor::rgb(1, 2, 3));
    assert_eq!(reloaded.history_depth, 25);
}

#[test]
fn test_broken_file_yields_defaults_and_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapify.json");
    std::fs::write(&path, "{not json at all").unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config, AppConfig::default());

    // The broken file must not be overwritten
    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "{not json at all");
}

#[test]
fn test_out_of_range_values_are_sanitized_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapify.json");
    let json = r#"{
        "map": { "center_lat": 200.0, "center_lng": 0.0, "zoom": 50 },
        "history_depth": 1
    }"#;
    std::fs::write(&path, json).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert!((config.map.center_lat - 90.0).abs() < 1e-9);
    assert_eq!(config.map.zoom, 21);
    assert_eq!(config.history_depth, 2);
}

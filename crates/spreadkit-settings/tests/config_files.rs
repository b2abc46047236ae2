//! Config file round-trip tests

use spreadkit_core::Locale;
use spreadkit_settings::{Config, ConfigError, SettingsError};
use tempfile::TempDir;

fn custom() -> Config {
    let mut config = Config::default();
    config.editor.default_locale = Locale::Zh;
    config.editor.history_limit = 20;
    config.editor.coalesce_moves = false;
    config.logging.level = "debug".into();
    config.logging.json = true;
    config
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    custom().save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), custom());
}

#[test]
fn test_toml_round_trip_creates_parent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    custom().save_to_file(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("[editor]"));
    assert!(raw.contains("default_locale = \"zh\""));
    assert_eq!(Config::load_from_file(&path).unwrap(), custom());
}

#[test]
fn test_invalid_file_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[editor]\nhistory_limit = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ValueOutOfRange { .. })
    ));
}

#[test]
fn test_invalid_config_is_not_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let mut config = Config::default();
    config.logging.level = "chatty".into();
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_missing_file_and_bad_syntax() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(matches!(
        Config::load_from_file(&missing),
        Err(SettingsError::Read { .. })
    ));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&broken),
        Err(SettingsError::Json(_))
    ));
}

#[test]
fn test_load_or_default_prefers_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    custom().save_to_file(&path).unwrap();
    assert_eq!(Config::load_or_default(Some(&path)).unwrap(), custom());
}

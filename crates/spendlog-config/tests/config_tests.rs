use spendlog_config::{Config, ConfigManager, Theme};
use tempfile::tempdir;

#[test]
fn missing_file_yields_default_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));
    let config = manager.load().expect("load");
    assert_eq!(config.theme, Theme::Light);
    assert_eq!(config.currency, "USD");
    assert!(config.data_dir.is_none());
}

#[test]
fn config_round_trips_through_disk() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut config = Config::default();
    config.theme = config.theme.toggled();
    config.currency = "EUR".into();
    config.data_dir = Some(dir.path().join("data"));
    manager.save(&config).expect("save");

    let loaded = manager.load().expect("load");
    assert_eq!(loaded.theme, Theme::Dark);
    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.data_dir, Some(dir.path().join("data")));
}

#[test]
fn unknown_theme_value_falls_back_to_light() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"theme":"solarized","currency":"USD"}"#).expect("write");

    let config = ConfigManager::new(path).load().expect("load");
    assert_eq!(config.theme, Theme::Light);
}

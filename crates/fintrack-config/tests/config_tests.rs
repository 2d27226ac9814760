use fintrack_config::{Config, ConfigError, ConfigManager};
use std::fs;
use tempfile::tempdir;

#[test]
fn default_config_has_sensible_values() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "USD");
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.default_horizon_days, 30);
    assert!(!cfg.expand_recurring);
    assert!(cfg.validate().is_ok());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.default_horizon_days = 90;
    cfg.expand_recurring = true;
    cfg.data_root = Some(dir.path().join("records"));

    manager.save(&cfg).expect("save config");
    assert!(manager.config_path().exists());
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.resolve_data_root(), dir.path().join("records"));
}

#[test]
fn partial_documents_fill_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "locale": "en-GB", "currency": "GBP" }"#).expect("write config");

    let loaded = ConfigManager::new(path).load().expect("load config");
    assert_eq!(loaded.currency, "GBP");
    assert_eq!(loaded.default_horizon_days, 30);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn invalid_horizon_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.default_horizon_days = 0;
    let err = manager.save(&cfg).expect_err("zero horizon must fail");
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn corrupt_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").expect("write config");

    let err = ConfigManager::new(path).load().expect_err("corrupt config");
    assert!(matches!(err, ConfigError::Serde(_)));
}

#[test]
fn update_applies_edits_and_rejects_invalid_ones() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let updated = manager
        .update(|cfg| cfg.default_horizon_days = 120)
        .expect("update");
    assert_eq!(updated.default_horizon_days, 120);
    assert_eq!(manager.load().expect("reload").default_horizon_days, 120);

    let err = manager
        .update(|cfg| cfg.currency = "DOLLARS".into())
        .expect_err("invalid currency");
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert_eq!(manager.load().expect("reload").currency, "USD");
    assert!(!dir.path().join("config.json.tmp").exists());
}

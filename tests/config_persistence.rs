use tempfile::TempDir;
use zepto_core::config::{ConfigManager, ProjectionConfig};
use zepto_core::errors::ZeptoError;

#[test]
fn save_then_load_restores_settings() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().join("nested"));
    let config = ProjectionConfig {
        prediction_limit: 6,
        scan_factor: 40,
        default_category: "Bills".into(),
    };

    manager.save(&config).expect("save config");
    assert!(manager.path().exists());
    assert!(!manager.path().with_extension("json.tmp").exists());

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, config);
}

#[test]
fn invalid_file_surfaces_serialization_error() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
    std::fs::write(manager.path(), "{ not json").expect("write config");

    let err = manager.load().expect_err("garbage must not parse");
    assert!(matches!(err, ZeptoError::Serde(_)), "unexpected error: {err:?}");
}

#[test]
fn saving_invalid_settings_is_refused() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
    let config = ProjectionConfig {
        scan_factor: 0,
        ..ProjectionConfig::default()
    };

    let err = manager.save(&config).expect_err("zero scan factor is invalid");
    assert!(matches!(err, ZeptoError::Validation(_)));
    assert!(!manager.path().exists());
}

/*!
 * Tests for store configuration functionality
 */

use examstore::app_config::{Config, LogLevel};
use std::path::PathBuf;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert!(config.database_path.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.database_path = Some(PathBuf::from("/data/store.db"));
    assert!(config.validate().is_ok());

    config.database_path = Some(PathBuf::new());
    assert!(config.validate().is_err());
}

/// Test loading configuration from a JSON file
#[test]
fn test_config_fromFile_withPartialJson_shouldFillDefaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{}").expect("Failed to write config");

    let config = Config::from_file(&path).expect("Failed to load config");
    assert!(config.database_path.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that the repository honours the configured database path
#[tokio::test]
async fn test_repository_fromConfig_shouldUseConfiguredPath() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("configured.db");

    let config = Config {
        database_path: Some(db_path.clone()),
        log_level: LogLevel::Info,
    };

    let repo = examstore::Repository::from_config(&config).expect("Failed to open repository");
    assert_eq!(repo.connection().path(), db_path.as_path());

    let exams = repo.list_exams().await.expect("Failed to list exams");
    assert!(exams.is_empty());
    assert!(db_path.exists());
}

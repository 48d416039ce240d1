//! Integration tests for reazo-config

use reazo_config::*;
use std::io::Write;

#[test]
fn test_load_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[forms.login.username]\nrequired = true\n\n[validation]\noccurrence_mode = \"total\""
    )
    .unwrap();

    let mut config = ConfigManager::new();
    config.load_file(file.path()).unwrap();

    assert!(config.get::<bool>("forms.login.username.required").unwrap());
    assert_eq!(config.get::<String>("validation.occurrence_mode").unwrap(), "total");
}

#[test]
fn test_unknown_extension_rejected() {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    let mut config = ConfigManager::new();
    assert!(matches!(
        config.load_file(file.path()),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_env_layer_with_prefix() {
    unsafe {
        std::env::set_var("REAZOITEST_VALIDATION__OCCURRENCE_MODE", "consecutive");
    }

    let mut config = ConfigManager::with_prefix("REAZOITEST");
    config.load_env().unwrap();
    assert_eq!(
        config.get::<String>("validation.occurrence_mode").unwrap(),
        "consecutive"
    );

    unsafe {
        std::env::remove_var("REAZOITEST_VALIDATION__OCCURRENCE_MODE");
    }
}

#[test]
fn test_env_loader_reads_variable() {
    unsafe {
        std::env::set_var("REAZOITEST2_TOKEN", "abc");
    }

    let loader = EnvLoader::with_prefix("REAZOITEST2");
    assert_eq!(loader.load_var("token").unwrap(), "abc");

    unsafe {
        std::env::remove_var("REAZOITEST2_TOKEN");
    }
}

#[test]
fn test_load_dotenv_from_path() {
    let mut file = tempfile::Builder::new().suffix(".env").tempfile().unwrap();
    writeln!(
        file,
        "# account screens\nREAZODOTENV_VALIDATION__OCCURRENCE_MODE=consecutive\nREAZODOTENV_APP__NAME=\"reazo demo\""
    )
    .unwrap();

    let mut config = ConfigManager::with_prefix("REAZODOTENV");
    config.load_dotenv(Some(file.path())).unwrap();

    assert_eq!(
        config.get::<String>("validation.occurrence_mode").unwrap(),
        "consecutive"
    );
    assert_eq!(config.get::<String>("app.name").unwrap(), "reazo demo");

    unsafe {
        std::env::remove_var("REAZODOTENV_VALIDATION__OCCURRENCE_MODE");
        std::env::remove_var("REAZODOTENV_APP__NAME");
    }
}

#[test]
fn test_load_dotenv_missing_path_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ConfigManager::new();
    assert!(matches!(
        config.load_dotenv(Some(&dir.path().join("absent.env"))),
        Err(ConfigError::LoadError(_))
    ));
}

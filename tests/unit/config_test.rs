//! Unit tests for configuration module

use hookrest_gateway::config::Settings;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 4000);
    assert!(settings.server.cors);
    assert!(settings.rate_limit.enabled);
    assert_eq!(settings.rate_limit.max_requests, 100);
    assert_eq!(settings.rate_limit.window_secs, 900);
    assert_eq!(settings.routes.extensions, vec!["toml", "yaml", "yml", "json"]);
    assert_eq!(settings.bind_address(), "0.0.0.0:4000");
}

#[test]
fn test_missing_file_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let settings = Settings::load_from_path(tmp.path().join("absent.yaml")).unwrap();

    assert_eq!(settings.server.port, 4000);
    assert_eq!(settings.routes.directory, PathBuf::from("src/api"));
    assert_eq!(settings.logging.format, "json");
}

#[test]
fn test_load_yaml_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gateway.yaml");
    fs::write(
        &path,
        r#"
server:
  port: 8088
  cors: false
routes:
  directory: modules
  extensions: [toml]
rate_limit:
  max_requests: 5
  window_secs: 60
maintenance:
  enabled: true
"#,
    )
    .unwrap();

    let settings = Settings::load_from_path(&path).unwrap();

    assert_eq!(settings.server.port, 8088);
    assert!(!settings.server.cors);
    // unspecified keys keep their defaults
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.routes.directory, PathBuf::from("modules"));
    assert_eq!(settings.routes.extensions, vec!["toml"]);
    assert_eq!(settings.rate_limit.max_requests, 5);
    assert!(settings.maintenance.enabled);
}

#[test]
fn test_load_toml_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gateway.toml");
    fs::write(
        &path,
        "[api]\ncreator = \"Acme\"\n\n[logging]\nformat = \"pretty\"\n",
    )
    .unwrap();

    let settings = Settings::load_from_path(&path).unwrap();

    assert_eq!(settings.api.creator, "Acme");
    assert_eq!(settings.logging.format, "pretty");
}

#[test]
fn test_environment_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gateway.yaml");
    fs::write(&path, "maintenance:\n  message: from file\n").unwrap();

    std::env::set_var("HOOKREST__MAINTENANCE__MESSAGE", "from env");
    let settings = Settings::load_from_path(&path).unwrap();
    std::env::remove_var("HOOKREST__MAINTENANCE__MESSAGE");

    assert_eq!(settings.maintenance.message, "from env");
}

#[test]
fn test_invalid_file_values_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gateway.yaml");
    fs::write(&path, "server:\n  port: 0\n").unwrap();

    assert!(Settings::load_from_path(&path).is_err());
}

#[test]
fn test_settings_validation_invalid_port() {
    let mut settings = Settings::default();
    settings.server.port = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_validation_empty_extensions() {
    let mut settings = Settings::default();
    settings.routes.extensions.clear();

    assert!(settings.validate().is_err());
}

#[test]
fn test_rate_limit_zero_only_checked_when_enabled() {
    let mut settings = Settings::default();
    settings.rate_limit.max_requests = 0;
    assert!(settings.validate().is_err());

    settings.rate_limit.enabled = false;
    assert!(settings.validate().is_ok());
}

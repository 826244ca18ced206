//! Configuration Loading Tests
//!
//! Layering of defaults, config file and environment overrides:
//! - Missing fallback file means defaults
//! - Explicit file must exist and parse
//! - Environment wins over the file
//! - Invalid values are rejected

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use deepreason::config::{ConfigError, ServiceConfig, CONFIG_PATH_ENV};
use deepreason::reasoning::ExplanationStyle;
use tempfile::{NamedTempFile, TempDir};

// =============================================================================
// Helper Functions
// =============================================================================

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// File Layer Tests
// =============================================================================

#[test]
fn test_file_values_override_defaults() {
    let file = config_file(
        r#"{
            "api_port": 9200,
            "cors_origins": ["http://localhost:3000"],
            "default_license": {"brand_name": "Acme", "license_key": "acme-key"}
        }"#,
    );

    let config = ServiceConfig::load_with(Some(file.path()), env(&[])).unwrap();
    assert_eq!(config.api_port, 9200);
    assert_eq!(config.api_host, "0.0.0.0");
    assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
    assert_eq!(config.default_license.brand_name, "Acme");
    // Unset license fields keep their defaults
    assert_eq!(config.default_license.daily_request_limit, 1000);
}

#[test]
fn test_path_from_environment() {
    let file = config_file(r#"{"api_port": 9300}"#);
    let path = file.path().to_string_lossy().to_string();

    let config = ServiceConfig::load_with(None, env(&[(CONFIG_PATH_ENV, path.as_str())])).unwrap();
    assert_eq!(config.api_port, 9300);
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");

    let err = ServiceConfig::load_with(Some(missing.as_path()), env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_invalid_json_is_error() {
    let file = config_file("{ not json");
    let err = ServiceConfig::load_with(Some(file.path()), env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_defaults_when_nothing_configured() {
    // Fallback path is relative to the working directory and normally absent
    if Path::new("deepreason.json").exists() {
        return;
    }
    let config = ServiceConfig::load_with(None, env(&[])).unwrap();
    assert_eq!(config, ServiceConfig::default());
}

// =============================================================================
// Environment Layer Tests
// =============================================================================

#[test]
fn test_environment_overrides_file() {
    let file = config_file(r#"{"api_port": 9200, "log_level": "DEBUG"}"#);

    let config = ServiceConfig::load_with(
        Some(file.path()),
        env(&[
            ("API_PORT", "9400"),
            ("LOG_LEVEL", "ERROR"),
            ("DEFAULT_BRAND_NAME", "EnvBrand"),
            ("EXPLANATION_STYLE", "technical"),
            ("RATE_LIMIT_PER_MINUTE", "5"),
        ]),
    )
    .unwrap();

    assert_eq!(config.api_port, 9400);
    assert_eq!(config.log_level, "ERROR");
    assert_eq!(config.default_license.brand_name, "EnvBrand");
    assert_eq!(
        config.default_license.explanation_style,
        ExplanationStyle::Technical
    );
    assert_eq!(config.default_license.rate_limit_per_minute, 5);
}

#[test]
fn test_invalid_environment_values_rejected() {
    let file = config_file("{}");

    let err = ServiceConfig::load_with(Some(file.path()), env(&[("EXPLANATION_STYLE", "  ")]))
        .unwrap_err();
    assert_eq!(err.key(), Some("EXPLANATION_STYLE"));

    let err = ServiceConfig::load_with(Some(file.path()), env(&[("DAILY_REQUEST_LIMIT", "-1")]))
        .unwrap_err();
    assert_eq!(err.key(), Some("DAILY_REQUEST_LIMIT"));

    let err =
        ServiceConfig::load_with(Some(file.path()), env(&[("LOG_LEVEL", "chatty")])).unwrap_err();
    assert_eq!(err.key(), Some("log_level"));
}

#[test]
fn test_license_built_from_config() {
    let file = config_file(r#"{"default_license": {"license_key": "k-1"}}"#);
    let config = ServiceConfig::load_with(Some(file.path()), env(&[])).unwrap();

    let license = config.default_license.to_license();
    assert_eq!(license.brand_name, "Demo");
    assert_eq!(license.license_key, "k-1");
    assert_eq!(license.rate_limit_per_minute, Some(60));
}

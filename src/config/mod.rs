//! # Service Configuration
//!
//! Resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. JSON config file, if present
//! 3. Environment variables
//!
//! The file path comes from `--config`, then `DEEPREASON_CONFIG`, then
//! `deepreason.json` in the working directory. An explicitly named file must
//! exist; the fallback path is skipped when missing.

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::reasoning::{ExplanationStyle, LicenseConfig};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "DEEPREASON_CONFIG";

/// Config file used when none is named
pub const DEFAULT_CONFIG_FILE: &str = "deepreason.json";

/// License installed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLicense {
    pub brand_name: String,
    pub license_key: String,
    pub explanation_style: ExplanationStyle,
    pub daily_request_limit: u64,
    pub rate_limit_per_minute: u64,
    pub enabled_features: Vec<String>,
}

impl Default for DefaultLicense {
    fn default() -> Self {
        Self {
            brand_name: "Demo".to_string(),
            license_key: "demo-key-12345".to_string(),
            explanation_style: ExplanationStyle::Professional,
            daily_request_limit: 1000,
            rate_limit_per_minute: 60,
            enabled_features: vec![
                "object_detection".to_string(),
                "reasoning".to_string(),
                "explanations".to_string(),
            ],
        }
    }
}

impl DefaultLicense {
    /// Build the engine-side license
    pub fn to_license(&self) -> LicenseConfig {
        let mut license = LicenseConfig::new(&self.brand_name, &self.license_key)
            .with_style(self.explanation_style.clone())
            .with_features(self.enabled_features.iter().cloned());
        license.daily_request_limit = Some(self.daily_request_limit);
        license.rate_limit_per_minute = Some(self.rate_limit_per_minute);
        license
    }
}

/// Effective service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub log_level: String,
    pub api_host: String,
    pub api_port: u16,
    /// `["*"]` allows any origin
    pub cors_origins: Vec<String>,
    pub default_license: DefaultLicense,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
            cors_origins: vec!["*".to_string()],
            default_license: DefaultLicense::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from the process environment and the resolved config file
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with(explicit_path, |key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn load_with<F>(explicit_path: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (path, required) = match explicit_path {
            Some(p) => (p.to_path_buf(), true),
            None => match lookup(CONFIG_PATH_ENV) {
                Some(p) if !p.trim().is_empty() => (PathBuf::from(p), true),
                _ => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        let mut config = if required || path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = lookup("API_HOST") {
            self.api_host = v;
        }
        if let Some(v) = lookup("API_PORT") {
            self.api_port = parse_number("API_PORT", &v)?;
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            self.cors_origins = split_list(&v);
        }

        let license = &mut self.default_license;
        if let Some(v) = lookup("DEFAULT_BRAND_NAME") {
            license.brand_name = v;
        }
        if let Some(v) = lookup("DEFAULT_LICENSE_KEY") {
            license.license_key = v;
        }
        if let Some(v) = lookup("EXPLANATION_STYLE") {
            license.explanation_style = ExplanationStyle::parse(&v).ok_or_else(|| {
                ConfigError::invalid(
                    "EXPLANATION_STYLE",
                    v.as_str(),
                    "must not be empty",
                )
            })?;
        }
        if let Some(v) = lookup("DAILY_REQUEST_LIMIT") {
            license.daily_request_limit = parse_number("DAILY_REQUEST_LIMIT", &v)?;
        }
        if let Some(v) = lookup("RATE_LIMIT_PER_MINUTE") {
            license.rate_limit_per_minute = parse_number("RATE_LIMIT_PER_MINUTE", &v)?;
        }
        if let Some(v) = lookup("ENABLED_FEATURES") {
            license.enabled_features = split_list(&v);
        }
        Ok(())
    }

    fn validate(&self) -> ConfigResult<()> {
        if Severity::parse(&self.log_level).is_none() {
            return Err(ConfigError::invalid(
                "log_level",
                self.log_level.as_str(),
                "expected DEBUG, INFO, WARNING, ERROR or CRITICAL",
            ));
        }
        if self.api_host.trim().is_empty() {
            return Err(ConfigError::invalid("api_host", "", "must not be empty"));
        }
        if self.default_license.license_key.is_empty() {
            return Err(ConfigError::invalid(
                "default_license.license_key",
                "",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Minimum log severity
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }

    /// Listener settings for the HTTP host
    pub fn http(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.api_host.clone(),
            port: self.api_port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> ConfigResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, raw, "expected a non-negative integer"))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.default_license.brand_name, "Demo");
        assert_eq!(config.default_license.license_key, "demo-key-12345");
        assert_eq!(config.severity(), Severity::Info);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServiceConfig::default();
        config
            .apply_env(env(&[
                ("API_PORT", "9100"),
                ("CORS_ORIGINS", "http://a.test, http://b.test"),
                ("EXPLANATION_STYLE", "Casual"),
                ("ENABLED_FEATURES", "reasoning"),
            ]))
            .unwrap();

        assert_eq!(config.api_port, 9100);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(
            config.default_license.explanation_style,
            ExplanationStyle::Casual
        );
        assert_eq!(config.default_license.enabled_features, vec!["reasoning"]);
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut config = ServiceConfig::default();
        let err = config.apply_env(env(&[("API_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.key(), Some("API_PORT"));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let config = ServiceConfig {
            log_level: "LOUD".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_license_conversion() {
        let license = DefaultLicense::default().to_license();
        assert_eq!(license.brand_name, "Demo");
        assert_eq!(license.daily_request_limit, Some(1000));
        assert_eq!(license.rate_limit_per_minute, Some(60));
        assert_eq!(license.enabled_features.len(), 3);
        assert!(license.custom_vocabulary.is_empty());
    }

    #[test]
    fn test_http_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.http().socket_addr(), "0.0.0.0:8000");
    }
}

use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::analysis::GeminiConfig;

const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const PLACEHOLDER_API_KEY: &str = "fallback_api_key_if_not_set";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to build analysis http client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = match optional("GEMINI_API_KEY") {
            Some(key) => key,
            None => {
                warn!("GEMINI_API_KEY environment variable not set. Using a placeholder.");
                PLACEHOLDER_API_KEY.to_string()
            }
        };

        let api_base_url =
            optional("GEMINI_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidConfiguration(
                "GEMINI_API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        let data_dir = optional("STYLESCOPE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| home_dir(&optional).join(".stylescope"));

        Ok(Self {
            gemini: GeminiConfig {
                api_base_url,
                api_key,
                model: optional("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            data_dir,
        })
    }
}

fn home_dir(optional: &impl Fn(&str) -> Option<String>) -> PathBuf {
    optional("HOME")
        .or_else(|| optional("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_home_is_set() {
        let config = config_with(&[("HOME", "/home/ana")]).expect("defaults should load");
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.gemini.api_key, PLACEHOLDER_API_KEY);
        assert_eq!(config.data_dir, PathBuf::from("/home/ana/.stylescope"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_with(&[
            ("GEMINI_API_KEY", " secret "),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_API_BASE_URL", "http://127.0.0.1:9000/v1beta"),
            ("STYLESCOPE_DATA_DIR", "/var/lib/stylescope"),
        ])
        .expect("explicit config should load");
        assert_eq!(config.gemini.api_key, "secret");
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.api_base_url, "http://127.0.0.1:9000/v1beta");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/stylescope"));
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let error = config_with(&[("GEMINI_API_BASE_URL", "generativelanguage.googleapis.com")])
            .expect_err("schemeless url should fail");
        assert!(matches!(error, ConfigError::InvalidConfiguration(_)));
    }

    #[test]
    fn data_dir_falls_back_to_userprofile_then_cwd() {
        let config = config_with(&[("USERPROFILE", "C:\\Users\\ana")]).expect("config should load");
        assert_eq!(config.data_dir, PathBuf::from("C:\\Users\\ana").join(".stylescope"));

        let config = config_with(&[]).expect("config should load");
        assert_eq!(config.data_dir, PathBuf::from(".").join(".stylescope"));
    }
}

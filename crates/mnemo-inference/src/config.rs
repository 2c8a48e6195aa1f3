//! Remote extraction configuration.
//!
//! Configuration can be loaded from:
//! - a TOML file (default: ~/.config/mnemo/config.toml, `[remote]` table)
//! - environment variables (`MNEMO_*`, with `GEMINI_API_KEY` as a fallback key)
//!
//! # Example
//!
//! ```rust,no_run
//! use mnemo_inference::config::RemoteConfig;
//!
//! let config = RemoteConfig::load().expect("Failed to load config");
//! if config.is_enabled() {
//!     println!("remote model: {}", config.model);
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use mnemo_core::defaults;

use crate::retry::RetryPolicy;

pub const ENV_API_KEY: &str = "MNEMO_GEMINI_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "MNEMO_GEMINI_MODEL";
pub const ENV_BASE_URL: &str = "MNEMO_GEMINI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MNEMO_REMOTE_TIMEOUT_SECS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the remote structured-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Service root, without the `/v1beta/...` path.
    pub base_url: String,
    /// Model used for both note and image analysis.
    pub model: String,
    /// API key. Without one the remote path is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-attempt request timeout.
    pub timeout_secs: u64,
    /// Total attempts per request.
    pub max_attempts: u32,
    /// Backoff delay after the first failed attempt.
    pub base_delay_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::GEMINI_BASE_URL.to_string(),
            model: defaults::GEMINI_MODEL.to_string(),
            api_key: None,
            timeout_secs: defaults::REMOTE_TIMEOUT_SECS,
            max_attempts: defaults::REMOTE_MAX_ATTEMPTS,
            base_delay_ms: defaults::REMOTE_BASE_DELAY_MS,
        }
    }
}

impl RemoteConfig {
    /// Get the default config file path.
    ///
    /// Returns: ~/.config/mnemo/config.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("mnemo");
        path.push("config.toml");
        path
    }

    /// Load from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading remote config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            let config = Self::from_env();
            config.validate()?;
            Ok(config)
        }
    }

    /// Build from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset or unparsable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty(ENV_BASE_URL).unwrap_or(base.base_url),
            model: non_empty(ENV_MODEL).unwrap_or(base.model),
            api_key: non_empty(ENV_API_KEY).or_else(|| non_empty(ENV_API_KEY_FALLBACK)),
            timeout_secs: non_empty(ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(base.timeout_secs),
            max_attempts: base.max_attempts,
            base_delay_ms: base.base_delay_ms,
        }
    }

    /// Load from a TOML file with a `[remote]` table.
    ///
    /// `${VAR}` placeholders are replaced with environment values first.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&Self::substitute_env_vars(&content))
    }

    /// Parse TOML content with a `[remote]` table.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            remote: RemoteConfig,
        }

        let root: TomlRoot = toml::from_str(content)?;
        let mut config = root.remote;
        if config.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            config.api_key = None;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "model cannot be empty".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// True when an API key is configured.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RemoteConfig::default();
        assert_eq!(config.base_url, defaults::GEMINI_BASE_URL);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.base_delay_ms, 1000);
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = RemoteConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "key-1"),
            (ENV_MODEL, "gemini-pro"),
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_TIMEOUT_SECS, "15"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("key-1"));
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 15);
        assert!(config.is_enabled());
    }

    #[test]
    fn test_from_lookup_fallback_key_and_bad_timeout() {
        let config = RemoteConfig::from_lookup(lookup(&[
            (ENV_API_KEY, ""),
            (ENV_API_KEY_FALLBACK, "key-2"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("key-2"));
        assert_eq!(config.timeout_secs, defaults::REMOTE_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_toml_str() {
        let config = RemoteConfig::from_toml_str(
            r#"
[remote]
model = "gemini-flash-test"
api_key = "abc"
max_attempts = 5
base_delay_ms = 250
"#,
        )
        .unwrap();
        assert_eq!(config.model, "gemini-flash-test");
        assert_eq!(config.base_url, defaults::GEMINI_BASE_URL);
        assert_eq!(
            config.retry_policy(),
            RetryPolicy::new(5, Duration::from_millis(250))
        );
    }

    #[test]
    fn test_from_toml_str_missing_table_uses_defaults() {
        let config = RemoteConfig::from_toml_str("").unwrap();
        assert_eq!(config, RemoteConfig::default());
    }

    #[test]
    fn test_from_toml_str_blank_key_disables_remote() {
        let config = RemoteConfig::from_toml_str("[remote]\napi_key = \"\"\n").unwrap();
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let result = RemoteConfig::from_toml_str("[remote]\nbase_url = \"ftp://x\"\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_zero_attempts() {
        let config = RemoteConfig {
            max_attempts: 0,
            ..RemoteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution_with_value() {
        env::set_var("MNEMO_TEST_SUBSTITUTION_VAR", "test-value");
        let result = RemoteConfig::substitute_env_vars("api_key = \"${MNEMO_TEST_SUBSTITUTION_VAR}\"");
        env::remove_var("MNEMO_TEST_SUBSTITUTION_VAR");

        assert_eq!(result, "api_key = \"test-value\"");
    }

    #[test]
    fn test_env_var_substitution_missing() {
        let content = "api_key = \"${MNEMO_NONEXISTENT_TEST_VAR_12345}\"";
        assert_eq!(RemoteConfig::substitute_env_vars(content), content);
    }
}

//! Configuration
//!
//! Centralized configuration for the studio and its Gemini backend, loaded
//! with the following priority (highest first):
//!
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! The configuration file follows the XDG Base Directory specification:
//! `$XDG_CONFIG_HOME/adforge/config.toml` (typically
//! `~/.config/adforge/config.toml`). A missing file is not an error.
//!
//! # Example Configuration
//!
//! ```toml
//! model = "gemini-2.5-flash"
//! api_base_url = "https://generativelanguage.googleapis.com/v1beta"
//! request_timeout_secs = 120
//! ```
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY` (or legacy `API_KEY`): the model credential. Never
//!   read from defaults; an empty value counts as unset.
//! - `ADFORGE_MODEL`: model identifier override.
//! - `ADFORGE_API_BASE_URL`: endpoint base override.
//! - `ADFORGE_REQUEST_TIMEOUT`: HTTP client timeout in seconds.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used when nothing overrides it.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Hosted endpoint base used when nothing overrides it.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client timeout in seconds. This is a transport-layer bound; the
/// studio itself never times a request out.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the effective configuration came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from an environment variable.
    Env,
    /// Value from the TOML configuration file.
    File,
    /// Default value.
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structure
// =============================================================================

/// On-disk configuration file shape. Every key is optional; unset keys keep
/// their defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioToml {
    /// Model identifier.
    pub model: Option<String>,

    /// API credential. Usually supplied via environment instead.
    pub api_key: Option<String>,

    /// Endpoint base URL.
    pub api_base_url: Option<String>,

    /// HTTP client timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved configuration for the studio and its backend.
#[derive(Clone)]
pub struct StudioConfig {
    /// Model identifier sent with every generateContent call.
    pub model: String,

    /// API credential. `None` means generation fails with a configuration
    /// error before any request is attempted.
    pub api_key: Option<String>,

    /// Endpoint base URL (no trailing slash required).
    pub api_base_url: String,

    /// HTTP client timeout in seconds.
    pub request_timeout_secs: u64,

    /// Where the dominant values came from.
    source: ConfigSource,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            source: ConfigSource::Default,
        }
    }
}

impl std::fmt::Debug for StudioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("source", &self.source)
            .finish()
    }
}

impl StudioConfig {
    /// Defaults plus environment overrides, skipping the config file.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        apply_env_config(&mut config);
        config
    }

    /// Load configuration from the default file path, then apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(default_config_path())
    }

    /// Load configuration from a specific file path (or defaults when
    /// `None`), then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the specified file cannot be read or parsed.
    pub fn load_from_path(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ref config_path) = path {
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path).map_err(|e| {
                    ConfigError::ReadError {
                        path: config_path.clone(),
                        source: e,
                    }
                })?;
                let file: StudioToml = toml::from_str(&content)?;
                apply_toml_config(&mut config, &file);
                config.source = ConfigSource::File;
                tracing::info!(path = %config_path.display(), "Loaded configuration from file");
            } else {
                tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
            }
        }

        apply_env_config(&mut config);
        Ok(config)
    }

    /// The primary source of this configuration.
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Override the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API credential.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the endpoint base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Override the HTTP client timeout.
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// The default configuration file path:
/// `$XDG_CONFIG_HOME/adforge/config.toml` or `~/.config/adforge/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("adforge").join("config.toml"))
}

/// Apply TOML file values to the config struct.
fn apply_toml_config(config: &mut StudioConfig, file: &StudioToml) {
    if let Some(ref model) = file.model {
        config.model = model.clone();
    }
    if let Some(ref api_key) = file.api_key {
        if !api_key.trim().is_empty() {
            config.api_key = Some(api_key.clone());
        }
    }
    if let Some(ref base_url) = file.api_base_url {
        config.api_base_url = base_url.clone();
    }
    if let Some(timeout) = file.request_timeout_secs {
        config.request_timeout_secs = timeout;
    }
}

/// Apply environment variable overrides to the config.
fn apply_env_config(config: &mut StudioConfig) {
    if let Some(key) = env_non_empty("GEMINI_API_KEY").or_else(|| env_non_empty("API_KEY")) {
        config.api_key = Some(key);
        config.source = ConfigSource::Env;
    }
    if let Some(model) = env_non_empty("ADFORGE_MODEL") {
        config.model = model;
        config.source = ConfigSource::Env;
    }
    if let Some(base_url) = env_non_empty("ADFORGE_API_BASE_URL") {
        config.api_base_url = base_url;
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = env_non_empty("ADFORGE_REQUEST_TIMEOUT") {
        if let Ok(secs) = timeout.parse::<u64>() {
            config.request_timeout_secs = secs;
            config.source = ConfigSource::Env;
        }
    }
}

/// Read an environment variable, treating empty/whitespace values as unset.
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Clean up all environment variables used by config loading.
    fn clear_config_env_vars() {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("API_KEY");
        std::env::remove_var("ADFORGE_MODEL");
        std::env::remove_var("ADFORGE_API_BASE_URL");
        std::env::remove_var("ADFORGE_REQUEST_TIMEOUT");
    }

    #[test]
    fn test_default_config() {
        let config = StudioConfig::default();

        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_key, None);
        assert_eq!(
            config.api_base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.to_string_lossy().contains("adforge"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }

    #[test]
    fn test_builder_overrides() {
        let config = StudioConfig::default()
            .with_model("gemini-exp")
            .with_api_key("secret")
            .with_api_base_url("http://localhost:8080/v1beta")
            .with_request_timeout_secs(5);

        assert_eq!(config.model, "gemini-exp");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.api_base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_parse_valid_toml() {
        clear_config_env_vars();

        let toml_content = r#"
model = "custom-model"
api_base_url = "https://proxy.internal/v1beta"
request_timeout_secs = 30
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = StudioConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.model, "custom-model");
        assert_eq!(config.api_base_url, "https://proxy.internal/v1beta");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.source(), ConfigSource::File);
    }

    #[test]
    fn test_parse_partial_toml_preserves_defaults() {
        let toml_content = r#"model = "partial-model""#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = StudioConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();

        assert_eq!(config.model, "partial-model");
        assert_eq!(
            config.api_base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn test_blank_api_key_in_file_stays_unset() {
        clear_config_env_vars();

        let toml_content = r#"api_key = "  ""#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = StudioConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_missing_file_graceful() {
        clear_config_env_vars();

        let path = PathBuf::from("/nonexistent/path/config.toml");
        let config = StudioConfig::load_from_path(Some(path)).unwrap();

        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_malformed_toml_error() {
        let toml_content = r#"model = [broken"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let result = StudioConfig::load_from_path(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// Environment handling is exercised in one test function because env
    /// vars are process-global and parallel tests would race.
    #[test]
    fn test_env_overrides_and_fallback_chain() {
        clear_config_env_vars();

        std::env::set_var("GEMINI_API_KEY", "primary-key");
        std::env::set_var("ADFORGE_MODEL", "env-model");
        std::env::set_var("ADFORGE_REQUEST_TIMEOUT", "15");
        let config = StudioConfig::from_env();
        assert_eq!(config.api_key.as_deref(), Some("primary-key"));
        assert_eq!(config.model, "env-model");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.source(), ConfigSource::Env);
        clear_config_env_vars();

        // Legacy API_KEY is honored when GEMINI_API_KEY is absent.
        std::env::set_var("API_KEY", "legacy-key");
        let config = StudioConfig::from_env();
        assert_eq!(config.api_key.as_deref(), Some("legacy-key"));
        clear_config_env_vars();

        // An empty primary var falls through to the legacy one.
        std::env::set_var("GEMINI_API_KEY", "   ");
        std::env::set_var("API_KEY", "fallback-key");
        let config = StudioConfig::from_env();
        assert_eq!(config.api_key.as_deref(), Some("fallback-key"));
        clear_config_env_vars();

        // Unparseable timeout is ignored.
        std::env::set_var("ADFORGE_REQUEST_TIMEOUT", "soon");
        let config = StudioConfig::from_env();
        assert_eq!(config.request_timeout_secs, 120);
        clear_config_env_vars();
    }

    #[test]
    fn test_toml_round_trip() {
        let original = StudioToml {
            model: Some("test-model".to_string()),
            api_key: None,
            api_base_url: Some("https://proxy.internal/v1beta".to_string()),
            request_timeout_secs: Some(45),
        };

        let toml_string = toml::to_string(&original).unwrap();
        let parsed: StudioToml = toml::from_str(&toml_string).unwrap();

        assert_eq!(parsed.model, Some("test-model".to_string()));
        assert_eq!(
            parsed.api_base_url,
            Some("https://proxy.internal/v1beta".to_string())
        );
        assert_eq!(parsed.request_timeout_secs, Some(45));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = StudioConfig::default().with_api_key("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::Env), "environment");
        assert_eq!(format!("{}", ConfigSource::File), "config file");
        assert_eq!(format!("{}", ConfigSource::Default), "default");
    }
}

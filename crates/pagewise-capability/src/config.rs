//! Configuration for the capability provider

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable enabling the provider
pub const ENV_ENABLED: &str = "PAGEWISE_MISTRAL_ENABLED";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "PAGEWISE_MISTRAL_API_KEY";
/// Environment variable overriding the API root
pub const ENV_BASE_URL: &str = "PAGEWISE_MISTRAL_BASE_URL";
/// Environment variable overriding the default model
pub const ENV_MODEL: &str = "PAGEWISE_MISTRAL_MODEL";

/// Configuration for the capability provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Whether the provider may become Ready at all
    #[serde(default)]
    pub enabled: bool,

    /// Credential for the model backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API root of the model backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model for classification and extraction
    #[serde(default = "default_model")]
    pub model: String,

    /// Default model for summarization
    #[serde(default = "default_summary_model")]
    pub summary_model: String,

    /// Per-request timeout handed to the transport (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Ask the backend for a JSON object on classify/extract
    #[serde(default = "default_json_mode")]
    pub json_mode: bool,

    /// Largest document `can_process` accepts (bytes)
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
}

fn default_base_url() -> String {
    "https://api.mistral.ai".to_string()
}

fn default_model() -> String {
    "pixtral-12b-2409".to_string()
}

fn default_summary_model() -> String {
    "mistral-small-latest".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_json_mode() -> bool {
    true
}

fn default_max_file_size_bytes() -> u64 {
    100 * 1024 * 1024
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            summary_model: default_summary_model(),
            request_timeout_secs: default_request_timeout_secs(),
            json_mode: default_json_mode(),
            max_file_size_bytes: default_max_file_size_bytes(),
        }
    }
}

impl ProviderConfig {
    /// Enabled configuration with a credential, defaults elsewhere
    pub fn enabled_with_key(api_key: impl Into<String>) -> Self {
        Self {
            enabled: true,
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The credential, if one is set and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.summary_model.trim().is_empty() {
            return Err("summary_model must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_file_size_bytes == 0 {
            return Err("max_file_size_bytes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Read, parse and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents).map_err(ProviderError::Config)?;
        config.validate().map_err(ProviderError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Apply `PAGEWISE_MISTRAL_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(enabled) = lookup(ENV_ENABLED) {
            self.enabled = parse_flag(&enabled);
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.model = model;
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

//! Operation options and provider descriptors

use pagewise_domain::SummaryStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Options for [`classify`](crate::CapabilityProvider::classify)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifyOptions {
    /// Model override; defaults to the configured model
    pub model: Option<String>,

    /// System prompt override; defaults to the built-in classification prompt
    pub system_prompt: Option<String>,

    /// Sampling temperature
    pub temperature: f64,
}

impl ClassifyOptions {
    /// Use a specific model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Replace the built-in system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Options for [`extract`](crate::CapabilityProvider::extract)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractOptions {
    /// Model override; defaults to the configured model
    pub model: Option<String>,

    /// Sampling temperature
    pub temperature: f64,
}

impl ExtractOptions {
    /// Use a specific model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Default generation bound per page summary
pub const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 512;

/// Default summarization temperature
pub const DEFAULT_SUMMARY_TEMPERATURE: f64 = 0.3;

/// Options for [`summarize`](crate::CapabilityProvider::summarize)
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeOptions {
    /// Summary style
    pub style: SummaryStyle,

    /// Model override; defaults to the configured summary model
    pub model: Option<String>,

    /// Upper bound on tokens per page summary
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            style: SummaryStyle::default(),
            model: None,
            max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
            temperature: DEFAULT_SUMMARY_TEMPERATURE,
        }
    }
}

impl SummarizeOptions {
    /// Set the summary style
    pub fn with_style(mut self, style: SummaryStyle) -> Self {
        self.style = style;
        self
    }

    /// Use a specific model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the per-page token bound
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A document offered to the provider
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Path or URL
    pub url: String,

    /// Explicit format tag ("pdf", "txt", ...)
    #[serde(default)]
    pub format: Option<String>,

    /// Size in bytes, when known
    #[serde(default)]
    pub size: Option<u64>,
}

impl DocumentInfo {
    /// Describe a document by location only
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: None,
            size: None,
        }
    }

    /// Set the explicit format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the size in bytes
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Explicit format, or the lowercased extension of `url`
    pub fn resolved_format(&self) -> Option<String> {
        match &self.format {
            Some(format) => Some(format.to_lowercase()),
            None => {
                let path = self.url.split(['?', '#']).next().unwrap_or_default();
                Path::new(path)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(str::to_lowercase)
            }
        }
    }
}

/// What the provider can do, for capability discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCapabilities {
    /// Accepted document formats
    pub formats: Vec<String>,

    /// Feature flags keyed by camelCase name
    pub features: BTreeMap<String, bool>,

    /// Largest accepted document in bytes
    pub max_file_size: u64,
}

impl ProviderCapabilities {
    /// Whether a named feature is supported
    pub fn supports(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }
}

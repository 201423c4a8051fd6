//! Error types for tool handlers.

use pagewise_capability::{ProviderError, ENV_API_KEY, ENV_ENABLED};
use serde_json::{json, Value};
use thiserror::Error;

/// Tool handler error types
#[derive(Error, Debug)]
pub enum ToolError {
    /// The provider is disabled by configuration
    #[error("Mistral provider not available")]
    ProviderUnavailable,

    /// The provider is enabled but could not become Ready
    #[error("Mistral provider failed to initialize")]
    InitializationFailed,

    /// A parameter is missing or has the wrong shape after coercion
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Page text could not be produced
    #[error("Document error: {0}")]
    Document(String),

    /// The provider declined the document (format or size)
    #[error("Document cannot be processed by Mistral provider: {url}")]
    UnsupportedDocument {
        /// Requested document
        url: String,
        /// Resolved format, if any
        format: Option<String>,
    },

    /// Provider operation rejected
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ToolError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ToolError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable tag for the error envelope
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::ProviderUnavailable => "provider_unavailable",
            ToolError::InitializationFailed => "initialization_failed",
            ToolError::InvalidParameter { .. } => "invalid_parameter",
            ToolError::Document(_) => "document",
            ToolError::UnsupportedDocument { .. } => "unsupported_document",
            ToolError::Provider(_) => "provider",
        }
    }

    /// Remedy hint for configuration problems
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ToolError::ProviderUnavailable => Some(format!(
                "Enable the provider with {}=true and provide an API key",
                ENV_ENABLED
            )),
            ToolError::InitializationFailed => {
                Some(format!("Check {} is set correctly", ENV_API_KEY))
            }
            _ => None,
        }
    }

    /// JSON error envelope: `error`, `type`, and `suggestion`/`format` when known
    pub fn to_envelope(&self) -> Value {
        let mut envelope = json!({
            "error": self.to_string(),
            "type": self.kind(),
        });
        if let Some(suggestion) = self.suggestion() {
            envelope["suggestion"] = Value::String(suggestion);
        }
        if let ToolError::UnsupportedDocument { format, .. } = self {
            envelope["format"] = json!(format);
        }
        envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewise_capability::ProviderState;

    #[test]
    fn test_suggestions() {
        assert_eq!(
            ToolError::ProviderUnavailable.suggestion().as_deref(),
            Some("Enable the provider with PAGEWISE_MISTRAL_ENABLED=true and provide an API key")
        );
        assert_eq!(
            ToolError::InitializationFailed.suggestion().as_deref(),
            Some("Check PAGEWISE_MISTRAL_API_KEY is set correctly")
        );
        assert!(ToolError::Document("x".to_string()).suggestion().is_none());
    }

    #[test]
    fn test_envelope() {
        let envelope = ToolError::InitializationFailed.to_envelope();
        assert_eq!(envelope["error"], "Mistral provider failed to initialize");
        assert_eq!(envelope["type"], "initialization_failed");
        assert!(envelope["suggestion"].is_string());

        let envelope = ToolError::UnsupportedDocument {
            url: "deck.pptx".to_string(),
            format: Some("pptx".to_string()),
        }
        .to_envelope();
        assert_eq!(envelope["format"], "pptx");
        assert!(envelope.get("suggestion").is_none());
    }

    #[test]
    fn test_provider_error_is_transparent() {
        let err = ToolError::from(ProviderError::NotInitialized {
            state: ProviderState::Disposed,
        });
        assert_eq!(err.to_string(), "Provider not initialized (state: disposed)");
        assert_eq!(err.kind(), "provider");
    }
}

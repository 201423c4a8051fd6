//! Error types for the CLI application.

use pagewise_capability::ProviderError;
use pagewise_tools::ToolError;
use serde_json::{json, Value};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool invocation failed
    #[error("{0}")]
    Tool(#[from] ToolError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Config(message) => CliError::Config(message),
            other => CliError::Tool(ToolError::Provider(other)),
        }
    }
}

impl CliError {
    /// Remedy hint, when one is known
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Tool(e) => e.suggestion(),
            _ => None,
        }
    }

    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Config(_) => "config",
            CliError::Tool(e) => e.kind(),
            CliError::Io(_) => "io",
            CliError::Serialization(_) => "serialization",
            CliError::InvalidInput(_) => "invalid_input",
        }
    }

    /// JSON error envelope; tool failures keep the tool's own envelope
    pub fn to_envelope(&self) -> Value {
        match self {
            CliError::Tool(e) => e.to_envelope(),
            other => json!({
                "error": other.to_string(),
                "type": other.kind(),
            }),
        }
    }
}

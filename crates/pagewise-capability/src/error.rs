//! Error types for the capability provider

use crate::provider::ProviderState;
use thiserror::Error;

/// Ways a transport response can fail to yield usable content.
///
/// Each variant is a distinct failure mode and is logged under its own
/// [`DecodeError::kind`] tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The response carried zero choices
    #[error("Empty response from model: no choices returned")]
    EmptyChoices,

    /// The selected choice has no message content
    #[error("Empty response from model: message content is null")]
    EmptyContent,

    /// The content is empty after trimming whitespace
    #[error("Empty response from model: message content is blank")]
    BlankContent,

    /// The content is not valid JSON
    #[error("Malformed JSON in model response: {message}")]
    MalformedJson {
        /// Parser error
        message: String,
        /// Leading excerpt of the offending text (at most 500 characters)
        excerpt: String,
    },
}

impl DecodeError {
    /// Stable tag for logs and telemetry
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::EmptyChoices => "empty_choices",
            DecodeError::EmptyContent => "empty_content",
            DecodeError::BlankContent => "blank_content",
            DecodeError::MalformedJson { .. } => "malformed_json",
        }
    }
}

/// Errors a public provider operation may return
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider is not in the Ready state
    #[error("Provider not initialized (state: {state})")]
    NotInitialized {
        /// State at the time of the call
        state: ProviderState,
    },

    /// Invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

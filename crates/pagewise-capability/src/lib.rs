//! Pagewise Capability Core
//!
//! Turns free-form model replies into validated, typed results for three
//! page-level operations: classification, field extraction and
//! summarization.
//!
//! # Architecture
//!
//! ```text
//! params → coerce → prompt → ChatTransport → decode → validate → typed result
//! ```
//!
//! # Failure isolation
//!
//! The model is assumed to misbehave. A bad record is dropped without
//! touching its neighbours, a bad response degrades the operation to its
//! empty shape, and a failing page in summarization yields an error string
//! for that page only. The sole error a public operation returns is
//! [`ProviderError::NotInitialized`].
//!
//! # Example Usage
//!
//! ```
//! use pagewise_capability::{CapabilityProvider, ClassifyOptions, ProviderConfig};
//! use pagewise_domain::{LabelSet, PageSample};
//! use pagewise_llm::{LlmError, MockTransport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = MockTransport::new(
//!     r#"{"labels": [{"page": 1, "label": "balance_sheet", "confidence": 0.9}]}"#,
//! );
//!
//! let mut provider = CapabilityProvider::new(ProviderConfig::enabled_with_key("key"));
//! provider.initialize(|_, _| Ok::<_, LlmError>(transport));
//!
//! let labels = LabelSet::new(["income_statement", "balance_sheet"]);
//! let pages = vec![PageSample::new(1, "Consolidated balance sheet")];
//! let records = provider.classify(&pages, &labels, ClassifyOptions::default()).await?;
//! assert_eq!(records.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod coerce;
mod config;
mod decoder;
mod error;
mod prompt;
mod provider;
mod types;
mod validator;


pub use coerce::{coerce, coerce_param, ContainerKind};
pub use config::{ProviderConfig, ENV_API_KEY, ENV_BASE_URL, ENV_ENABLED, ENV_MODEL};
pub use decoder::{decode_json, decode_text, EXCERPT_CHARS};
pub use error::{DecodeError, ProviderError};
pub use prompt::{classification_prompt, extraction_prompt, summary_prompt};
pub use provider::{CapabilityProvider, ProviderState, PROVIDER_NAME, SUPPORTED_FORMATS};
pub use types::{
    ClassifyOptions, DocumentInfo, ExtractOptions, ProviderCapabilities, SummarizeOptions,
    DEFAULT_SUMMARY_MAX_TOKENS, DEFAULT_SUMMARY_TEMPERATURE,
};
pub use validator::{
    validate_classification, validate_classification_record, validate_extracted_field,
    validate_extraction, RejectionReason, Validation, INVALID_EXTRACTION_FORMAT,
};

//! The capability provider: classify, extract and summarize over a transport
//!
//! The provider owns an explicit lifecycle. `initialize` and `dispose` take
//! `&mut self` while the operations take `&self`, so a transition can never
//! race an in-flight call on the same provider.

use crate::config::ProviderConfig;
use crate::decoder::{decode_json, decode_text};
use crate::error::{DecodeError, ProviderError};
use crate::prompt::{classification_prompt, extraction_prompt, summary_prompt};
use crate::types::{
    ClassifyOptions, DocumentInfo, ExtractOptions, ProviderCapabilities, SummarizeOptions,
};
use crate::validator::{validate_classification, validate_extraction};
use pagewise_domain::traits::ChatTransport;
use pagewise_domain::{
    ChatOptions, ChatRequest, ClassificationRecord, ExtractionOutcome, FieldSchema, LabelSet,
    PageRecord, PageSample, ResponseFormat, SummaryRecord,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, info, warn};

/// Provider identity reported to callers
pub const PROVIDER_NAME: &str = "mistral";

/// Document formats the provider accepts
pub const SUPPORTED_FORMATS: [&str; 3] = ["pdf", "txt", "md"];

const FEATURES: [(&str, bool); 11] = [
    ("classification", true),
    ("customInstructions", true),
    ("forms", false),
    ("images", false),
    ("multiLanguage", true),
    ("ocr", false),
    ("semanticSearch", false),
    ("streaming", false),
    ("structuredExtraction", true),
    ("summarization", true),
    ("tables", false),
];

/// Observable lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderState {
    /// Not yet initialized, or initialization declined
    Uninitialized,
    /// Holding a live transport
    Ready,
    /// Transport released
    Disposed,
}

impl fmt::Display for ProviderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderState::Uninitialized => "uninitialized",
            ProviderState::Ready => "ready",
            ProviderState::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

enum Lifecycle<T> {
    Uninitialized,
    Ready(T),
    Disposed,
}

impl<T> Lifecycle<T> {
    fn state(&self) -> ProviderState {
        match self {
            Lifecycle::Uninitialized => ProviderState::Uninitialized,
            Lifecycle::Ready(_) => ProviderState::Ready,
            Lifecycle::Disposed => ProviderState::Disposed,
        }
    }
}

/// Orchestrates prompt → transport → decode → validate for each operation.
///
/// Public operations fail only with [`ProviderError::NotInitialized`].
/// Transport, decode and validation failures degrade to the operation's
/// empty shape and are logged.
pub struct CapabilityProvider<T: ChatTransport> {
    config: ProviderConfig,
    lifecycle: Lifecycle<T>,
}

impl<T: ChatTransport> CapabilityProvider<T> {
    /// Create an uninitialized provider
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Provider identity
    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    /// Active configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> ProviderState {
        self.lifecycle.state()
    }

    /// Whether operations will run
    pub fn is_ready(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ready(_))
    }

    /// Try to move to Ready.
    ///
    /// Requires `enabled` and a non-blank credential; `connect` receives the
    /// credential and configuration and builds the transport. When any of
    /// these is missing or `connect` fails, the provider is left
    /// Uninitialized. This is not an error: the returned state tells the
    /// caller what happened. Initializing a Ready provider rebuilds the
    /// transport.
    pub fn initialize<F, E>(&mut self, connect: F) -> ProviderState
    where
        F: FnOnce(&str, &ProviderConfig) -> Result<T, E>,
        E: fmt::Display,
    {
        self.lifecycle = Lifecycle::Uninitialized;

        if !self.config.enabled {
            info!("Provider '{}' is disabled", PROVIDER_NAME);
            return self.state();
        }

        let Some(credential) = self.config.credential() else {
            warn!("Provider '{}' has no API key; staying uninitialized", PROVIDER_NAME);
            return self.state();
        };

        match connect(credential, &self.config) {
            Ok(transport) => {
                self.lifecycle = Lifecycle::Ready(transport);
                info!(
                    "Provider '{}' initialized with model: {}",
                    PROVIDER_NAME, self.config.model
                );
            }
            Err(e) => {
                error!("Failed to initialize provider '{}': {}", PROVIDER_NAME, e);
            }
        }

        self.state()
    }

    /// Release the transport
    pub fn dispose(&mut self) {
        if let Lifecycle::Ready(_) = std::mem::replace(&mut self.lifecycle, Lifecycle::Disposed) {
            info!("Provider '{}' disposed", PROVIDER_NAME);
        }
    }

    /// Accepted document formats
    pub fn supported_formats(&self) -> &'static [&'static str] {
        &SUPPORTED_FORMATS
    }

    /// Feature flags and limits
    pub fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            formats: SUPPORTED_FORMATS.iter().map(|f| f.to_string()).collect(),
            features: FEATURES
                .iter()
                .map(|(name, enabled)| (name.to_string(), *enabled))
                .collect(),
            max_file_size: self.config.max_file_size_bytes,
        }
    }

    /// Whether `document` can be handled right now
    pub fn can_process(&self, document: &DocumentInfo) -> bool {
        if !self.is_ready() {
            return false;
        }

        if let Some(format) = document.resolved_format() {
            if !SUPPORTED_FORMATS.contains(&format.as_str()) {
                debug!("Unsupported document format: {}", format);
                return false;
            }
        }

        match document.size {
            Some(size) => size <= self.config.max_file_size_bytes,
            None => true,
        }
    }

    /// Classify page samples into `labels`.
    ///
    /// One transport round-trip for the whole batch. Records with unknown
    /// labels, out-of-range confidence or missing keys are dropped.
    pub async fn classify(
        &self,
        pages: &[PageSample],
        labels: &LabelSet,
        options: ClassifyOptions,
    ) -> Result<Vec<ClassificationRecord>, ProviderError> {
        let transport = self.transport()?;

        let model = options.model.unwrap_or_else(|| self.config.model.clone());
        let system_prompt = options
            .system_prompt
            .unwrap_or_else(|| classification_prompt(labels));
        let Some(payload) = to_payload(pages, "classification") else {
            return Ok(Vec::new());
        };

        info!("Classifying {} pages with model {}", pages.len(), model);

        let request = ChatRequest::new(model, system_prompt, payload, options.temperature)
            .with_options(self.structured_options());

        let response = match transport.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Page classification failed: {}", e);
                return Ok(Vec::new());
            }
        };

        match decode_json(&response) {
            Ok(result) => Ok(validate_classification(result, pages, labels)),
            Err(e) => {
                log_decode_failure("classification", &e);
                Ok(Vec::new())
            }
        }
    }

    /// Extract the fields in `schema` from full page text.
    ///
    /// One transport round-trip for the whole batch. Failures yield no
    /// fields and a single error message.
    pub async fn extract(
        &self,
        schema: &FieldSchema,
        pages: &[PageRecord],
        options: ExtractOptions,
    ) -> Result<ExtractionOutcome, ProviderError> {
        let transport = self.transport()?;

        let model = options.model.unwrap_or_else(|| self.config.model.clone());
        let Some(payload) = to_payload(pages, "extraction") else {
            return Ok(ExtractionOutcome::failed("Failed to serialize page text"));
        };

        info!(
            "Extracting {} fields from {} pages with model {}",
            schema.fields().len(),
            pages.len(),
            model
        );

        let request = ChatRequest::new(model, extraction_prompt(schema), payload, options.temperature)
            .with_options(self.structured_options());

        let response = match transport.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Field extraction failed: {}", e);
                return Ok(ExtractionOutcome::failed(e.to_string()));
            }
        };

        match decode_json(&response) {
            Ok(result) => Ok(validate_extraction(result, schema)),
            Err(e) => {
                log_decode_failure("extraction", &e);
                Ok(ExtractionOutcome::failed(e.to_string()))
            }
        }
    }

    /// Summarize each page independently.
    ///
    /// Pages are processed serially in input order, one round-trip each. A
    /// failing page gets an `"Error: ..."` summary and the loop continues.
    pub async fn summarize(
        &self,
        pages: &[PageRecord],
        options: SummarizeOptions,
    ) -> Result<Vec<SummaryRecord>, ProviderError> {
        let transport = self.transport()?;

        let model = options
            .model
            .unwrap_or_else(|| self.config.summary_model.clone());
        let system_prompt = summary_prompt(options.style);
        let chat_options = ChatOptions {
            max_tokens: Some(options.max_tokens),
            response_format: None,
        };

        info!(
            "Summarizing {} pages ({} style) with model {}",
            pages.len(),
            options.style,
            model
        );

        let mut summaries = Vec::with_capacity(pages.len());
        for page in pages {
            let request = ChatRequest::new(
                model.as_str(),
                system_prompt.as_str(),
                page.text.as_str(),
                options.temperature,
            )
            .with_options(chat_options.clone());

            let summary = match transport.send(&request).await {
                Ok(response) => match decode_text(&response) {
                    Ok(text) => text,
                    Err(e) => {
                        log_decode_failure("summarization", &e);
                        error!("Summarization failed for page {}: {}", page.page, e);
                        format!("Error: {}", e)
                    }
                },
                Err(e) => {
                    error!("Summarization failed for page {}: {}", page.page, e);
                    format!("Error: {}", e)
                }
            };

            summaries.push(SummaryRecord {
                page: page.page,
                summary,
            });
        }

        Ok(summaries)
    }

    fn transport(&self) -> Result<&T, ProviderError> {
        match &self.lifecycle {
            Lifecycle::Ready(transport) => Ok(transport),
            other => Err(ProviderError::NotInitialized {
                state: other.state(),
            }),
        }
    }

    fn structured_options(&self) -> ChatOptions {
        ChatOptions {
            max_tokens: None,
            response_format: self.config.json_mode.then_some(ResponseFormat::JsonObject),
        }
    }
}

impl<T: ChatTransport> fmt::Debug for CapabilityProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityProvider")
            .field("name", &PROVIDER_NAME)
            .field("state", &self.state())
            .field("model", &self.config.model)
            .finish()
    }
}

fn to_payload<P: Serialize>(pages: &[P], operation: &str) -> Option<String> {
    match serde_json::to_string(pages) {
        Ok(payload) => Some(payload),
        Err(e) => {
            error!("Failed to serialize {} payload: {}", operation, e);
            None
        }
    }
}

fn log_decode_failure(operation: &str, e: &DecodeError) {
    match e {
        DecodeError::MalformedJson { message, excerpt } => warn!(
            "Decode failure ({}) during {}: {}; response excerpt: {}",
            e.kind(),
            operation,
            message,
            excerpt
        ),
        _ => warn!("Decode failure ({}) during {}: {}", e.kind(), operation, e),
    }
}

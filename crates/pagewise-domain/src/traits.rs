//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the document-intelligence
//! core and its collaborators. Implementations live in other crates.

use crate::{ChatRequest, ChatResponse, PageRecord, PageSample, PageSelector};
use async_trait::async_trait;
use std::fmt::Display;
use std::path::Path;

/// Sends a prompt to the model and returns the raw response.
///
/// Implemented by the infrastructure layer (pagewise-llm). Handles are
/// already authenticated and read-only, so they are shared across
/// concurrent calls by reference. Timeouts and retries are the
/// implementation's business.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Error type for transport failures (network, auth, rate limits)
    type Error: Display + Send + Sync + 'static;

    /// Perform one round-trip
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, Self::Error>;
}

/// Produces per-page text from a document.
///
/// Implemented by text-extraction adapters (pagewise-tools).
pub trait PageTextSource {
    /// Error type for extraction failures
    type Error: Display;

    /// Full text of the selected pages, in selection order
    fn page_texts(&self, path: &Path, selector: &PageSelector) -> Result<Vec<PageRecord>, Self::Error>;

    /// Short leading samples of the selected pages, for classification
    fn page_samples(&self, path: &Path, selector: &PageSelector) -> Result<Vec<PageSample>, Self::Error> {
        Ok(self
            .page_texts(path, selector)?
            .iter()
            .map(PageSample::from_record)
            .collect())
    }
}

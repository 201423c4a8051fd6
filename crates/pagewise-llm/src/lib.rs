//! Pagewise LLM Transport Layer
//!
//! Implementations of the `ChatTransport` trait from `pagewise-domain`.
//!
//! # Transports
//!
//! - `MockTransport`: Deterministic scripted transport for testing
//! - `MistralTransport`: Mistral chat-completions API over HTTP
//!
//! # Examples
//!
//! ```
//! use pagewise_domain::traits::ChatTransport;
//! use pagewise_domain::ChatRequest;
//! use pagewise_llm::MockTransport;
//!
//! # async fn example() {
//! let transport = MockTransport::new(r#"{"labels": []}"#);
//! let request = ChatRequest::new("model", "system", "user", 0.0);
//! let response = transport.send(&request).await.unwrap();
//! assert_eq!(response.choices[0].message.content.as_deref(), Some(r#"{"labels": []}"#));
//! # }
//! ```

#![warn(missing_docs)]

pub mod mistral;

use async_trait::async_trait;
use pagewise_domain::traits::ChatTransport;
use pagewise_domain::{ChatRequest, ChatResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use mistral::MistralTransport;

/// Errors that can occur during transport calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body could not be read as a chat completion
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Credential rejected by the backend
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Scripted outcome of a mock round-trip
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// One choice with this content
    Content(String),
    /// One choice whose content is `null`
    NullContent,
    /// A response with zero choices
    NoChoices,
    /// A transport failure with this message
    Fail(String),
}

impl MockReply {
    fn into_result(self) -> Result<ChatResponse, LlmError> {
        match self {
            MockReply::Content(text) => Ok(ChatResponse::text(text)),
            MockReply::NullContent => Ok(ChatResponse::with_content(None)),
            MockReply::NoChoices => Ok(ChatResponse::empty()),
            MockReply::Fail(message) => Err(LlmError::Other(message)),
        }
    }
}

/// Mock transport for deterministic testing
///
/// Returns pre-configured replies without any network calls. Replies are
/// keyed by the request's user payload; unmatched payloads get the default
/// reply. Every request is recorded for later inspection.
///
/// # Examples
///
/// ```
/// use pagewise_llm::{MockReply, MockTransport};
///
/// let mut transport = MockTransport::new("fallback");
/// transport.add_response("page one text", "• summary");
/// transport.add_reply("page two text", MockReply::NoChoices);
/// transport.add_error("page three text");
/// assert_eq!(transport.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockTransport {
    /// Create a mock that answers every request with `content`
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_default(MockReply::Content(content.into()))
    }

    /// Create a mock with an arbitrary default reply
    pub fn with_default(reply: MockReply) -> Self {
        Self {
            default_reply: reply,
            replies: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer requests whose user payload equals `payload` with `content`
    pub fn add_response(&mut self, payload: impl Into<String>, content: impl Into<String>) {
        self.add_reply(payload, MockReply::Content(content.into()));
    }

    /// Answer requests whose user payload equals `payload` with `reply`
    pub fn add_reply(&mut self, payload: impl Into<String>, reply: MockReply) {
        lock(&self.replies).insert(payload.into(), reply);
    }

    /// Fail requests whose user payload equals `payload`
    pub fn add_error(&mut self, payload: impl Into<String>) {
        self.add_reply(payload, MockReply::Fail("Mock error".to_string()));
    }

    /// Number of round-trips performed
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// All recorded requests, oldest first
    pub fn requests(&self) -> Vec<ChatRequest> {
        lock(&self.requests).clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<ChatRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Forget recorded requests
    pub fn reset_call_count(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    type Error = LlmError;

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, Self::Error> {
        lock(&self.requests).push(request.clone());

        let reply = lock(&self.replies)
            .get(&request.user_payload)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        reply.into_result()
    }
}

// A panicking test thread must not wedge every other clone of the mock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payload: &str) -> ChatRequest {
        ChatRequest::new("test-model", "system", payload, 0.0)
    }

    fn content(response: &ChatResponse) -> Option<&str> {
        response.choices.first().and_then(|c| c.message.content.as_deref())
    }

    #[tokio::test]
    async fn test_mock_transport_default() {
        let transport = MockTransport::new("Test response");
        let response = transport.send(&request("any payload")).await.unwrap();
        assert_eq!(content(&response), Some("Test response"));
    }

    #[tokio::test]
    async fn test_mock_transport_specific_replies() {
        let mut transport = MockTransport::default();
        transport.add_response("hello", "world");
        transport.add_reply("silent", MockReply::NullContent);
        transport.add_reply("nothing", MockReply::NoChoices);

        let hello = transport.send(&request("hello")).await.unwrap();
        assert_eq!(content(&hello), Some("world"));

        let silent = transport.send(&request("silent")).await.unwrap();
        assert_eq!(silent.choices.len(), 1);
        assert_eq!(content(&silent), None);

        let nothing = transport.send(&request("nothing")).await.unwrap();
        assert!(nothing.choices.is_empty());

        let fallback = transport.send(&request("unknown")).await.unwrap();
        assert_eq!(content(&fallback), Some("{}"));
    }

    #[tokio::test]
    async fn test_mock_transport_error() {
        let mut transport = MockTransport::default();
        transport.add_error("bad payload");

        let result = transport.send(&request("bad payload")).await;
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_mock_transport_records_requests() {
        let transport = MockTransport::new("ok");
        assert_eq!(transport.call_count(), 0);

        transport.send(&request("first")).await.unwrap();
        transport.send(&request("second")).await.unwrap();

        assert_eq!(transport.call_count(), 2);
        assert_eq!(transport.requests()[0].user_payload, "first");
        assert_eq!(transport.last_request().unwrap().user_payload, "second");

        transport.reset_call_count();
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_transport_clone_shares_state() {
        let first = MockTransport::new("test");
        let second = first.clone();

        first.send(&request("x")).await.unwrap();

        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
    }
}

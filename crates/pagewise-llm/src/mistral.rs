//! Mistral Transport Implementation
//!
//! Sends chat-completion requests to the Mistral API
//! (`POST {base_url}/v1/chat/completions`) with bearer authentication.
//!
//! The transport performs exactly one HTTP round-trip per call. It applies a
//! client-side timeout but no retry policy; callers decide whether to retry.
//!
//! # Examples
//!
//! ```no_run
//! use pagewise_llm::MistralTransport;
//!
//! let transport = MistralTransport::new("api-key", "https://api.mistral.ai").unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use pagewise_domain::traits::ChatTransport;
use pagewise_domain::{ChatRequest, ChatResponse, ResponseFormat};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default Mistral API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";

/// Default timeout for a single request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Mistral chat-completions client
pub struct MistralTransport {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 2],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> CompletionBody<'a> {
    fn from_request(request: &'a ChatRequest) -> Self {
        Self {
            model: &request.model,
            messages: [
                WireMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                WireMessage {
                    role: "user",
                    content: &request.user_payload,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.options.max_tokens,
            response_format: request.options.response_format,
        }
    }
}

impl MistralTransport {
    /// Create a transport with the default timeout
    ///
    /// # Parameters
    ///
    /// - `api_key`: Mistral API key
    /// - `base_url`: API root (e.g., "https://api.mistral.ai")
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(api_key, base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a transport with an explicit request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a transport against the public Mistral endpoint
    pub fn default_endpoint(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(api_key, DEFAULT_BASE_URL)
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for MistralTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MistralTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ChatTransport for MistralTransport {
    type Error = LlmError;

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, Self::Error> {
        let url = self.completions_url();
        let body = CompletionBody::from_request(request);

        debug!(
            "POST {} model={} payload_chars={}",
            url,
            request.model,
            request.user_payload.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<ChatResponse>()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)));
        }

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(LlmError::Unauthorized(format!("HTTP {}", status)))
            }
            reqwest::StatusCode::NOT_FOUND => Err(LlmError::ModelNotAvailable(request.model.clone())),
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(LlmError::RateLimitExceeded),
            _ => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewise_domain::ChatOptions;
    use serde_json::json;

    #[test]
    fn test_mistral_transport_creation() {
        let transport = MistralTransport::new("key", "https://api.mistral.ai").unwrap();
        assert_eq!(transport.base_url, "https://api.mistral.ai");
        assert_eq!(transport.api_key, "key");
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let transport = MistralTransport::new("key", "http://localhost:8080/").unwrap();
        assert_eq!(transport.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let transport = MistralTransport::default_endpoint("super-secret").unwrap();
        let rendered = format!("{:?}", transport);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_body_includes_json_mode_and_limits() {
        let request = ChatRequest::new("mistral-large-latest", "sys", "[]", 0.0).with_options(
            ChatOptions {
                max_tokens: Some(512),
                response_format: Some(ResponseFormat::JsonObject),
            },
        );

        let body = serde_json::to_value(CompletionBody::from_request(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "mistral-large-latest",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "[]"}
                ],
                "temperature": 0.0,
                "max_tokens": 512,
                "response_format": {"type": "json_object"}
            })
        );
    }

    #[test]
    fn test_body_omits_unset_options() {
        let request = ChatRequest::new("m", "sys", "text", 0.3);
        let body = serde_json::to_value(CompletionBody::from_request(&request)).unwrap();
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("response_format").is_none());
    }

    #[tokio::test]
    async fn test_mistral_error_handling() {
        // Invalid port triggers a request error before any network I/O
        let transport = MistralTransport::new("key", "http://localhost:99999").unwrap();
        let request = ChatRequest::new("m", "sys", "user", 0.0);

        let result = transport.send(&request).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    // Integration tests (requires a valid API key)
    #[tokio::test]
    #[ignore]
    async fn test_mistral_send_integration() {
        let Ok(api_key) = std::env::var("MISTRAL_API_KEY") else {
            return;
        };
        let transport = MistralTransport::default_endpoint(api_key).unwrap();
        let request = ChatRequest::new("mistral-small-latest", "Reply with one word.", "Say hello", 0.0);

        let response = transport.send(&request).await.unwrap();
        assert!(!response.choices.is_empty());
    }
}

//! Chat-completion exchange with the model transport
//!
//! The request carries everything the transport needs for a single
//! system + user round-trip. The response mirrors the common
//! `choices[].message.content` shape, where content may be `null`.

use serde::{Deserialize, Serialize};

/// One system + user round-trip to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,

    /// System instruction
    pub system_prompt: String,

    /// User message body (page JSON or raw page text)
    pub user_payload: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Additional transport options
    pub options: ChatOptions,
}

impl ChatRequest {
    /// Create a request with default options
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_payload: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            user_payload: user_payload.into(),
            temperature,
            options: ChatOptions::default(),
        }
    }

    /// Replace the transport options
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}

/// Optional request parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChatOptions {
    /// Upper bound on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Constrain the output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Output format constraint, serialized as `{"type": "json_object"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// A single JSON object
    JsonObject,
}

/// Transport response: zero or more choices
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChatResponse {
    /// Candidate completions; usually one
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One candidate completion
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatChoice {
    /// Position within `choices`
    #[serde(default)]
    pub index: u32,

    /// Generated message
    pub message: ChatMessage,

    /// Why generation stopped ("stop", "length", ...)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Generated message; `content` may be absent
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChatMessage {
    /// Author role, normally "assistant"
    #[serde(default)]
    pub role: Option<String>,

    /// Message text
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Response with no choices at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Response with a single choice carrying `content`
    pub fn with_content(content: Option<String>) -> Self {
        Self {
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: Some("assistant".to_string()),
                    content,
                },
                finish_reason: Some("stop".to_string()),
            }],
        }
    }

    /// Response with a single choice carrying `text`
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(Some(text.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_format_wire_shape() {
        let value = serde_json::to_value(ResponseFormat::JsonObject).unwrap();
        assert_eq!(value, json!({"type": "json_object"}));
        assert!(serde_json::from_value::<ResponseFormat>(json!({"type": "text"})).is_err());
    }

    #[test]
    fn test_options_skip_unset() {
        let value = serde_json::to_value(ChatOptions::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_response_with_null_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "cmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();

        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, None);
    }

    #[test]
    fn test_response_missing_choices() {
        let response: ChatResponse = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(response.choices.is_empty());
    }
}

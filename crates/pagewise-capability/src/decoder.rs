//! Decode transport responses into text or JSON
//!
//! The model is untrusted: a response may have no choices, a null or blank
//! message, or text that is not JSON. Each case maps to its own
//! [`DecodeError`] variant.

use crate::error::DecodeError;
use pagewise_domain::ChatResponse;
use serde_json::Value;

/// Maximum characters of offending text kept in a `MalformedJson` error
pub const EXCERPT_CHARS: usize = 500;

/// Extract the trimmed text of the first choice
pub fn decode_text(response: &ChatResponse) -> Result<String, DecodeError> {
    let choice = response.choices.first().ok_or(DecodeError::EmptyChoices)?;

    let content = choice
        .message
        .content
        .as_deref()
        .ok_or(DecodeError::EmptyContent)?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::BlankContent);
    }

    Ok(trimmed.to_string())
}

/// Extract the first choice and parse it as JSON.
///
/// A surrounding markdown code fence (```` ```json ... ``` ````) is removed
/// before parsing.
pub fn decode_json(response: &ChatResponse) -> Result<Value, DecodeError> {
    let text = decode_text(response)?;
    let body = strip_code_fence(&text);

    serde_json::from_str(body).map_err(|e| DecodeError::MalformedJson {
        message: e.to_string(),
        excerpt: excerpt(&text),
    })
}

/// Remove a markdown code fence around already-trimmed text
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Skip the info string ("json") on the opening line
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => strip_json_tag(rest),
    };

    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

// One-line fences carry the tag directly before the payload.
fn strip_json_tag(text: &str) -> &str {
    match text.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &text[4..],
        _ => text,
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}

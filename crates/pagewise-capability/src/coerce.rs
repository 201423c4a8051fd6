//! Best-effort normalization of loosely-typed caller parameters
//!
//! Some callers can only pass strings (text-based tool channels), so a
//! structured parameter may arrive as JSON text. Coercion parses such text
//! when it yields the expected container and otherwise hands the input back
//! untouched; it never fails.

use serde_json::Value;
use tracing::debug;

/// Container shape an operation expects for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// A JSON object
    Mapping,
    /// A JSON array
    Sequence,
}

impl ContainerKind {
    /// True if `value` already has this shape
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ContainerKind::Mapping => value.is_object(),
            ContainerKind::Sequence => value.is_array(),
        }
    }
}

/// Coerce `value` towards `kind`.
///
/// - Values already of `kind` (and `null`, meaning "use the default") are
///   returned as-is; the value is moved, not copied.
/// - A string holding JSON text of the right shape is replaced by the parsed value.
/// - Anything else, including unparseable or wrongly-shaped text, is returned
///   unchanged for downstream validation to report.
///
/// # Examples
///
/// ```
/// use pagewise_capability::{coerce, ContainerKind};
/// use serde_json::json;
///
/// let labels = coerce(json!(r#"["income_statement", "notes"]"#), ContainerKind::Sequence);
/// assert_eq!(labels, json!(["income_statement", "notes"]));
///
/// let broken = coerce(json!("{invalid json}"), ContainerKind::Mapping);
/// assert_eq!(broken, json!("{invalid json}"));
/// ```
pub fn coerce(value: Value, kind: ContainerKind) -> Value {
    let Value::String(text) = value else {
        return value;
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(parsed) if kind.matches(&parsed) => parsed,
        Ok(_) => {
            debug!("Parameter text parsed but is not a {:?}; leaving as string", kind);
            Value::String(text)
        }
        Err(e) => {
            debug!("Parameter text is not JSON ({}); leaving as string", e);
            Value::String(text)
        }
    }
}

/// [`coerce`] for an optional parameter; absence stays absent
pub fn coerce_param(value: Option<Value>, kind: ContainerKind) -> Option<Value> {
    value.map(|v| coerce(v, kind))
}

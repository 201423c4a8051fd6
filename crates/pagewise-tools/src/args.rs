//! Argument unpacking with boundary coercion

use crate::error::ToolError;
use pagewise_capability::{coerce, coerce_param, ContainerKind};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Tool arguments as a JSON object; a JSON-text object is accepted too
pub(crate) fn into_object(args: Value) -> Result<Map<String, Value>, ToolError> {
    match coerce(args, ContainerKind::Mapping) {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ToolError::invalid(
            "arguments",
            format!("expected an object, got {}", type_name(&other)),
        )),
    }
}

/// Take an optional parameter, coercing it to `kind` first when given.
///
/// `null` counts as absent.
pub(crate) fn optional<T: DeserializeOwned>(
    args: &mut Map<String, Value>,
    name: &str,
    kind: Option<ContainerKind>,
) -> Result<Option<T>, ToolError> {
    let raw = args.remove(name).filter(|value| !value.is_null());
    let value = match kind {
        Some(kind) => coerce_param(raw, kind),
        None => raw,
    };

    value
        .map(|value| {
            serde_json::from_value(value).map_err(|e| ToolError::invalid(name, e.to_string()))
        })
        .transpose()
}

/// Take a required parameter
pub(crate) fn required<T: DeserializeOwned>(
    args: &mut Map<String, Value>,
    name: &str,
    kind: Option<ContainerKind>,
) -> Result<T, ToolError> {
    optional(args, name, kind)?
        .ok_or_else(|| ToolError::invalid(name, "missing required parameter"))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        into_object(value).unwrap()
    }

    #[test]
    fn test_arguments_as_json_text() {
        let args = object(json!(r#"{"document_url": "a.txt"}"#));
        assert_eq!(args["document_url"], "a.txt");
        assert!(into_object(json!([1])).is_err());
        assert!(object(Value::Null).is_empty());
    }

    #[test]
    fn test_sequence_parameter_from_text() {
        let mut args = object(json!({"labels": "[\"a\", \"b\"]"}));
        let labels: Vec<String> = required(&mut args, "labels", Some(ContainerKind::Sequence)).unwrap();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn test_uncoercible_text_is_invalid_parameter() {
        let mut args = object(json!({"labels": "a, b"}));
        let err = required::<Vec<String>>(&mut args, "labels", Some(ContainerKind::Sequence)).unwrap_err();
        match err {
            ToolError::InvalidParameter { name, .. } => assert_eq!(name, "labels"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_and_null() {
        let mut args = object(json!({"model": null}));
        let model: Option<String> = optional(&mut args, "model", None).unwrap();
        assert!(model.is_none());
        assert!(required::<String>(&mut args, "document_url", None).is_err());
    }
}

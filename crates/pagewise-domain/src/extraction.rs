//! Field schemas and extraction results

use crate::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declaration of one field the model should try to fill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique within its schema
    pub name: String,

    /// Free-form type tag ("currency", "date", "text", ...)
    #[serde(rename = "type")]
    pub field_type: String,

    /// Optional format hint, e.g. "YYYY-MM-DD"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldSpec {
    /// Create a field spec without a pattern
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            pattern: None,
        }
    }

    /// Attach a format hint
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Ordered, immutable set of field declarations.
///
/// Deserializes from `{"fields": [...]}` and rejects empty or repeated names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawFieldSchema")]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

#[derive(Deserialize)]
struct RawFieldSchema {
    #[serde(default)]
    fields: Vec<FieldSpec>,
}

impl TryFrom<RawFieldSchema> for FieldSchema {
    type Error = DomainError;

    fn try_from(raw: RawFieldSchema) -> Result<Self, Self::Error> {
        FieldSchema::new(raw.fields)
    }
}

impl FieldSchema {
    /// Build a schema, checking name uniqueness
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, DomainError> {
        for (idx, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(DomainError::InvalidSchema(format!(
                    "field {} has an empty name",
                    idx
                )));
            }
            if fields[..idx].iter().any(|f| f.name == field.name) {
                return Err(DomainError::InvalidSchema(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }
        }
        Ok(Self { fields })
    }

    /// Field declarations in order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// True if the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Where in the document an extracted value was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSource {
    /// Page number
    pub page: u32,

    /// Line index within the page, when the model reports one
    #[serde(rename = "lineIdx", default, skip_serializing_if = "Option::is_none")]
    pub line_idx: Option<u32>,
}

/// One extracted field.
///
/// `value == null` is a valid "not found" answer, distinct from a rejected record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    /// Field name as reported by the model
    pub name: String,

    /// Extracted value with its native JSON type
    pub value: Value,

    /// Model confidence (not range-checked)
    pub confidence: f64,

    /// Source location, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<FieldSource>,
}

/// Result of a field extraction: accepted fields plus model/pipeline errors
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Accepted fields, in model order
    pub fields: Vec<ExtractedField>,

    /// Error messages reported by the model or by the pipeline
    pub errors: Vec<String>,
}

impl ExtractionOutcome {
    /// Degraded outcome: no fields and a single error message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            errors: vec![message.into()],
        }
    }
}

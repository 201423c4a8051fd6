//! Per-record validation of model output
//!
//! Model output is checked record by record at run time. Each candidate
//! becomes a [`Validation`]: only `Valid` records reach the result, and a
//! rejected record never affects its neighbours. Rejections are counted and
//! logged, never returned to the caller.

use pagewise_domain::{
    ClassificationRecord, ExtractedField, ExtractionOutcome, FieldSchema, FieldSource, LabelSet,
    PageSample,
};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, info};

/// Message returned when an extraction result is not a JSON object
pub const INVALID_EXTRACTION_FORMAT: &str = "Invalid result format: expected dict";

/// Outcome of validating one candidate record
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    /// The record passed every check
    Valid(T),
    /// The record was dropped
    Rejected(RejectionReason),
}

/// Why a candidate record was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Candidate is not a JSON object
    NotAnObject,

    /// A required key is absent
    MissingKey(&'static str),

    /// A required key holds the wrong JSON type
    InvalidType {
        /// Offending key
        key: &'static str,
        /// What the key should hold
        expected: &'static str,
    },

    /// Label outside the caller's set and not "other"
    UnknownLabel(String),

    /// Confidence outside [0.0, 1.0]
    ConfidenceOutOfRange(f64),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotAnObject => write!(f, "not a JSON object"),
            RejectionReason::MissingKey(key) => write!(f, "missing '{}'", key),
            RejectionReason::InvalidType { key, expected } => {
                write!(f, "'{}' is not {}", key, expected)
            }
            RejectionReason::UnknownLabel(label) => write!(f, "unknown label '{}'", label),
            RejectionReason::ConfidenceOutOfRange(c) => {
                write!(f, "confidence {} out of range [0.0, 1.0]", c)
            }
        }
    }
}

const CLASSIFICATION_KEYS: [&str; 3] = ["page", "label", "confidence"];
const EXTRACTION_KEYS: [&str; 3] = ["name", "value", "confidence"];

/// Validate one classification candidate against `labels`
pub fn validate_classification_record(
    candidate: Value,
    labels: &LabelSet,
) -> Validation<ClassificationRecord> {
    let obj = match require_keys(candidate, &CLASSIFICATION_KEYS) {
        Ok(obj) => obj,
        Err(reason) => return Validation::Rejected(reason),
    };

    let Some(page) = obj.get("page").and_then(as_page) else {
        return invalid_type("page", "a non-negative integer");
    };
    let Some(label) = obj.get("label").and_then(Value::as_str) else {
        return invalid_type("label", "a string");
    };
    let Some(confidence) = obj.get("confidence").and_then(Value::as_f64) else {
        return invalid_type("confidence", "a number");
    };

    if !labels.contains(label) {
        return Validation::Rejected(RejectionReason::UnknownLabel(label.to_string()));
    }
    if !(0.0..=1.0).contains(&confidence) {
        return Validation::Rejected(RejectionReason::ConfidenceOutOfRange(confidence));
    }

    Validation::Valid(ClassificationRecord {
        page,
        label: label.to_string(),
        confidence,
    })
}

/// Validate a parsed classification response.
///
/// Accepts either `{"labels": [...]}` or a bare array. An object without an
/// array under `labels`, or any other JSON value, yields no candidates.
/// `pages` is the submitted batch; it is only used for the summary log.
pub fn validate_classification(
    result: Value,
    pages: &[PageSample],
    labels: &LabelSet,
) -> Vec<ClassificationRecord> {
    let candidates = match result {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("labels") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let total = candidates.len();
    let outcomes = candidates
        .into_iter()
        .map(|candidate| validate_classification_record(candidate, labels));
    let (validated, rejected) = collect_valid(outcomes, "classification");

    info!(
        "Classification validated: {} accepted, {} rejected of {} candidates ({} pages submitted)",
        validated.len(),
        rejected,
        total,
        pages.len()
    );

    validated
}

/// Validate one extraction candidate.
///
/// Requires `name`, `value` and `confidence`; `value` may be `null`. No
/// confidence range check is applied. A malformed `source` is dropped while
/// the field is kept.
pub fn validate_extracted_field(candidate: Value) -> Validation<ExtractedField> {
    let mut obj = match require_keys(candidate, &EXTRACTION_KEYS) {
        Ok(obj) => obj,
        Err(reason) => return Validation::Rejected(reason),
    };

    let Some(Value::String(name)) = obj.remove("name") else {
        return invalid_type("name", "a string");
    };
    let Some(confidence) = obj.get("confidence").and_then(Value::as_f64) else {
        return invalid_type("confidence", "a number");
    };
    let value = obj.remove("value").unwrap_or(Value::Null);

    let source = match obj.remove("source") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<FieldSource>(raw) {
            Ok(source) => Some(source),
            Err(e) => {
                debug!("Dropping malformed source on field '{}': {}", name, e);
                None
            }
        },
    };

    Validation::Valid(ExtractedField {
        name,
        value,
        confidence,
        source,
    })
}

/// Validate a parsed extraction response.
///
/// Field names are not cross-checked against `schema` and confidence is not
/// range-checked; `schema` only feeds the summary log.
pub fn validate_extraction(result: Value, schema: &FieldSchema) -> ExtractionOutcome {
    let Value::Object(mut obj) = result else {
        return ExtractionOutcome::failed(INVALID_EXTRACTION_FORMAT);
    };

    let candidates = match obj.remove("fields") {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let errors = error_messages(obj.remove("errors"));

    let total = candidates.len();
    let outcomes = candidates.into_iter().map(validate_extracted_field);
    let (fields, rejected) = collect_valid(outcomes, "extraction");

    info!(
        "Extraction validated: {} accepted, {} rejected of {} candidates ({} schema fields)",
        fields.len(),
        rejected,
        total,
        schema.fields().len()
    );

    ExtractionOutcome { fields, errors }
}

/// Keep `Valid` records in order; count and log the rest
fn collect_valid<T>(
    outcomes: impl Iterator<Item = Validation<T>>,
    what: &str,
) -> (Vec<T>, usize) {
    outcomes
        .enumerate()
        .fold((Vec::new(), 0), |(mut valid, rejected), (idx, outcome)| match outcome {
            Validation::Valid(record) => {
                valid.push(record);
                (valid, rejected)
            }
            Validation::Rejected(reason) => {
                debug!("Rejected {} candidate {}: {}", what, idx, reason);
                (valid, rejected + 1)
            }
        })
}

fn require_keys(candidate: Value, keys: &[&'static str]) -> Result<Map<String, Value>, RejectionReason> {
    let Value::Object(obj) = candidate else {
        return Err(RejectionReason::NotAnObject);
    };
    if let Some(missing) = keys.iter().find(|key| !obj.contains_key(**key)) {
        return Err(RejectionReason::MissingKey(*missing));
    }
    Ok(obj)
}

fn invalid_type<T>(key: &'static str, expected: &'static str) -> Validation<T> {
    Validation::Rejected(RejectionReason::InvalidType { key, expected })
}

fn as_page(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|page| u32::try_from(page).ok())
}

fn error_messages(raw: Option<Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(message) => message,
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(message)) => vec![message],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels() -> LabelSet {
        LabelSet::new(["income_statement", "balance_sheet", "notes"])
    }

    fn pages(n: u32) -> Vec<PageSample> {
        (1..=n).map(|p| PageSample::new(p, "sample")).collect()
    }

    #[test]
    fn test_classification_filters_label_and_confidence() {
        let result = json!([
            {"page": 1, "label": "income_statement", "confidence": 0.95},
            {"page": 2, "label": "balance_sheet", "confidence": 0.92},
            {"page": 3, "label": "invalid_label", "confidence": 0.5},
            {"page": 4, "label": "notes", "confidence": 1.5}
        ]);

        let validated = validate_classification(result, &pages(4), &labels());

        assert_eq!(validated.len(), 2);
        assert_eq!(validated[0].label, "income_statement");
        assert_eq!(validated[1].label, "balance_sheet");
    }

    #[test]
    fn test_classification_unwraps_labels_key() {
        let result = json!({"labels": [{"page": 1, "label": "notes", "confidence": 0.9}]});
        let validated = validate_classification(result, &pages(1), &labels());
        assert_eq!(
            validated,
            vec![ClassificationRecord { page: 1, label: "notes".to_string(), confidence: 0.9 }]
        );
    }

    #[test]
    fn test_classification_labels_key_absent_or_wrong_type() {
        assert!(validate_classification(json!({"pages": []}), &[], &labels()).is_empty());
        assert!(validate_classification(json!({"labels": "notes"}), &[], &labels()).is_empty());
        assert!(validate_classification(json!("notes"), &[], &labels()).is_empty());
        assert!(validate_classification(Value::Null, &[], &labels()).is_empty());
    }

    #[test]
    fn test_classification_accepts_other() {
        let record = validate_classification_record(
            json!({"page": 7, "label": "other", "confidence": 0.4}),
            &labels(),
        );
        assert!(matches!(record, Validation::Valid(ref r) if r.label == "other"));
    }

    #[test]
    fn test_classification_label_is_case_sensitive() {
        let record = validate_classification_record(
            json!({"page": 1, "label": "Notes", "confidence": 0.9}),
            &labels(),
        );
        assert_eq!(
            record,
            Validation::Rejected(RejectionReason::UnknownLabel("Notes".to_string()))
        );
    }

    #[test]
    fn test_classification_confidence_bounds_are_inclusive() {
        for confidence in [0.0, 1.0] {
            let record = validate_classification_record(
                json!({"page": 1, "label": "notes", "confidence": confidence}),
                &labels(),
            );
            assert!(matches!(record, Validation::Valid(_)));
        }
        let below = validate_classification_record(
            json!({"page": 1, "label": "notes", "confidence": -0.1}),
            &labels(),
        );
        assert_eq!(below, Validation::Rejected(RejectionReason::ConfidenceOutOfRange(-0.1)));
    }

    #[test]
    fn test_classification_missing_keys() {
        let result = json!([
            {"page": 1, "label": "notes", "confidence": 0.9},
            {"page": 2, "label": "notes"},
            {"page": 3, "confidence": 0.8},
            "not an object",
            42
        ]);
        let validated = validate_classification(result, &pages(3), &labels());
        assert_eq!(validated.len(), 1);
        assert_eq!(validated[0].page, 1);

        assert_eq!(
            validate_classification_record(json!({"label": "notes", "confidence": 0.1}), &labels()),
            Validation::Rejected(RejectionReason::MissingKey("page"))
        );
        assert_eq!(
            validate_classification_record(json!(["page"]), &labels()),
            Validation::Rejected(RejectionReason::NotAnObject)
        );
    }

    #[test]
    fn test_classification_wrong_types() {
        let cases = [
            (json!({"page": "1", "label": "notes", "confidence": 0.9}), "page"),
            (json!({"page": -1, "label": "notes", "confidence": 0.9}), "page"),
            (json!({"page": 1, "label": 3, "confidence": 0.9}), "label"),
            (json!({"page": 1, "label": "notes", "confidence": "high"}), "confidence"),
        ];
        for (candidate, key) in cases {
            match validate_classification_record(candidate, &labels()) {
                Validation::Rejected(RejectionReason::InvalidType { key: k, .. }) => assert_eq!(k, key),
                other => panic!("Expected InvalidType for {}, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_classification_integer_confidence_accepted() {
        let record = validate_classification_record(
            json!({"page": 1, "label": "notes", "confidence": 1}),
            &labels(),
        );
        assert!(matches!(record, Validation::Valid(ref r) if r.confidence == 1.0));
    }

    #[test]
    fn test_extraction_requires_object() {
        let outcome = validate_extraction(json!([1, 2]), &FieldSchema::default());
        assert!(outcome.fields.is_empty());
        assert_eq!(outcome.errors, vec![INVALID_EXTRACTION_FORMAT.to_string()]);
    }

    #[test]
    fn test_extraction_missing_keys() {
        let result = json!({
            "fields": [
                {"name": "field1", "value": "test", "confidence": 0.9},
                {"name": "field2", "value": "test"},
                {"value": "test", "confidence": 0.8},
                {"name": "field4", "confidence": 0.8}
            ],
            "errors": []
        });
        let outcome = validate_extraction(result, &FieldSchema::default());
        assert_eq!(outcome.fields.len(), 1);
        assert_eq!(outcome.fields[0].name, "field1");
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_extraction_null_value_is_valid() {
        let outcome = validate_extraction(
            json!({"fields": [{"name": "ebitda", "value": null, "confidence": 0.0}]}),
            &FieldSchema::default(),
        );
        assert_eq!(outcome.fields.len(), 1);
        assert_eq!(outcome.fields[0].value, Value::Null);
    }

    #[test]
    fn test_extraction_does_not_check_names_or_confidence_range() {
        // Names outside the schema and out-of-range confidence both pass;
        // classification would reject the latter.
        let schema = FieldSchema::new(vec![pagewise_domain::FieldSpec::new("revenue", "currency")]).unwrap();
        let outcome = validate_extraction(
            json!({"fields": [{"name": "unrequested", "value": 5, "confidence": 7.5}]}),
            &schema,
        );
        assert_eq!(outcome.fields.len(), 1);
        assert_eq!(outcome.fields[0].confidence, 7.5);
    }

    #[test]
    fn test_extraction_fields_absent_or_wrong_type() {
        let outcome = validate_extraction(json!({"errors": ["nothing found"]}), &FieldSchema::default());
        assert!(outcome.fields.is_empty());
        assert_eq!(outcome.errors, vec!["nothing found".to_string()]);

        let outcome = validate_extraction(json!({"fields": {"name": "x"}}), &FieldSchema::default());
        assert!(outcome.fields.is_empty());
    }

    #[test]
    fn test_extraction_errors_pass_through() {
        let outcome = validate_extraction(
            json!({"fields": [], "errors": ["page 3 unreadable", {"code": 7}]}),
            &FieldSchema::default(),
        );
        assert_eq!(outcome.errors, vec!["page 3 unreadable".to_string(), r#"{"code":7}"#.to_string()]);

        let single = validate_extraction(json!({"errors": "one problem"}), &FieldSchema::default());
        assert_eq!(single.errors, vec!["one problem".to_string()]);
    }

    #[test]
    fn test_extraction_source_handling() {
        let valid = validate_extracted_field(json!({
            "name": "revenue", "value": 1, "confidence": 0.9,
            "source": {"page": 2, "lineIdx": 14}
        }));
        match valid {
            Validation::Valid(field) => {
                assert_eq!(field.source, Some(FieldSource { page: 2, line_idx: Some(14) }));
            }
            other => panic!("Expected Valid, got {:?}", other),
        }

        let malformed = validate_extracted_field(json!({
            "name": "revenue", "value": 1, "confidence": 0.9, "source": "page two"
        }));
        assert!(matches!(malformed, Validation::Valid(ref f) if f.source.is_none()));
    }

    #[test]
    fn test_extraction_name_must_be_string() {
        let outcome = validate_extracted_field(json!({"name": 5, "value": 1, "confidence": 0.9}));
        assert_eq!(
            outcome,
            Validation::Rejected(RejectionReason::InvalidType { key: "name", expected: "a string" })
        );
    }
}

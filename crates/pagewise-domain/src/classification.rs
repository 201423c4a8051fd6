//! Page classification results

use serde::{Deserialize, Serialize};

/// One validated page classification.
///
/// `label` is a member of the caller's label set or `"other"`, and
/// `confidence` lies in `[0.0, 1.0]`; the validator guarantees both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Page number as reported by the model
    pub page: u32,

    /// Assigned label
    pub label: String,

    /// Model confidence
    pub confidence: f64,
}

//! Classification label sets

use serde::{Deserialize, Serialize};

/// Reserved catch-all label, always accepted alongside the caller's labels
pub const OTHER_LABEL: &str = "other";

/// Ordered set of classification labels supplied by the caller.
///
/// Membership is exact and case-sensitive. The reserved [`OTHER_LABEL`] is
/// implicitly a member even when the caller does not list it.
///
/// # Examples
///
/// ```
/// use pagewise_domain::LabelSet;
///
/// let labels = LabelSet::new(["income_statement", "balance_sheet"]);
/// assert!(labels.contains("balance_sheet"));
/// assert!(labels.contains("other"));
/// assert!(!labels.contains("Balance_Sheet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Build a label set, dropping repeated labels but keeping first-seen order
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self { labels: unique }
    }

    /// True if `label` is one of the caller's labels or the reserved catch-all
    pub fn contains(&self, label: &str) -> bool {
        label == OTHER_LABEL || self.labels.iter().any(|l| l == label)
    }

    /// The caller-supplied labels, in order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of caller-supplied labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the caller supplied no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(set: LabelSet) -> Self {
        set.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_is_case_sensitive() {
        let labels = LabelSet::new(["notes"]);
        assert!(labels.contains("notes"));
        assert!(!labels.contains("Notes"));
        assert!(!labels.contains("notes "));
    }

    #[test]
    fn test_other_is_implicit() {
        let labels = LabelSet::new(Vec::<String>::new());
        assert!(labels.is_empty());
        assert!(labels.contains(OTHER_LABEL));
    }

    #[test]
    fn test_duplicates_collapse_in_order() {
        let labels = LabelSet::new(["b", "a", "b", "c", "a"]);
        assert_eq!(labels.labels(), &["b", "a", "c"]);
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_deserialize_from_array() {
        let labels: LabelSet = serde_json::from_str(r#"["x", "y", "x"]"#).unwrap();
        assert_eq!(labels.labels(), &["x", "y"]);

        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"["x","y"]"#);
    }
}

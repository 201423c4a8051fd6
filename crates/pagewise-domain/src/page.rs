//! Page records, samples and page selection

use crate::DomainError;
use serde::{Deserialize, Serialize};

/// Number of leading characters kept in a classification sample
pub const SAMPLE_CHARS: usize = 70;

/// Full text of one physical page.
///
/// `page` is 1-based. Within a batch, page numbers are unique; batch order is
/// insertion order, not necessarily page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-based page number
    pub page: u32,

    /// Extracted page text
    pub text: String,
}

impl PageRecord {
    /// Create a page record
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

/// Short leading sample of a page, used for classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSample {
    /// 1-based page number
    pub page: u32,

    /// First [`SAMPLE_CHARS`] characters of the page, trimmed
    #[serde(rename = "textSample")]
    pub text_sample: String,
}

impl PageSample {
    /// Create a sample from explicit text
    pub fn new(page: u32, text_sample: impl Into<String>) -> Self {
        Self {
            page,
            text_sample: text_sample.into(),
        }
    }

    /// Take the leading sample of a full page record
    pub fn from_record(record: &PageRecord) -> Self {
        let head: String = record.text.chars().take(SAMPLE_CHARS).collect();
        Self {
            page: record.page,
            text_sample: head.trim().to_string(),
        }
    }
}

/// Which pages of a document to operate on.
///
/// Accepts three wire shapes: `{"start": 1, "end": 5}`,
/// `{"range": {"start": 1, "end": 5}}` and `{"pages": [1, 3, 7]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawPageSelector")]
pub enum PageSelector {
    /// Every page in the document
    #[default]
    All,

    /// Inclusive range; an open end runs to the last page
    Range {
        /// First page (1-based)
        start: u32,
        /// Last page, inclusive
        end: Option<u32>,
    },

    /// Explicit page numbers, in caller order
    Pages(Vec<u32>),
}

impl PageSelector {
    /// Build an inclusive range selector
    pub fn range(start: u32, end: Option<u32>) -> Result<Self, DomainError> {
        if start == 0 {
            return Err(DomainError::InvalidPageSelector(
                "page numbers are 1-based".to_string(),
            ));
        }
        if let Some(end) = end {
            if end < start {
                return Err(DomainError::InvalidPageSelector(format!(
                    "range end {} is before start {}",
                    end, start
                )));
            }
        }
        Ok(Self::Range { start, end })
    }

    /// Build an explicit page list selector
    pub fn pages(pages: Vec<u32>) -> Result<Self, DomainError> {
        if pages.contains(&0) {
            return Err(DomainError::InvalidPageSelector(
                "page numbers are 1-based".to_string(),
            ));
        }
        Ok(Self::Pages(pages))
    }

    /// Resolve against a document with `page_count` pages.
    ///
    /// Ranges are clamped to the document. Explicit pages outside the
    /// document are dropped and repeats keep only their first occurrence.
    pub fn resolve(&self, page_count: u32) -> Vec<u32> {
        match self {
            PageSelector::All => (1..=page_count).collect(),
            PageSelector::Range { start, end } => {
                let last = end.map_or(page_count, |e| e.min(page_count));
                if *start > last {
                    return Vec::new();
                }
                (*start..=last).collect()
            }
            PageSelector::Pages(pages) => {
                let mut resolved = Vec::with_capacity(pages.len());
                for &page in pages {
                    if page >= 1 && page <= page_count && !resolved.contains(&page) {
                        resolved.push(page);
                    }
                }
                resolved
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPageSelector {
    List { pages: Vec<u32> },
    Nested { range: RawRange },
    Flat(RawRange),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRange {
    #[serde(default)]
    start: Option<u32>,
    #[serde(default)]
    end: Option<u32>,
}

impl TryFrom<RawPageSelector> for PageSelector {
    type Error = DomainError;

    fn try_from(raw: RawPageSelector) -> Result<Self, Self::Error> {
        match raw {
            RawPageSelector::List { pages } => PageSelector::pages(pages),
            RawPageSelector::Nested { range } | RawPageSelector::Flat(range) => {
                PageSelector::range(range.start.unwrap_or(1), range.end)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_takes_first_70_chars_trimmed() {
        let text = format!("  {}", "x".repeat(100));
        let sample = PageSample::from_record(&PageRecord::new(3, text));
        assert_eq!(sample.page, 3);
        assert_eq!(sample.text_sample, "x".repeat(68));
    }

    #[test]
    fn test_sample_counts_chars_not_bytes() {
        let text = "é".repeat(80);
        let sample = PageSample::from_record(&PageRecord::new(1, text));
        assert_eq!(sample.text_sample.chars().count(), SAMPLE_CHARS);
    }

    #[test]
    fn test_sample_serializes_camel_case() {
        let sample = PageSample::new(1, "Income Statement");
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["textSample"], "Income Statement");
    }

    #[test]
    fn test_resolve_all() {
        assert_eq!(PageSelector::All.resolve(3), vec![1, 2, 3]);
        assert!(PageSelector::All.resolve(0).is_empty());
    }

    #[test]
    fn test_resolve_range_clamps() {
        let selector = PageSelector::range(2, Some(10)).unwrap();
        assert_eq!(selector.resolve(4), vec![2, 3, 4]);

        let open = PageSelector::range(3, None).unwrap();
        assert_eq!(open.resolve(5), vec![3, 4, 5]);

        let past_end = PageSelector::range(9, None).unwrap();
        assert!(past_end.resolve(5).is_empty());
    }

    #[test]
    fn test_resolve_pages_filters_and_dedupes() {
        let selector = PageSelector::pages(vec![5, 1, 30, 5, 2]).unwrap();
        assert_eq!(selector.resolve(10), vec![5, 1, 2]);
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(PageSelector::range(0, None).is_err());
        assert!(PageSelector::range(5, Some(2)).is_err());
        assert!(PageSelector::pages(vec![1, 0]).is_err());
    }

    #[test]
    fn test_deserialize_wire_shapes() {
        let flat: PageSelector = serde_json::from_str(r#"{"start": 1, "end": 5}"#).unwrap();
        assert_eq!(flat, PageSelector::Range { start: 1, end: Some(5) });

        let nested: PageSelector =
            serde_json::from_str(r#"{"range": {"start": 2}}"#).unwrap();
        assert_eq!(nested, PageSelector::Range { start: 2, end: None });

        let list: PageSelector = serde_json::from_str(r#"{"pages": [1, 30, 31]}"#).unwrap();
        assert_eq!(list, PageSelector::Pages(vec![1, 30, 31]));
    }

    #[test]
    fn test_deserialize_rejects_reversed_range() {
        let result: Result<PageSelector, _> = serde_json::from_str(r#"{"start": 5, "end": 1}"#);
        assert!(result.is_err());
    }
}

//! Classify tool - Label document pages

use crate::args::{into_object, optional, required};
use crate::context::{ToolContext, TransportFactory};
use crate::error::ToolError;
use pagewise_capability::{ClassifyOptions, ContainerKind, PROVIDER_NAME};
use pagewise_domain::traits::PageTextSource;
use pagewise_domain::{ClassificationRecord, LabelSet, PageSelector};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Parameters for page classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyPagesParams {
    /// Local path of the document
    pub document_url: String,
    /// Allowed labels ("other" is always allowed)
    pub labels: LabelSet,
    /// Model override
    pub model: Option<String>,
    /// Pages to classify
    pub page_range: PageSelector,
}

impl ClassifyPagesParams {
    /// Unpack raw tool arguments.
    ///
    /// `labels` and `page_range` may arrive as JSON text.
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        let mut args = into_object(args)?;

        let document_url: String = required(&mut args, "document_url", None)?;
        let labels: Vec<String> = required(&mut args, "labels", Some(ContainerKind::Sequence))?;
        if labels.is_empty() {
            return Err(ToolError::invalid("labels", "at least one label is required"));
        }

        Ok(Self {
            document_url,
            labels: LabelSet::from(labels),
            model: optional(&mut args, "model", None)?,
            page_range: optional(&mut args, "page_range", Some(ContainerKind::Mapping))?
                .unwrap_or_default(),
        })
    }
}

/// Result of page classification
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyPagesResult {
    /// Validated page labels
    pub labels: Vec<ClassificationRecord>,
    /// Number of pages submitted
    pub total_pages: usize,
    /// Model used
    pub model: String,
    /// Provider name
    pub provider: &'static str,
}

/// Handle classify_pages tool invocation
///
/// Samples the selected pages and asks the model to label them.
///
/// # Arguments
///
/// * `ctx` - Tool context holding the provider and page source
/// * `args` - Raw arguments: `document_url`, `labels`, optional `model` and `page_range`
///
/// # Returns
///
/// Classification envelope, or an error when the provider or document is unusable
pub async fn handle_classify_pages<F, S>(
    ctx: &mut ToolContext<F, S>,
    args: Value,
) -> Result<ClassifyPagesResult, ToolError>
where
    F: TransportFactory,
    S: PageTextSource,
{
    let params = ClassifyPagesParams::from_args(args)?;

    ctx.ensure_ready()?;
    let path = ctx.open_document(&params.document_url)?;

    let pages = ctx
        .source()
        .page_samples(&path, &params.page_range)
        .map_err(|e| ToolError::Document(e.to_string()))?;

    let provider = ctx.provider();
    let model = params
        .model
        .clone()
        .unwrap_or_else(|| provider.config().model.clone());

    let options = ClassifyOptions::default().with_model(model.clone());
    let labels = provider.classify(&pages, &params.labels, options).await?;

    info!(
        "Classified {} of {} pages in {}",
        labels.len(),
        pages.len(),
        params.document_url
    );

    Ok(ClassifyPagesResult {
        labels,
        total_pages: pages.len(),
        model,
        provider: PROVIDER_NAME,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_from_structured_args() {
        let params = ClassifyPagesParams::from_args(json!({
            "document_url": "report.txt",
            "labels": ["income_statement", "balance_sheet"],
            "page_range": {"start": 2, "end": 4}
        }))
        .unwrap();

        assert_eq!(params.labels.labels(), ["income_statement", "balance_sheet"]);
        assert_eq!(params.page_range, PageSelector::range(2, Some(4)).unwrap());
        assert!(params.model.is_none());
    }

    #[test]
    fn test_params_from_string_args() {
        let params = ClassifyPagesParams::from_args(json!({
            "document_url": "report.txt",
            "labels": "[\"notes\"]",
            "page_range": "{\"start\": 3}",
            "model": "mistral-large-latest"
        }))
        .unwrap();

        assert_eq!(params.labels.labels(), ["notes"]);
        assert_eq!(params.page_range, PageSelector::range(3, None).unwrap());
        assert_eq!(params.model.as_deref(), Some("mistral-large-latest"));
    }

    #[test]
    fn test_params_default_to_all_pages() {
        let params = ClassifyPagesParams::from_args(json!({
            "document_url": "report.txt",
            "labels": ["notes"],
            "page_range": null
        }))
        .unwrap();
        assert_eq!(params.page_range, PageSelector::All);
    }

    #[test]
    fn test_params_rejections() {
        let cases = [
            (json!({"labels": ["a"]}), "document_url"),
            (json!({"document_url": "r.txt"}), "labels"),
            (json!({"document_url": "r.txt", "labels": []}), "labels"),
            (json!({"document_url": "r.txt", "labels": "not json"}), "labels"),
            (json!({"document_url": "r.txt", "labels": ["a"], "page_range": {"start": 0}}), "page_range"),
            (json!({"document_url": "r.txt", "labels": ["a"], "page_range": "1-5"}), "page_range"),
        ];

        for (args, expected) in cases {
            match ClassifyPagesParams::from_args(args) {
                Err(ToolError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("Expected InvalidParameter for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_result_serialization() {
        let result = ClassifyPagesResult {
            labels: vec![ClassificationRecord {
                page: 1,
                label: "notes".to_string(),
                confidence: 0.5,
            }],
            total_pages: 1,
            model: "pixtral-12b-2409".to_string(),
            provider: PROVIDER_NAME,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["labels"][0]["label"], "notes");
        assert_eq!(json["total_pages"], 1);
        assert_eq!(json["provider"], "mistral");
    }
}

//! Summarize tool - Per-page summaries

use crate::args::{into_object, optional, required};
use crate::context::{ToolContext, TransportFactory};
use crate::error::ToolError;
use pagewise_capability::{ContainerKind, SummarizeOptions, DEFAULT_SUMMARY_MAX_TOKENS, PROVIDER_NAME};
use pagewise_domain::traits::PageTextSource;
use pagewise_domain::{PageSelector, SummaryRecord, SummaryStyle};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Parameters for summarization
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeParams {
    /// Local path of the document
    pub document_url: String,
    /// Summary style; unknown tags fall back to bullet
    pub style: SummaryStyle,
    /// Pages to summarize
    pub page_range: PageSelector,
    /// Model override
    pub model: Option<String>,
    /// Token bound per page
    pub max_tokens: u32,
}

impl SummarizeParams {
    /// Unpack raw tool arguments
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        let mut args = into_object(args)?;

        let document_url: String = required(&mut args, "document_url", None)?;
        let style = optional::<String>(&mut args, "style", None)?
            .as_deref()
            .map(SummaryStyle::from_tag)
            .unwrap_or_default();
        let max_tokens = optional(&mut args, "max_tokens", None)?
            .unwrap_or(DEFAULT_SUMMARY_MAX_TOKENS);
        if max_tokens == 0 {
            return Err(ToolError::invalid("max_tokens", "must be greater than 0"));
        }

        Ok(Self {
            document_url,
            style,
            page_range: optional(&mut args, "page_range", Some(ContainerKind::Mapping))?
                .unwrap_or_default(),
            model: optional(&mut args, "model", None)?,
            max_tokens,
        })
    }
}

/// Result of summarization
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResult {
    /// One entry per page, in page order
    pub summaries: Vec<SummaryRecord>,
    /// Number of pages summarized
    pub total_pages: usize,
    /// Style used
    pub style: SummaryStyle,
    /// Model used
    pub model: String,
    /// Provider name
    pub provider: &'static str,
}

/// Handle summarize tool invocation
pub async fn handle_summarize<F, S>(
    ctx: &mut ToolContext<F, S>,
    args: Value,
) -> Result<SummarizeResult, ToolError>
where
    F: TransportFactory,
    S: PageTextSource,
{
    let params = SummarizeParams::from_args(args)?;

    ctx.ensure_ready()?;
    let path = ctx.open_document(&params.document_url)?;

    let pages = ctx
        .source()
        .page_texts(&path, &params.page_range)
        .map_err(|e| ToolError::Document(e.to_string()))?;

    let provider = ctx.provider();
    let model = params
        .model
        .clone()
        .unwrap_or_else(|| provider.config().summary_model.clone());

    let options = SummarizeOptions::default()
        .with_style(params.style)
        .with_model(model.clone())
        .with_max_tokens(params.max_tokens);
    let summaries = provider.summarize(&pages, options).await?;

    info!("Summarized {} pages of {}", summaries.len(), params.document_url);

    Ok(SummarizeResult {
        total_pages: pages.len(),
        summaries,
        style: params.style,
        model,
        provider: PROVIDER_NAME,
    })
}

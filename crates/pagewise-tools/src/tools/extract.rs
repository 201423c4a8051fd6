//! Extract tool - Pull structured fields from document pages

use crate::args::{into_object, optional, required};
use crate::context::{ToolContext, TransportFactory};
use crate::error::ToolError;
use pagewise_capability::{ContainerKind, ExtractOptions, PROVIDER_NAME};
use pagewise_domain::traits::PageTextSource;
use pagewise_domain::{ExtractedField, FieldSchema, PageSelector};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Parameters for field extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractFieldsParams {
    /// Local path of the document
    pub document_url: String,
    /// Fields to extract
    pub schema: FieldSchema,
    /// Pages to read
    pub page_filter: PageSelector,
    /// Model override
    pub model: Option<String>,
}

impl ExtractFieldsParams {
    /// Unpack raw tool arguments.
    ///
    /// `schema` and `page_filter` may arrive as JSON text.
    pub fn from_args(args: Value) -> Result<Self, ToolError> {
        let mut args = into_object(args)?;

        let document_url: String = required(&mut args, "document_url", None)?;
        let schema: FieldSchema = required(&mut args, "schema", Some(ContainerKind::Mapping))?;
        if schema.is_empty() {
            return Err(ToolError::invalid("schema", "at least one field is required"));
        }

        Ok(Self {
            document_url,
            schema,
            page_filter: optional(&mut args, "page_filter", Some(ContainerKind::Mapping))?
                .unwrap_or_default(),
            model: optional(&mut args, "model", None)?,
        })
    }
}

/// Result of field extraction
#[derive(Debug, Clone, Serialize)]
pub struct ExtractFieldsResult {
    /// Validated fields
    pub fields: Vec<ExtractedField>,
    /// Model-reported or degradation errors
    pub errors: Vec<String>,
    /// Number of pages sent to the model
    pub total_pages_processed: usize,
    /// Model used
    pub model: String,
    /// Provider name
    pub provider: &'static str,
}

/// Handle extract_fields tool invocation
///
/// Sends the full text of the selected pages with the field schema.
pub async fn handle_extract_fields<F, S>(
    ctx: &mut ToolContext<F, S>,
    args: Value,
) -> Result<ExtractFieldsResult, ToolError>
where
    F: TransportFactory,
    S: PageTextSource,
{
    let params = ExtractFieldsParams::from_args(args)?;

    ctx.ensure_ready()?;
    let path = ctx.open_document(&params.document_url)?;

    let pages = ctx
        .source()
        .page_texts(&path, &params.page_filter)
        .map_err(|e| ToolError::Document(e.to_string()))?;

    let provider = ctx.provider();
    let model = params
        .model
        .clone()
        .unwrap_or_else(|| provider.config().model.clone());

    let options = ExtractOptions::default().with_model(model.clone());
    let outcome = provider.extract(&params.schema, &pages, options).await?;

    if !outcome.errors.is_empty() {
        warn!(
            "Extraction from {} reported {} errors",
            params.document_url,
            outcome.errors.len()
        );
    }
    info!(
        "Extracted {} of {} fields from {}",
        outcome.fields.len(),
        params.schema.fields().len(),
        params.document_url
    );

    Ok(ExtractFieldsResult {
        fields: outcome.fields,
        errors: outcome.errors,
        total_pages_processed: pages.len(),
        model,
        provider: PROVIDER_NAME,
    })
}

//! Classify command implementation.

use super::{context, document_arg, parse_page_spec};
use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use pagewise_capability::ProviderConfig;
use pagewise_tools::handle_classify_pages;
use serde_json::{json, Value};
use tracing::debug;

/// Execute the classify command.
pub async fn execute_classify(
    args: ClassifyArgs,
    config: ProviderConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut tool_args = json!({
        "document_url": document_arg(&args.document)?,
        "labels": args.labels,
    });
    if let Some(pages) = &args.pages {
        tool_args["page_range"] = parse_page_spec(pages)?;
    }
    if let Some(model) = args.model {
        tool_args["model"] = Value::String(model);
    }

    debug!("Running classify with arguments: {}", tool_args);
    let mut ctx = context(config);
    let result = handle_classify_pages(&mut ctx, tool_args).await?;

    println!("{}", formatter.format_classification(&result)?);
    Ok(())
}

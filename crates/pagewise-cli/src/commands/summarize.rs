//! Summarize command implementation.

use super::{context, document_arg, parse_page_spec};
use crate::cli::SummarizeArgs;
use crate::error::Result;
use crate::output::Formatter;
use pagewise_capability::ProviderConfig;
use pagewise_tools::handle_summarize;
use serde_json::{json, Value};
use tracing::debug;

/// Execute the summarize command.
pub async fn execute_summarize(
    args: SummarizeArgs,
    config: ProviderConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut tool_args = json!({
        "document_url": document_arg(&args.document)?,
        "style": args.style,
        "max_tokens": args.max_tokens,
    });
    if let Some(pages) = &args.pages {
        tool_args["page_range"] = parse_page_spec(pages)?;
    }
    if let Some(model) = args.model {
        tool_args["model"] = Value::String(model);
    }

    debug!("Running summarize with arguments: {}", tool_args);
    let mut ctx = context(config);
    let result = handle_summarize(&mut ctx, tool_args).await?;

    println!("{}", formatter.format_summaries(&result)?);
    Ok(())
}

//! Extract command implementation.

use super::{context, document_arg, parse_page_spec};
use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use pagewise_capability::ProviderConfig;
use pagewise_tools::handle_extract_fields;
use serde_json::{json, Value};
use tracing::debug;
use std::fs;
use std::path::Path;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: ProviderConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut tool_args = json!({
        "document_url": document_arg(&args.document)?,
        "schema": schema_text(&args.schema)?,
    });
    if let Some(pages) = &args.pages {
        tool_args["page_filter"] = parse_page_spec(pages)?;
    }
    if let Some(model) = args.model {
        tool_args["model"] = Value::String(model);
    }

    debug!("Running extract with arguments: {}", tool_args);
    let mut ctx = context(config);
    let result = handle_extract_fields(&mut ctx, tool_args).await?;

    println!("{}", formatter.format_extraction(&result)?);
    Ok(())
}

/// Schema JSON text: file contents when `arg` names a file, else `arg` itself.
///
/// Parsing is left to the tool, which coerces JSON text into the schema.
fn schema_text(arg: &str) -> Result<String> {
    let path = Path::new(arg);
    if path.is_file() {
        Ok(fs::read_to_string(path)?)
    } else {
        Ok(arg.to_string())
    }
}

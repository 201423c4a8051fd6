//! Command implementations.

pub mod classify;
pub mod config;
pub mod extract;
pub mod summarize;

pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::summarize::execute_summarize;

use crate::error::{CliError, Result};
use pagewise_capability::ProviderConfig;
use pagewise_tools::{DocumentTextSource, MistralConnector, ToolContext};
use serde_json::{json, Value};
use std::path::Path;

/// Tool context used by every document command
pub type CliContext = ToolContext<MistralConnector, DocumentTextSource>;

/// Build a context over PDF or text documents and the Mistral API
pub fn context(config: ProviderConfig) -> CliContext {
    ToolContext::new(config, MistralConnector, DocumentTextSource)
}

/// Parse a page spec into a page selector argument.
///
/// Accepts `"3"`, `"2-5"`, `"4-"` and `"1,3,7"`.
pub fn parse_page_spec(spec: &str) -> Result<Value> {
    let spec = spec.trim();
    let invalid = || CliError::InvalidInput(format!("Invalid page spec '{}'", spec));
    let page = |s: &str| s.trim().parse::<u32>().map_err(|_| invalid());

    if let Some((start, end)) = spec.split_once('-') {
        let start = page(start)?;
        if end.trim().is_empty() {
            return Ok(json!({"start": start}));
        }
        return Ok(json!({"start": start, "end": page(end)?}));
    }

    let pages = spec.split(',').map(page).collect::<Result<Vec<u32>>>()?;
    Ok(json!({"pages": pages}))
}

pub(crate) fn document_arg(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| CliError::InvalidInput(format!("Non-UTF-8 path: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_spec() {
        assert_eq!(parse_page_spec("3").unwrap(), json!({"pages": [3]}));
        assert_eq!(parse_page_spec("1,3, 7").unwrap(), json!({"pages": [1, 3, 7]}));
        assert_eq!(parse_page_spec("2-5").unwrap(), json!({"start": 2, "end": 5}));
        assert_eq!(parse_page_spec("4-").unwrap(), json!({"start": 4}));
    }

    #[test]
    fn test_parse_page_spec_rejects_garbage() {
        for spec in ["", "a", "1-b", "-3", "1,,2"] {
            assert!(
                matches!(parse_page_spec(spec), Err(CliError::InvalidInput(_))),
                "spec {:?} should be rejected",
                spec
            );
        }
    }
}

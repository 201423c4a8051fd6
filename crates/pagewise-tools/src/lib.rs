//! Pagewise Tool Handlers
//!
//! Boundary layer between loosely-typed tool invocations and the capability
//! provider. Each handler accepts raw JSON arguments, coerces structured
//! parameters that may arrive as JSON text, resolves the page selection
//! against a [`PageTextSource`](pagewise_domain::traits::PageTextSource),
//! and wraps the provider's result in a response envelope.
//!
//! Provides 3 tools:
//! - `classify_pages` - Label pages from short text samples
//! - `extract_fields` - Pull schema fields out of full page text
//! - `summarize` - Summarize each page independently
//!
//! # Example
//!
//! ```no_run
//! use pagewise_capability::ProviderConfig;
//! use pagewise_tools::{handle_classify_pages, DocumentTextSource, MistralConnector, ToolContext};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProviderConfig::default().with_env_overrides();
//! let mut ctx = ToolContext::new(config, MistralConnector, DocumentTextSource);
//!
//! let result = handle_classify_pages(&mut ctx, json!({
//!     "document_url": "annual-report.pdf",
//!     "labels": "[\"income_statement\", \"balance_sheet\"]",
//!     "page_range": {"start": 1, "end": 20}
//! })).await?;
//!
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod args;
mod context;
mod error;
mod pages;
mod tools;

pub use context::{MistralConnector, SharedTransport, ToolContext, TransportFactory};
pub use error::ToolError;
pub use pages::{
    DocumentTextSource, FormFeedTextSource, InMemoryPages, PageSourceError, PdfTextSource, PAGE_BREAK,
};
pub use tools::{
    handle_classify_pages, handle_extract_fields, handle_summarize, ClassifyPagesParams,
    ClassifyPagesResult, ExtractFieldsParams, ExtractFieldsResult, SummarizeParams,
    SummarizeResult,
};

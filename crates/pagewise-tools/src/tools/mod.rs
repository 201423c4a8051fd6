//! Tool implementations

mod classify;
mod extract;
mod summarize;

pub use classify::{handle_classify_pages, ClassifyPagesParams, ClassifyPagesResult};
pub use extract::{handle_extract_fields, ExtractFieldsParams, ExtractFieldsResult};
pub use summarize::{handle_summarize, SummarizeParams, SummarizeResult};

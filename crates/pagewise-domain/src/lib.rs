//! Pagewise Domain Layer
//!
//! Core data model for page-level document intelligence and the trait
//! interfaces for the collaborators this system does not own.
//!
//! ## Key Concepts
//!
//! - **PageRecord / PageSample**: per-page text handed to the model
//! - **LabelSet**: closed set of classification labels (plus `"other"`)
//! - **FieldSchema**: advisory description of fields to extract
//! - **ClassificationRecord / ExtractedField / SummaryRecord**: validated results
//! - **ChatRequest / ChatResponse**: the opaque transport exchange
//!
//! ## Architecture
//!
//! Nothing here performs I/O. Infrastructure implementations of
//! [`traits::ChatTransport`] and [`traits::PageTextSource`] live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod classification;
pub mod error;
pub mod extraction;
pub mod label;
pub mod page;
pub mod summary;
pub mod traits;

// Re-exports for convenience
pub use chat::{ChatChoice, ChatMessage, ChatOptions, ChatRequest, ChatResponse, ResponseFormat};
pub use classification::ClassificationRecord;
pub use error::DomainError;
pub use extraction::{ExtractedField, ExtractionOutcome, FieldSchema, FieldSource, FieldSpec};
pub use label::{LabelSet, OTHER_LABEL};
pub use page::{PageRecord, PageSample, PageSelector, SAMPLE_CHARS};
pub use summary::{SummaryRecord, SummaryStyle};

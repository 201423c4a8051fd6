//! Domain error types

use thiserror::Error;

/// Errors raised when constructing domain values from caller input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Field schema is malformed (empty or duplicate names)
    #[error("Invalid field schema: {0}")]
    InvalidSchema(String),

    /// Page selector is malformed (zero page, reversed range)
    #[error("Invalid page selector: {0}")]
    InvalidPageSelector(String),
}

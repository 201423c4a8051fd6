//! Pagewise CLI library.
//!
//! Command-line access to page classification, field extraction and
//! summarization over PDF documents, or text documents whose pages are
//! separated by form feeds (the output of `pdftotext`).

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::Formatter;

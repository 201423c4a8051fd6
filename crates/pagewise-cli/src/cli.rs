//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pagewise CLI - Classify, extract from and summarize document pages.
#[derive(Debug, Parser)]
#[command(name = "pagewise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.pagewise/config.toml)
    #[arg(short, long, global = true, env = "PAGEWISE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one line per result)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Label each page with one of the given categories
    Classify(ClassifyArgs),

    /// Extract schema fields from page text
    Extract(ExtractArgs),

    /// Summarize each page
    Summarize(SummarizeArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// PDF, or text with form-feed page breaks
    pub document: PathBuf,

    /// Allowed labels, comma separated ("other" is implicit)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub labels: Vec<String>,

    /// Pages to process: "3", "2-5", "4-" or "1,3,7"
    #[arg(short, long)]
    pub pages: Option<String>,

    /// Model override
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// PDF, or text with form-feed page breaks
    pub document: PathBuf,

    /// Field schema: a JSON file path or inline JSON text
    #[arg(short, long)]
    pub schema: String,

    /// Pages to process: "3", "2-5", "4-" or "1,3,7"
    #[arg(short, long)]
    pub pages: Option<String>,

    /// Model override
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the summarize command.
#[derive(Debug, Parser)]
pub struct SummarizeArgs {
    /// PDF, or text with form-feed page breaks
    pub document: PathBuf,

    /// Summary style: bullet, paragraph or executive
    #[arg(short, long, default_value = "bullet")]
    pub style: String,

    /// Pages to process: "3", "2-5", "4-" or "1,3,7"
    #[arg(short, long)]
    pub pages: Option<String>,

    /// Maximum tokens per page summary
    #[arg(long, default_value = "512")]
    pub max_tokens: u32,

    /// Model override
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (API key redacted)
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

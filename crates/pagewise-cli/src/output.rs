//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use colored::*;
use pagewise_tools::{ClassifyPagesResult, ExtractFieldsResult, SummarizeResult};
use serde::Serialize;
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format classification output.
    pub fn format_classification(&self, result: &ClassifyPagesResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(result),
            OutputFormat::Quiet => Ok(result
                .labels
                .iter()
                .map(|r| format!("{}\t{}", r.page, r.label))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if result.labels.is_empty() {
                    return Ok(self.colorize("No pages classified.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Page", "Label", "Confidence"]);
                for record in &result.labels {
                    builder.push_record([
                        record.page.to_string(),
                        record.label.clone(),
                        format!("{:.2}", record.confidence),
                    ]);
                }

                Ok(format!(
                    "{}\n{}",
                    self.table(builder),
                    self.footer(result.labels.len(), result.total_pages, &result.model)
                ))
            }
        }
    }

    /// Format extraction output.
    pub fn format_extraction(&self, result: &ExtractFieldsResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(result),
            OutputFormat::Quiet => Ok(result
                .fields
                .iter()
                .map(|f| format!("{}={}", f.name, render_value(&f.value)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut lines = Vec::new();

                if result.fields.is_empty() {
                    lines.push(self.colorize("No fields extracted.", "yellow"));
                } else {
                    let mut builder = Builder::default();
                    builder.push_record(["Field", "Value", "Confidence", "Source"]);
                    for field in &result.fields {
                        let source = match &field.source {
                            Some(s) => match s.line_idx {
                                Some(line) => format!("p{} l{}", s.page, line),
                                None => format!("p{}", s.page),
                            },
                            None => "-".to_string(),
                        };
                        builder.push_record([
                            field.name.clone(),
                            render_value(&field.value),
                            format!("{:.2}", field.confidence),
                            source,
                        ]);
                    }
                    lines.push(self.table(builder));
                }

                for error in &result.errors {
                    lines.push(self.warning(error));
                }
                lines.push(self.footer(
                    result.fields.len(),
                    result.total_pages_processed,
                    &result.model,
                ));

                Ok(lines.join("\n"))
            }
        }
    }

    /// Format summarization output.
    pub fn format_summaries(&self, result: &SummarizeResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => json(result),
            OutputFormat::Quiet => Ok(result
                .summaries
                .iter()
                .map(|s| s.summary.clone())
                .collect::<Vec<_>>()
                .join("\n\n")),
            OutputFormat::Table => {
                if result.summaries.is_empty() {
                    return Ok(self.colorize("No pages summarized.", "yellow"));
                }

                let sections: Vec<String> = result
                    .summaries
                    .iter()
                    .map(|s| {
                        let heading = self.colorize(&format!("Page {}", s.page), "cyan");
                        let body = if s.summary.starts_with("Error:") {
                            self.colorize(&s.summary, "red")
                        } else {
                            s.summary.clone()
                        };
                        format!("{}\n{}", heading, body)
                    })
                    .collect();

                Ok(format!(
                    "{}\n\n{}",
                    sections.join("\n\n"),
                    self.info(&format!("{} style, model {}", result.style, result.model))
                ))
            }
        }
    }

    /// Format a failed command.
    ///
    /// JSON output gets the error envelope with `message` as its `error`
    /// text; other formats get an error line plus any suggestion.
    pub fn format_failure(&self, message: &str, error: Option<&CliError>) -> String {
        match self.format {
            OutputFormat::Json => {
                let mut envelope = error
                    .map(CliError::to_envelope)
                    .unwrap_or_else(|| serde_json::json!({"type": "error"}));
                envelope["error"] = Value::String(message.to_string());
                serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| envelope.to_string())
            }
            OutputFormat::Table | OutputFormat::Quiet => {
                let mut lines = vec![self.error(message)];
                if let Some(suggestion) = error.and_then(CliError::suggestion) {
                    lines.push(self.info(&suggestion));
                }
                lines.join("\n")
            }
        }
    }

    /// Whether output is machine-readable JSON
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn footer(&self, results: usize, pages: usize, model: &str) -> String {
        self.info(&format!(
            "{} result(s) from {} page(s), model {}",
            results, pages, model
        ))
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

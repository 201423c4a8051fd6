//! System prompts for classification, extraction and summarization
//!
//! Every builder is a pure function of its parameters, so identical inputs
//! always yield byte-identical prompts.

use pagewise_domain::{FieldSchema, LabelSet, SummaryStyle, OTHER_LABEL};

/// Build the classification system prompt for `labels`
pub fn classification_prompt(labels: &LabelSet) -> String {
    let mut prompt = String::new();

    prompt.push_str(CLASSIFICATION_CONTEXT);
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Classify each page into exactly one of these labels: {}.\n",
        labels.labels().join(", ")
    ));
    prompt.push_str(&format!(
        "Use '{}' for pages that fit none of them.\n\n",
        OTHER_LABEL
    ));
    prompt.push_str(CLASSIFICATION_FORMAT);

    prompt
}

/// Build the extraction system prompt for `schema`
pub fn extraction_prompt(schema: &FieldSchema) -> String {
    let mut prompt = String::new();

    prompt.push_str("Extract the following fields from financial statement text:\n");
    if schema.is_empty() {
        prompt.push_str("- (no fields declared; report anything clearly labelled)\n");
    }
    for field in schema.fields() {
        prompt.push_str(&format!(
            "- {} (type: {}, pattern: {})\n",
            field.name,
            field.field_type,
            field.pattern.as_deref().unwrap_or("any")
        ));
    }
    prompt.push('\n');
    prompt.push_str(EXTRACTION_FORMAT);

    prompt
}

/// Build the summarization system prompt for `style`
pub fn summary_prompt(style: SummaryStyle) -> String {
    let instruction = match style {
        SummaryStyle::Bullet => "Create a concise bullet-point summary (3-5 points).",
        SummaryStyle::Paragraph => "Write a single paragraph summary (3-4 sentences).",
        SummaryStyle::Executive => "Provide an executive summary highlighting key insights.",
    };

    format!(
        "Summarize the following page content. {} \
         Focus on factual information and key data points. Avoid speculation.",
        instruction
    )
}

const CLASSIFICATION_CONTEXT: &str = "You are analyzing a company's annual report. \
The user message is a JSON array of pages, each with a page number (\"page\") \
and a short text sample (\"textSample\").";

const CLASSIFICATION_FORMAT: &str = r#"Return a JSON object with a single key "labels" holding one entry per page:
{"labels": [{"page": <int>, "label": <string>, "confidence": <float>}]}

Rules:
- Do not include EBITDA reconciliation pages under income_statement
- Multi-page sections should have the same label across consecutive pages
- Use the catch-all label for unclassifiable pages instead of guessing
- Confidence must be between 0.0 and 1.0
- Echo page numbers exactly as given

Return only the JSON object, no other text."#;

const EXTRACTION_FORMAT: &str = r#"The user message is a JSON array of pages, each with a page number ("page") and its text ("text").

Return a JSON object with exactly two keys:
{"fields": [{"name": <string>, "value": <typed value or null>, "confidence": <float>, "source": {"page": <int>, "lineIdx": <int, optional>}}], "errors": [<string>]}

Rules:
- Include every requested field; use null for a field you cannot find, never omit it
- Include a confidence score between 0.0 and 1.0
- Preserve data types: numbers as JSON numbers, dates as ISO-8601 strings
- Report the source page, and the line index when possible
- List any problems you encounter in "errors"

Return only the JSON object, no other text."#;

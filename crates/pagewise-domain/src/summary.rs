//! Page summaries and summary styles

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Summary of one page. A failed page carries an `"Error: ..."` summary
/// rather than disappearing from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Page number, echoed from the input
    pub page: u32,

    /// Summary text, or an error description
    pub summary: String,
}

/// Requested summary style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SummaryStyle {
    /// 3-5 bullet points
    #[default]
    Bullet,
    /// A single short paragraph
    Paragraph,
    /// Executive summary of key insights
    Executive,
}

impl SummaryStyle {
    /// Parse a style tag; unrecognized tags fall back to [`SummaryStyle::Bullet`]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "paragraph" => SummaryStyle::Paragraph,
            "executive" => SummaryStyle::Executive,
            _ => SummaryStyle::Bullet,
        }
    }

    /// Canonical tag
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStyle::Bullet => "bullet",
            SummaryStyle::Paragraph => "paragraph",
            SummaryStyle::Executive => "executive",
        }
    }
}

impl FromStr for SummaryStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for SummaryStyle {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

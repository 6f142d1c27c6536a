//! Resolved verse of the day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for citation or passage text that could not be resolved
pub const UNKNOWN: &str = "Unknown";

/// Citation and passage from a text-only source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseText {
    pub citation: String,
    pub passage: String,
}

impl VerseText {
    pub fn new(citation: impl Into<String>, passage: impl Into<String>) -> Self {
        Self {
            citation: citation.into(),
            passage: passage.into(),
        }
    }

    /// Both fields set to [`UNKNOWN`]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }

    /// True when both fields carry real text
    pub fn is_complete(&self) -> bool {
        !self.citation.trim().is_empty() && !self.passage.trim().is_empty()
    }
}

/// One resolved verse of the day, built once per strategy attempt
///
/// Fields are private so a record cannot change between resolution and
/// publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    citation: String,
    passage: String,
    image_url: Option<String>,
    date: NaiveDate,
}

impl VerseRecord {
    pub fn new(
        citation: impl Into<String>,
        passage: impl Into<String>,
        image_url: Option<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            citation: citation.into(),
            passage: passage.into(),
            image_url,
            date,
        }
    }

    /// Combine text from one source with an image from another
    pub fn from_parts(text: VerseText, image_url: Option<String>, date: NaiveDate) -> Self {
        Self::new(text.citation, text.passage, image_url, date)
    }

    pub fn citation(&self) -> &str {
        &self.citation
    }

    pub fn passage(&self) -> &str {
        &self.passage
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Publishable iff an image URL is present and non-empty
    ///
    /// Citation and passage may still be [`UNKNOWN`]; the Notion image block is
    /// the only part that cannot be filled with a placeholder.
    pub fn is_publishable(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

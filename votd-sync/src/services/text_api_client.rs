//! OurManna verse-of-the-day text API client
//!
//! Independent of the image provider. Returns citation and passage only:
//!
//! ```json
//! {"verse": {"details": {"text": "...", "reference": "John 3:16", "version": "NIV"}}}
//! ```

use crate::error::{SyncError, SyncResult};
use crate::http::HttpClient;
use crate::models::VerseText;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Daily verse endpoint
pub const OURMANNA_API_URL: &str = "https://beta.ourmanna.com/api/v1/get?format=json&order=daily";

#[derive(Debug, Deserialize)]
struct DailyVerseResponse {
    verse: Option<DailyVerse>,
}

#[derive(Debug, Deserialize)]
struct DailyVerse {
    details: Option<DailyVerseDetails>,
}

#[derive(Debug, Deserialize)]
struct DailyVerseDetails {
    text: Option<String>,
    reference: Option<String>,
}

/// Parse a daily-verse response body
///
/// Both `reference` and `text` must be present and non-blank.
pub fn parse_daily_verse(body: &str) -> SyncResult<VerseText> {
    let response: DailyVerseResponse = serde_json::from_str(body)
        .map_err(|e| SyncError::ParseMismatch(format!("Text API returned invalid JSON: {}", e)))?;

    let details = response
        .verse
        .and_then(|verse| verse.details)
        .ok_or_else(|| SyncError::ParseMismatch("Text API response has no verse details".to_string()))?;

    let text = VerseText::new(
        details.reference.unwrap_or_default().trim(),
        details.text.unwrap_or_default().trim(),
    );

    if !text.is_complete() {
        return Err(SyncError::ParseMismatch(
            "Text API returned incomplete data".to_string(),
        ));
    }

    Ok(text)
}

/// Client for the daily verse text API
#[derive(Clone)]
pub struct VerseTextApiClient {
    http: HttpClient,
    url: String,
}

impl VerseTextApiClient {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Fetch today's citation and passage
    pub async fn fetch_daily(&self, timeout: Duration) -> SyncResult<VerseText> {
        let body = self.http.get_text(&self.url, timeout).await?;
        let text = parse_daily_verse(&body)?;
        debug!(citation = %text.citation, "Text API verse received");
        Ok(text)
    }
}

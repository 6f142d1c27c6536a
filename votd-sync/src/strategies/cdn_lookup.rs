//! Tier 2: date-addressed CDN image plus verse-page text

use super::VerseStrategy;
use crate::error::{SyncError, SyncResult};
use crate::extractors::{extract_verse_text, TextExtractor};
use crate::http::HttpClient;
use crate::models::VerseRecord;
use crate::services::CdnImageLookup;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Probes today's CDN image variants and pairs the hit with text scraped from
/// the verse page
///
/// The CDN carries no text, so the page must still be reachable; text that
/// cannot be located there becomes `Unknown`.
pub struct CdnLookupStrategy {
    http: HttpClient,
    cdn: CdnImageLookup,
    page_url: String,
    text_extractor: TextExtractor,
}

impl CdnLookupStrategy {
    pub fn new(http: HttpClient, cdn: CdnImageLookup, page_url: impl Into<String>) -> Self {
        Self {
            http,
            cdn,
            page_url: page_url.into(),
            text_extractor: extract_verse_text,
        }
    }

    /// Replace the text extractor
    pub fn with_text_extractor(mut self, extractor: TextExtractor) -> Self {
        self.text_extractor = extractor;
        self
    }
}

#[async_trait]
impl VerseStrategy for CdnLookupStrategy {
    fn name(&self) -> &'static str {
        "cdn_lookup"
    }

    async fn fetch(&self, date: NaiveDate) -> SyncResult<VerseRecord> {
        let image_url = self.cdn.find_for_day(date).await.ok_or_else(|| {
            SyncError::ParseMismatch(format!("No CDN image published for {}", date))
        })?;

        let html = self
            .http
            .get_text(&self.page_url, self.http.config().page_timeout)
            .await?;
        let text = (self.text_extractor)(&html);

        Ok(VerseRecord::from_parts(text, Some(image_url), date))
    }
}

//! Tier 1: scrape the verse page

use super::VerseStrategy;
use crate::error::{SyncError, SyncResult};
use crate::extractors::{extract_verse_page, PageExtractor};
use crate::http::HttpClient;
use crate::models::VerseRecord;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Fetches the verse page and extracts image, citation and passage
///
/// Fails when the page has no recognizable verse image; missing text falls
/// back to the `Unknown` placeholder.
pub struct PageScrapeStrategy {
    http: HttpClient,
    page_url: String,
    extractor: PageExtractor,
}

impl PageScrapeStrategy {
    pub fn new(http: HttpClient, page_url: impl Into<String>) -> Self {
        Self {
            http,
            page_url: page_url.into(),
            extractor: extract_verse_page,
        }
    }

    /// Replace the markup extractor
    pub fn with_extractor(mut self, extractor: PageExtractor) -> Self {
        self.extractor = extractor;
        self
    }
}

#[async_trait]
impl VerseStrategy for PageScrapeStrategy {
    fn name(&self) -> &'static str {
        "page_scrape"
    }

    async fn fetch(&self, date: NaiveDate) -> SyncResult<VerseRecord> {
        let html = self
            .http
            .get_text(&self.page_url, self.http.config().page_timeout)
            .await?;

        let extract = (self.extractor)(&html);
        let image_url = extract
            .image_url
            .clone()
            .ok_or_else(|| SyncError::ParseMismatch("Could not find verse image".to_string()))?;

        Ok(VerseRecord::from_parts(
            extract.text_or_unknown(),
            Some(image_url),
            date,
        ))
    }
}

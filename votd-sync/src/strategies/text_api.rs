//! Tier 3: independent text API plus today's CDN image

use super::VerseStrategy;
use crate::error::{SyncError, SyncResult};
use crate::http::HttpClient;
use crate::models::VerseRecord;
use crate::services::{CdnImageLookup, VerseTextApiClient};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Takes citation and passage from the text API
///
/// The API never supplies an image, so today's CDN image is looked up
/// separately; without one the strategy fails.
pub struct TextApiStrategy {
    http: HttpClient,
    text_api: VerseTextApiClient,
    cdn: CdnImageLookup,
}

impl TextApiStrategy {
    pub fn new(http: HttpClient, text_api: VerseTextApiClient, cdn: CdnImageLookup) -> Self {
        Self { http, text_api, cdn }
    }
}

#[async_trait]
impl VerseStrategy for TextApiStrategy {
    fn name(&self) -> &'static str {
        "text_api"
    }

    async fn fetch(&self, date: NaiveDate) -> SyncResult<VerseRecord> {
        let text = self
            .text_api
            .fetch_daily(self.http.config().page_timeout)
            .await?;

        let image_url = self.cdn.find_for_day(date).await.ok_or_else(|| {
            SyncError::ParseMismatch("No image available for text API verse".to_string())
        })?;

        Ok(VerseRecord::from_parts(text, Some(image_url), date))
    }
}

//! Tier 4: last resort

use super::VerseStrategy;
use crate::error::{SyncError, SyncResult};
use crate::http::HttpClient;
use crate::models::{VerseRecord, VerseText};
use crate::services::{CdnImageLookup, VerseTextApiClient, NEIGHBOR_DAY_OFFSETS};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};

pub const DEFAULT_CITATION: &str = "Jeremiah 29:11 (NIV)";
pub const DEFAULT_PASSAGE: &str = "For I know the plans I have for you, declares the Lord, plans to prosper you and not to harm you, plans to give you hope and a future.";

/// Text from the API when it answers, otherwise a fixed verse; image from the
/// CDN for today or a nearby day
pub struct DegradedFallbackStrategy {
    http: HttpClient,
    text_api: VerseTextApiClient,
    cdn: CdnImageLookup,
    day_offsets: Vec<i64>,
}

impl DegradedFallbackStrategy {
    pub fn new(http: HttpClient, text_api: VerseTextApiClient, cdn: CdnImageLookup) -> Self {
        Self {
            http,
            text_api,
            cdn,
            day_offsets: NEIGHBOR_DAY_OFFSETS.to_vec(),
        }
    }

    pub fn default_text() -> VerseText {
        VerseText::new(DEFAULT_CITATION, DEFAULT_PASSAGE)
    }
}

#[async_trait]
impl VerseStrategy for DegradedFallbackStrategy {
    fn name(&self) -> &'static str {
        "degraded_fallback"
    }

    async fn fetch(&self, date: NaiveDate) -> SyncResult<VerseRecord> {
        let text = match self.text_api.fetch_daily(self.http.config().api_timeout).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Text API unavailable, using default verse");
                Self::default_text()
            }
        };

        let (offset, image_url) = self
            .cdn
            .find_near(date, &self.day_offsets)
            .await
            .ok_or_else(|| SyncError::ParseMismatch("No fallback image available".to_string()))?;

        if offset != 0 {
            info!(offset, "Using CDN image from a neighboring day");
        }

        Ok(VerseRecord::from_parts(text, Some(image_url), date))
    }
}

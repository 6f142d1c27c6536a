//! Verse fetch strategies
//!
//! Each strategy is one self-contained attempt to build a [`VerseRecord`] for
//! a date from a particular source. Strategies share nothing but the
//! [`HttpClient`] and never assume another one ran first.
//!
//! # Priority order
//! 1. **page_scrape** - verse page: image, citation and passage together
//! 2. **cdn_lookup** - date-addressed CDN image, text from the verse page
//! 3. **text_api** - OurManna text, image from the CDN
//! 4. **degraded_fallback** - any text, CDN image from a neighboring day

pub mod cdn_lookup;
pub mod degraded;
pub mod page_scrape;
pub mod text_api;

pub use cdn_lookup::CdnLookupStrategy;
pub use degraded::DegradedFallbackStrategy;
pub use page_scrape::PageScrapeStrategy;
pub use text_api::TextApiStrategy;

use crate::error::SyncResult;
use crate::http::HttpClient;
use crate::models::VerseRecord;
use crate::services::{CdnImageLookup, VerseTextApiClient, LIFECHURCH_CDN_BASE, OURMANNA_API_URL};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Verse-of-the-day page on bible.com
pub const VOTD_PAGE_URL: &str = "https://www.bible.com/verse-of-the-day";

/// One way of producing a verse record
#[async_trait]
pub trait VerseStrategy: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Build a record for `date`, or explain why not
    async fn fetch(&self, date: NaiveDate) -> SyncResult<VerseRecord>;
}

/// Endpoints the strategies read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseSources {
    pub votd_page_url: String,
    pub cdn_base_url: String,
    pub text_api_url: String,
}

impl Default for VerseSources {
    fn default() -> Self {
        Self {
            votd_page_url: VOTD_PAGE_URL.to_string(),
            cdn_base_url: LIFECHURCH_CDN_BASE.to_string(),
            text_api_url: OURMANNA_API_URL.to_string(),
        }
    }
}

/// The four tiers in priority order
pub fn default_chain(http: &HttpClient, sources: &VerseSources) -> Vec<Box<dyn VerseStrategy>> {
    let cdn = CdnImageLookup::new(http.clone(), sources.cdn_base_url.clone());
    let text_api = VerseTextApiClient::new(http.clone(), sources.text_api_url.clone());

    vec![
        Box::new(PageScrapeStrategy::new(http.clone(), sources.votd_page_url.clone())),
        Box::new(CdnLookupStrategy::new(
            http.clone(),
            cdn.clone(),
            sources.votd_page_url.clone(),
        )),
        Box::new(TextApiStrategy::new(http.clone(), text_api.clone(), cdn.clone())),
        Box::new(DegradedFallbackStrategy::new(http.clone(), text_api, cdn)),
    ]
}

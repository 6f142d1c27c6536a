//! Life.Church CDN image lookup
//!
//! Verse images are published under a filename derived from the date alone:
//! `{base}{prefix}YV_VOTD{YYYY}_{Month}_{DD}{Aspect}.jpg`. Nothing lists what
//! exists, so each candidate is probed with a HEAD request and the first hit
//! wins. Probe failures of any kind count as "not there".

use crate::dates::{month_name, offset_days, padded_day};
use crate::http::HttpClient;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use tracing::{debug, info};

/// Default CloudFront base for Life.Church verse images
pub const LIFECHURCH_CDN_BASE: &str = "https://d347bo4ltvvnaz.cloudfront.net/images/";

/// Path prefixes tried for each aspect, in order
pub const PATH_PREFIXES: [&str; 2] = ["", "preview/"];

/// Day offsets probed when today's image is missing
pub const NEIGHBOR_DAY_OFFSETS: [i64; 5] = [0, -1, 1, -2, 2];

/// Image aspect variants, in probe order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Square,
    Vertical,
}

impl Aspect {
    pub const ALL: [Aspect; 2] = [Aspect::Square, Aspect::Vertical];
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aspect::Square => write!(f, "Square"),
            Aspect::Vertical => write!(f, "Vertical"),
        }
    }
}

/// `YV_VOTD2025_March_05Vertical.jpg`
pub fn image_filename(date: NaiveDate, aspect: Aspect) -> String {
    format!(
        "YV_VOTD{}_{}_{}{}.jpg",
        date.year(),
        month_name(date),
        padded_day(date),
        aspect
    )
}

/// Every candidate URL for `date`: each aspect with each prefix
pub fn candidate_urls(base_url: &str, date: NaiveDate) -> Vec<String> {
    Aspect::ALL
        .iter()
        .flat_map(|aspect| {
            PATH_PREFIXES
                .iter()
                .map(move |prefix| format!("{}{}{}", base_url, prefix, image_filename(date, *aspect)))
        })
        .collect()
}

/// Date-addressed image lookup against the CDN
#[derive(Clone)]
pub struct CdnImageLookup {
    http: HttpClient,
    base_url: String,
}

impl CdnImageLookup {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// First existing image for `date`, if any
    pub async fn find_for_day(&self, date: NaiveDate) -> Option<String> {
        let timeout = self.http.config().probe_timeout;

        for url in candidate_urls(&self.base_url, date) {
            match self.http.exists(&url, timeout).await {
                Ok(true) => {
                    info!(url = %url, "Found CDN verse image");
                    return Some(url);
                }
                Ok(false) => debug!(url = %url, "CDN image not present"),
                Err(e) => debug!(url = %url, error = %e, "CDN probe failed"),
            }
        }

        None
    }

    /// First existing image across `offsets` days from `date`
    ///
    /// Returns the offset that matched along with the URL.
    pub async fn find_near(&self, date: NaiveDate, offsets: &[i64]) -> Option<(i64, String)> {
        for &offset in offsets {
            let Some(day) = offset_days(date, offset) else {
                continue;
            };
            if let Some(url) = self.find_for_day(day).await {
                return Some((offset, url));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_template() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(
            image_filename(date, Aspect::Vertical),
            "YV_VOTD2025_March_05Vertical.jpg"
        );
        assert_eq!(
            image_filename(date, Aspect::Square),
            "YV_VOTD2025_March_05Square.jpg"
        );
    }

    #[test]
    fn test_candidate_order() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let urls = candidate_urls("https://cdn.test/images/", date);

        assert_eq!(
            urls,
            vec![
                "https://cdn.test/images/YV_VOTD2025_December_25Square.jpg",
                "https://cdn.test/images/preview/YV_VOTD2025_December_25Square.jpg",
                "https://cdn.test/images/YV_VOTD2025_December_25Vertical.jpg",
                "https://cdn.test/images/preview/YV_VOTD2025_December_25Vertical.jpg",
            ]
        );
    }
}

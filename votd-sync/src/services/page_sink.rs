//! Publishing a resolved verse to Notion

use crate::error::{SyncError, SyncResult};
use crate::models::VerseRecord;
use crate::services::notion_blocks;
use crate::services::notion_client::NotionClient;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Destination for a resolved verse
#[async_trait]
pub trait PageUpdateSink: Send + Sync {
    async fn publish(&self, record: &VerseRecord) -> SyncResult<()>;
}

/// Which blocks a publish appends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishMode {
    /// Divider, dated heading, citation, passage quote and image
    #[default]
    Entry,
    /// Image block only
    ImageOnly,
}

impl FromStr for PublishMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" | "full" => Ok(PublishMode::Entry),
            "image-only" | "image_only" | "image" => Ok(PublishMode::ImageOnly),
            other => Err(format!(
                "unknown publish mode '{}' (expected 'entry' or 'image-only')",
                other
            )),
        }
    }
}

impl fmt::Display for PublishMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishMode::Entry => write!(f, "entry"),
            PublishMode::ImageOnly => write!(f, "image-only"),
        }
    }
}

/// Appends verses under a Notion page or block
pub struct NotionPageSink {
    client: NotionClient,
    target_id: String,
    mode: PublishMode,
    clear_first: bool,
}

impl NotionPageSink {
    pub fn new(client: NotionClient, target_id: impl Into<String>, mode: PublishMode) -> Self {
        Self {
            client,
            target_id: target_id.into(),
            mode,
            clear_first: false,
        }
    }

    /// Delete the target's existing children before each publish
    pub fn clear_before_publish(mut self, clear: bool) -> Self {
        self.clear_first = clear;
        self
    }
}

#[async_trait]
impl PageUpdateSink for NotionPageSink {
    async fn publish(&self, record: &VerseRecord) -> SyncResult<()> {
        let image_url = record
            .image_url()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| SyncError::PublishFailed("Verse record has no image URL".to_string()))?;

        let blocks = match self.mode {
            PublishMode::Entry => notion_blocks::verse_entry(record, image_url),
            PublishMode::ImageOnly => vec![notion_blocks::external_image(image_url)],
        };

        if self.clear_first {
            self.client.clear_children(&self.target_id).await?;
        }

        self.client.append_children(&self.target_id, blocks).await?;

        info!(
            target_block = %self.target_id,
            mode = %self.mode,
            citation = %record.citation(),
            "Verse published to Notion"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_mode_parsing() {
        assert_eq!("entry".parse::<PublishMode>(), Ok(PublishMode::Entry));
        assert_eq!("Image-Only".parse::<PublishMode>(), Ok(PublishMode::ImageOnly));
        assert_eq!("image_only".parse::<PublishMode>(), Ok(PublishMode::ImageOnly));
        assert!("banner".parse::<PublishMode>().is_err());
    }

    #[test]
    fn test_publish_mode_display_round_trips() {
        for mode in [PublishMode::Entry, PublishMode::ImageOnly] {
            assert_eq!(mode.to_string().parse::<PublishMode>(), Ok(mode));
        }
    }
}

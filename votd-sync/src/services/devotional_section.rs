//! One-time setup of a "Daily Devotionals" section on the target page

use crate::error::{SyncError, SyncResult};
use crate::services::notion_blocks;
use crate::services::notion_client::NotionClient;
use tracing::info;

/// Append the section header and return the id of its "Current Month" toggle
///
/// Point `TARGET_BLOCK_ID` at the returned id to collect verses inside it.
pub async fn create_devotional_section(client: &NotionClient, page_id: &str) -> SyncResult<String> {
    let created = client
        .append_children(page_id, notion_blocks::devotional_section())
        .await?;

    let toggle = created
        .into_iter()
        .find(|block| block.block_type == "toggle")
        .ok_or_else(|| {
            SyncError::PublishFailed("Notion response did not include the toggle block".to_string())
        })?;

    info!(page = %page_id, toggle = %toggle.id, "Devotional section created");
    Ok(toggle.id)
}

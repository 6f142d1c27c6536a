//! Notion block-tree API client
//!
//! Covers the three block operations the tool needs:
//! - `PATCH /blocks/{id}/children` append
//! - `GET /blocks/{id}/children` list, following `next_cursor`
//! - `DELETE /blocks/{id}`
//!
//! Every request carries the bearer token and the pinned `Notion-Version`.

use crate::error::{SyncError, SyncResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};
use url::form_urlencoded;

/// Public API root
pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

/// Page size requested when listing children
const PAGE_SIZE: u32 = 100;

/// One block as returned by the list and append endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    /// Remaining fields, including the type-specific payload
    #[serde(flatten)]
    pub content: Map<String, Value>,
}

impl BlockSummary {
    /// Concatenated `plain_text` of the block's rich text, if it has any
    pub fn plain_text(&self) -> Option<String> {
        let rich_text = self
            .content
            .get(&self.block_type)?
            .get("rich_text")?
            .as_array()?;

        Some(
            rich_text
                .iter()
                .filter_map(|span| span.get("plain_text").and_then(Value::as_str))
                .collect(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChildrenPage {
    #[serde(default)]
    results: Vec<BlockSummary>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

/// Authenticated Notion client
#[derive(Clone)]
pub struct NotionClient {
    http: HttpClient,
    token: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(http: HttpClient, token: impl Into<String>) -> Self {
        Self {
            http,
            token: token.into(),
            base_url: NOTION_API_BASE.to_string(),
        }
    }

    /// Point at a different API root (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_header("Authorization", format!("Bearer {}", self.token))
            .with_header("Notion-Version", NOTION_VERSION)
            .with_header("Content-Type", "application/json")
            .with_timeout(self.http.config().notion_timeout)
    }

    async fn execute(&self, request: HttpRequest) -> SyncResult<HttpResponse> {
        let method = request.method.clone();
        let url = request.url.clone();

        let response = self
            .http
            .send(self.authorize(request))
            .await
            .map_err(|e| SyncError::PublishFailed(e.to_string()))?;

        if !response.is_success() {
            warn!(%method, url = %url, status = response.status, "Notion API error");
            return Err(SyncError::PublishFailed(format!(
                "Notion API error {}: {}",
                response.status, response.body
            )));
        }

        Ok(response)
    }

    /// Append `children` under `parent_id` in one call
    ///
    /// Returns the created blocks as Notion reports them.
    pub async fn append_children(
        &self,
        parent_id: &str,
        children: Vec<Value>,
    ) -> SyncResult<Vec<BlockSummary>> {
        let url = format!("{}/blocks/{}/children", self.base_url, parent_id);
        let count = children.len();

        let response = self
            .execute(HttpRequest::patch(url).with_json(json!({ "children": children })))
            .await?;

        let page: ChildrenPage = response
            .json()
            .map_err(|e| SyncError::PublishFailed(format!("Unexpected append response: {}", e)))?;

        info!(parent = %parent_id, blocks = count, "Appended blocks to Notion");
        Ok(page.results)
    }

    /// All direct children of `parent_id`, across pages
    pub async fn list_children(&self, parent_id: &str) -> SyncResult<Vec<BlockSummary>> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let url = {
                let mut query = form_urlencoded::Serializer::new(String::new());
                query.append_pair("page_size", &PAGE_SIZE.to_string());
                if let Some(cursor) = &cursor {
                    query.append_pair("start_cursor", cursor);
                }
                format!(
                    "{}/blocks/{}/children?{}",
                    self.base_url,
                    parent_id,
                    query.finish()
                )
            };

            let response = self.execute(HttpRequest::get(url)).await?;
            let page: ChildrenPage = response
                .json()
                .map_err(|e| SyncError::PublishFailed(format!("Unexpected list response: {}", e)))?;

            blocks.extend(page.results);

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        debug!(parent = %parent_id, count = blocks.len(), "Listed Notion children");
        Ok(blocks)
    }

    pub async fn delete_block(&self, block_id: &str) -> SyncResult<()> {
        let url = format!("{}/blocks/{}", self.base_url, block_id);
        self.execute(HttpRequest::delete(url)).await?;
        Ok(())
    }

    /// Delete every child of `parent_id`
    ///
    /// Listing must succeed; individual delete failures are logged and
    /// skipped. Returns how many blocks were deleted.
    pub async fn clear_children(&self, parent_id: &str) -> SyncResult<usize> {
        let blocks = self.list_children(parent_id).await?;
        let mut deleted = 0;

        for block in &blocks {
            match self.delete_block(&block.id).await {
                Ok(()) => deleted += 1,
                Err(e) => warn!(block = %block.id, error = %e, "Failed to delete block"),
            }
        }

        info!(parent = %parent_id, deleted, total = blocks.len(), "Cleared Notion content");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_joins_spans() {
        let block: BlockSummary = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "type": "paragraph",
            "has_children": false,
            "paragraph": {
                "rich_text": [
                    {"type": "text", "plain_text": "Daily "},
                    {"type": "text", "plain_text": "Devotionals"}
                ]
            }
        }))
        .unwrap();

        assert_eq!(block.plain_text().as_deref(), Some("Daily Devotionals"));
    }

    #[test]
    fn test_plain_text_absent_for_media() {
        let block: BlockSummary = serde_json::from_value(json!({
            "id": "b2",
            "type": "image",
            "image": {"type": "external", "external": {"url": "https://img/x.jpg"}}
        }))
        .unwrap();

        assert!(!block.has_children);
        assert_eq!(block.plain_text(), None);
    }
}

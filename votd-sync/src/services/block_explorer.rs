//! Walk a page's block tree to find ids worth targeting

use crate::error::SyncResult;
use crate::services::notion_client::{BlockSummary, NotionClient};
use std::fmt::Write;

/// Text previews are cut to this many characters
const PREVIEW_CHARS: usize = 60;

/// A block and how deep it sits below the root
#[derive(Debug, Clone)]
pub struct BlockNode {
    pub depth: usize,
    pub block: BlockSummary,
}

/// Every block under `root_id`, depth-first in page order
pub async fn walk_blocks(client: &NotionClient, root_id: &str) -> SyncResult<Vec<BlockNode>> {
    let mut nodes = Vec::new();
    let mut stack: Vec<BlockNode> = client
        .list_children(root_id)
        .await?
        .into_iter()
        .rev()
        .map(|block| BlockNode { depth: 0, block })
        .collect();

    while let Some(node) = stack.pop() {
        if node.block.has_children {
            let children = client.list_children(&node.block.id).await?;
            stack.extend(children.into_iter().rev().map(|block| BlockNode {
                depth: node.depth + 1,
                block,
            }));
        }
        nodes.push(node);
    }

    Ok(nodes)
}

/// Indented listing with id, type, text preview and children flag
pub fn render_tree(nodes: &[BlockNode]) -> String {
    let mut out = String::new();
    let mut counters: Vec<usize> = Vec::new();

    for node in nodes {
        counters.truncate(node.depth + 1);
        counters.resize(node.depth + 1, 0);
        counters[node.depth] += 1;

        let indent = "  ".repeat(node.depth);
        let _ = writeln!(
            out,
            "{}[{}] {}",
            indent,
            counters[node.depth],
            node.block.block_type.to_uppercase()
        );
        let _ = writeln!(out, "{}    ID: {}", indent, node.block.id);
        if let Some(text) = node.block.plain_text().filter(|t| !t.is_empty()) {
            let preview: String = text.chars().take(PREVIEW_CHARS).collect();
            let ellipsis = if text.chars().count() > PREVIEW_CHARS { "..." } else { "" };
            let _ = writeln!(out, "{}    Content: {}{}", indent, preview, ellipsis);
        }
        let _ = writeln!(out, "{}    Has children: {}", indent, node.block.has_children);
        out.push('\n');
    }

    out
}

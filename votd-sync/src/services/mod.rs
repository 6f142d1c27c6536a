//! External service clients and the Notion publishing side
//!
//! - Verse sources: Life.Church CDN image lookup, OurManna text API
//! - Notion: block builders, API client, page sink, block explorer,
//!   devotional section setup

pub mod block_explorer;
pub mod cdn_client;
pub mod devotional_section;
pub mod notion_blocks;
pub mod notion_client;
pub mod page_sink;
pub mod text_api_client;

pub use block_explorer::{render_tree, walk_blocks, BlockNode};
pub use cdn_client::{Aspect, CdnImageLookup, LIFECHURCH_CDN_BASE, NEIGHBOR_DAY_OFFSETS};
pub use devotional_section::create_devotional_section;
pub use notion_client::{BlockSummary, NotionClient, NOTION_API_BASE, NOTION_VERSION};
pub use page_sink::{NotionPageSink, PageUpdateSink, PublishMode};
pub use text_api_client::{VerseTextApiClient, OURMANNA_API_URL};

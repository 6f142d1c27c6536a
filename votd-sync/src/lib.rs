//! votd-sync library interface
//!
//! Resolves the verse of the day through an ordered chain of fetch
//! strategies and publishes it to a Notion page. Exposed as a library so the
//! integration tests can drive the resolver and the Notion sink over a
//! scripted transport.

pub mod config;
pub mod dates;
pub mod error;
pub mod extractors;
pub mod http;
pub mod models;
pub mod resolver;
pub mod services;
pub mod strategies;
pub mod sync;

pub use crate::error::{SyncError, SyncResult};
pub use crate::http::{HttpClient, HttpConfig, HttpTransport};
pub use crate::models::{VerseRecord, VerseText};
pub use crate::resolver::{is_publishable, VerseResolver};
pub use crate::sync::{sync_verse_of_the_day, sync_verse_on};

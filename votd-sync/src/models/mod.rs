//! Data models for votd-sync

pub mod verse_record;

pub use verse_record::{VerseRecord, VerseText, UNKNOWN};

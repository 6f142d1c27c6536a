//! Markup extractors
//!
//! Pure functions from raw response text to structured fields. Strategies
//! hold them as plain `fn` pointers so tests can run them against fixed
//! fixtures or swap them out entirely.

pub mod verse_page;

pub use verse_page::{
    extract_verse_page, extract_verse_text, PageExtractor, TextExtractor, VersePageExtract,
};

//! # votd common library
//!
//! Shared code for the verse-of-the-day tools:
//! - Error and result types
//! - TOML configuration loading and config-file resolution
//! - `.env` file maintenance

pub mod config;
pub mod error;

pub use error::{Error, Result};

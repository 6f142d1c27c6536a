//! Error types for votd-sync
//!
//! `SourceUnavailable` and `ParseMismatch` stay inside a single strategy and
//! only move the resolver on to the next one. `ResolutionFailed` and
//! `PublishFailed` end the run.

use thiserror::Error;

/// Sync error type
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network failure, timeout or non-success HTTP status from a source
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Expected markup or field not present in a source response
    #[error("Parse mismatch: {0}")]
    ParseMismatch(String),

    /// Every strategy failed or produced an unusable record
    #[error("All {attempted} verse strategies failed")]
    ResolutionFailed { attempted: usize },

    /// Notion rejected the request or could not be reached
    #[error("Publish failed: {0}")]
    PublishFailed(String),
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

//! Verse resolver
//!
//! Runs the strategy chain in priority order and returns the first record
//! that passes [`is_publishable`]. Strategy errors and unusable records are
//! logged and skipped; nothing is retried. Only running out of strategies is
//! reported to the caller.

use crate::dates::today_utc;
use crate::error::{SyncError, SyncResult};
use crate::http::HttpClient;
use crate::models::VerseRecord;
use crate::strategies::{default_chain, VerseSources, VerseStrategy};
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

/// Validation gate: a record is usable iff it carries a non-empty image URL
///
/// Citation and passage are deliberately not checked; `Unknown` text with an
/// image still publishes.
pub fn is_publishable(record: &VerseRecord) -> bool {
    record.is_publishable()
}

/// Ordered fallback chain over verse sources
pub struct VerseResolver {
    strategies: Vec<Box<dyn VerseStrategy>>,
}

impl VerseResolver {
    pub fn new(strategies: Vec<Box<dyn VerseStrategy>>) -> Self {
        Self { strategies }
    }

    /// Resolver over the standard four-tier chain
    pub fn with_default_chain(http: &HttpClient, sources: &VerseSources) -> Self {
        Self::new(default_chain(http, sources))
    }

    /// Strategy names in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve today's (UTC) verse
    pub async fn resolve(&self) -> SyncResult<VerseRecord> {
        self.resolve_on(today_utc()).await
    }

    /// Resolve the verse for `date`
    pub async fn resolve_on(&self, date: NaiveDate) -> SyncResult<VerseRecord> {
        for strategy in &self.strategies {
            let name = strategy.name();
            debug!(strategy = name, %date, "Trying strategy");

            let candidate = match strategy.fetch(date).await {
                Ok(candidate) => candidate,
                Err(e) => {
                    warn!(strategy = name, error = %e, "Strategy failed");
                    continue;
                }
            };

            if is_publishable(&candidate) {
                info!(strategy = name, citation = %candidate.citation(), "Verse resolved");
                return Ok(candidate);
            }

            warn!(strategy = name, "Strategy returned invalid data (missing image_url)");
        }

        error!(attempted = self.strategies.len(), "All strategies failed to fetch verse");
        Err(SyncError::ResolutionFailed {
            attempted: self.strategies.len(),
        })
    }
}

// ============================================================================
// Mock Strategy for Testing
// ============================================================================

#[cfg(test)]
pub mod mock {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub enum MockOutcome {
        Record(VerseRecord),
        Fail,
    }

    /// Mock strategy that counts its invocations
    pub struct MockStrategy {
        pub name: &'static str,
        pub outcome: MockOutcome,
        pub calls: Arc<AtomicUsize>,
    }

    impl MockStrategy {
        pub fn returning(name: &'static str, record: VerseRecord) -> Self {
            Self {
                name,
                outcome: MockOutcome::Record(record),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing(name: &'static str) -> Self {
            Self {
                name,
                outcome: MockOutcome::Fail,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn call_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl VerseStrategy for MockStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _date: NaiveDate) -> SyncResult<VerseRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                MockOutcome::Record(record) => Ok(record.clone()),
                MockOutcome::Fail => Err(SyncError::SourceUnavailable("Mock failure".to_string())),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

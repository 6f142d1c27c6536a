//! One end-to-end run: resolve, then publish

use crate::dates::today_utc;
use crate::error::SyncResult;
use crate::models::VerseRecord;
use crate::resolver::VerseResolver;
use crate::services::PageUpdateSink;
use chrono::NaiveDate;
use tracing::info;

/// Resolve today's (UTC) verse and hand it to `sink`
pub async fn sync_verse_of_the_day(
    resolver: &VerseResolver,
    sink: &dyn PageUpdateSink,
) -> SyncResult<VerseRecord> {
    sync_verse_on(resolver, sink, today_utc()).await
}

/// Resolve the verse for `date` and hand it to `sink`
///
/// The sink is only called once a publishable record exists; a resolution
/// failure is returned untouched. Returns the record that was published.
pub async fn sync_verse_on(
    resolver: &VerseResolver,
    sink: &dyn PageUpdateSink,
    date: NaiveDate,
) -> SyncResult<VerseRecord> {
    let record = resolver.resolve_on(date).await?;

    info!(
        citation = %record.citation(),
        image = record.image_url().unwrap_or_default(),
        %date,
        "Publishing verse"
    );
    sink.publish(&record).await?;

    Ok(record)
}

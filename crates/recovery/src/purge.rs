//! Retention purge runner.

use crate::error::{RecoveryError, RecoveryResult};
use salvage_core::EntityTable;
use salvage_store::RecoveryStore;
use salvage_store::repos::PurgeRepo;
use time::{Duration, OffsetDateTime};

/// Hard-delete all rows across the participating tables whose `deleted_at`
/// age meets or exceeds `retention_days`. Returns the total row count
/// purged.
///
/// Tables are purged independently, no cross-table transaction: a failure
/// on one table leaves earlier purges in place and is reported via
/// [`RecoveryError::PurgeIncomplete`]; the failed tables are retried on
/// the next invocation. Safe to call repeatedly.
pub async fn purge_expired_records(
    store: &dyn RecoveryStore,
    retention_days: i64,
) -> RecoveryResult<u64> {
    if retention_days <= 0 {
        return Err(salvage_core::Error::InvalidRetention(retention_days).into());
    }

    let cutoff = OffsetDateTime::now_utc() - Duration::days(retention_days);
    let mut purged = 0;
    let mut failed = Vec::new();

    for table in EntityTable::ALL {
        match store.purge_expired(table, cutoff).await {
            Ok(count) => purged += count,
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "Purge failed for table");
                failed.push(table);
            }
        }
    }

    if failed.is_empty() {
        tracing::info!(purged, retention_days, "Retention purge complete");
        Ok(purged)
    } else {
        Err(RecoveryError::PurgeIncomplete { purged, failed })
    }
}

//! Retention purge repository trait.

use crate::error::StoreResult;
use async_trait::async_trait;
use salvage_core::EntityTable;
use time::OffsetDateTime;

/// Hard deletion of expired soft-deleted rows.
#[async_trait]
pub trait PurgeRepo: Send + Sync {
    /// Permanently delete rows in `table` whose `deleted_at` is at or
    /// before `cutoff` (inclusive boundary). Returns the number of rows
    /// removed. Irreversible; no soft-undo exists past this point.
    async fn purge_expired(&self, table: EntityTable, cutoff: OffsetDateTime)
    -> StoreResult<u64>;
}

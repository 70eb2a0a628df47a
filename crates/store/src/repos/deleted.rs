//! Deleted-record query repository trait.

use crate::error::StoreResult;
use crate::models::{DeletedRecordEnvelope, StoredRecord};
use async_trait::async_trait;
use salvage_core::EntityTable;
use uuid::Uuid;

/// Read-only queries over soft-deleted rows.
#[async_trait]
pub trait DeletedRecordRepo: Send + Sync {
    /// All soft-deleted rows in `table`, each wrapped with its full payload.
    ///
    /// No ordering guarantee; callers sort by `deleted_at` for display.
    async fn list_deleted(&self, table: EntityTable) -> StoreResult<Vec<DeletedRecordEnvelope>>;

    /// Fetch a single row regardless of its deletion state.
    async fn get_record(
        &self,
        table: EntityTable,
        id: Uuid,
    ) -> StoreResult<Option<StoredRecord>>;
}

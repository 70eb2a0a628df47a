//! Soft-delete repository trait.

use crate::error::StoreResult;
use async_trait::async_trait;
use salvage_core::EntityTable;
use time::OffsetDateTime;
use uuid::Uuid;

/// Current state of a row with respect to soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// `deleted_at IS NULL`.
    Active,
    /// `deleted_at` is set; the row is hidden from normal queries.
    Deleted,
}

/// Repository owning all writes to `deleted_at`.
///
/// Every write here touches exactly one row (or one reference-field group
/// for [`restore_dependents`]). Cascading across tables is the
/// orchestrator's job, layered above.
///
/// [`restore_dependents`]: SoftDeleteRepo::restore_dependents
#[async_trait]
pub trait SoftDeleteRepo: Send + Sync {
    /// Soft-delete a row by setting its `deleted_at` timestamp.
    ///
    /// Fails with `NotFound` if no row with that id exists in `table`.
    async fn soft_delete(
        &self,
        table: EntityTable,
        id: Uuid,
        deleted_at: OffsetDateTime,
    ) -> StoreResult<()>;

    /// Restore a row by clearing its `deleted_at` timestamp.
    ///
    /// Idempotent: restoring an already-active row is a no-op success.
    /// Fails with `NotFound` only if the row does not exist at all.
    async fn restore(&self, table: EntityTable, id: Uuid) -> StoreResult<()>;

    /// Restore every soft-deleted row in `child` whose `reference_field`
    /// equals `parent_id`. Returns the number of rows revived.
    ///
    /// `reference_field` must come from the static relationship edge table;
    /// it is interpolated into the statement.
    async fn restore_dependents(
        &self,
        child: EntityTable,
        reference_field: &str,
        parent_id: Uuid,
    ) -> StoreResult<u64>;

    /// Look up a row's soft-delete state. `None` means the row does not
    /// exist (never created, or already hard-purged).
    async fn record_status(
        &self,
        table: EntityTable,
        id: Uuid,
    ) -> StoreResult<Option<RecordStatus>>;
}

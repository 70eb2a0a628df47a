//! Deleted-record query gateway.
//!
//! The string-keyed boundary between the UI/RPC layer and the store. Table
//! names are parsed against the allow-list before any SQL is issued; an
//! unknown name fails closed with `UnsupportedTable`, never an unfiltered
//! dump.

use crate::error::RecoveryResult;
use salvage_core::EntityTable;
use salvage_store::RecoveryStore;
use salvage_store::models::DeletedRecordEnvelope;
use salvage_store::repos::DeletedRecordRepo;

/// List all soft-deleted records for a table named by the caller.
///
/// Results are sorted newest-deleted first for display; the store itself
/// makes no ordering guarantee.
pub async fn list_deleted_records(
    store: &dyn RecoveryStore,
    table_name: &str,
) -> RecoveryResult<Vec<DeletedRecordEnvelope>> {
    let table = EntityTable::parse(table_name)?;
    let mut records = store.list_deleted(table).await?;
    records.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
    Ok(records)
}

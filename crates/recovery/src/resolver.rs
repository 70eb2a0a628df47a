//! Relationship resolver.
//!
//! Given a record about to be restored, determines which soft-deleted
//! ancestors must be restored first to keep references consistent. Purely
//! read-only: lookups only, no writes.

use crate::error::RecoveryResult;
use salvage_core::{EntityTable, parent_edge};
use salvage_store::RecoveryStore;
use salvage_store::repos::DeletedRecordRepo;
use uuid::Uuid;

/// A parent record that must be restored before its child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRef {
    pub table: EntityTable,
    pub id: Uuid,
}

/// Resolve the soft-deleted ancestors of `record`, outermost first.
///
/// Walks the static edge table upward from `table`. The walk stops at the
/// first ancestor that is active, missing, or referenced by a null or
/// unparseable id; none of those conditions is an error (the schema allows
/// optional relations, and a parent may have been hard-purged). For an
/// `offer_details` row with a deleted offer and a deleted customer, the
/// result is `[customers, offers]`.
pub async fn resolve_restore_parents(
    store: &dyn RecoveryStore,
    table: EntityTable,
    record: &serde_json::Value,
) -> RecoveryResult<Vec<ParentRef>> {
    let mut chain = Vec::new();
    let mut current_table = table;
    let mut current_record = record.clone();

    while let Some(edge) = parent_edge(current_table) {
        let Some(parent_id) = reference_id(&current_record, edge.reference_field) else {
            break;
        };
        // A parent that no longer exists at all is tolerated; restoration
        // proceeds without it.
        let Some(parent) = store.get_record(edge.parent, parent_id).await? else {
            tracing::debug!(
                table = %edge.parent,
                id = %parent_id,
                "Referenced parent does not exist, skipping"
            );
            break;
        };
        if !parent.is_deleted() {
            break;
        }
        chain.push(ParentRef {
            table: edge.parent,
            id: parent_id,
        });
        current_table = edge.parent;
        current_record = parent.record;
    }

    // Outermost ancestor first, so restores run parent-before-child.
    chain.reverse();
    Ok(chain)
}

/// Extract a reference field from a record payload.
///
/// Uuids serialize as strings in the JSON payload; null or malformed
/// values resolve to `None`.
fn reference_id(record: &serde_json::Value, field: &str) -> Option<Uuid> {
    record
        .get(field)
        .and_then(|value| value.as_str())
        .and_then(|raw| Uuid::parse_str(raw).ok())
}

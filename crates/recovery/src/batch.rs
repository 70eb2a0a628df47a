//! Batch restore coordination.

use crate::error::RecoveryResult;
use crate::orchestrator::{RestoreOrchestrator, RestoreOutcome};
use salvage_core::EntityTable;
use salvage_store::models::DeletedRecordEnvelope;
use salvage_store::repos::DeletedRecordRepo;
use uuid::Uuid;

/// Result of one batch restore.
#[derive(Debug)]
pub struct BatchSummary {
    pub success_count: usize,
    pub fail_count: usize,
    /// Per-record outcomes, in selection order.
    pub outcomes: Vec<RestoreOutcome>,
    /// The refreshed deleted list for the table, newest-deleted first.
    pub remaining: Vec<DeletedRecordEnvelope>,
}

/// Applies the restore orchestrator to a selection of records.
///
/// Records are processed sequentially, never concurrently: two children
/// sharing a soft-deleted parent would otherwise race to restore it and
/// interleave their bookkeeping.
pub struct BatchCoordinator {
    orchestrator: RestoreOrchestrator,
}

impl BatchCoordinator {
    pub fn new(orchestrator: RestoreOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Restore every selected record, never aborting early on a failure.
    ///
    /// After the loop, refreshes the deleted list exactly once so callers
    /// can resynchronize displayed state regardless of how many individual
    /// operations failed.
    pub async fn restore_selected(
        &self,
        table: EntityTable,
        ids: &[Uuid],
    ) -> RecoveryResult<BatchSummary> {
        let mut outcomes = Vec::with_capacity(ids.len());
        let mut success_count = 0;
        let mut fail_count = 0;

        for &id in ids {
            match self.orchestrator.restore_record(table, id).await {
                Ok(outcome) => {
                    if outcome.success {
                        success_count += 1;
                    } else {
                        fail_count += 1;
                    }
                    outcomes.push(outcome);
                }
                Err(err) => {
                    // Even an infrastructure error on one record must not
                    // stop the remaining attempts.
                    tracing::warn!(table = %table, id = %id, error = %err, "Batch entry failed");
                    fail_count += 1;
                    outcomes.push(RestoreOutcome {
                        table,
                        record_id: id,
                        success: false,
                        restored_parents: Vec::new(),
                        restored_children: 0,
                        warnings: Vec::new(),
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        tracing::info!(
            table = %table,
            success_count,
            fail_count,
            "Batch restore finished"
        );

        let mut remaining = self.orchestrator.store().list_deleted(table).await?;
        remaining.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));

        Ok(BatchSummary {
            success_count,
            fail_count,
            outcomes,
            remaining,
        })
    }
}

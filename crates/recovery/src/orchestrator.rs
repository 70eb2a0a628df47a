//! Single-record restore orchestrator.

use crate::error::RecoveryResult;
use crate::resolver::{ParentRef, resolve_restore_parents};
use salvage_core::{EntityTable, child_edges};
use salvage_store::RecoveryStore;
use salvage_store::repos::{DeletedRecordRepo, RecordStatus, SoftDeleteRepo};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// A non-fatal condition recorded during a restore.
#[derive(Debug, Clone, Error)]
pub enum RestoreWarning {
    #[error("failed to restore parent {table} {id}: {reason}")]
    ParentRestore {
        table: EntityTable,
        id: Uuid,
        reason: String,
    },

    #[error("failed to restore dependent {table} rows of {parent_id}: {reason}")]
    ChildRestore {
        table: EntityTable,
        parent_id: Uuid,
        reason: String,
    },
}

/// Summary of one restore orchestration. Ephemeral; produced for the
/// caller's notification and discarded.
#[derive(Debug, Clone)]
pub struct RestoreOutcome {
    pub table: EntityTable,
    pub record_id: Uuid,
    /// Whether the target record itself was restored.
    pub success: bool,
    /// Parents revived before the target, outermost first.
    pub restored_parents: Vec<ParentRef>,
    /// Dependent child rows revived after the target.
    pub restored_children: u64,
    /// Non-fatal conditions encountered along the way.
    pub warnings: Vec<RestoreWarning>,
    /// Why the target restore failed, when `success` is false.
    pub error: Option<String>,
}

impl RestoreOutcome {
    fn failed(table: EntityTable, record_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            table,
            record_id,
            success: false,
            restored_parents: Vec::new(),
            restored_children: 0,
            warnings: Vec::new(),
            error: Some(reason.into()),
        }
    }
}

/// Sequences a single-record restore: resolve parents, restore them in
/// order, restore the target, then best-effort revive dependent children.
///
/// No automatic retries; a failed outcome is surfaced to the caller, who
/// may re-invoke the whole operation (every step is idempotent).
pub struct RestoreOrchestrator {
    store: Arc<dyn RecoveryStore>,
}

impl RestoreOrchestrator {
    pub fn new(store: Arc<dyn RecoveryStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn RecoveryStore> {
        &self.store
    }

    /// Restore one record.
    ///
    /// A missing target or a failed target restore yields a failed outcome
    /// (fatal for this record only); parent and child failures degrade to
    /// warnings. Infrastructure errors during resolution propagate as
    /// `Err`.
    pub async fn restore_record(
        &self,
        table: EntityTable,
        id: Uuid,
    ) -> RecoveryResult<RestoreOutcome> {
        let Some(target) = self.store.get_record(table, id).await? else {
            tracing::warn!(table = %table, id = %id, "Restore target not found");
            return Ok(RestoreOutcome::failed(
                table,
                id,
                format!("{table} row {id} not found"),
            ));
        };

        let parents = resolve_restore_parents(self.store.as_ref(), table, &target.record).await?;

        let mut restored_parents = Vec::new();
        let mut warnings = Vec::new();
        for parent in parents {
            // Re-check: an earlier restore in the same batch may already
            // have revived a shared parent.
            match self.store.record_status(parent.table, parent.id).await {
                Ok(Some(RecordStatus::Deleted)) => {
                    match self.store.restore(parent.table, parent.id).await {
                        Ok(()) => {
                            tracing::info!(
                                table = %parent.table,
                                id = %parent.id,
                                "Restored soft-deleted parent"
                            );
                            restored_parents.push(parent);
                        }
                        Err(err) => {
                            tracing::warn!(
                                table = %parent.table,
                                id = %parent.id,
                                error = %err,
                                "Parent restore failed, continuing"
                            );
                            warnings.push(RestoreWarning::ParentRestore {
                                table: parent.table,
                                id: parent.id,
                                reason: err.to_string(),
                            });
                        }
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warnings.push(RestoreWarning::ParentRestore {
                        table: parent.table,
                        id: parent.id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        // The target restore is the one fatal step.
        if let Err(err) = self.store.restore(table, id).await {
            tracing::warn!(table = %table, id = %id, error = %err, "Target restore failed");
            return Ok(RestoreOutcome {
                table,
                record_id: id,
                success: false,
                restored_parents,
                restored_children: 0,
                warnings,
                error: Some(err.to_string()),
            });
        }

        let mut restored_children = 0;
        for edge in child_edges(table).filter(|edge| edge.cascade_on_parent_restore) {
            match self
                .store
                .restore_dependents(edge.child, edge.reference_field, id)
                .await
            {
                Ok(count) => {
                    if count > 0 {
                        tracing::info!(
                            table = %edge.child,
                            parent_id = %id,
                            count,
                            "Restored dependent rows"
                        );
                    }
                    restored_children += count;
                }
                Err(err) => {
                    tracing::warn!(
                        table = %edge.child,
                        parent_id = %id,
                        error = %err,
                        "Dependent restore failed, continuing"
                    );
                    warnings.push(RestoreWarning::ChildRestore {
                        table: edge.child,
                        parent_id: id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(RestoreOutcome {
            table,
            record_id: id,
            success: true,
            restored_parents,
            restored_children,
            warnings,
            error: None,
        })
    }
}

//! Recovery orchestration error types.

use salvage_core::EntityTable;
use salvage_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the orchestration layer.
///
/// Non-fatal conditions (a parent or child that could not be revived) are
/// not errors; they are collected as [`RestoreWarning`]s on the outcome.
///
/// [`RestoreWarning`]: crate::orchestrator::RestoreWarning
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error(transparent)]
    Table(#[from] salvage_core::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The retention purge failed for some tables. Rows already purged
    /// stay purged (no cross-table transaction); the failed tables retry
    /// on the next invocation.
    #[error("purge incomplete: {purged} rows purged, failed tables: {failed:?}")]
    PurgeIncomplete {
        purged: u64,
        failed: Vec<EntityTable>,
    },
}

/// Result type for recovery operations.
pub type RecoveryResult<T> = std::result::Result<T, RecoveryError>;

//! Restore orchestration for the salvage recovery subsystem.
//!
//! This crate layers the cascading-restore logic over `salvage-store`:
//! - Deleted-record query gateway (allow-list enforced, display-sorted)
//! - Relationship resolver (parent-first ordering over the static edge table)
//! - Restore orchestrator (single record, best-effort cascades)
//! - Batch coordinator (sequential, partial-failure tolerant)
//! - Retention purge runner
//!
//! The store owns all writes to `deleted_at`; everything here decides
//! ordering and collects outcomes.

pub mod batch;
pub mod error;
pub mod gateway;
pub mod orchestrator;
pub mod purge;
pub mod resolver;

pub use batch::{BatchCoordinator, BatchSummary};
pub use error::{RecoveryError, RecoveryResult};
pub use gateway::list_deleted_records;
pub use orchestrator::{RestoreOrchestrator, RestoreOutcome, RestoreWarning};
pub use purge::purge_expired_records;
pub use resolver::{ParentRef, resolve_restore_parents};

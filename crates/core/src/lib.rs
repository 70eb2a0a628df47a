//! Core domain types and shared logic for the salvage recovery subsystem.
//!
//! This crate defines the canonical data model used across all other crates:
//! - The entity-table allow-list for soft-delete-enabled tables
//! - The static parent/child relationship edge table
//! - Database and retention configuration
//! - The core error type

pub mod config;
pub mod error;
pub mod table;

pub use config::{DatabaseConfig, PgSslMode, RecoveryConfig};
pub use error::{Error, Result};
pub use table::{EntityTable, RESTORE_EDGES, RelationshipEdge, child_edges, parent_edge};

/// Default retention window for soft-deleted rows, in days.
///
/// Rows whose `deleted_at` age meets or exceeds this window are eligible
/// for hard purge. The boundary is inclusive: a row deleted exactly
/// `DEFAULT_RETENTION_DAYS * 24h` ago is purged.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

//! Recovery store trait and the SQLite implementation.

use crate::error::{StoreError, StoreResult};
use crate::models::{DeletedRecordEnvelope, RecordRow, StoredRecord};
use crate::repos::{DeletedRecordRepo, PurgeRepo, RecordStatus, SoftDeleteRepo};
use async_trait::async_trait;
use salvage_core::EntityTable;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined recovery store trait.
#[async_trait]
pub trait RecoveryStore: SoftDeleteRepo + DeletedRecordRepo + PurgeRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> StoreResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> StoreResult<()>;
}

/// SQLite-based recovery store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Create a new SQLite store.
    pub async fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            // Foreign keys stay OFF: retention purge may remove a parent
            // while children survive, and restores must tolerate dangling
            // references.
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection
            // avoids persistent "database is locked" failures under test
            // concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn list_deleted_rows<T>(
        &self,
        table: EntityTable,
    ) -> StoreResult<Vec<DeletedRecordEnvelope>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + RecordRow + Serialize + Send + Unpin,
    {
        let sql = format!(
            "SELECT * FROM {} WHERE deleted_at IS NOT NULL",
            table.as_str()
        );
        let rows: Vec<T> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(DeletedRecordEnvelope::from_row).collect()
    }

    async fn fetch_record<T>(
        &self,
        table: EntityTable,
        id: uuid::Uuid,
    ) -> StoreResult<Option<StoredRecord>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + RecordRow + Serialize + Send + Unpin,
    {
        let sql = format!("SELECT * FROM {} WHERE id = ?", table.as_str());
        let row: Option<T> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(StoredRecord::from_row).transpose()
    }
}

#[async_trait]
impl RecoveryStore for SqliteStore {
    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Implement the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[async_trait]
    impl SoftDeleteRepo for SqliteStore {
        async fn soft_delete(
            &self,
            table: EntityTable,
            id: Uuid,
            deleted_at: OffsetDateTime,
        ) -> StoreResult<()> {
            let sql = format!("UPDATE {} SET deleted_at = ? WHERE id = ?", table.as_str());
            let result = sqlx::query(&sql)
                .bind(deleted_at)
                .bind(id)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!(
                    "{} row {} not found",
                    table, id
                )));
            }
            Ok(())
        }

        async fn restore(&self, table: EntityTable, id: Uuid) -> StoreResult<()> {
            // The UPDATE matches active rows too, so a repeat restore is a
            // no-op success and rows_affected == 0 means the row is gone.
            let sql = format!(
                "UPDATE {} SET deleted_at = NULL WHERE id = ?",
                table.as_str()
            );
            let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!(
                    "{} row {} not found",
                    table, id
                )));
            }
            Ok(())
        }

        async fn restore_dependents(
            &self,
            child: EntityTable,
            reference_field: &str,
            parent_id: Uuid,
        ) -> StoreResult<u64> {
            let sql = format!(
                "UPDATE {} SET deleted_at = NULL WHERE {} = ? AND deleted_at IS NOT NULL",
                child.as_str(),
                reference_field
            );
            let result = sqlx::query(&sql).bind(parent_id).execute(&self.pool).await?;
            Ok(result.rows_affected())
        }

        async fn record_status(
            &self,
            table: EntityTable,
            id: Uuid,
        ) -> StoreResult<Option<RecordStatus>> {
            let sql = format!("SELECT deleted_at FROM {} WHERE id = ?", table.as_str());
            let row: Option<(Option<OffsetDateTime>,)> = sqlx::query_as(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row.map(|(deleted_at,)| match deleted_at {
                Some(_) => RecordStatus::Deleted,
                None => RecordStatus::Active,
            }))
        }
    }

    #[async_trait]
    impl DeletedRecordRepo for SqliteStore {
        async fn list_deleted(
            &self,
            table: EntityTable,
        ) -> StoreResult<Vec<DeletedRecordEnvelope>> {
            match table {
                EntityTable::Customers => self.list_deleted_rows::<CustomerRow>(table).await,
                EntityTable::Contacts => self.list_deleted_rows::<ContactRow>(table).await,
                EntityTable::Offers => self.list_deleted_rows::<OfferRow>(table).await,
                EntityTable::OfferDetails => self.list_deleted_rows::<OfferDetailRow>(table).await,
                EntityTable::Tasks => self.list_deleted_rows::<TaskRow>(table).await,
                EntityTable::Users => self.list_deleted_rows::<UserRow>(table).await,
            }
        }

        async fn get_record(
            &self,
            table: EntityTable,
            id: Uuid,
        ) -> StoreResult<Option<StoredRecord>> {
            match table {
                EntityTable::Customers => self.fetch_record::<CustomerRow>(table, id).await,
                EntityTable::Contacts => self.fetch_record::<ContactRow>(table, id).await,
                EntityTable::Offers => self.fetch_record::<OfferRow>(table, id).await,
                EntityTable::OfferDetails => self.fetch_record::<OfferDetailRow>(table, id).await,
                EntityTable::Tasks => self.fetch_record::<TaskRow>(table, id).await,
                EntityTable::Users => self.fetch_record::<UserRow>(table, id).await,
            }
        }
    }

    #[async_trait]
    impl PurgeRepo for SqliteStore {
        async fn purge_expired(
            &self,
            table: EntityTable,
            cutoff: OffsetDateTime,
        ) -> StoreResult<u64> {
            let sql = format!(
                "DELETE FROM {} WHERE deleted_at IS NOT NULL AND deleted_at <= ?",
                table.as_str()
            );
            let result = sqlx::query(&sql).bind(cutoff).execute(&self.pool).await?;
            let purged = result.rows_affected();
            if purged > 0 {
                tracing::info!(table = %table, purged, "Purged expired soft-deleted rows");
            }
            Ok(purged)
        }
    }
}

/// SQLite schema (embedded).
///
/// References between tables are deliberately soft: no FOREIGN KEY
/// constraints, because retention purge may remove a parent ahead of its
/// children and restores must tolerate dangling ids.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT,
    phone TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_customers_deleted_at ON customers(deleted_at) WHERE deleted_at IS NOT NULL;

CREATE TABLE IF NOT EXISTS contacts (
    id BLOB PRIMARY KEY,
    customer_id BLOB,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_contacts_customer_id ON contacts(customer_id);
CREATE INDEX IF NOT EXISTS idx_contacts_deleted_at ON contacts(deleted_at) WHERE deleted_at IS NOT NULL;

CREATE TABLE IF NOT EXISTS offers (
    id BLOB PRIMARY KEY,
    customer_id BLOB,
    title TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'draft',
    total_amount_cents INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_offers_customer_id ON offers(customer_id);
CREATE INDEX IF NOT EXISTS idx_offers_deleted_at ON offers(deleted_at) WHERE deleted_at IS NOT NULL;

CREATE TABLE IF NOT EXISTS offer_details (
    id BLOB PRIMARY KEY,
    offer_id BLOB,
    description TEXT NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 1,
    unit_price_cents INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_offer_details_offer_id ON offer_details(offer_id);
CREATE INDEX IF NOT EXISTS idx_offer_details_deleted_at ON offer_details(deleted_at) WHERE deleted_at IS NOT NULL;

CREATE TABLE IF NOT EXISTS tasks (
    id BLOB PRIMARY KEY,
    title TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open',
    assignee_id BLOB,
    due_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_tasks_deleted_at ON tasks(deleted_at) WHERE deleted_at IS NOT NULL;

CREATE TABLE IF NOT EXISTS users (
    id BLOB PRIMARY KEY,
    email TEXT NOT NULL,
    display_name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_users_deleted_at ON users(deleted_at) WHERE deleted_at IS NOT NULL;
"#;

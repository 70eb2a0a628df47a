//! PostgreSQL-based recovery store implementation.

use crate::error::{StoreError, StoreResult};
use crate::models::{DeletedRecordEnvelope, RecordRow, StoredRecord};
use crate::repos::{DeletedRecordRepo, PurgeRepo, RecordStatus, SoftDeleteRepo};
use crate::store::RecoveryStore;
use async_trait::async_trait;
use salvage_core::EntityTable;
use salvage_core::config::PgSslMode;
use serde::Serialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow, PgSslMode as SqlxPgSslMode};
use sqlx::{FromRow, Pool, Postgres};
use std::str::FromStr;

/// PostgreSQL schema (embedded).
const POSTGRES_SCHEMA: &str = include_str!("postgres_schema.sql");

fn postgres_schema_statements(schema: &str) -> Vec<&str> {
    schema
        .split(';')
        .filter_map(|statement| {
            let trimmed = statement.trim();
            if trimmed.is_empty() {
                return None;
            }
            let has_sql = trimmed.lines().any(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with("--")
            });
            has_sql.then_some(trimmed)
        })
        .collect()
}

/// PostgreSQL-based recovery store.
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection URL.
    pub async fn from_url(url: &str, max_connections: u32) -> StoreResult<Self> {
        let opts = PgConnectOptions::from_str(url)?;
        Self::connect(opts, max_connections).await
    }

    /// Create a new PostgreSQL store from individual connection parameters.
    ///
    /// This allows credentials to be passed separately, enabling better
    /// secret management (e.g., passwords via environment variables).
    pub async fn from_params(
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
        database: &str,
        ssl_mode: Option<PgSslMode>,
        max_connections: u32,
    ) -> StoreResult<Self> {
        let mut opts = PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(database);

        if let Some(user) = username {
            opts = opts.username(user);
        }

        if let Some(pass) = password {
            opts = opts.password(pass);
        }

        if let Some(mode) = ssl_mode {
            let sqlx_mode = match mode {
                PgSslMode::Disable => SqlxPgSslMode::Disable,
                PgSslMode::Prefer => SqlxPgSslMode::Prefer,
                PgSslMode::Require => SqlxPgSslMode::Require,
            };
            opts = opts.ssl_mode(sqlx_mode);
        }

        // Log connection info without password
        tracing::info!(
            host = host,
            port = port,
            database = database,
            "Connecting to PostgreSQL"
        );

        Self::connect(opts, max_connections).await
    }

    async fn connect(opts: PgConnectOptions, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    async fn list_deleted_rows<T>(
        &self,
        table: EntityTable,
    ) -> StoreResult<Vec<DeletedRecordEnvelope>>
    where
        T: for<'r> FromRow<'r, PgRow> + RecordRow + Serialize + Send + Unpin,
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
        T: for<'r> FromRow<'r, PgRow> + RecordRow + Serialize + Send + Unpin,
    {
        let sql = format!("SELECT * FROM {} WHERE id = $1", table.as_str());
        let row: Option<T> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(StoredRecord::from_row).transpose()
    }
}

#[async_trait]
impl RecoveryStore for PostgresStore {
    async fn migrate(&self) -> StoreResult<()> {
        for statement in postgres_schema_statements(POSTGRES_SCHEMA) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

mod postgres_impl {
    use super::*;
    use crate::models::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[async_trait]
    impl SoftDeleteRepo for PostgresStore {
        async fn soft_delete(
            &self,
            table: EntityTable,
            id: Uuid,
            deleted_at: OffsetDateTime,
        ) -> StoreResult<()> {
            let sql = format!("UPDATE {} SET deleted_at = $1 WHERE id = $2", table.as_str());
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
            let sql = format!(
                "UPDATE {} SET deleted_at = NULL WHERE id = $1",
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
                "UPDATE {} SET deleted_at = NULL WHERE {} = $1 AND deleted_at IS NOT NULL",
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
            let sql = format!("SELECT deleted_at FROM {} WHERE id = $1", table.as_str());
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
    impl DeletedRecordRepo for PostgresStore {
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
    impl PurgeRepo for PostgresStore {
        async fn purge_expired(
            &self,
            table: EntityTable,
            cutoff: OffsetDateTime,
        ) -> StoreResult<u64> {
            let sql = format!(
                "DELETE FROM {} WHERE deleted_at IS NOT NULL AND deleted_at <= $1",
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

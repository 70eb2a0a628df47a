//! Soft-delete store abstraction and implementations for salvage.
//!
//! This crate provides the persistence layer of the recovery subsystem:
//! - Typed row models for every soft-delete-enabled table
//! - Repository traits for soft delete, deleted-record queries, and purge
//! - SQLite and PostgreSQL implementations over `sqlx`
//!
//! The store owns all writes to `deleted_at`. Cascading decisions live a
//! layer above, in `salvage-recovery`.

pub mod error;
pub mod models;
pub mod postgres;
pub mod repos;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use postgres::PostgresStore;
pub use store::{RecoveryStore, SqliteStore};

use salvage_core::config::DatabaseConfig;
use std::sync::Arc;

/// Create a recovery store from configuration.
pub async fn from_config(config: &DatabaseConfig) -> StoreResult<Arc<dyn RecoveryStore>> {
    match config {
        DatabaseConfig::Sqlite { path } => {
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn RecoveryStore>)
        }
        DatabaseConfig::Postgres {
            url,
            host,
            port,
            username,
            password,
            database,
            ssl_mode,
            max_connections,
        } => {
            let store = if let Some(url) = url {
                // URL takes precedence when both forms are provided
                tracing::info!("Connecting to PostgreSQL using connection URL");
                PostgresStore::from_url(url, *max_connections).await?
            } else if let (Some(host), Some(database)) = (host.as_ref(), database.as_ref()) {
                PostgresStore::from_params(
                    host,
                    port.unwrap_or(5432),
                    username.as_deref(),
                    password.as_deref(),
                    database,
                    *ssl_mode,
                    *max_connections,
                )
                .await?
            } else {
                return Err(StoreError::Config(
                    "postgres requires either 'url' or both 'host' and 'database'".to_string(),
                ));
            };
            Ok(Arc::new(store) as Arc<dyn RecoveryStore>)
        }
    }
}

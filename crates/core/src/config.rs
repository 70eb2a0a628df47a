//! Configuration types shared across crates.

use crate::DEFAULT_RETENTION_DAYS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for the recovery subsystem.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Backing database.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Retention window in days for soft-deleted rows. Rows older than
    /// this are eligible for hard purge.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            retention_days: default_retention_days(),
        }
    }
}

impl RecoveryConfig {
    /// Validate configuration invariants.
    pub fn validate(&self) -> crate::Result<()> {
        if self.retention_days <= 0 {
            return Err(crate::Error::InvalidRetention(self.retention_days));
        }
        self.database.validate()
    }
}

fn default_retention_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}

/// SSL mode for PostgreSQL connections.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PgSslMode {
    Disable,
    Prefer,
    Require,
}

/// Database backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum DatabaseConfig {
    /// SQLite database (recommended for testing and small deployments only).
    Sqlite {
        /// Database file path.
        path: PathBuf,
    },
    /// PostgreSQL database.
    Postgres {
        /// Connection URL (optional if using individual fields).
        /// Takes precedence over individual fields if both are provided.
        url: Option<String>,
        /// Database host (e.g., "localhost" or "db.example.com").
        host: Option<String>,
        /// Database port (default: 5432).
        #[serde(default = "default_pg_port")]
        port: Option<u16>,
        /// Database username.
        username: Option<String>,
        /// Database password.
        /// WARNING: Prefer an environment variable over storing in config.
        password: Option<String>,
        /// Database name.
        database: Option<String>,
        /// SSL mode for connections.
        ssl_mode: Option<PgSslMode>,
        /// Maximum connections in the pool.
        #[serde(default = "default_max_connections")]
        max_connections: u32,
    },
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/salvage.db"),
        }
    }
}

impl DatabaseConfig {
    /// Validate database configuration invariants.
    pub fn validate(&self) -> crate::Result<()> {
        match self {
            DatabaseConfig::Sqlite { .. } => Ok(()),
            DatabaseConfig::Postgres {
                url,
                host,
                database,
                ..
            } => match (url.as_ref(), host.as_ref(), database.as_ref()) {
                (Some(_), _, _) => Ok(()),
                (None, Some(_), Some(_)) => Ok(()),
                _ => Err(crate::Error::Config(
                    "postgres requires either 'url' or both 'host' and 'database'".to_string(),
                )),
            },
        }
    }
}

fn default_pg_port() -> Option<u16> {
    Some(5432)
}

fn default_max_connections() -> u32 {
    10
}

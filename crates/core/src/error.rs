//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported table: {0}")]
    UnsupportedTable(String),

    #[error("invalid retention window: {0} days (must be positive)")]
    InvalidRetention(i64),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure at startup.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A persisted document body could not be decoded as JSON.
    #[error("stored document content is not valid JSON: {0}")]
    Content(#[from] serde_json::Error),

    /// IO error (preparing the database file location).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

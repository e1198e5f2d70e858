//! Store-layer error type
//!
//! `StoreError` wraps everything the document store can fail with and
//! converts into the HTTP-facing `AppError`, so handlers and managers can
//! propagate with `?`.

use shared::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Query or connection failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Embedded migrations failed to apply
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Document could not be (de)serialized
    #[error("malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Serialization(e) => {
                tracing::error!(error = %e, "Stored document does not match its model");
                AppError::internal(format!("Malformed document: {e}"))
            }
            other => AppError::database(other.to_string()),
        }
    }
}

/// Convenience type alias for store results
pub type StoreResult<T> = Result<T, StoreError>;

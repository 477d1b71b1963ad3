//! Database-specific error types and conversions.

use trainlog_core::error::TrainlogError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    /// A UNIQUE index rejected the write.
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl DbError {
    /// Classify a statement error surfaced by `Response::check`.
    pub(crate) fn from_statement(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            DbError::Duplicate(message)
        } else {
            DbError::Query(message)
        }
    }
}

impl From<DbError> for TrainlogError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => TrainlogError::NotFound { entity, id },
            DbError::Duplicate(reason) => TrainlogError::Conflict { reason },
            other => TrainlogError::Database(other.to_string()),
        }
    }
}

//! Error types for the training log.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TrainlogError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// The record exists but belongs to another user.
    #[error("Access denied: {entity} with id {id} is not owned by the caller")]
    Unauthorized { entity: String, id: String },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    #[error("Invalid credential: {reason}")]
    InvalidCredential { reason: String },

    #[error("External service failure: {0}")]
    ExternalService(String),

    #[error("Malformed external response: {0}")]
    MalformedExternalResponse(String),

    #[error("Unprocessable result: {0}")]
    Unprocessable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrainlogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    /// HTTP status the boundary layer reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::InvalidCredential { .. } => 401,
            Self::Unauthorized { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Unprocessable(_) => 422,
            Self::ExternalService(_) | Self::MalformedExternalResponse(_) => 502,
            Self::Database(_) | Self::Crypto(_) | Self::Internal(_) => 500,
        }
    }
}

pub type TrainlogResult<T> = Result<T, TrainlogError>;

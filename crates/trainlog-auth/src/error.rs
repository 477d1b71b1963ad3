//! Authentication error types.

use thiserror::Error;
use trainlog_core::error::TrainlogError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("missing bearer credential")]
    MissingCredential,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for TrainlogError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Crypto(msg) => TrainlogError::Crypto(msg),
            other => TrainlogError::InvalidCredential {
                reason: other.to_string(),
            },
        }
    }
}

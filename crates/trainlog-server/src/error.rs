//! Start-up errors.

use thiserror::Error;
use trainlog_core::error::TrainlogError;
use trainlog_db::DbError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenv::Error),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Trainlog(#[from] TrainlogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! SurrealDB repository implementations.

mod body_weight;
mod exercise;
mod menu;
mod user;
mod workout;

pub use body_weight::SurrealBodyWeightRepository;
pub use exercise::SurrealExerciseRepository;
pub use menu::SurrealMenuRepository;
pub use user::SurrealUserRepository;
pub use workout::SurrealWorkoutRepository;

use chrono::NaiveDate;
use surrealdb_types::SurrealValue;
use trainlog_core::models::DATE_FORMAT;
use uuid::Uuid;

use crate::error::DbError;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
pub(crate) struct CountRow {
    pub(crate) total: u64,
}

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::InvalidRecord(format!("invalid {field} UUID: {e}")))
}

pub(crate) fn parse_stored_date(value: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| DbError::InvalidRecord(format!("invalid date {value:?}: {e}")))
}

pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

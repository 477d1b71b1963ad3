//! Domain models for the training log.

pub mod body_weight;
pub mod exercise;
pub mod menu;
pub mod stats;
pub mod user;
pub mod workout;

use chrono::NaiveDate;

use crate::error::{TrainlogError, TrainlogResult};

/// Calendar-date wire format (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date in [`DATE_FORMAT`].
pub fn parse_date(value: &str) -> TrainlogResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| TrainlogError::validation(format!("invalid date: {value:?}")))
}

/// Format a calendar date in [`DATE_FORMAT`].
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

//! Input checks shared by the aggregate services.

use std::collections::HashSet;

use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::repository::ExerciseRepository;
use uuid::Uuid;

/// Trim `value` and require 1..=`max` characters.
pub(crate) fn bounded_name(value: &str, field: &str, max: usize) -> TrainlogResult<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > max {
        return Err(TrainlogError::validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text; blank becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn non_negative_weight(value: f64, field: &str) -> TrainlogResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TrainlogError::validation(format!(
            "{field} must be a non-negative number"
        )))
    }
}

pub(crate) fn positive(value: u32, field: &str) -> TrainlogResult<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(TrainlogError::validation(format!("{field} must be at least 1")))
    }
}

/// Every referenced exercise must be a preset or one of the caller's
/// customs.
pub(crate) async fn exercises_visible<E: ExerciseRepository>(
    exercises: &E,
    user_id: Uuid,
    referenced: impl IntoIterator<Item = Uuid>,
) -> TrainlogResult<()> {
    let visible: HashSet<Uuid> = exercises
        .list_visible(user_id)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();

    for id in referenced {
        if !visible.contains(&id) {
            return Err(TrainlogError::validation(format!("unknown exercise: {id}")));
        }
    }
    Ok(())
}

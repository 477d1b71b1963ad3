//! Read-only aggregates derived from workout history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::MuscleGroup;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MuscleGroupStat {
    pub muscle_group: MuscleGroup,
    /// Distinct workout dates with at least one set for the group.
    pub workout_count: u64,
    pub set_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalBest {
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub muscle_group: MuscleGroup,
    pub max_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub max_weight: f64,
    /// Sum of `weight * reps` for the day.
    pub total_volume: f64,
}

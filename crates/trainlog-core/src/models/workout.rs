//! Workout aggregate: a dated session owning an ordered list of sets.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::Exercise;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub id: Uuid,
    pub exercise_id: Uuid,
    /// 1-based.
    pub set_number: u32,
    pub weight: f64,
    pub reps: u32,
    /// Joined catalog entry.
    pub exercise: Option<Exercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub memo: Option<String>,
    pub sets: Vec<WorkoutSet>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetInput {
    pub exercise_id: Uuid,
    pub set_number: u32,
    pub weight: f64,
    pub reps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkout {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub memo: Option<String>,
    pub sets: Vec<SetInput>,
}

/// Full replacement of a workout's mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceWorkout {
    pub memo: Option<String>,
    pub sets: Vec<SetInput>,
}

/// One logged set joined with its workout date and exercise, as read
/// by the statistics engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetHistoryEntry {
    pub workout_id: Uuid,
    pub date: NaiveDate,
    pub exercise: Exercise,
    pub weight: f64,
    pub reps: u32,
}

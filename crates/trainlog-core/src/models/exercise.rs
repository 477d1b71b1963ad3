//! Exercise catalog model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TrainlogError;

/// Primary body region an exercise trains. Declaration order is the
/// catalog's sort order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Abs,
    Other,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Legs,
        MuscleGroup::Abs,
        MuscleGroup::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Abs => "abs",
            MuscleGroup::Other => "other",
        }
    }

    /// Human-readable label used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Other => "Other",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuscleGroup {
    type Err = TrainlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MuscleGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| TrainlogError::validation(format!("unknown muscle group: {s:?}")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: MuscleGroup,
    /// `false` for shared presets.
    pub is_custom: bool,
    /// Owning user; always `None` for presets.
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Presets are visible to everyone, customs only to their owner.
    pub fn is_visible_to(&self, user_id: Uuid) -> bool {
        !self.is_custom || self.user_id == Some(user_id)
    }
}

/// Input for a user-owned custom exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExercise {
    pub user_id: Uuid,
    pub name: String,
    pub muscle_group: MuscleGroup,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateExercise {
    pub name: String,
    pub muscle_group: MuscleGroup,
}

//! Workout aggregate service.
//!
//! A workout is always written together with its whole set list: create
//! inserts both atomically and update swaps the entire list, so set
//! identifiers do not survive an edit.

use chrono::{Datelike, NaiveDate};
use tracing::info;
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::parse_date;
use trainlog_core::models::workout::{CreateWorkout, ReplaceWorkout, SetInput, Workout};
use trainlog_core::ownership::ensure_owner;
use trainlog_core::repository::{ExerciseRepository, Pagination, WorkoutRepository};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::validate::{exercises_visible, non_negative_weight, optional_text, positive};

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// Create input; the date is the raw `YYYY-MM-DD` string.
#[derive(Debug, Clone)]
pub struct WorkoutInput {
    pub date: String,
    pub memo: Option<String>,
    pub sets: Vec<SetInput>,
}

#[derive(Debug, Clone)]
pub struct UpdateWorkoutInput {
    pub memo: Option<String>,
    pub sets: Vec<SetInput>,
}

#[derive(Debug, Clone)]
pub struct WorkoutPage {
    pub workouts: Vec<Workout>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

pub struct WorkoutService<W: WorkoutRepository, E: ExerciseRepository> {
    workouts: W,
    exercises: E,
    config: ServiceConfig,
}

impl<W: WorkoutRepository, E: ExerciseRepository> WorkoutService<W, E> {
    pub fn new(workouts: W, exercises: E, config: ServiceConfig) -> Self {
        Self {
            workouts,
            exercises,
            config,
        }
    }

    /// Fails `Conflict` if the owner already logged a workout that day.
    pub async fn create(&self, owner: Uuid, input: WorkoutInput) -> TrainlogResult<Workout> {
        let date = parse_date(&input.date)?;
        self.validate_sets(owner, &input.sets).await?;

        match self.workouts.get_by_user_and_date(owner, date).await {
            Ok(existing) => {
                return Err(TrainlogError::conflict(format!(
                    "a workout already exists for {date} ({})",
                    existing.id
                )));
            }
            Err(TrainlogError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let workout = self
            .workouts
            .create_with_sets(CreateWorkout {
                user_id: owner,
                date,
                memo: optional_text(input.memo),
                sets: input.sets,
            })
            .await?;
        info!(workout_id = %workout.id, %date, "Recorded workout");
        Ok(workout)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> TrainlogResult<Workout> {
        let workout = self.workouts.get_by_id(id).await?;
        ensure_owner(workout, owner)
    }

    pub async fn get_by_date(&self, owner: Uuid, date: &str) -> TrainlogResult<Workout> {
        let date = parse_date(date)?;
        self.workouts.get_by_user_and_date(owner, date).await
    }

    /// Date-descending page. `page < 1` reads as 1 and an out-of-range
    /// `per_page` falls back to the configured default.
    pub async fn list(&self, owner: Uuid, page: u64, per_page: u64) -> TrainlogResult<WorkoutPage> {
        let page = page.max(1);
        let per_page = if (1..=self.config.max_per_page).contains(&per_page) {
            per_page
        } else {
            self.config.default_per_page
        };

        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| TrainlogError::validation("page out of range"))?;

        let result = self
            .workouts
            .list_by_user(
                owner,
                Pagination {
                    offset,
                    limit: per_page,
                },
            )
            .await?;

        Ok(WorkoutPage {
            workouts: result.items,
            total: result.total,
            page,
            per_page,
            total_pages: result.total.div_ceil(per_page),
        })
    }

    /// All workouts in the calendar month, date ascending.
    pub async fn by_month(&self, owner: Uuid, year: i32, month: u32) -> TrainlogResult<Vec<Workout>> {
        let (from, until) = month_bounds(year, month)?;
        self.workouts.list_in_range(owner, from, until).await
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        input: UpdateWorkoutInput,
    ) -> TrainlogResult<Workout> {
        self.get(owner, id).await?;
        self.validate_sets(owner, &input.sets).await?;

        self.workouts
            .replace(
                id,
                ReplaceWorkout {
                    memo: optional_text(input.memo),
                    sets: input.sets,
                },
            )
            .await
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> TrainlogResult<()> {
        self.get(owner, id).await?;
        self.workouts.delete(id).await?;
        info!(workout_id = %id, "Deleted workout");
        Ok(())
    }

    async fn validate_sets(&self, owner: Uuid, sets: &[SetInput]) -> TrainlogResult<()> {
        if sets.is_empty() {
            return Err(TrainlogError::validation("a workout needs at least one set"));
        }
        for set in sets {
            positive(set.set_number, "set_number")?;
            positive(set.reps, "reps")?;
            non_negative_weight(set.weight, "weight")?;
        }
        exercises_visible(&self.exercises, owner, sets.iter().map(|s| s.exercise_id)).await
    }
}

/// `[first day of month, first day of next month)`.
fn month_bounds(year: i32, month: u32) -> TrainlogResult<(NaiveDate, NaiveDate)> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TrainlogError::validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    let from = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TrainlogError::validation("month must be between 1 and 12"))?;
    let until = if from.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| TrainlogError::Internal(format!("no month after {year}-{month}")))?;
    Ok((from, until))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_are_half_open() {
        let (from, until) = month_bounds(2024, 2).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(until, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn december_rolls_into_next_year() {
        let (_, until) = month_bounds(2023, 12).unwrap();
        assert_eq!(until, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn out_of_range_month_or_year_is_rejected() {
        for (year, month) in [(2024, 0), (2024, 13), (1999, 5), (2101, 1)] {
            assert!(
                matches!(month_bounds(year, month), Err(TrainlogError::Validation { .. })),
                "{year}-{month} should be rejected"
            );
        }
    }
}

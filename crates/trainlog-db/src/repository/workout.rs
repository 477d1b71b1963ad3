//! SurrealDB implementation of [`WorkoutRepository`].
//!
//! A workout and its sets live in two tables. Every write touching both
//! runs inside one `BEGIN TRANSACTION ... COMMIT TRANSACTION` block, and
//! reads assemble the aggregate from one query per table.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};
use trainlog_core::error::TrainlogResult;
use trainlog_core::models::workout::{
    CreateWorkout, ReplaceWorkout, SetHistoryEntry, SetInput, Workout, WorkoutSet,
};
use trainlog_core::repository::{PaginatedResult, Pagination, WorkoutRepository};
use uuid::Uuid;

use super::exercise::load_exercises;
use super::{CountRow, date_key, parse_stored_date, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct WorkoutRowWithId {
    record_id: String,
    user_id: String,
    date: String,
    memo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct SetRowWithId {
    record_id: String,
    workout_id: String,
    date: String,
    exercise_id: String,
    set_number: u32,
    weight: f64,
    reps: u32,
}

/// Bound into the `FOR` loop that inserts a set list.
#[derive(Debug, SurrealValue)]
struct NewSetRecord {
    id: String,
    exercise_id: String,
    position: u32,
    set_number: u32,
    weight: f64,
    reps: u32,
}

const INSERT_SETS: &str = "\
FOR $s IN $sets { \
    CREATE type::record('workout_set', $s.id) SET \
    workout_id = $id, user_id = $user_id, date = $date, \
    exercise_id = $s.exercise_id, position = $s.position, \
    set_number = $s.set_number, weight = $s.weight, reps = $s.reps; \
};";

fn new_set_records(sets: &[SetInput]) -> Vec<NewSetRecord> {
    sets.iter()
        .enumerate()
        .map(|(position, set)| NewSetRecord {
            id: Uuid::new_v4().to_string(),
            exercise_id: set.exercise_id.to_string(),
            position: position as u32,
            set_number: set.set_number,
            weight: set.weight,
            reps: set.reps,
        })
        .collect()
}

/// SurrealDB implementation of the Workout repository.
#[derive(Clone)]
pub struct SurrealWorkoutRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealWorkoutRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Attach ordered sets and their exercises to workout rows,
    /// preserving row order.
    async fn assemble(&self, rows: Vec<WorkoutRowWithId>) -> Result<Vec<Workout>, DbError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let workout_ids: Vec<String> = rows.iter().map(|r| r.record_id.clone()).collect();
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM workout_set \
                 WHERE workout_id IN $ids ORDER BY position ASC",
            )
            .bind(("ids", workout_ids))
            .await?;
        let set_rows: Vec<SetRowWithId> = result.take(0)?;

        let exercise_ids: BTreeSet<String> =
            set_rows.iter().map(|s| s.exercise_id.clone()).collect();
        let exercises = load_exercises(&self.db, exercise_ids.into_iter().collect()).await?;

        let mut sets_by_workout: HashMap<String, Vec<WorkoutSet>> = HashMap::new();
        for row in set_rows {
            let exercise_id = parse_uuid(&row.exercise_id, "exercise")?;
            sets_by_workout
                .entry(row.workout_id)
                .or_default()
                .push(WorkoutSet {
                    id: parse_uuid(&row.record_id, "workout_set")?,
                    exercise_id,
                    set_number: row.set_number,
                    weight: row.weight,
                    reps: row.reps,
                    exercise: exercises.get(&exercise_id).cloned(),
                });
        }

        rows.into_iter()
            .map(|row| {
                let sets = sets_by_workout.remove(&row.record_id).unwrap_or_default();
                Ok(Workout {
                    id: parse_uuid(&row.record_id, "workout")?,
                    user_id: parse_uuid(&row.user_id, "user")?,
                    date: parse_stored_date(&row.date)?,
                    memo: row.memo,
                    sets,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })
            })
            .collect()
    }
}

impl<C: Connection> WorkoutRepository for SurrealWorkoutRepository<C> {
    async fn create_with_sets(&self, input: CreateWorkout) -> TrainlogResult<Workout> {
        let id = Uuid::new_v4();
        let set_count = input.sets.len();

        self.db
            .query(format!(
                "BEGIN TRANSACTION; \
                 CREATE type::record('workout', $id) SET \
                 user_id = $user_id, date = $date, memo = $memo; \
                 {INSERT_SETS} \
                 COMMIT TRANSACTION;"
            ))
            .bind(("id", id.to_string()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("date", date_key(input.date)))
            .bind(("memo", input.memo))
            .bind(("sets", new_set_records(&input.sets)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        info!(workout_id = %id, set_count, "Created workout");
        self.get_by_id(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> TrainlogResult<Workout> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM type::record('workout', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<WorkoutRowWithId> = result.take(0).map_err(DbError::from)?;
        let workout = self
            .assemble(rows)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                entity: "workout".into(),
                id: id_str,
            })?;
        Ok(workout)
    }

    async fn get_by_user_and_date(&self, user_id: Uuid, date: NaiveDate) -> TrainlogResult<Workout> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM workout \
                 WHERE user_id = $user_id AND date = $date LIMIT 1",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("date", date_key(date)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<WorkoutRowWithId> = result.take(0).map_err(DbError::from)?;
        let workout = self
            .assemble(rows)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                entity: "workout".into(),
                id: format!("date={}", date_key(date)),
            })?;
        Ok(workout)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> TrainlogResult<PaginatedResult<Workout>> {
        let user_id_str = user_id.to_string();

        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM workout WHERE user_id = $user_id GROUP ALL")
            .bind(("user_id", user_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM workout \
                 WHERE user_id = $user_id ORDER BY date DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("user_id", user_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<WorkoutRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = self.assemble(rows).await?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_in_range(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        until: NaiveDate,
    ) -> TrainlogResult<Vec<Workout>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM workout \
                 WHERE user_id = $user_id AND date >= $from AND date < $until \
                 ORDER BY date ASC",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("from", date_key(from)))
            .bind(("until", date_key(until)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<WorkoutRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(self.assemble(rows).await?)
    }

    async fn replace(&self, id: Uuid, input: ReplaceWorkout) -> TrainlogResult<Workout> {
        let existing = self.get_by_id(id).await?;

        self.db
            .query(format!(
                "BEGIN TRANSACTION; \
                 UPDATE type::record('workout', $id) SET \
                 memo = $memo, updated_at = time::now(); \
                 DELETE workout_set WHERE workout_id = $id; \
                 {INSERT_SETS} \
                 COMMIT TRANSACTION;"
            ))
            .bind(("id", id.to_string()))
            .bind(("user_id", existing.user_id.to_string()))
            .bind(("date", date_key(existing.date)))
            .bind(("memo", input.memo))
            .bind(("sets", new_set_records(&input.sets)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        debug!(workout_id = %id, set_count = input.sets.len(), "Replaced workout sets");
        self.get_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> TrainlogResult<()> {
        self.db
            .query(
                "BEGIN TRANSACTION; \
                 DELETE workout_set WHERE workout_id = $id; \
                 DELETE type::record('workout', $id); \
                 COMMIT TRANSACTION;",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        info!(workout_id = %id, "Deleted workout");
        Ok(())
    }

    async fn set_history(
        &self,
        user_id: Uuid,
        exercise_id: Option<Uuid>,
    ) -> TrainlogResult<Vec<SetHistoryEntry>> {
        let query = match exercise_id {
            Some(_) => {
                "SELECT meta::id(id) AS record_id, * FROM workout_set \
                 WHERE user_id = $user_id AND exercise_id = $exercise_id \
                 ORDER BY date ASC, position ASC"
            }
            None => {
                "SELECT meta::id(id) AS record_id, * FROM workout_set \
                 WHERE user_id = $user_id ORDER BY date ASC, position ASC"
            }
        };

        let mut result = self
            .db
            .query(query)
            .bind(("user_id", user_id.to_string()))
            .bind(("exercise_id", exercise_id.map(|e| e.to_string())))
            .await
            .map_err(DbError::from)?;
        let set_rows: Vec<SetRowWithId> = result.take(0).map_err(DbError::from)?;

        let exercise_ids: BTreeSet<String> =
            set_rows.iter().map(|s| s.exercise_id.clone()).collect();
        let exercises = load_exercises(&self.db, exercise_ids.into_iter().collect()).await?;

        let mut history = Vec::with_capacity(set_rows.len());
        for row in set_rows {
            let exercise_id = parse_uuid(&row.exercise_id, "exercise")?;
            let Some(exercise) = exercises.get(&exercise_id) else {
                continue;
            };
            history.push(SetHistoryEntry {
                workout_id: parse_uuid(&row.workout_id, "workout")?,
                date: parse_stored_date(&row.date)?,
                exercise: exercise.clone(),
                weight: row.weight,
                reps: row.reps,
            });
        }
        Ok(history)
    }
}

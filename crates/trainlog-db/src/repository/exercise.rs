//! SurrealDB implementation of [`ExerciseRepository`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use trainlog_core::error::TrainlogResult;
use trainlog_core::models::exercise::{CreateExercise, Exercise, MuscleGroup, UpdateExercise};
use trainlog_core::repository::ExerciseRepository;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ExerciseRow {
    name: String,
    muscle_group: String,
    is_custom: bool,
    user_id: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ExerciseRowWithId {
    record_id: String,
    name: String,
    muscle_group: String,
    is_custom: bool,
    user_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl ExerciseRow {
    fn into_exercise(self, id: Uuid) -> Result<Exercise, DbError> {
        let muscle_group = self
            .muscle_group
            .parse::<MuscleGroup>()
            .map_err(|e| DbError::InvalidRecord(e.to_string()))?;
        let user_id = self
            .user_id
            .as_deref()
            .map(|u| parse_uuid(u, "user"))
            .transpose()?;
        Ok(Exercise {
            id,
            name: self.name,
            muscle_group,
            is_custom: self.is_custom,
            user_id,
            created_at: self.created_at,
        })
    }
}

impl ExerciseRowWithId {
    fn try_into_exercise(self) -> Result<Exercise, DbError> {
        let id = parse_uuid(&self.record_id, "exercise")?;
        ExerciseRow {
            name: self.name,
            muscle_group: self.muscle_group,
            is_custom: self.is_custom,
            user_id: self.user_id,
            created_at: self.created_at,
        }
        .into_exercise(id)
    }
}

/// Catalog order: muscle group declaration order, then name.
fn sort_catalog(exercises: &mut [Exercise]) {
    exercises.sort_by(|a, b| {
        a.muscle_group
            .cmp(&b.muscle_group)
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn collect_rows(rows: Vec<ExerciseRowWithId>) -> Result<Vec<Exercise>, DbError> {
    let mut exercises = rows
        .into_iter()
        .map(ExerciseRowWithId::try_into_exercise)
        .collect::<Result<Vec<_>, _>>()?;
    sort_catalog(&mut exercises);
    Ok(exercises)
}

/// Load exercises by id for joining into aggregates.
pub(crate) async fn load_exercises<C: Connection>(
    db: &Surreal<C>,
    ids: Vec<String>,
) -> Result<HashMap<Uuid, Exercise>, DbError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut result = db
        .query("SELECT meta::id(id) AS record_id, * FROM exercise WHERE meta::id(id) IN $ids")
        .bind(("ids", ids))
        .await?;

    let rows: Vec<ExerciseRowWithId> = result.take(0)?;
    rows.into_iter()
        .map(|row| row.try_into_exercise().map(|e| (e.id, e)))
        .collect()
}

/// SurrealDB implementation of the Exercise repository.
#[derive(Clone)]
pub struct SurrealExerciseRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealExerciseRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ExerciseRepository for SurrealExerciseRepository<C> {
    async fn list_visible(&self, user_id: Uuid) -> TrainlogResult<Vec<Exercise>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM exercise \
                 WHERE is_custom = false OR user_id = $user_id",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ExerciseRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_rows(rows)?)
    }

    async fn list_by_muscle_group(
        &self,
        user_id: Uuid,
        group: MuscleGroup,
    ) -> TrainlogResult<Vec<Exercise>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM exercise \
                 WHERE muscle_group = $group \
                 AND (is_custom = false OR user_id = $user_id)",
            )
            .bind(("group", group.as_str().to_string()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ExerciseRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_rows(rows)?)
    }

    async fn list_custom(&self, user_id: Uuid) -> TrainlogResult<Vec<Exercise>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM exercise \
                 WHERE is_custom = true AND user_id = $user_id",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ExerciseRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_rows(rows)?)
    }

    async fn get_by_id(&self, id: Uuid) -> TrainlogResult<Exercise> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('exercise', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ExerciseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "exercise".into(),
            id: id_str,
        })?;

        Ok(row.into_exercise(id)?)
    }

    async fn create(&self, input: CreateExercise) -> TrainlogResult<Exercise> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('exercise', $id) SET \
                 name = $name, muscle_group = $group, \
                 is_custom = true, user_id = $user_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("group", input.muscle_group.as_str().to_string()))
            .bind(("user_id", input.user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from_statement)?;

        let rows: Vec<ExerciseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "exercise".into(),
            id: id_str,
        })?;

        Ok(row.into_exercise(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateExercise) -> TrainlogResult<Exercise> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('exercise', $id) SET \
                 name = $name, muscle_group = $group",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("group", input.muscle_group.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from_statement)?;

        let rows: Vec<ExerciseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "exercise".into(),
            id: id_str,
        })?;

        Ok(row.into_exercise(id)?)
    }

    async fn delete(&self, id: Uuid) -> TrainlogResult<()> {
        self.db
            .query("DELETE type::record('exercise', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        Ok(())
    }

    async fn is_used_in_workouts(&self, id: Uuid) -> TrainlogResult<bool> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM workout_set \
                 WHERE exercise_id = $id GROUP ALL",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0) > 0)
    }
}

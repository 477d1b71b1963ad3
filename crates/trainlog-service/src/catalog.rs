//! Exercise catalog: shared presets plus per-user custom movements.

use tracing::info;
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::exercise::{CreateExercise, Exercise, MuscleGroup, UpdateExercise};
use trainlog_core::ownership::ensure_owner;
use trainlog_core::repository::ExerciseRepository;
use uuid::Uuid;

use crate::validate::bounded_name;

const MAX_EXERCISE_NAME: usize = 100;

#[derive(Debug, Clone)]
pub struct CustomExerciseInput {
    pub name: String,
    pub muscle_group: MuscleGroup,
}

pub struct ExerciseCatalog<E: ExerciseRepository> {
    exercises: E,
}

impl<E: ExerciseRepository> ExerciseCatalog<E> {
    pub fn new(exercises: E) -> Self {
        Self { exercises }
    }

    /// Presets and the caller's customs, by muscle group then name.
    pub async fn list_visible(&self, user_id: Uuid) -> TrainlogResult<Vec<Exercise>> {
        self.exercises.list_visible(user_id).await
    }

    pub async fn list_by_muscle_group(
        &self,
        group: MuscleGroup,
        user_id: Uuid,
    ) -> TrainlogResult<Vec<Exercise>> {
        self.exercises.list_by_muscle_group(user_id, group).await
    }

    pub async fn list_custom(&self, user_id: Uuid) -> TrainlogResult<Vec<Exercise>> {
        self.exercises.list_custom(user_id).await
    }

    /// No duplicate-name check: two customs may share a name.
    pub async fn create_custom(
        &self,
        user_id: Uuid,
        input: CustomExerciseInput,
    ) -> TrainlogResult<Exercise> {
        let name = bounded_name(&input.name, "exercise name", MAX_EXERCISE_NAME)?;
        let exercise = self
            .exercises
            .create(CreateExercise {
                user_id,
                name,
                muscle_group: input.muscle_group,
            })
            .await?;
        info!(exercise_id = %exercise.id, "Created custom exercise");
        Ok(exercise)
    }

    pub async fn update_custom(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        input: CustomExerciseInput,
    ) -> TrainlogResult<Exercise> {
        self.owned_custom(user_id, exercise_id).await?;
        let name = bounded_name(&input.name, "exercise name", MAX_EXERCISE_NAME)?;
        self.exercises
            .update(
                exercise_id,
                UpdateExercise {
                    name,
                    muscle_group: input.muscle_group,
                },
            )
            .await
    }

    pub async fn delete_custom(&self, user_id: Uuid, exercise_id: Uuid) -> TrainlogResult<()> {
        self.owned_custom(user_id, exercise_id).await?;
        self.delete_if_unused(exercise_id).await
    }

    /// Fails `NotFound` for unknown ids and `Unauthorized` for anything
    /// that is not a custom owned by `user_id` (presets included).
    async fn owned_custom(&self, user_id: Uuid, exercise_id: Uuid) -> TrainlogResult<Exercise> {
        let exercise = self.exercises.get_by_id(exercise_id).await?;
        ensure_owner(exercise, user_id)
    }

    /// The usage check and the delete are two statements: a set
    /// referencing the exercise can still be inserted between them.
    async fn delete_if_unused(&self, exercise_id: Uuid) -> TrainlogResult<()> {
        if self.exercises.is_used_in_workouts(exercise_id).await? {
            return Err(TrainlogError::conflict(format!(
                "exercise {exercise_id} is used in recorded workouts"
            )));
        }
        self.exercises.delete(exercise_id).await?;
        info!(exercise_id = %exercise_id, "Deleted custom exercise");
        Ok(())
    }
}

//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Every multi-record write named
//! here (aggregate create, child replacement, cascading delete, account
//! erasure) must commit atomically. Ownership checks are the service
//! layer's job; repositories fetch by id without filtering on owner.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::TrainlogResult;
use crate::models::{
    body_weight::{BodyWeight, CreateBodyWeight, UpdateBodyWeight},
    exercise::{CreateExercise, Exercise, MuscleGroup, UpdateExercise},
    menu::{CreateMenu, Menu, ReplaceMenu},
    user::{CreateUser, User},
    workout::{CreateWorkout, ReplaceWorkout, SetHistoryEntry, Workout},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Fails `Conflict` if the email is already registered.
    fn create(&self, input: CreateUser) -> impl Future<Output = TrainlogResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TrainlogResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = TrainlogResult<User>> + Send;
    fn exists_by_email(&self, email: &str) -> impl Future<Output = TrainlogResult<bool>> + Send;
    /// Erase the user and everything they own in one transaction.
    fn delete_with_all_data(&self, id: Uuid) -> impl Future<Output = TrainlogResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Exercise catalog
// ---------------------------------------------------------------------------

pub trait ExerciseRepository: Send + Sync {
    /// Presets plus the user's customs, ordered by muscle group then name.
    fn list_visible(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = TrainlogResult<Vec<Exercise>>> + Send;
    fn list_by_muscle_group(
        &self,
        user_id: Uuid,
        group: MuscleGroup,
    ) -> impl Future<Output = TrainlogResult<Vec<Exercise>>> + Send;
    /// Only the user's customs, ordered by muscle group then name.
    fn list_custom(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = TrainlogResult<Vec<Exercise>>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TrainlogResult<Exercise>> + Send;
    fn create(
        &self,
        input: CreateExercise,
    ) -> impl Future<Output = TrainlogResult<Exercise>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateExercise,
    ) -> impl Future<Output = TrainlogResult<Exercise>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = TrainlogResult<()>> + Send;
    /// Whether any workout set of any user references the exercise.
    fn is_used_in_workouts(&self, id: Uuid) -> impl Future<Output = TrainlogResult<bool>> + Send;
}

// ---------------------------------------------------------------------------
// Workout aggregate
// ---------------------------------------------------------------------------

pub trait WorkoutRepository: Send + Sync {
    /// Insert the workout and all its sets atomically.
    fn create_with_sets(
        &self,
        input: CreateWorkout,
    ) -> impl Future<Output = TrainlogResult<Workout>> + Send;
    /// Load the aggregate with sets (ordered) and joined exercises.
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TrainlogResult<Workout>> + Send;
    fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = TrainlogResult<Workout>> + Send;
    /// Date-descending page of the user's workouts.
    fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = TrainlogResult<PaginatedResult<Workout>>> + Send;
    /// Workouts with `from <= date < until`, date ascending.
    fn list_in_range(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        until: NaiveDate,
    ) -> impl Future<Output = TrainlogResult<Vec<Workout>>> + Send;
    /// Overwrite the memo and swap the whole set list atomically.
    fn replace(
        &self,
        id: Uuid,
        input: ReplaceWorkout,
    ) -> impl Future<Output = TrainlogResult<Workout>> + Send;
    /// Delete child sets, then the workout, atomically.
    fn delete(&self, id: Uuid) -> impl Future<Output = TrainlogResult<()>> + Send;
    /// Every set the user has logged, optionally for one exercise,
    /// joined with workout date and exercise.
    fn set_history(
        &self,
        user_id: Uuid,
        exercise_id: Option<Uuid>,
    ) -> impl Future<Output = TrainlogResult<Vec<SetHistoryEntry>>> + Send;
}

// ---------------------------------------------------------------------------
// Menu aggregate
// ---------------------------------------------------------------------------

pub trait MenuRepository: Send + Sync {
    fn create_with_items(
        &self,
        input: CreateMenu,
    ) -> impl Future<Output = TrainlogResult<Menu>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TrainlogResult<Menu>> + Send;
    /// Most recently updated first.
    fn list_by_user(&self, user_id: Uuid)
    -> impl Future<Output = TrainlogResult<Vec<Menu>>> + Send;
    fn replace(
        &self,
        id: Uuid,
        input: ReplaceMenu,
    ) -> impl Future<Output = TrainlogResult<Menu>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = TrainlogResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Body weight
// ---------------------------------------------------------------------------

pub trait BodyWeightRepository: Send + Sync {
    fn create(
        &self,
        input: CreateBodyWeight,
    ) -> impl Future<Output = TrainlogResult<BodyWeight>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TrainlogResult<BodyWeight>> + Send;
    fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = TrainlogResult<BodyWeight>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateBodyWeight,
    ) -> impl Future<Output = TrainlogResult<BodyWeight>> + Send;
    /// Most recent first, at most `limit` rows.
    fn list_recent(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> impl Future<Output = TrainlogResult<Vec<BodyWeight>>> + Send;
    /// Inclusive on both ends, date ascending.
    fn list_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = TrainlogResult<Vec<BodyWeight>>> + Send;
    fn latest(&self, user_id: Uuid) -> impl Future<Output = TrainlogResult<BodyWeight>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = TrainlogResult<()>> + Send;
}

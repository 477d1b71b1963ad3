//! In-memory repositories and a scripted text generator for service tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::body_weight::{BodyWeight, CreateBodyWeight, UpdateBodyWeight};
use trainlog_core::models::exercise::{CreateExercise, Exercise, MuscleGroup, UpdateExercise};
use trainlog_core::models::menu::{CreateMenu, Menu, MenuItem, MenuItemInput, ReplaceMenu};
use trainlog_core::models::workout::{
    CreateWorkout, ReplaceWorkout, SetHistoryEntry, SetInput, Workout, WorkoutSet,
};
use trainlog_core::repository::{
    BodyWeightRepository, ExerciseRepository, MenuRepository, PaginatedResult, Pagination,
    WorkoutRepository,
};
use trainlog_service::generation::GenerationRequest;
use trainlog_service::TextGenerator;
use uuid::Uuid;

#[derive(Default)]
struct State {
    exercises: Vec<Exercise>,
    workouts: Vec<Workout>,
    menus: Vec<Menu>,
    body_weights: Vec<BodyWeight>,
}

/// Shared store implementing every aggregate repository. Clones see the
/// same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// A store holding the given presets.
    pub fn with_presets(presets: &[(&str, MuscleGroup)]) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            for (name, group) in presets {
                state.exercises.push(Exercise {
                    id: Uuid::new_v4(),
                    name: (*name).into(),
                    muscle_group: *group,
                    is_custom: false,
                    user_id: None,
                    created_at: Utc::now(),
                });
            }
        }
        store
    }

    pub fn preset(&self, name: &str) -> Exercise {
        self.state
            .lock()
            .unwrap()
            .exercises
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .unwrap()
    }

    pub fn body_weight_count(&self, user_id: Uuid) -> usize {
        self.state
            .lock()
            .unwrap()
            .body_weights
            .iter()
            .filter(|r| r.user_id == user_id)
            .count()
    }

    fn exercise(state: &State, id: Uuid) -> Option<Exercise> {
        state.exercises.iter().find(|e| e.id == id).cloned()
    }

    fn build_sets(state: &State, sets: Vec<SetInput>) -> Vec<WorkoutSet> {
        sets.into_iter()
            .map(|s| WorkoutSet {
                id: Uuid::new_v4(),
                exercise_id: s.exercise_id,
                set_number: s.set_number,
                weight: s.weight,
                reps: s.reps,
                exercise: Self::exercise(state, s.exercise_id),
            })
            .collect()
    }

    fn build_items(state: &State, items: Vec<MenuItemInput>) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = items
            .into_iter()
            .map(|i| MenuItem {
                id: Uuid::new_v4(),
                exercise_id: i.exercise_id,
                order_number: i.order_number,
                target_sets: i.target_sets,
                target_reps: i.target_reps,
                target_weight: i.target_weight,
                note: i.note,
                exercise: Self::exercise(state, i.exercise_id),
            })
            .collect();
        items.sort_by_key(|i| i.order_number);
        items
    }
}

fn sorted_catalog(mut exercises: Vec<Exercise>) -> Vec<Exercise> {
    exercises.sort_by(|a, b| {
        a.muscle_group
            .cmp(&b.muscle_group)
            .then_with(|| a.name.cmp(&b.name))
    });
    exercises
}

impl ExerciseRepository for MemoryStore {
    async fn list_visible(&self, user_id: Uuid) -> TrainlogResult<Vec<Exercise>> {
        let state = self.state.lock().unwrap();
        Ok(sorted_catalog(
            state
                .exercises
                .iter()
                .filter(|e| e.is_visible_to(user_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_muscle_group(
        &self,
        user_id: Uuid,
        group: MuscleGroup,
    ) -> TrainlogResult<Vec<Exercise>> {
        let mut visible = self.list_visible(user_id).await?;
        visible.retain(|e| e.muscle_group == group);
        Ok(visible)
    }

    async fn list_custom(&self, user_id: Uuid) -> TrainlogResult<Vec<Exercise>> {
        let mut visible = self.list_visible(user_id).await?;
        visible.retain(|e| e.is_custom);
        Ok(visible)
    }

    async fn get_by_id(&self, id: Uuid) -> TrainlogResult<Exercise> {
        let state = self.state.lock().unwrap();
        Self::exercise(&state, id).ok_or_else(|| TrainlogError::not_found("exercise", id))
    }

    async fn create(&self, input: CreateExercise) -> TrainlogResult<Exercise> {
        let exercise = Exercise {
            id: Uuid::new_v4(),
            name: input.name,
            muscle_group: input.muscle_group,
            is_custom: true,
            user_id: Some(input.user_id),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn update(&self, id: Uuid, input: UpdateExercise) -> TrainlogResult<Exercise> {
        let mut state = self.state.lock().unwrap();
        let exercise = state
            .exercises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| TrainlogError::not_found("exercise", id))?;
        exercise.name = input.name;
        exercise.muscle_group = input.muscle_group;
        Ok(exercise.clone())
    }

    async fn delete(&self, id: Uuid) -> TrainlogResult<()> {
        self.state.lock().unwrap().exercises.retain(|e| e.id != id);
        Ok(())
    }

    async fn is_used_in_workouts(&self, id: Uuid) -> TrainlogResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state
            .workouts
            .iter()
            .flat_map(|w| &w.sets)
            .any(|s| s.exercise_id == id))
    }
}

impl WorkoutRepository for MemoryStore {
    async fn create_with_sets(&self, input: CreateWorkout) -> TrainlogResult<Workout> {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let workout = Workout {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            date: input.date,
            memo: input.memo,
            sets: Self::build_sets(&state, input.sets),
            created_at: now,
            updated_at: now,
        };
        state.workouts.push(workout.clone());
        Ok(workout)
    }

    async fn get_by_id(&self, id: Uuid) -> TrainlogResult<Workout> {
        let state = self.state.lock().unwrap();
        state
            .workouts
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| TrainlogError::not_found("workout", id))
    }

    async fn get_by_user_and_date(&self, user_id: Uuid, date: NaiveDate) -> TrainlogResult<Workout> {
        let state = self.state.lock().unwrap();
        state
            .workouts
            .iter()
            .find(|w| w.user_id == user_id && w.date == date)
            .cloned()
            .ok_or_else(|| TrainlogError::not_found("workout", date))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> TrainlogResult<PaginatedResult<Workout>> {
        let state = self.state.lock().unwrap();
        let mut owned: Vec<Workout> = state
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date.cmp(&a.date));
        let total = owned.len() as u64;
        let items = owned
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect();
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
        let state = self.state.lock().unwrap();
        let mut found: Vec<Workout> = state
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id && w.date >= from && w.date < until)
            .cloned()
            .collect();
        found.sort_by_key(|w| w.date);
        Ok(found)
    }

    async fn replace(&self, id: Uuid, input: ReplaceWorkout) -> TrainlogResult<Workout> {
        let mut state = self.state.lock().unwrap();
        let sets = Self::build_sets(&state, input.sets);
        let workout = state
            .workouts
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| TrainlogError::not_found("workout", id))?;
        workout.memo = input.memo;
        workout.sets = sets;
        workout.updated_at = Utc::now();
        Ok(workout.clone())
    }

    async fn delete(&self, id: Uuid) -> TrainlogResult<()> {
        self.state.lock().unwrap().workouts.retain(|w| w.id != id);
        Ok(())
    }

    async fn set_history(
        &self,
        user_id: Uuid,
        exercise_id: Option<Uuid>,
    ) -> TrainlogResult<Vec<SetHistoryEntry>> {
        let state = self.state.lock().unwrap();
        let mut workouts: Vec<&Workout> =
            state.workouts.iter().filter(|w| w.user_id == user_id).collect();
        workouts.sort_by_key(|w| w.date);
        Ok(workouts
            .into_iter()
            .flat_map(|w| {
                w.sets.iter().filter_map(move |s| {
                    Some(SetHistoryEntry {
                        workout_id: w.id,
                        date: w.date,
                        exercise: s.exercise.clone()?,
                        weight: s.weight,
                        reps: s.reps,
                    })
                })
            })
            .filter(|entry| exercise_id.is_none_or(|id| entry.exercise.id == id))
            .collect())
    }
}

impl MenuRepository for MemoryStore {
    async fn create_with_items(&self, input: CreateMenu) -> TrainlogResult<Menu> {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let menu = Menu {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            name: input.name,
            description: input.description,
            items: Self::build_items(&state, input.items),
            created_at: now,
            updated_at: now,
        };
        state.menus.push(menu.clone());
        Ok(menu)
    }

    async fn get_by_id(&self, id: Uuid) -> TrainlogResult<Menu> {
        let state = self.state.lock().unwrap();
        state
            .menus
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| TrainlogError::not_found("menu", id))
    }

    async fn list_by_user(&self, user_id: Uuid) -> TrainlogResult<Vec<Menu>> {
        let state = self.state.lock().unwrap();
        let mut menus: Vec<Menu> = state
            .menus
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        menus.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(menus)
    }

    async fn replace(&self, id: Uuid, input: ReplaceMenu) -> TrainlogResult<Menu> {
        let mut state = self.state.lock().unwrap();
        let items = Self::build_items(&state, input.items);
        let menu = state
            .menus
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| TrainlogError::not_found("menu", id))?;
        menu.name = input.name;
        menu.description = input.description;
        menu.items = items;
        menu.updated_at = Utc::now();
        Ok(menu.clone())
    }

    async fn delete(&self, id: Uuid) -> TrainlogResult<()> {
        self.state.lock().unwrap().menus.retain(|m| m.id != id);
        Ok(())
    }
}

impl BodyWeightRepository for MemoryStore {
    async fn create(&self, input: CreateBodyWeight) -> TrainlogResult<BodyWeight> {
        let record = BodyWeight {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            date: input.date,
            weight: input.weight,
            body_fat_percentage: input.body_fat_percentage,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().body_weights.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> TrainlogResult<BodyWeight> {
        let state = self.state.lock().unwrap();
        state
            .body_weights
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| TrainlogError::not_found("body_weight", id))
    }

    async fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> TrainlogResult<BodyWeight> {
        let state = self.state.lock().unwrap();
        state
            .body_weights
            .iter()
            .find(|r| r.user_id == user_id && r.date == date)
            .cloned()
            .ok_or_else(|| TrainlogError::not_found("body_weight", date))
    }

    async fn update(&self, id: Uuid, input: UpdateBodyWeight) -> TrainlogResult<BodyWeight> {
        let mut state = self.state.lock().unwrap();
        let record = state
            .body_weights
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| TrainlogError::not_found("body_weight", id))?;
        record.weight = input.weight;
        record.body_fat_percentage = input.body_fat_percentage;
        Ok(record.clone())
    }

    async fn list_recent(&self, user_id: Uuid, limit: u64) -> TrainlogResult<Vec<BodyWeight>> {
        let state = self.state.lock().unwrap();
        let mut records: Vec<BodyWeight> = state
            .body_weights
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate(limit as usize);
        Ok(records)
    }

    async fn list_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TrainlogResult<Vec<BodyWeight>> {
        let state = self.state.lock().unwrap();
        let mut records: Vec<BodyWeight> = state
            .body_weights
            .iter()
            .filter(|r| r.user_id == user_id && r.date >= start && r.date <= end)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn latest(&self, user_id: Uuid) -> TrainlogResult<BodyWeight> {
        self.list_recent(user_id, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TrainlogError::not_found("body_weight", user_id))
    }

    async fn delete(&self, id: Uuid) -> TrainlogResult<()> {
        self.state.lock().unwrap().body_weights.retain(|r| r.id != id);
        Ok(())
    }
}

/// Returns a canned completion and remembers the last request.
#[derive(Clone)]
pub struct ScriptedGenerator {
    reply: Arc<Mutex<TrainlogResult<String>>>,
    last_request: Arc<Mutex<Option<GenerationRequest>>>,
}

impl ScriptedGenerator {
    pub fn replying(content: impl Into<String>) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Ok(content.into()))),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failing(err: TrainlogError) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Err(err))),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> TrainlogResult<String> {
        *self.last_request.lock().unwrap() = Some(request);
        self.reply.lock().unwrap().clone()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn set(exercise: &Exercise, set_number: u32, weight: f64, reps: u32) -> SetInput {
    SetInput {
        exercise_id: exercise.id,
        set_number,
        weight,
        reps,
    }
}

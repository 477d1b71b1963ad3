//! AI-assisted menu generation.
//!
//! The pipeline builds a prompt from the caller's visible catalog, asks
//! a [`TextGenerator`] for a JSON menu and grounds the answer against
//! that same catalog. Nothing is persisted here; callers save the
//! result through [`MenuService`](crate::MenuService) if they want it.

mod openai;
mod prompt;
mod response;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::exercise::{Exercise, MuscleGroup};
use trainlog_core::models::menu::MenuItemInput;
use trainlog_core::repository::ExerciseRepository;
use uuid::Uuid;

pub use openai::OpenAiGenerator;
pub use prompt::{build_system_prompt, build_user_message};

use crate::menu::MenuInput;

const MAX_DAYS_PER_WEEK: u32 = 7;
const MAX_DURATION_MINUTES: u32 = 600;

/// One completion call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_message: String,
    /// Ask the backend to constrain output to a JSON object.
    pub json_output: bool,
}

/// Text-generation backend.
pub trait TextGenerator: Send + Sync {
    /// Returns the raw completion text.
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = TrainlogResult<String>> + Send;
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateMenuInput {
    pub goal: String,
    pub fitness_level: String,
    pub days_per_week: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub target_muscle_groups: Vec<MuscleGroup>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Grounded proposal; every item references an exercise visible to
/// the requesting user.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedMenu {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<GeneratedMenuItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedMenuItem {
    pub exercise_id: Uuid,
    pub order_number: u32,
    pub target_sets: u32,
    pub target_reps: u32,
    pub target_weight: Option<f64>,
    pub note: Option<String>,
    pub exercise: Exercise,
}

impl GeneratedMenu {
    /// Turn the proposal into input for [`MenuService::create`](crate::MenuService::create).
    pub fn into_menu_input(self) -> MenuInput {
        MenuInput {
            name: self.name,
            description: self.description,
            items: self
                .items
                .into_iter()
                .map(|item| MenuItemInput {
                    exercise_id: item.exercise_id,
                    order_number: item.order_number,
                    target_sets: item.target_sets,
                    target_reps: item.target_reps,
                    target_weight: item.target_weight,
                    note: item.note,
                })
                .collect(),
        }
    }
}

pub struct MenuGenerator<E: ExerciseRepository, G: TextGenerator> {
    exercises: E,
    generator: G,
}

impl<E: ExerciseRepository, G: TextGenerator> MenuGenerator<E, G> {
    pub fn new(exercises: E, generator: G) -> Self {
        Self {
            exercises,
            generator,
        }
    }

    /// Propose a menu for `owner`.
    ///
    /// # Errors
    ///
    /// - `Validation` for bad input or an empty catalog.
    /// - `ExternalService` when the backend fails.
    /// - `MalformedExternalResponse` when the completion is not the
    ///   expected JSON.
    /// - `Unprocessable` when no item references a known exercise.
    #[instrument(skip(self, input), fields(user_id = %owner))]
    pub async fn generate(
        &self,
        owner: Uuid,
        input: GenerateMenuInput,
    ) -> TrainlogResult<GeneratedMenu> {
        validate_input(&input)?;

        let catalog = self.exercises.list_visible(owner).await?;
        if catalog.is_empty() {
            return Err(TrainlogError::validation("no exercises available"));
        }

        let request = GenerationRequest {
            system_prompt: build_system_prompt(&catalog),
            user_message: build_user_message(&input),
            json_output: true,
        };
        let lookup: HashMap<Uuid, Exercise> = catalog.into_iter().map(|e| (e.id, e)).collect();

        let content = self.generator.generate(request).await?;
        let raw = response::parse_menu(&content)?;
        let menu = response::ground(raw, &lookup)?;

        info!(items = menu.items.len(), "Generated menu");
        Ok(menu)
    }
}

fn validate_input(input: &GenerateMenuInput) -> TrainlogResult<()> {
    if input.goal.trim().is_empty() {
        return Err(TrainlogError::validation("goal is required"));
    }
    if input.fitness_level.trim().is_empty() {
        return Err(TrainlogError::validation("fitness level is required"));
    }
    if !(1..=MAX_DAYS_PER_WEEK).contains(&input.days_per_week) {
        return Err(TrainlogError::validation(format!(
            "days per week must be between 1 and {MAX_DAYS_PER_WEEK}"
        )));
    }
    if !(1..=MAX_DURATION_MINUTES).contains(&input.duration_minutes) {
        return Err(TrainlogError::validation(format!(
            "duration must be between 1 and {MAX_DURATION_MINUTES} minutes"
        )));
    }
    Ok(())
}

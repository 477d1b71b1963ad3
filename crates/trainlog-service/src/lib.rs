//! Trainlog Service: the domain service layer.
//!
//! Every service is generic over the `trainlog-core` repository traits
//! and takes the caller's verified user id as its first argument.

pub mod body_weight;
pub mod catalog;
pub mod config;
pub mod generation;
pub mod menu;
pub mod stats;
pub mod workout;

mod validate;

pub use body_weight::BodyWeightService;
pub use catalog::{CustomExerciseInput, ExerciseCatalog};
pub use config::{GenerationConfig, PAGE_SIZE_LIMIT, ServiceConfig};
pub use generation::{
    GenerateMenuInput, GeneratedMenu, GeneratedMenuItem, MenuGenerator, OpenAiGenerator,
    TextGenerator,
};
pub use menu::{MenuInput, MenuService};
pub use stats::StatisticsService;
pub use workout::{UpdateWorkoutInput, WorkoutInput, WorkoutPage, WorkoutService};

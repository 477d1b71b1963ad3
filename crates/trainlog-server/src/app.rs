//! Service wiring over a single SurrealDB handle.

use surrealdb::{Connection, Surreal};
use tracing::info;
use trainlog_auth::{AuthService, TokenVerifier};
use trainlog_db::repository::{
    SurrealBodyWeightRepository, SurrealExerciseRepository, SurrealMenuRepository,
    SurrealUserRepository, SurrealWorkoutRepository,
};
use trainlog_service::{
    BodyWeightService, ExerciseCatalog, MenuGenerator, MenuService, OpenAiGenerator,
    StatisticsService, WorkoutService,
};

use crate::config::Settings;
use crate::error::ServerError;

type Exercises<C> = SurrealExerciseRepository<C>;

/// Every service the boundary layer dispatches to.
pub struct App<C: Connection> {
    pub auth: AuthService<SurrealUserRepository<C>>,
    pub verifier: TokenVerifier,
    pub catalog: ExerciseCatalog<Exercises<C>>,
    pub workouts: WorkoutService<SurrealWorkoutRepository<C>, Exercises<C>>,
    pub menus: MenuService<SurrealMenuRepository<C>, Exercises<C>>,
    pub body_weights: BodyWeightService<SurrealBodyWeightRepository<C>>,
    pub stats: StatisticsService<SurrealWorkoutRepository<C>, Exercises<C>>,
    pub generator: MenuGenerator<Exercises<C>, OpenAiGenerator>,
}

impl<C: Connection> App<C> {
    /// Build the services on an already migrated database.
    pub fn new(db: Surreal<C>, settings: &Settings) -> Result<Self, ServerError> {
        let exercises = || SurrealExerciseRepository::new(db.clone());
        let workouts = || SurrealWorkoutRepository::new(db.clone());

        let app = Self {
            auth: AuthService::new(SurrealUserRepository::new(db.clone()), settings.auth.clone()),
            verifier: TokenVerifier::new(settings.auth.clone()),
            catalog: ExerciseCatalog::new(exercises()),
            workouts: WorkoutService::new(workouts(), exercises(), settings.service.clone()),
            menus: MenuService::new(SurrealMenuRepository::new(db.clone()), exercises()),
            body_weights: BodyWeightService::new(
                SurrealBodyWeightRepository::new(db.clone()),
                settings.service.clone(),
            ),
            stats: StatisticsService::new(workouts(), exercises()),
            generator: MenuGenerator::new(
                exercises(),
                OpenAiGenerator::new(settings.generation.clone())?,
            ),
        };

        info!(
            generation_enabled = settings.generation.api_key.is_some(),
            "Services initialized"
        );
        Ok(app)
    }
}

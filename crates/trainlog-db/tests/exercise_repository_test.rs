//! Integration tests for the exercise catalog repository.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use trainlog_core::error::TrainlogError;
use trainlog_core::models::exercise::{CreateExercise, MuscleGroup, UpdateExercise};
use trainlog_core::repository::ExerciseRepository;
use trainlog_db::repository::SurrealExerciseRepository;
use uuid::Uuid;

async fn setup() -> SurrealExerciseRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    trainlog_db::run_migrations(&db).await.unwrap();
    SurrealExerciseRepository::new(db)
}

#[tokio::test]
async fn visible_catalog_is_sorted_by_group_then_name() {
    let repo = setup().await;
    let catalog = repo.list_visible(Uuid::new_v4()).await.unwrap();

    let keys: Vec<(MuscleGroup, String)> = catalog
        .iter()
        .map(|e| (e.muscle_group, e.name.clone()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(catalog[0].muscle_group, MuscleGroup::Chest);
}

#[tokio::test]
async fn custom_exercises_are_private() {
    let repo = setup().await;
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    let custom = repo
        .create(CreateExercise {
            user_id: owner,
            name: "Zercher Squat".into(),
            muscle_group: MuscleGroup::Legs,
        })
        .await
        .unwrap();
    assert!(custom.is_custom);
    assert_eq!(custom.user_id, Some(owner));

    let fetched = repo.get_by_id(custom.id).await.unwrap();
    assert_eq!(fetched.name, "Zercher Squat");

    let presets = trainlog_db::PRESET_EXERCISES.len();
    assert_eq!(repo.list_visible(owner).await.unwrap().len(), presets + 1);
    assert_eq!(repo.list_visible(other).await.unwrap().len(), presets);
    assert_eq!(repo.list_custom(owner).await.unwrap().len(), 1);
    assert!(repo.list_custom(other).await.unwrap().is_empty());

    let legs = repo
        .list_by_muscle_group(owner, MuscleGroup::Legs)
        .await
        .unwrap();
    assert!(legs.iter().all(|e| e.muscle_group == MuscleGroup::Legs));
    assert!(legs.iter().any(|e| e.id == custom.id));
}

#[tokio::test]
async fn update_and_delete_custom() {
    let repo = setup().await;
    let owner = Uuid::new_v4();
    let custom = repo
        .create(CreateExercise {
            user_id: owner,
            name: "Curl".into(),
            muscle_group: MuscleGroup::Arms,
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            custom.id,
            UpdateExercise {
                name: "Spider Curl".into(),
                muscle_group: MuscleGroup::Arms,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, custom.id);
    assert_eq!(updated.name, "Spider Curl");
    assert!(!repo.is_used_in_workouts(custom.id).await.unwrap());

    repo.delete(custom.id).await.unwrap();
    assert!(matches!(
        repo.get_by_id(custom.id).await,
        Err(TrainlogError::NotFound { .. })
    ));

    repo.delete(custom.id).await.unwrap();
    assert!(repo.list_custom(owner).await.unwrap().is_empty());
}

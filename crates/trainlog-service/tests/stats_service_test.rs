//! Statistics computed over logged workouts.

mod common;

use common::{set, MemoryStore};
use trainlog_core::error::TrainlogError;
use trainlog_core::models::exercise::{CreateExercise, MuscleGroup};
use trainlog_core::repository::ExerciseRepository;
use trainlog_service::{ServiceConfig, StatisticsService, WorkoutInput, WorkoutService};
use uuid::Uuid;

struct Fixture {
    store: MemoryStore,
    workouts: WorkoutService<MemoryStore, MemoryStore>,
    stats: StatisticsService<MemoryStore, MemoryStore>,
}

fn fixture() -> Fixture {
    let store = MemoryStore::with_presets(&[
        ("Bench Press", MuscleGroup::Chest),
        ("Dumbbell Fly", MuscleGroup::Chest),
        ("Squat", MuscleGroup::Legs),
    ]);
    Fixture {
        workouts: WorkoutService::new(store.clone(), store.clone(), ServiceConfig::default()),
        stats: StatisticsService::new(store.clone(), store.clone()),
        store,
    }
}

impl Fixture {
    async fn log(&self, user: Uuid, date: &str, sets: Vec<trainlog_core::models::workout::SetInput>) {
        self.workouts
            .create(
                user,
                WorkoutInput {
                    date: date.into(),
                    memo: None,
                    sets,
                },
            )
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn progress_sums_volume_per_day() {
    let f = fixture();
    let user = Uuid::new_v4();
    let bench = f.store.preset("Bench Press");
    f.log(
        user,
        "2024-01-10",
        vec![set(&bench, 1, 60.0, 10), set(&bench, 2, 65.0, 5)],
    )
    .await;

    let progress = f.stats.exercise_progress(user, bench.id).await.unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].max_weight, 65.0);
    assert_eq!(progress[0].total_volume, 925.0);
}

#[tokio::test]
async fn muscle_group_counts_distinct_days() {
    let f = fixture();
    let user = Uuid::new_v4();
    let bench = f.store.preset("Bench Press");
    let fly = f.store.preset("Dumbbell Fly");
    let squat = f.store.preset("Squat");
    f.log(
        user,
        "2024-01-10",
        vec![set(&bench, 1, 60.0, 10), set(&fly, 1, 12.0, 12), set(&fly, 2, 12.0, 12)],
    )
    .await;
    f.log(user, "2024-01-12", vec![set(&bench, 1, 62.5, 8)]).await;
    f.log(user, "2024-01-14", vec![set(&squat, 1, 100.0, 5)]).await;

    let stats = f.stats.muscle_group_stats(user).await.unwrap();
    let chest = stats
        .iter()
        .find(|s| s.muscle_group == MuscleGroup::Chest)
        .unwrap();
    assert_eq!(chest.workout_count, 2);
    assert_eq!(chest.set_count, 4);
    let legs = stats
        .iter()
        .find(|s| s.muscle_group == MuscleGroup::Legs)
        .unwrap();
    assert_eq!(legs.workout_count, 1);

    // Another user's history is not mixed in.
    assert!(f.stats.muscle_group_stats(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn personal_bests_take_the_heaviest_set() {
    let f = fixture();
    let user = Uuid::new_v4();
    let bench = f.store.preset("Bench Press");
    let squat = f.store.preset("Squat");
    f.log(user, "2024-01-10", vec![set(&bench, 1, 60.0, 10), set(&squat, 1, 0.0, 20)]).await;
    f.log(user, "2024-01-12", vec![set(&bench, 1, 70.0, 3)]).await;

    let bests = f.stats.personal_bests(user).await.unwrap();
    assert_eq!(bests.len(), 1);
    assert_eq!(bests[0].exercise_id, bench.id);
    assert_eq!(bests[0].max_weight, 70.0);
}

#[tokio::test]
async fn progress_for_invisible_exercise_is_not_found() {
    let f = fixture();
    let owner = Uuid::new_v4();
    let custom = f
        .store
        .create(CreateExercise {
            user_id: owner,
            name: "Private Press".into(),
            muscle_group: MuscleGroup::Shoulders,
        })
        .await
        .unwrap();

    assert!(f.stats.exercise_progress(owner, custom.id).await.unwrap().is_empty());
    assert!(matches!(
        f.stats.exercise_progress(Uuid::new_v4(), custom.id).await,
        Err(TrainlogError::NotFound { .. })
    ));
}

//! Menu generation grounding against the caller's catalog.

mod common;

use common::{MemoryStore, ScriptedGenerator};
use trainlog_core::error::TrainlogError;
use trainlog_core::models::exercise::{CreateExercise, MuscleGroup};
use trainlog_core::repository::ExerciseRepository;
use trainlog_service::{GenerateMenuInput, MenuGenerator, MenuService};
use uuid::Uuid;

fn store() -> MemoryStore {
    MemoryStore::with_presets(&[
        ("Bench Press", MuscleGroup::Chest),
        ("Squat", MuscleGroup::Legs),
    ])
}

fn request() -> GenerateMenuInput {
    GenerateMenuInput {
        goal: "build strength".into(),
        fitness_level: "intermediate".into(),
        days_per_week: 3,
        duration_minutes: 60,
        target_muscle_groups: vec![MuscleGroup::Legs],
        notes: None,
    }
}

fn item_json(exercise_id: &str, order: u32) -> String {
    format!(
        r#"{{"exercise_id":"{exercise_id}","order_number":{order},"target_sets":3,"target_reps":8,"target_weight":80.0}}"#
    )
}

#[tokio::test]
async fn unknown_exercises_are_dropped() {
    let store = store();
    let squat = store.preset("Squat");
    let bench = store.preset("Bench Press");
    let reply = format!(
        r#"{{"name":"Strength A","description":"heavy compounds","items":[{},{},{}]}}"#,
        item_json(&bench.id.to_string(), 2),
        item_json(&Uuid::new_v4().to_string(), 3),
        item_json(&squat.id.to_string(), 1),
    );
    let generator = MenuGenerator::new(store.clone(), ScriptedGenerator::replying(reply));

    let menu = generator.generate(Uuid::new_v4(), request()).await.unwrap();
    assert_eq!(menu.name, "Strength A");
    let ids: Vec<Uuid> = menu.items.iter().map(|i| i.exercise_id).collect();
    assert_eq!(ids, vec![squat.id, bench.id]);
    assert_eq!(menu.items[0].exercise.name, "Squat");
}

#[tokio::test]
async fn no_grounded_items_is_unprocessable() {
    let store = store();
    let reply = format!(
        r#"{{"name":"Ghost","items":[{}]}}"#,
        item_json(&Uuid::new_v4().to_string(), 1)
    );
    let generator = MenuGenerator::new(store, ScriptedGenerator::replying(reply));

    let err = generator
        .generate(Uuid::new_v4(), request())
        .await
        .unwrap_err();
    assert!(matches!(err, TrainlogError::Unprocessable(_)));
}

#[tokio::test]
async fn foreign_custom_exercise_is_not_grounded() {
    let store = store();
    let foreign = store
        .create(CreateExercise {
            user_id: Uuid::new_v4(),
            name: "Their Curl".into(),
            muscle_group: MuscleGroup::Arms,
        })
        .await
        .unwrap();
    let reply = format!(
        r#"{{"name":"Arms","items":[{}]}}"#,
        item_json(&foreign.id.to_string(), 1)
    );
    let generator = MenuGenerator::new(store, ScriptedGenerator::replying(reply));

    assert!(matches!(
        generator.generate(Uuid::new_v4(), request()).await,
        Err(TrainlogError::Unprocessable(_))
    ));
}

#[tokio::test]
async fn fenced_reply_is_accepted() {
    let store = store();
    let squat = store.preset("Squat");
    let reply = format!(
        "```json\n{{\"name\":\"Legs\",\"items\":[{}]}}\n```",
        item_json(&squat.id.to_string(), 1)
    );
    let generator = MenuGenerator::new(store, ScriptedGenerator::replying(reply));

    let menu = generator.generate(Uuid::new_v4(), request()).await.unwrap();
    assert_eq!(menu.items.len(), 1);
}

#[tokio::test]
async fn prose_reply_is_malformed() {
    let generator = MenuGenerator::new(
        store(),
        ScriptedGenerator::replying("I'm sorry, I can't help with that."),
    );
    assert!(matches!(
        generator.generate(Uuid::new_v4(), request()).await,
        Err(TrainlogError::MalformedExternalResponse(_))
    ));
}

#[tokio::test]
async fn backend_failure_is_propagated() {
    let generator = MenuGenerator::new(
        store(),
        ScriptedGenerator::failing(TrainlogError::ExternalService("timeout".into())),
    );
    assert!(matches!(
        generator.generate(Uuid::new_v4(), request()).await,
        Err(TrainlogError::ExternalService(_))
    ));
}

#[tokio::test]
async fn prompt_lists_only_visible_exercises() {
    let store = store();
    let user = Uuid::new_v4();
    let mine = store
        .create(CreateExercise {
            user_id: user,
            name: "My Lunge".into(),
            muscle_group: MuscleGroup::Legs,
        })
        .await
        .unwrap();
    let theirs = store
        .create(CreateExercise {
            user_id: Uuid::new_v4(),
            name: "Their Lunge".into(),
            muscle_group: MuscleGroup::Legs,
        })
        .await
        .unwrap();
    let scripted = ScriptedGenerator::replying(format!(
        r#"{{"name":"Legs","items":[{}]}}"#,
        item_json(&mine.id.to_string(), 1)
    ));
    let generator = MenuGenerator::new(store, scripted.clone());

    generator.generate(user, request()).await.unwrap();
    let sent = scripted.last_request().unwrap();
    assert!(sent.system_prompt.contains(&mine.id.to_string()));
    assert!(!sent.system_prompt.contains(&theirs.id.to_string()));
    assert!(sent.user_message.contains("build strength"));
    assert!(sent.json_output);
}

#[tokio::test]
async fn invalid_request_never_reaches_the_backend() {
    let scripted = ScriptedGenerator::replying("{}");
    let generator = MenuGenerator::new(store(), scripted.clone());

    let err = generator
        .generate(
            Uuid::new_v4(),
            GenerateMenuInput {
                days_per_week: 0,
                ..request()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TrainlogError::Validation { .. }));
    assert!(scripted.last_request().is_none());
}

#[tokio::test]
async fn generated_menu_can_be_saved() {
    let store = store();
    let user = Uuid::new_v4();
    let squat = store.preset("Squat");
    let reply = format!(
        r#"{{"name":"Leg Day","items":[{}]}}"#,
        item_json(&squat.id.to_string(), 1)
    );
    let generator = MenuGenerator::new(store.clone(), ScriptedGenerator::replying(reply));
    let menus = MenuService::new(store.clone(), store);

    let proposal = generator.generate(user, request()).await.unwrap();
    let saved = menus.create(user, proposal.into_menu_input()).await.unwrap();
    assert_eq!(saved.name, "Leg Day");
    assert_eq!(saved.items[0].exercise_id, squat.id);
    assert_eq!(saved.items[0].target_weight, Some(80.0));
}

//! Preset exercise catalog, seeded once on first start.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;
use trainlog_core::models::exercise::MuscleGroup;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::CountRow;

/// Shared movements visible to every user.
pub const PRESET_EXERCISES: &[(&str, MuscleGroup)] = &[
    ("Bench Press", MuscleGroup::Chest),
    ("Incline Dumbbell Press", MuscleGroup::Chest),
    ("Dumbbell Fly", MuscleGroup::Chest),
    ("Push-up", MuscleGroup::Chest),
    ("Deadlift", MuscleGroup::Back),
    ("Pull-up", MuscleGroup::Back),
    ("Lat Pulldown", MuscleGroup::Back),
    ("Barbell Row", MuscleGroup::Back),
    ("Overhead Press", MuscleGroup::Shoulders),
    ("Lateral Raise", MuscleGroup::Shoulders),
    ("Rear Delt Fly", MuscleGroup::Shoulders),
    ("Barbell Curl", MuscleGroup::Arms),
    ("Hammer Curl", MuscleGroup::Arms),
    ("Triceps Pushdown", MuscleGroup::Arms),
    ("Dips", MuscleGroup::Arms),
    ("Squat", MuscleGroup::Legs),
    ("Leg Press", MuscleGroup::Legs),
    ("Romanian Deadlift", MuscleGroup::Legs),
    ("Lunge", MuscleGroup::Legs),
    ("Calf Raise", MuscleGroup::Legs),
    ("Crunch", MuscleGroup::Abs),
    ("Plank", MuscleGroup::Abs),
    ("Hanging Leg Raise", MuscleGroup::Abs),
    ("Running", MuscleGroup::Other),
    ("Burpee", MuscleGroup::Other),
];

#[derive(Debug, SurrealValue)]
struct PresetRecord {
    id: String,
    name: String,
    muscle_group: String,
}

/// Insert the presets unless any preset already exists.
pub(crate) async fn seed_presets<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    let mut result = db
        .query("SELECT count() AS total FROM exercise WHERE is_custom = false GROUP ALL")
        .await?;
    let rows: Vec<CountRow> = result.take(0)?;
    if rows.first().map(|r| r.total).unwrap_or(0) > 0 {
        return Ok(());
    }

    let presets: Vec<PresetRecord> = PRESET_EXERCISES
        .iter()
        .map(|(name, group)| PresetRecord {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            muscle_group: group.as_str().to_string(),
        })
        .collect();
    let count = presets.len();

    db.query(
        "BEGIN TRANSACTION; \
         FOR $p IN $presets { \
             CREATE type::record('exercise', $p.id) SET \
             name = $p.name, muscle_group = $p.muscle_group, \
             is_custom = false, user_id = NONE; \
         }; \
         COMMIT TRANSACTION;",
    )
    .bind(("presets", presets))
    .await?
    .check()
    .map_err(|e| DbError::Migration(format!("preset seeding failed: {e}")))?;

    info!(count, "Seeded preset exercises");
    Ok(())
}

//! Schema definitions and migration runner for SurrealDB.
//!
//! All tables are SCHEMAFULL. UUIDs are stored as strings, calendar
//! dates as `YYYY-MM-DD` strings so that lexical order is date order,
//! and enums as strings with ASSERT constraints.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{info, instrument};

use crate::error::DbError;
use crate::seed;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD height ON TABLE user TYPE option<float>;
DEFINE FIELD created_at ON TABLE user TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Exercise catalog (presets have no user_id)
-- =======================================================================
DEFINE TABLE exercise SCHEMAFULL;
DEFINE FIELD name ON TABLE exercise TYPE string;
DEFINE FIELD muscle_group ON TABLE exercise TYPE string \
    ASSERT $value IN ['chest', 'back', 'shoulders', 'arms', 'legs', 'abs', 'other'];
DEFINE FIELD is_custom ON TABLE exercise TYPE bool DEFAULT false;
DEFINE FIELD user_id ON TABLE exercise TYPE option<string>;
DEFINE FIELD created_at ON TABLE exercise TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_exercise_user ON TABLE exercise COLUMNS user_id;

-- =======================================================================
-- Workouts (one per user per day)
-- =======================================================================
DEFINE TABLE workout SCHEMAFULL;
DEFINE FIELD user_id ON TABLE workout TYPE string;
DEFINE FIELD date ON TABLE workout TYPE string;
DEFINE FIELD memo ON TABLE workout TYPE option<string>;
DEFINE FIELD created_at ON TABLE workout TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE workout TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_workout_user_date ON TABLE workout \
    COLUMNS user_id, date UNIQUE;

-- Sets carry user_id and date of their workout so statistics and
-- account erasure never need a join.
DEFINE TABLE workout_set SCHEMAFULL;
DEFINE FIELD workout_id ON TABLE workout_set TYPE string;
DEFINE FIELD user_id ON TABLE workout_set TYPE string;
DEFINE FIELD date ON TABLE workout_set TYPE string;
DEFINE FIELD exercise_id ON TABLE workout_set TYPE string;
DEFINE FIELD position ON TABLE workout_set TYPE int;
DEFINE FIELD set_number ON TABLE workout_set TYPE int ASSERT $value >= 1;
DEFINE FIELD weight ON TABLE workout_set TYPE float ASSERT $value >= 0;
DEFINE FIELD reps ON TABLE workout_set TYPE int ASSERT $value >= 1;
DEFINE FIELD created_at ON TABLE workout_set TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_workout_set_workout ON TABLE workout_set \
    COLUMNS workout_id;
DEFINE INDEX idx_workout_set_user ON TABLE workout_set COLUMNS user_id;
DEFINE INDEX idx_workout_set_exercise ON TABLE workout_set \
    COLUMNS exercise_id;

-- =======================================================================
-- Menus
-- =======================================================================
DEFINE TABLE menu SCHEMAFULL;
DEFINE FIELD user_id ON TABLE menu TYPE string;
DEFINE FIELD name ON TABLE menu TYPE string;
DEFINE FIELD description ON TABLE menu TYPE option<string>;
DEFINE FIELD created_at ON TABLE menu TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE menu TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_menu_user ON TABLE menu COLUMNS user_id;

DEFINE TABLE menu_item SCHEMAFULL;
DEFINE FIELD menu_id ON TABLE menu_item TYPE string;
DEFINE FIELD user_id ON TABLE menu_item TYPE string;
DEFINE FIELD exercise_id ON TABLE menu_item TYPE string;
DEFINE FIELD order_number ON TABLE menu_item TYPE int ASSERT $value >= 1;
DEFINE FIELD target_sets ON TABLE menu_item TYPE int ASSERT $value >= 1;
DEFINE FIELD target_reps ON TABLE menu_item TYPE int ASSERT $value >= 1;
DEFINE FIELD target_weight ON TABLE menu_item TYPE option<float>;
DEFINE FIELD note ON TABLE menu_item TYPE option<string>;
DEFINE FIELD created_at ON TABLE menu_item TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_menu_item_menu ON TABLE menu_item COLUMNS menu_id;

-- =======================================================================
-- Body weight (one per user per day)
-- =======================================================================
DEFINE TABLE body_weight SCHEMAFULL;
DEFINE FIELD user_id ON TABLE body_weight TYPE string;
DEFINE FIELD date ON TABLE body_weight TYPE string;
DEFINE FIELD weight ON TABLE body_weight TYPE float \
    ASSERT $value >= 0.1 AND $value <= 500;
DEFINE FIELD body_fat_percentage ON TABLE body_weight TYPE option<float>;
DEFINE FIELD created_at ON TABLE body_weight TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_body_weight_user_date ON TABLE body_weight \
    COLUMNS user_id, date UNIQUE;
";

/// Apply all pending migrations, then seed the preset exercises.
///
/// Creates a `_migration` tracking table on first run and applies each
/// migration whose version exceeds the recorded maximum. Safe to run on
/// every start-up.
#[instrument(skip(db))]
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query("CREATE _migration SET version = $version, name = $name")
                .bind(("version", migration.version))
                .bind(("name", migration.name))
                .await?
                .check()
                .map_err(|e| {
                    DbError::Migration(format!(
                        "Failed to record migration v{}: {}",
                        migration.version, e,
                    ))
                })?;

            info!(version = migration.version, "Migration applied");
        }
    }

    seed::seed_presets(db).await
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

//! SurrealDB implementation of [`MenuRepository`].

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;
use trainlog_core::error::TrainlogResult;
use trainlog_core::models::menu::{CreateMenu, Menu, MenuItem, MenuItemInput, ReplaceMenu};
use trainlog_core::repository::MenuRepository;
use uuid::Uuid;

use super::exercise::load_exercises;
use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct MenuRowWithId {
    record_id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct MenuItemRowWithId {
    record_id: String,
    menu_id: String,
    exercise_id: String,
    order_number: u32,
    target_sets: u32,
    target_reps: u32,
    target_weight: Option<f64>,
    note: Option<String>,
}

#[derive(Debug, SurrealValue)]
struct NewItemRecord {
    id: String,
    exercise_id: String,
    order_number: u32,
    target_sets: u32,
    target_reps: u32,
    target_weight: Option<f64>,
    note: Option<String>,
}

const INSERT_ITEMS: &str = "\
FOR $i IN $items { \
    CREATE type::record('menu_item', $i.id) SET \
    menu_id = $id, user_id = $user_id, exercise_id = $i.exercise_id, \
    order_number = $i.order_number, target_sets = $i.target_sets, \
    target_reps = $i.target_reps, target_weight = $i.target_weight, \
    note = $i.note; \
};";

fn new_item_records(items: Vec<MenuItemInput>) -> Vec<NewItemRecord> {
    items
        .into_iter()
        .map(|item| NewItemRecord {
            id: Uuid::new_v4().to_string(),
            exercise_id: item.exercise_id.to_string(),
            order_number: item.order_number,
            target_sets: item.target_sets,
            target_reps: item.target_reps,
            target_weight: item.target_weight,
            note: item.note,
        })
        .collect()
}

/// SurrealDB implementation of the Menu repository.
#[derive(Clone)]
pub struct SurrealMenuRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMenuRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn assemble(&self, rows: Vec<MenuRowWithId>) -> Result<Vec<Menu>, DbError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let menu_ids: Vec<String> = rows.iter().map(|r| r.record_id.clone()).collect();
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM menu_item \
                 WHERE menu_id IN $ids ORDER BY order_number ASC",
            )
            .bind(("ids", menu_ids))
            .await?;
        let item_rows: Vec<MenuItemRowWithId> = result.take(0)?;

        let exercise_ids: BTreeSet<String> =
            item_rows.iter().map(|i| i.exercise_id.clone()).collect();
        let exercises = load_exercises(&self.db, exercise_ids.into_iter().collect()).await?;

        let mut items_by_menu: HashMap<String, Vec<MenuItem>> = HashMap::new();
        for row in item_rows {
            let exercise_id = parse_uuid(&row.exercise_id, "exercise")?;
            items_by_menu.entry(row.menu_id).or_default().push(MenuItem {
                id: parse_uuid(&row.record_id, "menu_item")?,
                exercise_id,
                order_number: row.order_number,
                target_sets: row.target_sets,
                target_reps: row.target_reps,
                target_weight: row.target_weight,
                note: row.note,
                exercise: exercises.get(&exercise_id).cloned(),
            });
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_menu.remove(&row.record_id).unwrap_or_default();
                Ok(Menu {
                    id: parse_uuid(&row.record_id, "menu")?,
                    user_id: parse_uuid(&row.user_id, "user")?,
                    name: row.name,
                    description: row.description,
                    items,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })
            })
            .collect()
    }
}

impl<C: Connection> MenuRepository for SurrealMenuRepository<C> {
    async fn create_with_items(&self, input: CreateMenu) -> TrainlogResult<Menu> {
        let id = Uuid::new_v4();
        let item_count = input.items.len();

        self.db
            .query(format!(
                "BEGIN TRANSACTION; \
                 CREATE type::record('menu', $id) SET \
                 user_id = $user_id, name = $name, description = $description; \
                 {INSERT_ITEMS} \
                 COMMIT TRANSACTION;"
            ))
            .bind(("id", id.to_string()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("items", new_item_records(input.items)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        info!(menu_id = %id, item_count, "Created menu");
        self.get_by_id(id).await
    }

    async fn get_by_id(&self, id: Uuid) -> TrainlogResult<Menu> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM type::record('menu', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MenuRowWithId> = result.take(0).map_err(DbError::from)?;
        let menu = self
            .assemble(rows)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                entity: "menu".into(),
                id: id_str,
            })?;
        Ok(menu)
    }

    async fn list_by_user(&self, user_id: Uuid) -> TrainlogResult<Vec<Menu>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM menu \
                 WHERE user_id = $user_id ORDER BY updated_at DESC",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MenuRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(self.assemble(rows).await?)
    }

    async fn replace(&self, id: Uuid, input: ReplaceMenu) -> TrainlogResult<Menu> {
        let existing = self.get_by_id(id).await?;

        self.db
            .query(format!(
                "BEGIN TRANSACTION; \
                 UPDATE type::record('menu', $id) SET \
                 name = $name, description = $description, \
                 updated_at = time::now(); \
                 DELETE menu_item WHERE menu_id = $id; \
                 {INSERT_ITEMS} \
                 COMMIT TRANSACTION;"
            ))
            .bind(("id", id.to_string()))
            .bind(("user_id", existing.user_id.to_string()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("items", new_item_records(input.items)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        self.get_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> TrainlogResult<()> {
        self.db
            .query(
                "BEGIN TRANSACTION; \
                 DELETE menu_item WHERE menu_id = $id; \
                 DELETE type::record('menu', $id); \
                 COMMIT TRANSACTION;",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        info!(menu_id = %id, "Deleted menu");
        Ok(())
    }
}

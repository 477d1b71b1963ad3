//! Menu aggregate service: reusable workout templates.

use tracing::info;
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::menu::{CreateMenu, Menu, MenuItemInput, ReplaceMenu};
use trainlog_core::ownership::ensure_owner;
use trainlog_core::repository::{ExerciseRepository, MenuRepository};
use uuid::Uuid;

use crate::validate::{
    bounded_name, exercises_visible, non_negative_weight, optional_text, positive,
};

pub(crate) const MAX_MENU_NAME: usize = 100;

/// Create and update input; update replaces every field and the whole
/// item list.
#[derive(Debug, Clone)]
pub struct MenuInput {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<MenuItemInput>,
}

pub struct MenuService<M: MenuRepository, E: ExerciseRepository> {
    menus: M,
    exercises: E,
}

impl<M: MenuRepository, E: ExerciseRepository> MenuService<M, E> {
    pub fn new(menus: M, exercises: E) -> Self {
        Self { menus, exercises }
    }

    pub async fn create(&self, owner: Uuid, input: MenuInput) -> TrainlogResult<Menu> {
        let input = self.validate(owner, input).await?;
        let menu = self
            .menus
            .create_with_items(CreateMenu {
                user_id: owner,
                name: input.name,
                description: input.description,
                items: input.items,
            })
            .await?;
        info!(menu_id = %menu.id, "Created menu");
        Ok(menu)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> TrainlogResult<Menu> {
        let menu = self.menus.get_by_id(id).await?;
        ensure_owner(menu, owner)
    }

    /// Most recently edited first; items ordered by position.
    pub async fn list(&self, owner: Uuid) -> TrainlogResult<Vec<Menu>> {
        self.menus.list_by_user(owner).await
    }

    pub async fn update(&self, owner: Uuid, id: Uuid, input: MenuInput) -> TrainlogResult<Menu> {
        self.get(owner, id).await?;
        let input = self.validate(owner, input).await?;
        self.menus
            .replace(
                id,
                ReplaceMenu {
                    name: input.name,
                    description: input.description,
                    items: input.items,
                },
            )
            .await
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> TrainlogResult<()> {
        self.get(owner, id).await?;
        self.menus.delete(id).await?;
        info!(menu_id = %id, "Deleted menu");
        Ok(())
    }

    async fn validate(&self, owner: Uuid, input: MenuInput) -> TrainlogResult<MenuInput> {
        let name = bounded_name(&input.name, "menu name", MAX_MENU_NAME)?;
        if input.items.is_empty() {
            return Err(TrainlogError::validation("a menu needs at least one item"));
        }

        let mut items = Vec::with_capacity(input.items.len());
        for item in input.items {
            positive(item.order_number, "order_number")?;
            positive(item.target_sets, "target_sets")?;
            positive(item.target_reps, "target_reps")?;
            if let Some(weight) = item.target_weight {
                non_negative_weight(weight, "target_weight")?;
            }
            items.push(MenuItemInput {
                note: optional_text(item.note),
                ..item
            });
        }
        exercises_visible(&self.exercises, owner, items.iter().map(|i| i.exercise_id)).await?;

        Ok(MenuInput {
            name,
            description: optional_text(input.description),
            items,
        })
    }
}

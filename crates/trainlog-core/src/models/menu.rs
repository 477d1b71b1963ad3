//! Menu aggregate: a reusable workout template.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::Exercise;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: Uuid,
    pub exercise_id: Uuid,
    /// 1-based position within the menu.
    pub order_number: u32,
    pub target_sets: u32,
    pub target_reps: u32,
    pub target_weight: Option<f64>,
    pub note: Option<String>,
    pub exercise: Option<Exercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Ordered by `order_number`.
    pub items: Vec<MenuItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemInput {
    pub exercise_id: Uuid,
    pub order_number: u32,
    pub target_sets: u32,
    pub target_reps: u32,
    pub target_weight: Option<f64>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenu {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<MenuItemInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceMenu {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<MenuItemInput>,
}

//! Body-weight log: at most one record per user per day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyWeight {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight: f64,
    pub body_fat_percentage: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBodyWeight {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight: f64,
    pub body_fat_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBodyWeight {
    pub weight: f64,
    pub body_fat_percentage: Option<f64>,
}

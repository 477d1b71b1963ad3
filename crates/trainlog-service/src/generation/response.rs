//! Parsing and grounding of model output.
//!
//! The completion is untrusted: it must parse as the mandated shape,
//! and each item is then checked against the caller's catalog. Items
//! naming an unknown exercise are dropped, not fatal.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::exercise::Exercise;
use uuid::Uuid;

use super::{GeneratedMenu, GeneratedMenuItem};
use crate::menu::MAX_MENU_NAME;

const FALLBACK_NAME: &str = "Generated menu";

#[derive(Debug, Deserialize)]
pub(crate) struct RawMenu {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    /// Kept loose so a mistyped id drops one item instead of failing
    /// the whole response.
    exercise_id: serde_json::Value,
    order_number: u32,
    target_sets: u32,
    target_reps: u32,
    #[serde(default)]
    target_weight: Option<f64>,
    #[serde(default)]
    note: Option<String>,
}

/// Remove a surrounding Markdown code fence, if any.
pub(crate) fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

pub(crate) fn parse_menu(content: &str) -> TrainlogResult<RawMenu> {
    serde_json::from_str(strip_code_fence(content))
        .map_err(|e| TrainlogError::MalformedExternalResponse(format!("menu JSON: {e}")))
}

/// Keep items whose exercise is in `catalog`, attach that exercise and
/// order by position. Fails `Unprocessable` when nothing survives.
pub(crate) fn ground(raw: RawMenu, catalog: &HashMap<Uuid, Exercise>) -> TrainlogResult<GeneratedMenu> {
    let received = raw.items.len();
    let mut items: Vec<GeneratedMenuItem> = raw
        .items
        .into_iter()
        .filter_map(|item| {
            let exercise = item
                .exercise_id
                .as_str()
                .and_then(|id| Uuid::parse_str(id.trim()).ok())
                .and_then(|id| catalog.get(&id));
            let Some(exercise) = exercise else {
                warn!(exercise_id = %item.exercise_id, "Dropping generated item with unknown exercise");
                return None;
            };
            if item.order_number == 0 || item.target_sets == 0 || item.target_reps == 0 {
                warn!(exercise_id = %exercise.id, "Dropping generated item with zero targets");
                return None;
            }
            Some(GeneratedMenuItem {
                exercise_id: exercise.id,
                order_number: item.order_number,
                target_sets: item.target_sets,
                target_reps: item.target_reps,
                target_weight: item.target_weight.filter(|w| w.is_finite() && *w >= 0.0),
                note: item.note.filter(|n| !n.trim().is_empty()),
                exercise: exercise.clone(),
            })
        })
        .collect();

    if items.is_empty() {
        return Err(TrainlogError::Unprocessable(format!(
            "none of the {received} generated items reference a known exercise"
        )));
    }
    items.sort_by_key(|i| i.order_number);

    let name = raw.name.trim();
    let name = if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name.chars().take(MAX_MENU_NAME).collect()
    };

    Ok(GeneratedMenu {
        name,
        description: raw.description.filter(|d| !d.trim().is_empty()),
        items,
    })
}

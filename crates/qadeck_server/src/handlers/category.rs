//! Category order HTTP handlers.
//!
//! The persisted order holds real category names only; the `All` pin and
//! tool pseudo-categories are fixed and rejected as user-managed entries.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use qadeck_core::categories::{derive_order, group_by_category};
use qadeck_core::constants::{is_tool_category, ALL_CATEGORY};
use qadeck_core::AppError;
use serde::Deserialize;
use serde_json::json;

/// Request payload for replacing the sidebar order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<String>,
}

/// Request payload for adding a category.
#[derive(Debug, Deserialize)]
pub struct AddCategoryRequest {
    pub name: String,
}

/// Request payload for renaming a category.
#[derive(Debug, Deserialize)]
pub struct RenameCategoryRequest {
    pub new_name: String,
}

fn validate_category_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(
            "Category name must not be empty".to_string(),
        ));
    }
    if trimmed == ALL_CATEGORY || is_tool_category(trimmed) {
        return Err(AppError::BadRequest(format!(
            "'{}' is a reserved category name",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

fn derived_display_order(state: &AppState) -> Result<Vec<String>, AppError> {
    let links = state.db.links.list()?;
    let groups = group_by_category(&links);
    let persisted = state.db.settings.category_order()?;
    let derived = derive_order(&groups, &persisted);
    if derived.changed_from(&persisted) {
        state
            .db
            .settings
            .set_category_order(&derived.merged_persisted)?;
    }
    Ok(derived.display)
}

/// Current derived sidebar order, self-healing the persisted order as a
/// side effect.
///
/// # Errors
/// Returns an error if storage access fails.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let order = derived_display_order(&state)?;
    Ok(Json(json!({ "order": order })))
}

/// Replace the persisted sidebar order (drag-reorder).
///
/// Pins and duplicates are cleaned up on the next derivation; the payload
/// is stored as provided apart from trimming.
///
/// # Errors
/// Returns an error if storage access fails.
pub async fn reorder_categories(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let cleaned: Vec<String> = req
        .order
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    state.db.settings.set_category_order(&cleaned)?;
    let order = derived_display_order(&state)?;
    Ok(Json(json!({ "order": order })))
}

/// Add a category to the persisted order ahead of any link carrying it.
///
/// # Errors
/// Returns an error for blank or reserved names, or if storage fails.
pub async fn add_category(
    State(state): State<AppState>,
    Json(req): Json<AddCategoryRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let name = validate_category_name(&req.name)?;
    let mut order = state.db.settings.category_order()?;
    if !order.contains(&name) {
        order.push(name);
        state.db.settings.set_category_order(&order)?;
    }
    Ok(Json(json!({ "order": order })))
}

/// Rename a category across all links and the persisted order.
///
/// # Errors
/// Returns an error for blank or reserved target names, or if storage
/// fails.
pub async fn rename_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<RenameCategoryRequest>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let new_name = validate_category_name(&req.new_name)?;
    let renamed = state.db.links.rename_category(&name, &new_name)?;

    let mut order = state.db.settings.category_order()?;
    let had_target = order.contains(&new_name);
    for entry in order.iter_mut() {
        if *entry == name {
            *entry = new_name.clone();
        }
    }
    if had_target {
        // Merging into an existing category; drop the duplicate slot.
        let mut seen = Vec::new();
        order.retain(|entry| {
            if seen.contains(entry) {
                false
            } else {
                seen.push(entry.clone());
                true
            }
        });
    }
    state.db.settings.set_category_order(&order)?;

    Ok(Json(json!({ "renamed": renamed })))
}

/// Delete a category: removes its links and prunes the persisted order.
///
/// Pruning alone would be undone by the self-healing merge while links
/// still carry the category, so the links go with it.
///
/// # Returns
/// 204 No Content.
///
/// # Errors
/// Returns an error if storage access fails.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, HttpError> {
    let ids = state.db.links.ids_in_category(&name)?;
    if !ids.is_empty() {
        state.db.links.delete_many(&ids)?;
    }

    let mut order = state.db.settings.category_order()?;
    let before = order.len();
    order.retain(|entry| *entry != name);
    if order.len() != before {
        state.db.settings.set_category_order(&order)?;
    }

    Ok(StatusCode::NO_CONTENT)
}

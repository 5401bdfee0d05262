//! Test-data set HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use qadeck_core::models::dataset::{CreateDataSetRequest, TestDataSet};
use qadeck_core::table::{contains_value, parse_csv};
use qadeck_core::AppError;
use serde::Deserialize;
use serde_json::json;

/// Query parameters for the SKU membership lookup.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub sku: String,
}

/// Upload a CSV as a new data set.
///
/// CSV parsing never rejects input; a malformed upload yields whatever
/// table results. The first upload into an empty collection becomes the
/// active data set.
///
/// # Errors
/// Returns an error for a blank name or if persistence fails.
pub async fn create_dataset(
    State(state): State<AppState>,
    Json(req): Json<CreateDataSetRequest>,
) -> Result<Json<TestDataSet>, HttpError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Data set name must not be empty".to_string()).into());
    }
    let dataset = TestDataSet::new(name, parse_csv(&req.csv));
    state.db.datasets.create(&dataset)?;
    Ok(Json(dataset))
}

/// List all data sets and the active pointer.
///
/// # Errors
/// Returns an error if listing fails.
pub async fn list_datasets(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let datasets = state.db.datasets.list()?;
    let active_id = state.db.datasets.active_id()?;
    Ok(Json(json!({
        "data_sets": datasets,
        "active_data_set_id": active_id,
    })))
}

/// Delete a data set, reassigning the active pointer if needed.
///
/// # Returns
/// 204 No Content.
///
/// # Errors
/// Returns 404 when the id does not exist.
pub async fn delete_dataset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if state.db.datasets.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound.into())
    }
}

/// Mark a data set as active.
///
/// # Errors
/// Returns 404 when the id does not exist.
pub async fn activate_dataset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, HttpError> {
    state.db.datasets.set_active(&id)?;
    Ok(Json(json!({ "active_data_set_id": id })))
}

/// Membership lookup against the active data set.
///
/// # Returns
/// `{ "sku", "found", "data_set_id", "data_set_name" }`.
///
/// # Errors
/// Returns 404 when no data set is active.
pub async fn lookup_sku(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let Some(dataset) = state.db.datasets.active()? else {
        return Err(AppError::NotFound.into());
    };
    let sku = query.sku.trim().to_string();
    let found = contains_value(&dataset.table_data, &sku);
    Ok(Json(json!({
        "sku": sku,
        "found": found,
        "data_set_id": dataset.id,
        "data_set_name": dataset.name,
    })))
}

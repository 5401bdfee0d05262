//! API environment HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use qadeck_core::models::environment::{ApiEnvironment, EnvironmentRequest};
use qadeck_core::AppError;
use serde::Deserialize;
use serde_json::json;

/// Query parameters for rendering a SKU lookup URL.
#[derive(Debug, Deserialize)]
pub struct SkuUrlQuery {
    pub sku: String,
}

fn validate_environment_fields(req: &EnvironmentRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Environment name must not be empty".to_string(),
        ));
    }
    if req.url.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Environment URL must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// List all environments.
///
/// # Errors
/// Returns an error if listing fails.
pub async fn list_environments(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let environments = state.db.environments.list()?;
    Ok(Json(json!({ "environments": environments })))
}

/// Create a new environment.
///
/// # Errors
/// Returns an error if validation or persistence fails.
pub async fn create_environment(
    State(state): State<AppState>,
    Json(req): Json<EnvironmentRequest>,
) -> Result<Json<ApiEnvironment>, HttpError> {
    validate_environment_fields(&req)?;
    let environment = ApiEnvironment::new(req.name, req.url);
    state.db.environments.create(&environment)?;
    Ok(Json(environment))
}

/// Replace an environment's name and URL.
///
/// # Errors
/// Returns an error if validation fails or the environment does not exist.
pub async fn update_environment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EnvironmentRequest>,
) -> Result<Json<ApiEnvironment>, HttpError> {
    validate_environment_fields(&req)?;
    state
        .db
        .environments
        .update(&id, req)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound.into())
}

/// Delete an environment by id.
///
/// # Returns
/// 204 No Content.
///
/// # Errors
/// Returns 404 when the id does not exist.
pub async fn delete_environment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if state.db.environments.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound.into())
    }
}

/// Render the SKU lookup URL for an environment.
///
/// # Returns
/// `{ "url": rendered }`.
///
/// # Errors
/// Returns 404 for an unknown environment and 400 when its URL template
/// lacks the `{{sku}}` placeholder.
pub async fn sku_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SkuUrlQuery>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let Some(environment) = state.db.environments.get(&id)? else {
        return Err(AppError::NotFound.into());
    };
    let url = environment.render_sku_url(&query.sku)?;
    Ok(Json(json!({ "url": url })))
}

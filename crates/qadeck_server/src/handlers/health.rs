//! Health probe HTTP handlers.

use crate::health::HealthSnapshot;
use crate::{error::HttpError, AppState};
use axum::{extract::State, Json};

/// Current probe statuses and the batch refreshing flag.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthSnapshot> {
    Json(state.health.snapshot())
}

/// Probe every `Sites` link and wait for the batch to settle.
///
/// If a batch is already in flight no second one starts; the in-flight
/// snapshot is returned instead.
///
/// # Errors
/// Returns an error if the link list cannot be loaded.
pub async fn refresh_health(
    State(state): State<AppState>,
) -> Result<Json<HealthSnapshot>, HttpError> {
    let links = state.db.links.list()?;
    let snapshot = state.health.clone().refresh(&links).await;
    Ok(Json(snapshot))
}

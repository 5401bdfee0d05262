//! UI preference and browser-profile HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{extract::State, Json};
use qadeck_core::models::prefs::{BrowserProfile, UiPrefs};
use serde_json::json;

/// Persisted UI preferences (defaults when never set).
pub async fn get_prefs(State(state): State<AppState>) -> Result<Json<UiPrefs>, HttpError> {
    Ok(Json(state.db.settings.ui_prefs()?))
}

/// Replace the persisted UI preferences.
///
/// # Errors
/// Returns an error if persistence fails.
pub async fn put_prefs(
    State(state): State<AppState>,
    Json(prefs): Json<UiPrefs>,
) -> Result<Json<UiPrefs>, HttpError> {
    state.db.settings.set_ui_prefs(&prefs)?;
    Ok(Json(prefs))
}

/// The saved browser-profile list. Launching is a client concern.
pub async fn get_profiles(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let profiles = state.db.settings.profiles()?;
    Ok(Json(json!({ "profiles": profiles })))
}

/// Replace the saved browser-profile list.
///
/// # Errors
/// Returns an error if persistence fails.
pub async fn put_profiles(
    State(state): State<AppState>,
    Json(profiles): Json<Vec<BrowserProfile>>,
) -> Result<Json<serde_json::Value>, HttpError> {
    state.db.settings.set_profiles(&profiles)?;
    Ok(Json(json!({ "profiles": profiles })))
}

//! Link HTTP handlers: CRUD plus the composed view pipeline.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use qadeck_core::categories::{derive_order, group_by_category, CategoryGroup};
use qadeck_core::constants::ALL_CATEGORY;
use qadeck_core::filter::{filter_links, SearchInput};
use qadeck_core::models::link::{
    validate_link_fields, CreateLinkRequest, DeleteLinksRequest, LinkRecord, UpdateLinkRequest,
};
use qadeck_core::table::contains_value;
use qadeck_core::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Query parameters for the view pipeline.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Dataset membership result attached to a SKU-shaped query.
#[derive(Debug, Serialize)]
pub struct SkuLookupResult {
    pub sku: String,
    pub found: bool,
    pub data_set_id: String,
    pub data_set_name: String,
}

/// Composed response of the view pipeline: sidebar order, visible groups,
/// and the dataset lookup when the query classified as a SKU.
#[derive(Debug, Serialize)]
pub struct LinkViewResponse {
    pub order: Vec<String>,
    pub groups: Vec<CategoryGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_lookup: Option<SkuLookupResult>,
}

/// List all links.
///
/// # Returns
/// `{ "links": [...] }` in insertion order.
///
/// # Errors
/// Returns an error if listing fails.
pub async fn list_links(State(state): State<AppState>) -> Result<Json<serde_json::Value>, HttpError> {
    let links = state.db.links.list()?;
    Ok(Json(json!({ "links": links })))
}

/// Create a new link.
///
/// # Arguments
/// - `state`: Application state.
/// - `req`: Link creation payload (id is assigned here).
///
/// # Returns
/// The created link as JSON.
///
/// # Errors
/// Returns an error if validation or persistence fails.
pub async fn create_link(
    State(state): State<AppState>,
    Json(req): Json<CreateLinkRequest>,
) -> Result<Json<LinkRecord>, HttpError> {
    validate_link_fields(&req.name, &req.url)?;
    let link = LinkRecord::new(req.name, req.url, req.category);
    state.db.links.create(&link)?;
    Ok(Json(link))
}

/// Update an existing link (full replace by id).
///
/// # Returns
/// The updated link as JSON.
///
/// # Errors
/// Returns an error if validation fails or the link does not exist.
pub async fn update_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateLinkRequest>,
) -> Result<Json<LinkRecord>, HttpError> {
    validate_link_fields(&req.name, &req.url)?;
    state
        .db
        .links
        .update(&id, req)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound.into())
}

/// Bulk-delete links by id set. Stale ids are skipped.
///
/// # Returns
/// 204 No Content.
///
/// # Errors
/// Returns an error if deletion fails.
pub async fn delete_links(
    State(state): State<AppState>,
    Json(req): Json<DeleteLinksRequest>,
) -> Result<StatusCode, HttpError> {
    let deleted = state.db.links.delete_many(&req.ids)?;
    tracing::debug!("Deleted {} of {} requested links", deleted, req.ids.len());
    Ok(StatusCode::NO_CONTENT)
}

/// The composed view pipeline: group, derive sidebar order (self-healing
/// persist), filter by selection and search input, and run the dataset
/// lookup when the input is SKU-shaped.
///
/// # Errors
/// Returns an error if storage access fails.
pub async fn view_links(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<LinkViewResponse>, HttpError> {
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

    let selected = query.category.as_deref().unwrap_or(ALL_CATEGORY);
    let input = SearchInput::classify(query.q.as_deref().unwrap_or_default());
    let filtered = filter_links(&groups, selected, &input);

    let sku_lookup = match input.sku() {
        Some(sku) => state.db.datasets.active()?.map(|dataset| SkuLookupResult {
            sku: sku.to_string(),
            found: contains_value(&dataset.table_data, sku),
            data_set_id: dataset.id,
            data_set_name: dataset.name,
        }),
        None => None,
    };

    Ok(Json(LinkViewResponse {
        order: derived.display,
        groups: filtered,
        sku_lookup,
    }))
}

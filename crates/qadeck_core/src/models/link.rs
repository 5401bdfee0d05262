//! Link record model and CRUD request payloads.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// A bookmarked link stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Free-text grouping label. Blank means uncategorized; grouping buckets
    /// such records under a sentinel category rather than dropping them.
    #[serde(default)]
    pub category: String,
    /// Drives stable insertion-order listing via the creation index.
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a link (id is assigned server-side).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkRequest {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub category: String,
}

/// Request payload for updating a link (full replace by id).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLinkRequest {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub category: String,
}

/// Request payload for bulk deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteLinksRequest {
    pub ids: Vec<String>,
}

impl LinkRecord {
    /// Create a new link with a fresh id and trimmed fields.
    pub fn new(name: String, url: String, category: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            url: url.trim().to_string(),
            category: category.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Validate name/url fields shared by create and update payloads.
///
/// Validation is intentionally trivial: non-empty name, non-empty url that
/// looks like an http(s) URL. Category is free text and may be blank.
///
/// # Errors
/// Returns [`AppError::BadRequest`] describing the first failing field.
pub fn validate_link_fields(name: &str, url: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Link name must not be empty".to_string()));
    }
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::BadRequest("Link URL must not be empty".to_string()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::BadRequest(format!(
            "Link URL must start with http:// or https:// (got '{}')",
            url
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_link_trims_fields_and_assigns_id() {
        let link = LinkRecord::new(
            "  Jira  ".to_string(),
            " https://jira.example.com ".to_string(),
            " Tools ".to_string(),
        );
        assert!(!link.id.is_empty());
        assert_eq!(link.name, "Jira");
        assert_eq!(link.url, "https://jira.example.com");
        assert_eq!(link.category, "Tools");
    }

    #[test]
    fn validate_rejects_blank_name_and_malformed_url() {
        assert!(validate_link_fields("", "https://a.example").is_err());
        assert!(validate_link_fields("a", "").is_err());
        assert!(validate_link_fields("a", "ftp://a.example").is_err());
        assert!(validate_link_fields("a", "not a url").is_err());
        assert!(validate_link_fields("a", "https://a.example").is_ok());
        assert!(validate_link_fields("a", "  http://a.example  ").is_ok());
    }
}

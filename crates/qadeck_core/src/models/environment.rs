//! API environment models for the SKU lookup tools.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder token that environment URL templates must contain.
pub const SKU_PLACEHOLDER: &str = "{{sku}}";

/// A named API environment whose URL template contains a `{{sku}}`
/// placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEnvironment {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Request payload for creating or replacing an environment.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentRequest {
    pub name: String,
    pub url: String,
}

impl ApiEnvironment {
    /// Create a new environment with a fresh id and trimmed fields.
    pub fn new(name: String, url: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            url: url.trim().to_string(),
        }
    }

    /// Render the lookup URL for a SKU.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] when the template lacks the
    /// `{{sku}}` placeholder, mirroring the misconfiguration error the
    /// lookup tool surfaces.
    pub fn render_sku_url(&self, sku: &str) -> Result<String, AppError> {
        if !self.url.contains(SKU_PLACEHOLDER) {
            return Err(AppError::BadRequest(format!(
                "Environment '{}' URL is not configured correctly; it must contain the {} placeholder",
                self.name, SKU_PLACEHOLDER
            )));
        }
        Ok(self.url.replace(SKU_PLACEHOLDER, sku.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_trimmed_sku() {
        let env = ApiEnvironment::new(
            "Beta1".to_string(),
            "https://beta1.example.com/product/findbysku?sku={{sku}}".to_string(),
        );
        let url = env.render_sku_url(" 12345678 ").expect("render");
        assert_eq!(url, "https://beta1.example.com/product/findbysku?sku=12345678");
    }

    #[test]
    fn render_rejects_template_without_placeholder() {
        let env = ApiEnvironment::new(
            "Broken".to_string(),
            "https://broken.example.com/product".to_string(),
        );
        let err = env.render_sku_url("12345678").expect_err("missing placeholder");
        assert!(err.to_string().contains("{{sku}}"));
    }
}

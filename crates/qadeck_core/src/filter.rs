//! Search-input classification and link filtering.
//!
//! The search box serves two unrelated features: free-text link filtering
//! and SKU membership lookup against the active test-data set. Input is
//! classified once into an explicit variant and each consumer dispatches on
//! it, instead of re-testing a digit pattern at every use site.

use crate::categories::CategoryGroup;
use crate::constants::{is_tool_category, ALL_CATEGORY, SKU_MIN_DIGITS};

/// Classified search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    /// Blank after trimming; no filtering.
    Empty,
    /// Ordinary text search, lowercased and trimmed.
    Text(String),
    /// A SKU-looking token (8+ digits, nothing else), trimmed. Reserved for
    /// dataset lookup; never narrows the link view.
    Sku(String),
}

impl SearchInput {
    /// Classify a raw search term.
    ///
    /// A term of 8 or more consecutive ASCII digits (and nothing else) is a
    /// SKU. Shorter all-digit terms are ordinary text.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if trimmed.len() >= SKU_MIN_DIGITS && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Sku(trimmed.to_string());
        }
        Self::Text(trimmed.to_ascii_lowercase())
    }

    /// The SKU token, when this input classified as one.
    pub fn sku(&self) -> Option<&str> {
        match self {
            Self::Sku(sku) => Some(sku.as_str()),
            _ => None,
        }
    }
}

fn link_matches(link: &crate::models::link::LinkRecord, needle: &str) -> bool {
    link.name.to_lowercase().contains(needle)
        || link.url.to_lowercase().contains(needle)
        || link.category.to_lowercase().contains(needle)
}

/// Compute the visible subset of links per category.
///
/// Rules, applied in order:
/// 1. A tool pseudo-category selection shows no link grid at all.
/// 2. SKU input bypasses filtering entirely; the full map is returned and
///    the token is consumed by the dataset lookup instead.
/// 3. A non-`All` selection restricts to that category (possibly empty).
/// 4. Empty input returns the restricted map as-is.
/// 5. Text input keeps links whose name, url, or category contains the
///    needle case-insensitively; groups left empty are dropped.
///
/// Never mutates its inputs; output ordering follows the input grouping.
pub fn filter_links(
    groups: &[CategoryGroup],
    selected_category: &str,
    input: &SearchInput,
) -> Vec<CategoryGroup> {
    if is_tool_category(selected_category) {
        return Vec::new();
    }

    if matches!(input, SearchInput::Sku(_)) {
        return groups.to_vec();
    }

    let restricted: Vec<CategoryGroup> = if selected_category == ALL_CATEGORY {
        groups.to_vec()
    } else {
        groups
            .iter()
            .filter(|group| group.category == selected_category)
            .cloned()
            .collect()
    };

    let needle = match input {
        SearchInput::Text(needle) => needle,
        _ => return restricted,
    };

    restricted
        .into_iter()
        .filter_map(|group| {
            let links: Vec<_> = group
                .links
                .into_iter()
                .filter(|link| link_matches(link, needle))
                .collect();
            if links.is_empty() {
                None
            } else {
                Some(CategoryGroup {
                    category: group.category,
                    links,
                })
            }
        })
        .collect()
}

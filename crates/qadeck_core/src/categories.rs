//! Category grouping and sidebar-order derivation.
//!
//! The sidebar shows a fixed leading `All` entry, every category that
//! currently has at least one link, and the trailing tool pseudo-categories.
//! A user-customized ordering is persisted separately; derivation merges the
//! persisted order with the categories actually present so that new
//! categories are never lost and stale entries are retained for later
//! repopulation.

use crate::constants::{ALL_CATEGORY, TOOL_CATEGORIES, UNCATEGORIZED_CATEGORY};
use crate::models::link::LinkRecord;
use serde::{Deserialize, Serialize};

/// A category and its links, in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: String,
    pub links: Vec<LinkRecord>,
}

/// Result of merging present categories with the persisted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedOrder {
    /// Sidebar display list: `All`, ordered present categories, tool entries.
    pub display: Vec<String>,
    /// Persisted-order replacement: prior entries retained (even when no
    /// link currently carries them), new categories appended.
    pub merged_persisted: Vec<String>,
}

impl DerivedOrder {
    /// Whether the merged order differs from what was read from the store.
    ///
    /// Callers persist only on change to avoid redundant write churn.
    pub fn changed_from(&self, persisted: &[String]) -> bool {
        self.merged_persisted != persisted
    }
}

/// Resolve the category bucket for a link. Blank categories are bucketed
/// under [`UNCATEGORIZED_CATEGORY`] rather than dropped.
pub fn bucket_for(link: &LinkRecord) -> &str {
    let trimmed = link.category.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED_CATEGORY
    } else {
        trimmed
    }
}

/// Whether a stored category string matches a category selector.
///
/// Selectors name categories as displayed, so blank stored categories match
/// the [`UNCATEGORIZED_CATEGORY`] bucket they are grouped under. Rename and
/// delete must use this rather than raw string equality, or operations on
/// `Uncategorized` would silently miss every blank-category link.
pub fn category_matches(stored: &str, selector: &str) -> bool {
    let trimmed = stored.trim();
    if trimmed.is_empty() {
        selector == UNCATEGORIZED_CATEGORY
    } else {
        trimmed == selector
    }
}

/// Group links by category, preserving first-appearance order.
///
/// # Returns
/// One [`CategoryGroup`] per distinct category, links in input order.
pub fn group_by_category(links: &[LinkRecord]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for link in links {
        let category = bucket_for(link);
        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.links.push(link.clone()),
            None => groups.push(CategoryGroup {
                category: category.to_string(),
                links: vec![link.clone()],
            }),
        }
    }
    groups
}

/// Merge the categories present in `groups` with a persisted user order.
///
/// The display list starts with the `All` pin, then every present category
/// sorted by its position in `persisted` (entries not in `persisted` keep
/// their first-produced relative order and trail the ordered ones), then the
/// fixed tool pseudo-categories. The merged persisted order keeps stale
/// entries so a soon-to-be-repopulated category does not lose its slot.
///
/// # Guarantees
/// Every present category appears exactly once in `display`; no duplicates;
/// stable for identical inputs. This projection never fails.
pub fn derive_order(groups: &[CategoryGroup], persisted: &[String]) -> DerivedOrder {
    let present: Vec<&str> = {
        let mut seen: Vec<&str> = Vec::new();
        for group in groups {
            if !seen.contains(&group.category.as_str()) {
                seen.push(group.category.as_str());
            }
        }
        seen
    };

    // Persisted entries first (deduplicated, pins excluded), then new
    // categories appended in first-produced order.
    let mut merged: Vec<String> = Vec::new();
    for name in persisted {
        if name == ALL_CATEGORY || TOOL_CATEGORIES.contains(&name.as_str()) {
            continue;
        }
        if !merged.contains(name) {
            merged.push(name.clone());
        }
    }
    for name in &present {
        if !merged.iter().any(|existing| existing == name) {
            merged.push((*name).to_string());
        }
    }

    let mut display = Vec::with_capacity(present.len() + 1 + TOOL_CATEGORIES.len());
    display.push(ALL_CATEGORY.to_string());
    for name in &merged {
        if present.contains(&name.as_str()) {
            display.push(name.clone());
        }
    }
    for tool in TOOL_CATEGORIES {
        display.push(tool.to_string());
    }

    DerivedOrder {
        display,
        merged_persisted: merged,
    }
}

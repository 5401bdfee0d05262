//! Shared constants for categories, ports, and probe behavior.

/// Default HTTP port for the QADeck server.
pub const DEFAULT_PORT: u16 = 38520;

/// Fixed leading sidebar entry that shows every category at once.
pub const ALL_CATEGORY: &str = "All";

/// Category whose links are eligible for health probing.
pub const SITES_CATEGORY: &str = "Sites";

/// Bucket for links whose category is blank.
pub const UNCATEGORIZED_CATEGORY: &str = "Uncategorized";

/// Fixed trailing sidebar entries that switch the main view to a tool
/// instead of filtering links.
pub const TOOL_CATEGORIES: [&str; 3] = ["Test Data", "Quick Tools", "Chrome Profiles"];

/// Minimum run of digits for a search term to classify as a SKU.
pub const SKU_MIN_DIGITS: usize = 8;

/// Default per-probe timeout in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Returns true when `name` is one of the trailing tool pseudo-categories.
pub fn is_tool_category(name: &str) -> bool {
    TOOL_CATEGORIES.contains(&name)
}

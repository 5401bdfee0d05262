//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Link rows (`LinkRecord`, JSON-encoded).
pub const LINKS: TableDefinition<&str, &[u8]> = TableDefinition::new("links");
/// Insertion-order index for links: (created-millis, id).
pub const LINKS_BY_CREATED: TableDefinition<(u64, &str), ()> =
    TableDefinition::new("links_by_created");
/// Test-data set rows (`TestDataSet`, JSON-encoded).
pub const DATASETS: TableDefinition<&str, &[u8]> = TableDefinition::new("datasets");
/// API environment rows (`ApiEnvironment`, JSON-encoded).
pub const ENVIRONMENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("environments");
/// Flat settings keys (JSON-encoded values).
pub const SETTINGS: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");

/// Settings key for the persisted sidebar category order.
pub const KEY_CATEGORY_ORDER: &str = "category_order";
/// Settings key for the active test-data set id.
pub const KEY_ACTIVE_DATASET: &str = "active_dataset_id";
/// Settings key for UI preferences.
pub const KEY_UI_PREFS: &str = "ui_prefs";
/// Settings key for the browser-profile list.
pub const KEY_PROFILES: &str = "profiles";

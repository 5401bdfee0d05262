//! Storage-layer tests over a temporary database.

mod dataset_active_pointer;
mod link_ops;

use crate::db::Database;
use tempfile::TempDir;

pub(crate) fn open_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("open db");
    (db, temp_dir)
}

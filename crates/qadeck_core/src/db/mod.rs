//! redb-backed flat persisted store for QADeck.
//!
//! Every value is a JSON-encoded blob; typed accessors per concern wrap the
//! shared database handle. Opening the store initializes all tables so read
//! transactions never observe a missing table.

/// Test-data set storage and active-pointer maintenance.
pub mod dataset;
/// API environment storage.
pub mod environment;
/// Link storage and the insertion-order index.
pub mod link;
/// Flat settings keys (category order, prefs, profiles).
pub mod settings;
/// Table definitions.
pub mod tables;

use crate::error::AppError;
use std::sync::Arc;
use tables::REDB_FILE_NAME;

#[cfg(test)]
mod tests;

/// Database handle with typed accessors over shared redb tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub links: link::LinkDb,
    pub datasets: dataset::DataSetDb,
    pub environments: environment::EnvironmentDb,
    pub settings: settings::SettingsDb,
}

impl Database {
    /// Open the database directory and initialize all tables.
    ///
    /// # Returns
    /// A fully initialized [`Database`].
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or redb fails to
    /// open or initialize tables.
    pub fn new(path: &str) -> Result<Self, AppError> {
        std::fs::create_dir_all(path).map_err(|e| {
            AppError::StorageMessage(format!("Failed to create db directory '{}': {}", path, e))
        })?;
        let file = std::path::Path::new(path).join(REDB_FILE_NAME);
        let db = Arc::new(redb::Database::create(file)?);
        Self::from_shared(db)
    }

    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            links: link::LinkDb::new(db.clone())?,
            datasets: dataset::DataSetDb::new(db.clone())?,
            environments: environment::EnvironmentDb::new(db.clone())?,
            settings: settings::SettingsDb::new(db.clone())?,
            db,
        })
    }
}

//! Flat settings storage: category order, UI prefs, browser profiles.
//!
//! Each key holds one JSON-encoded value; a missing key means "use the
//! default". Unreadable values are treated as absent rather than fatal, so
//! one corrupt key degrades a single feature instead of aborting startup.

use crate::db::tables::{KEY_CATEGORY_ORDER, KEY_PROFILES, KEY_UI_PREFS, SETTINGS};
use crate::error::AppError;
use crate::models::prefs::{BrowserProfile, UiPrefs};
use redb::ReadableDatabase;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Accessor for the flat settings table.
pub struct SettingsDb {
    db: Arc<redb::Database>,
}

impl SettingsDb {
    /// Initialize the settings table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(SETTINGS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS)?;
        let Some(value) = table.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_slice(value.value()) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(err) => {
                // One bad key degrades its feature to defaults.
                tracing::warn!("Ignoring unreadable settings key '{}': {}", key, err);
                Ok(None)
            }
        }
    }

    fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let encoded = serde_json::to_vec(value)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SETTINGS)?;
            table.insert(key, encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// The persisted sidebar category order (empty when never customized).
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn category_order(&self) -> Result<Vec<String>, AppError> {
        Ok(self.get_json(KEY_CATEGORY_ORDER)?.unwrap_or_default())
    }

    /// Replace the persisted sidebar category order.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn set_category_order(&self, order: &[String]) -> Result<(), AppError> {
        self.put_json(KEY_CATEGORY_ORDER, &order)
    }

    /// Persisted UI preferences, defaults when unset.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn ui_prefs(&self) -> Result<UiPrefs, AppError> {
        Ok(self.get_json(KEY_UI_PREFS)?.unwrap_or_default())
    }

    /// Replace the persisted UI preferences.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn set_ui_prefs(&self, prefs: &UiPrefs) -> Result<(), AppError> {
        self.put_json(KEY_UI_PREFS, prefs)
    }

    /// The saved browser-profile list (empty when unset).
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn profiles(&self) -> Result<Vec<BrowserProfile>, AppError> {
        Ok(self.get_json(KEY_PROFILES)?.unwrap_or_default())
    }

    /// Replace the saved browser-profile list.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn set_profiles(&self, profiles: &[BrowserProfile]) -> Result<(), AppError> {
        self.put_json(KEY_PROFILES, &profiles)
    }
}

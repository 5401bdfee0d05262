//! API environment storage operations backed by redb.

use crate::db::tables::ENVIRONMENTS;
use crate::error::AppError;
use crate::models::environment::{ApiEnvironment, EnvironmentRequest};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

fn deserialize_environment(bytes: &[u8]) -> Result<ApiEnvironment, AppError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Accessor for the API environment table.
pub struct EnvironmentDb {
    db: Arc<redb::Database>,
}

impl EnvironmentDb {
    /// Initialize the environment table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(ENVIRONMENTS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a new environment.
    ///
    /// # Errors
    /// Returns an error when the id already exists or storage fails.
    pub fn create(&self, environment: &ApiEnvironment) -> Result<(), AppError> {
        let encoded = serde_json::to_vec(environment)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ENVIRONMENTS)?;
            if table.get(environment.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "Environment id '{}' already exists",
                    environment.id
                )));
            }
            table.insert(environment.id.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Fetch an environment by id.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<ApiEnvironment>, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENVIRONMENTS)?;
        match table.get(id)? {
            Some(value) => Ok(Some(deserialize_environment(value.value())?)),
            None => Ok(None),
        }
    }

    /// List all environments sorted by name (id tie-break).
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self) -> Result<Vec<ApiEnvironment>, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENVIRONMENTS)?;
        let mut environments = Vec::new();
        for item in table.iter()? {
            let (_, value) = item?;
            environments.push(deserialize_environment(value.value())?);
        }
        environments.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(environments)
    }

    /// Replace an environment's name and URL by id.
    ///
    /// # Returns
    /// `Ok(Some(environment))` when updated, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn update(
        &self,
        id: &str,
        update: EnvironmentRequest,
    ) -> Result<Option<ApiEnvironment>, AppError> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut table = write_txn.open_table(ENVIRONMENTS)?;
            let Some(old_guard) = table.get(id)? else {
                return Ok(None);
            };
            let mut environment = deserialize_environment(old_guard.value())?;
            drop(old_guard);

            environment.name = update.name.trim().to_string();
            environment.url = update.url.trim().to_string();

            let encoded = serde_json::to_vec(&environment)?;
            table.insert(id, encoded.as_slice())?;
            Some(environment)
        };
        write_txn.commit()?;
        Ok(updated)
    }

    /// Delete an environment by id.
    ///
    /// # Returns
    /// `true` when a row was deleted, otherwise `false`.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(ENVIRONMENTS)?;
            let removed = table.remove(id)?.is_some();
            removed
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    /// Whether the environment table holds no rows.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn is_empty(&self) -> Result<bool, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ENVIRONMENTS)?;
        let empty = table.iter()?.next().is_none();
        Ok(empty)
    }
}

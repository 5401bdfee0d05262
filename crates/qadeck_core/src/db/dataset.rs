//! Test-data set storage and active-pointer maintenance.
//!
//! The active-dataset pointer is a weak reference kept in the settings
//! table. Invariants enforced here: the first dataset added while none is
//! active becomes active; deleting the active dataset reassigns the pointer
//! to the first remaining dataset (creation order) or clears it; the pointer
//! never dangles.

use crate::db::tables::{DATASETS, KEY_ACTIVE_DATASET, SETTINGS};
use crate::error::AppError;
use crate::models::dataset::TestDataSet;
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

fn deserialize_dataset(bytes: &[u8]) -> Result<TestDataSet, AppError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn sort_datasets(datasets: &mut [TestDataSet]) {
    datasets.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Accessor for test-data set tables plus the active pointer.
pub struct DataSetDb {
    db: Arc<redb::Database>,
}

impl DataSetDb {
    /// Initialize dataset tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(DATASETS)?;
        write_txn.open_table(SETTINGS)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a data set. When no dataset is currently active the new one
    /// becomes active, which also covers the first-upload case.
    ///
    /// # Errors
    /// Returns an error when the id already exists or storage fails.
    pub fn create(&self, dataset: &TestDataSet) -> Result<(), AppError> {
        let encoded = serde_json::to_vec(dataset)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut datasets = write_txn.open_table(DATASETS)?;
            let mut settings = write_txn.open_table(SETTINGS)?;

            if datasets.get(dataset.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "Data set id '{}' already exists",
                    dataset.id
                )));
            }
            datasets.insert(dataset.id.as_str(), encoded.as_slice())?;

            let active: Option<String> = match settings.get(KEY_ACTIVE_DATASET)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => None,
            };
            if active.is_none() {
                let encoded_id = serde_json::to_vec(&Some(dataset.id.clone()))?;
                settings.insert(KEY_ACTIVE_DATASET, encoded_id.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Fetch a data set by id.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<TestDataSet>, AppError> {
        let read_txn = self.db.begin_read()?;
        let datasets = read_txn.open_table(DATASETS)?;
        match datasets.get(id)? {
            Some(value) => Ok(Some(deserialize_dataset(value.value())?)),
            None => Ok(None),
        }
    }

    /// List all data sets in creation order (id tie-break).
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self) -> Result<Vec<TestDataSet>, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DATASETS)?;
        let mut datasets = Vec::new();
        for item in table.iter()? {
            let (_, value) = item?;
            datasets.push(deserialize_dataset(value.value())?);
        }
        sort_datasets(&mut datasets);
        Ok(datasets)
    }

    /// Delete a data set, reassigning the active pointer when it pointed at
    /// the deleted row.
    ///
    /// # Returns
    /// `true` when a row was deleted, otherwise `false`.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut datasets = write_txn.open_table(DATASETS)?;
            let mut settings = write_txn.open_table(SETTINGS)?;

            if datasets.remove(id)?.is_none() {
                return Ok(false);
            }

            let active: Option<String> = match settings.get(KEY_ACTIVE_DATASET)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => None,
            };
            if active.as_deref() == Some(id) {
                let mut remaining = Vec::new();
                for item in datasets.iter()? {
                    let (_, value) = item?;
                    remaining.push(deserialize_dataset(value.value())?);
                }
                sort_datasets(&mut remaining);
                let next_active: Option<String> = remaining.first().map(|ds| ds.id.clone());
                let encoded = serde_json::to_vec(&next_active)?;
                settings.insert(KEY_ACTIVE_DATASET, encoded.as_slice())?;
            }
            true
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    /// Mark a data set as active.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when the id does not exist, or a
    /// storage error.
    pub fn set_active(&self, id: &str) -> Result<(), AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let datasets = write_txn.open_table(DATASETS)?;
            let mut settings = write_txn.open_table(SETTINGS)?;

            if datasets.get(id)?.is_none() {
                return Err(AppError::NotFound);
            }
            let encoded = serde_json::to_vec(&Some(id.to_string()))?;
            settings.insert(KEY_ACTIVE_DATASET, encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// The currently active data set id, if any.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn active_id(&self) -> Result<Option<String>, AppError> {
        let read_txn = self.db.begin_read()?;
        let settings = read_txn.open_table(SETTINGS)?;
        match settings.get(KEY_ACTIVE_DATASET)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(None),
        }
    }

    /// The currently active data set, if any.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn active(&self) -> Result<Option<TestDataSet>, AppError> {
        match self.active_id()? {
            Some(id) => self.get(&id),
            None => Ok(None),
        }
    }
}

//! Link storage operations backed by redb.

use crate::categories::category_matches;
use crate::db::tables::{LINKS, LINKS_BY_CREATED};
use crate::error::AppError;
use crate::models::link::{LinkRecord, UpdateLinkRequest};
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

fn created_key(created_at: DateTime<Utc>) -> u64 {
    created_at.timestamp_millis().max(0) as u64
}

fn deserialize_link(bytes: &[u8]) -> Result<LinkRecord, AppError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Accessor for link-related redb tables.
pub struct LinkDb {
    db: Arc<redb::Database>,
}

impl LinkDb {
    /// Initialize link tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(LINKS)?;
        write_txn.open_table(LINKS_BY_CREATED)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a new link row and its index entry atomically.
    ///
    /// # Errors
    /// Returns an error when the id already exists or storage fails.
    pub fn create(&self, link: &LinkRecord) -> Result<(), AppError> {
        let encoded = serde_json::to_vec(link)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut links = write_txn.open_table(LINKS)?;
            let mut by_created = write_txn.open_table(LINKS_BY_CREATED)?;

            if links.get(link.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "Link id '{}' already exists",
                    link.id
                )));
            }

            links.insert(link.id.as_str(), encoded.as_slice())?;
            by_created.insert((created_key(link.created_at), link.id.as_str()), ())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Fetch a link by id.
    ///
    /// # Returns
    /// `Ok(Some(link))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<LinkRecord>, AppError> {
        let read_txn = self.db.begin_read()?;
        let links = read_txn.open_table(LINKS)?;
        match links.get(id)? {
            Some(value) => Ok(Some(deserialize_link(value.value())?)),
            None => Ok(None),
        }
    }

    /// Replace a link's fields by id (full replace; id and creation time are
    /// preserved).
    ///
    /// # Returns
    /// `Ok(Some(link))` when updated, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn update(&self, id: &str, update: UpdateLinkRequest) -> Result<Option<LinkRecord>, AppError> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut links = write_txn.open_table(LINKS)?;

            let Some(old_guard) = links.get(id)? else {
                return Ok(None);
            };
            let mut link = deserialize_link(old_guard.value())?;
            drop(old_guard);

            link.name = update.name.trim().to_string();
            link.url = update.url.trim().to_string();
            link.category = update.category.trim().to_string();

            let encoded = serde_json::to_vec(&link)?;
            links.insert(id, encoded.as_slice())?;
            Some(link)
        };
        write_txn.commit()?;
        Ok(updated)
    }

    /// Delete a set of links by id in one transaction.
    ///
    /// Missing ids are skipped, matching the bulk-delete contract where the
    /// client may hold a stale selection.
    ///
    /// # Returns
    /// The number of rows actually deleted.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn delete_many(&self, ids: &[String]) -> Result<usize, AppError> {
        let write_txn = self.db.begin_write()?;
        let mut deleted = 0usize;
        {
            let mut links = write_txn.open_table(LINKS)?;
            let mut by_created = write_txn.open_table(LINKS_BY_CREATED)?;

            for id in ids {
                let Some(old_guard) = links.get(id.as_str())? else {
                    continue;
                };
                let link = deserialize_link(old_guard.value())?;
                drop(old_guard);

                let _ = by_created.remove((created_key(link.created_at), id.as_str()))?;
                let _ = links.remove(id.as_str())?;
                deleted += 1;
            }
        }
        write_txn.commit()?;
        Ok(deleted)
    }

    /// List all links in insertion order (oldest first).
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self) -> Result<Vec<LinkRecord>, AppError> {
        let read_txn = self.db.begin_read()?;
        let by_created = read_txn.open_table(LINKS_BY_CREATED)?;
        let links_table = read_txn.open_table(LINKS)?;

        let mut links = Vec::new();
        for item in by_created.iter()? {
            let (key, _) = item?;
            let (_, id) = key.value();
            let Some(guard) = links_table.get(id)? else {
                continue;
            };
            links.push(deserialize_link(guard.value())?);
        }
        Ok(links)
    }

    /// Rename a category across all links that carry it. The `from` selector
    /// names categories as displayed, so `Uncategorized` matches links whose
    /// stored category is blank.
    ///
    /// # Returns
    /// The number of links updated.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn rename_category(&self, from: &str, to: &str) -> Result<usize, AppError> {
        let write_txn = self.db.begin_write()?;
        let mut renamed = 0usize;
        {
            let mut links = write_txn.open_table(LINKS)?;
            let ids: Vec<String> = {
                let mut matching = Vec::new();
                for item in links.iter()? {
                    let (key, value) = item?;
                    let link = deserialize_link(value.value())?;
                    if category_matches(&link.category, from) {
                        matching.push(key.value().to_string());
                    }
                }
                matching
            };

            for id in ids {
                let Some(guard) = links.get(id.as_str())? else {
                    continue;
                };
                let mut link = deserialize_link(guard.value())?;
                drop(guard);
                link.category = to.to_string();
                let encoded = serde_json::to_vec(&link)?;
                links.insert(id.as_str(), encoded.as_slice())?;
                renamed += 1;
            }
        }
        write_txn.commit()?;
        Ok(renamed)
    }

    /// Ids of all links in the given category, where `Uncategorized` selects
    /// links whose stored category is blank.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn ids_in_category(&self, category: &str) -> Result<Vec<String>, AppError> {
        let read_txn = self.db.begin_read()?;
        let links = read_txn.open_table(LINKS)?;
        let mut ids = Vec::new();
        for item in links.iter()? {
            let (key, value) = item?;
            let link = deserialize_link(value.value())?;
            if category_matches(&link.category, category) {
                ids.push(key.value().to_string());
            }
        }
        Ok(ids)
    }
}

//! Test-data set models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A parsed CSV table. Every cell is a string; no type coercion happens at
/// parse time and ragged rows are kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A named test-data set created from an uploaded CSV file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestDataSet {
    pub id: String,
    /// Source file name as uploaded.
    pub name: String,
    pub table_data: TableData,
    pub created_at: DateTime<Utc>,
}

/// Request payload for uploading a data set.
#[derive(Debug, Deserialize)]
pub struct CreateDataSetRequest {
    pub name: String,
    /// Raw CSV text; parsed server-side with the naive split/trim grammar.
    pub csv: String,
}

impl TestDataSet {
    /// Create a new data set with a fresh id and the current timestamp.
    pub fn new(name: String, table_data: TableData) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            table_data,
            created_at: Utc::now(),
        }
    }
}

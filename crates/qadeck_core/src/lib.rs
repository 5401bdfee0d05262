//! Core library for QADeck: data models, category/filter/table logic, and
//! the flat persisted store backing the HTTP server.

/// Category grouping and sidebar-order derivation.
pub mod categories;
/// Configuration loading from environment variables.
pub mod config;
/// Shared constants (pseudo-categories, defaults).
pub mod constants;
/// redb-backed flat persisted store.
pub mod db;
/// Application error types.
pub mod error;
/// Search-input classification and link filtering.
pub mod filter;
/// Data models shared between storage and the API.
pub mod models;
/// CSV table parsing and exact-match lookup.
pub mod table;

pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use db::Database;
pub use error::AppError;

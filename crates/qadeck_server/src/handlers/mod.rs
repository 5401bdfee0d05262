//! HTTP handlers for the QADeck API.

/// Category order endpoints.
pub mod category;
/// Test-data set endpoints.
pub mod dataset;
/// API environment endpoints.
pub mod environment;
/// Health probe endpoints.
pub mod health;
/// Link CRUD and view-pipeline endpoints.
pub mod link;
/// UI preference and browser-profile endpoints.
pub mod prefs;

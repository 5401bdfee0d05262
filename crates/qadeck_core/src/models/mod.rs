//! Data models shared between storage, derivation logic, and the API.

/// Test-data set and table models.
pub mod dataset;
/// API environment models.
pub mod environment;
/// Link record and request payloads.
pub mod link;
/// UI preference and browser-profile models.
pub mod prefs;

//! UI preference and browser-profile models.

use serde::{Deserialize, Serialize};

/// Persisted UI preferences. Absent keys fall back to these defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiPrefs {
    pub theme: String,
    pub sidebar_collapsed: bool,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            sidebar_collapsed: false,
        }
    }
}

/// A saved browser profile entry. Launching profiles is a client concern;
/// the server only persists the list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowserProfile {
    pub id: String,
    pub name: String,
    pub profile_dir: String,
}

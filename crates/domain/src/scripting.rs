//! Pre-request and post-response script definitions.
//!
//! Script source is opaque here: it is handed to a host that evaluates it.
//! This module only describes scripts and which of them are eligible to run.

use serde::{Deserialize, Serialize};

use crate::id::{Id, generate_id};

/// A named script attached to a request or execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptItem {
    /// Unique identifier within its list
    pub id: Id,
    /// Display name
    pub name: String,
    /// Script source
    #[serde(default)]
    pub content: String,
    /// Whether the script is eligible to run
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Comma-separated status pattern (`"200, 4xx"`) for post-scripts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute_on_status_codes: Option<String>,
}

const fn default_enabled() -> bool {
    true
}

impl ScriptItem {
    /// Creates an enabled script with no status filter.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            content: content.into(),
            enabled: true,
            execute_on_status_codes: None,
        }
    }

    /// Restricts the script to responses matching `pattern`.
    #[must_use]
    pub fn on_status(mut self, pattern: impl Into<String>) -> Self {
        self.execute_on_status_codes = Some(pattern.into());
        self
    }

    /// Returns true if the script has nothing to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

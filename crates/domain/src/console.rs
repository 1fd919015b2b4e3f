//! Console log entries
//!
//! The in-memory log shown next to responses: script output, script errors
//! and request lifecycle messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a console entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Informational message
    #[default]
    Info,
    /// Something unexpected that did not stop the send
    Warn,
    /// A failure
    Error,
}

/// One console line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: LogLevel,
    /// Message text
    pub message: String,
    /// Origin, e.g. `Request` or `Script`
    pub source: String,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            source: source.into(),
        }
    }
}

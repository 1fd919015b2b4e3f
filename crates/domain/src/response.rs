//! HTTP response type
//!
//! What the HTTP executor hands back, plus the synthetic response used when
//! a send fails before any status line was received.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A received (or synthesized) HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    /// Status code, `0` when the request never completed
    pub status: u16,
    /// Response headers
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    /// Body decoded as text
    #[serde(default)]
    pub body: String,
    /// Wall-clock time of the exchange
    #[serde(default)]
    pub time_taken_ms: u64,
}

impl ResponseData {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, headers: IndexMap<String, String>, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            time_taken_ms: 0,
        }
    }

    /// Builds the status-0 response that stands in for a failed send.
    #[must_use]
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            status: 0,
            headers: IndexMap::new(),
            body: format!("Error: {message}"),
            time_taken_ms: 0,
        }
    }

    /// Sets the measured duration.
    #[must_use]
    pub const fn with_time_taken(mut self, ms: u64) -> Self {
        self.time_taken_ms = ms;
        self
    }

    /// Returns true for a status-0 stand-in response.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.status == 0
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the body size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.body.len()
    }

    /// Looks up a header case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

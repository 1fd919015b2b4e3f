//! Send lifecycle state.
//!
//! `Idle -> Sending -> Success | Failure`, and back to `Idle` on reset.
//! Both terminal states carry a response: a failure carries the synthetic
//! status-0 response whose body is the error text.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::response::ResponseData;

/// Represents where a request or execution is in its send lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExecutionState {
    /// Nothing in flight.
    #[default]
    Idle,

    /// Request is in flight; the previous response has been cleared.
    Sending {
        /// When the send started.
        #[serde(skip)]
        started_at: Option<Instant>,
    },

    /// A response was received (any status).
    Success {
        /// The response data.
        response: Box<ResponseData>,
    },

    /// The send failed before a response arrived.
    Failure {
        /// Human-readable error message.
        message: String,
        /// The status-0 stand-in response.
        response: Box<ResponseData>,
    },
}

impl ExecutionState {
    /// Creates a Sending state with the current timestamp.
    #[must_use]
    pub fn sending() -> Self {
        Self::Sending {
            started_at: Some(Instant::now()),
        }
    }

    /// Creates a Success state from a response.
    #[must_use]
    pub fn success(response: ResponseData) -> Self {
        Self::Success {
            response: Box::new(response),
        }
    }

    /// Creates a Failure state carrying a status-0 response with `message` as body.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let response = ResponseData::failure(&message);
        Self::Failure {
            message,
            response: Box::new(response),
        }
    }

    /// Returns true if nothing is in flight and nothing is displayed.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true while a send is in flight.
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        matches!(self, Self::Sending { .. })
    }

    /// Returns true if the last send produced a response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns true if the last send failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Returns the response of a finished send.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseData> {
        match self {
            Self::Success { response } | Self::Failure { response, .. } => Some(response),
            Self::Idle | Self::Sending { .. } => None,
        }
    }

    /// Returns the elapsed time while sending.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Sending {
                started_at: Some(t),
            } => Some(t.elapsed()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_idle() {
        assert!(ExecutionState::default().is_idle());
    }

    #[test]
    fn test_sending_has_no_response() {
        let state = ExecutionState::sending();
        assert!(state.is_sending());
        assert!(state.response().is_none());
        assert!(state.elapsed().is_some());
    }

    #[test]
    fn test_failure_carries_status_zero() {
        let state = ExecutionState::failure("timeout");
        let response = state.response();
        assert_eq!(response.map(|r| r.status), Some(0));
        assert_eq!(response.map(|r| r.body.as_str()), Some("Error: timeout"));
    }

    #[test]
    fn test_success_serialization_tag() {
        let state = ExecutionState::success(ResponseData::new(204, Default::default(), ""));
        let json = serde_json::to_value(&state).unwrap_or_default();
        assert_eq!(json["state"], "success");
        assert_eq!(json["response"]["status"], 204);
    }
}

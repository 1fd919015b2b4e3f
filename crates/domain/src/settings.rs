//! Application settings
//!
//! Preferences that shape how requests are sent and which environment a new
//! session starts in.

use serde::{Deserialize, Serialize};

use crate::environment::GLOBAL_ENVIRONMENT;
use crate::mock::DEFAULT_MOCK_PORT;

/// What the HTTP executor does with 3xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RedirectPolicy {
    /// Follow up to `max_redirects` hops (default).
    #[default]
    Follow,
    /// Return the 3xx response as-is.
    None,
}

/// User settings for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Environment activated at startup.
    #[serde(default = "default_environment")]
    pub default_environment: String,

    /// `User-Agent` sent when a request does not set one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Redirect handling.
    #[serde(default)]
    pub redirect_policy: RedirectPolicy,

    /// Maximum redirect hops when following.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Port given to new collection mock servers.
    #[serde(default = "default_mock_port")]
    pub default_mock_port: u16,
}

fn default_environment() -> String {
    GLOBAL_ENVIRONMENT.to_string()
}

fn default_user_agent() -> String {
    concat!("courier/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_redirects() -> usize {
    10
}

const fn default_mock_port() -> u16 {
    DEFAULT_MOCK_PORT
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_environment: default_environment(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            redirect_policy: RedirectPolicy::default(),
            max_redirects: default_max_redirects(),
            default_mock_port: default_mock_port(),
        }
    }
}

//! Script host port
//!
//! Script source is evaluated by the host, never by the core. The host gets
//! a read-only context and reports environment writes and log lines back.

use async_trait::async_trait;
use indexmap::IndexMap;

use courier_domain::{HttpRequestArgs, ResponseData, ScriptItem};

/// When a script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPhase {
    /// Before the request is sent
    PreRequest,
    /// After the response arrived
    PostResponse,
}

/// What a script can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptContext {
    /// Phase
    pub phase: ScriptPhase,
    /// Name of the environment writes go to
    pub environment: String,
    /// Variables visible to the request, after precedence
    pub variables: IndexMap<String, String>,
    /// The outgoing request (post-scripts see what was sent)
    pub request: Option<HttpRequestArgs>,
    /// The response, for post-scripts
    pub response: Option<ResponseData>,
}

/// A change a script makes to the active environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentWrite {
    /// Set a variable
    Set {
        /// Variable name
        key: String,
        /// New value
        value: String,
    },
    /// Remove a variable
    Unset {
        /// Variable name
        key: String,
    },
}

/// What a script run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    /// Environment changes, applied in order
    pub environment_writes: Vec<EnvironmentWrite>,
    /// Lines the script logged
    pub logs: Vec<String>,
}

/// Errors reported by a script host.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script threw or failed to evaluate.
    #[error("{0}")]
    Failed(String),

    /// The host cannot run scripts.
    #[error("Script host unavailable: {0}")]
    Unavailable(String),
}

/// Evaluates request scripts.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    /// Runs one script.
    ///
    /// # Errors
    /// Returns an error if the script fails.
    async fn run(&self, script: &ScriptItem, context: &ScriptContext) -> Result<ScriptOutcome, ScriptError>;
}

//! Mock server port

use async_trait::async_trait;

use courier_domain::MockServerConfig;

/// Errors that can occur while controlling mock servers.
#[derive(Debug, thiserror::Error)]
pub enum MockServerError {
    /// A server with this id is already running.
    #[error("Mock server already running: {0}")]
    AlreadyRunning(String),

    /// No server with this id is running.
    #[error("Mock server not running: {0}")]
    NotRunning(String),

    /// The listener could not be bound.
    #[error("Cannot bind port {port}: {message}")]
    Bind {
        /// Requested port.
        port: u16,
        /// Reason.
        message: String,
    },
}

/// Starts and stops mock HTTP servers.
#[async_trait]
pub trait MockServerControl: Send + Sync {
    /// Starts serving `config.routes` on `config.port`.
    ///
    /// # Errors
    /// Returns an error if the id is in use or the port cannot be bound.
    async fn start(&self, config: MockServerConfig) -> Result<(), MockServerError>;

    /// Stops a running server.
    ///
    /// # Errors
    /// Returns `MockServerError::NotRunning` for an unknown id.
    async fn stop(&self, id: &str) -> Result<(), MockServerError>;

    /// Returns true if a server with this id is running.
    async fn is_running(&self, id: &str) -> bool;
}

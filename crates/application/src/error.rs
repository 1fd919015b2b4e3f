//! Application error types

use courier_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An execution points at a request that no longer exists.
    #[error("execution {execution_id} references missing request {request_id}")]
    OrphanedExecution {
        /// The execution.
        execution_id: String,
        /// The missing request.
        request_id: String,
    },

    /// A pre-request script failed; nothing was sent.
    #[error("pre-request script '{name}' failed: {message}")]
    PreScript {
        /// Script name.
        name: String,
        /// Error reported by the script host.
        message: String,
    },

    /// The collection store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A mock server operation failed.
    #[error("mock server error: {0}")]
    Mock(String),

    /// A git operation failed.
    #[error("git error: {0}")]
    Git(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

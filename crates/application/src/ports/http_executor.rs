//! HTTP executor port
//!
//! The only network I/O of the core. Adapters receive the exact arguments
//! produced by the materializer.

use async_trait::async_trait;

use courier_domain::{HttpRequestArgs, ResponseData};

/// Errors that can occur while executing a request.
#[derive(Debug, thiserror::Error)]
pub enum HttpExecutorError {
    /// The arguments could not be turned into a request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A multipart file part could not be read.
    #[error("Cannot read file {path}: {message}")]
    File {
        /// The file path.
        path: String,
        /// Reason.
        message: String,
    },

    /// Connection, TLS, timeout or protocol failure.
    #[error("{0}")]
    Transport(String),
}

/// Executes HTTP requests.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Sends a request and returns the response, whatever its status.
    ///
    /// # Errors
    /// Returns an error if no response was received.
    async fn execute(&self, args: HttpRequestArgs) -> Result<ResponseData, HttpExecutorError>;
}

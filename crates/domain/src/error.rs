//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body type name is not recognized.
    #[error("unsupported body type: {0}")]
    UnsupportedBodyType(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A folder cannot be moved under itself or one of its descendants.
    #[error("cannot move folder {folder_id} under {target_id}: it would create a cycle")]
    FolderCycle {
        /// The folder being moved.
        folder_id: String,
        /// The requested new parent.
        target_id: String,
    },

    /// Items can only be moved within their own collection.
    #[error("cannot move {item_id} into a different collection")]
    CrossCollectionMove {
        /// The item being moved.
        item_id: String,
    },

    /// An execution must belong to the collection of its request.
    #[error("execution {execution_id} belongs to {found}, but its request belongs to {expected}")]
    CollectionMismatch {
        /// The execution.
        execution_id: String,
        /// Collection of the request.
        expected: String,
        /// Collection claimed by the execution.
        found: String,
    },

    /// The environment name is reserved and cannot be removed or renamed.
    #[error("environment {0} is reserved")]
    ReservedEnvironment(String),

    /// An environment with this name already exists.
    #[error("environment {0} already exists")]
    DuplicateEnvironment(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

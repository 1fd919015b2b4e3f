//! Collection store port

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use courier_domain::CollectionFile;

/// Errors that can occur while reading or writing collection files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file does not exist.
    #[error("Collection file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persists collection files.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Writes a collection file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be serialized or written.
    async fn save(&self, path: &Path, file: &CollectionFile) -> Result<(), StoreError>;

    /// Reads a collection file.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if the file doesn't exist.
    async fn load(&self, path: &Path) -> Result<CollectionFile, StoreError>;
}

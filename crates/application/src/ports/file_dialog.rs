//! File dialog port

use async_trait::async_trait;
use std::path::PathBuf;

/// Asks the user for a file location. `None` means the user cancelled.
#[async_trait]
pub trait FileDialog: Send + Sync {
    /// Picks a path to save to, starting from `suggested`.
    async fn save_file(&self, suggested: &str) -> Option<PathBuf>;

    /// Picks an existing file to open.
    async fn open_file(&self) -> Option<PathBuf>;
}

//! Git client port

use async_trait::async_trait;
use std::path::Path;

/// Working tree status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitStatus {
    /// Current branch, if any
    pub branch: Option<String>,
    /// Changed paths, as reported by the client
    pub changes: Vec<String>,
}

impl GitStatus {
    /// Returns true if there is nothing to commit.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Errors reported by a git client.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The path is not inside a repository.
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    /// A git command failed.
    #[error("Git command failed: {0}")]
    CommandFailed(String),
}

/// Version-control actions on the folder holding a collection file.
#[async_trait]
pub trait GitClient: Send + Sync {
    /// Reports the working tree status.
    ///
    /// # Errors
    /// Returns an error if the status cannot be read.
    async fn status(&self, repo: &Path) -> Result<GitStatus, GitError>;

    /// Stages every change.
    ///
    /// # Errors
    /// Returns an error if staging fails.
    async fn add_all(&self, repo: &Path) -> Result<(), GitError>;

    /// Commits staged changes.
    ///
    /// # Errors
    /// Returns an error if the commit fails.
    async fn commit(&self, repo: &Path, message: &str) -> Result<(), GitError>;

    /// Pushes the current branch.
    ///
    /// # Errors
    /// Returns an error if the push fails.
    async fn push(&self, repo: &Path) -> Result<(), GitError>;
}

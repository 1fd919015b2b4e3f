//! Commit collection use case.

use std::path::PathBuf;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::GitClient;
use crate::store::WorkspaceStore;

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The working tree was clean.
    NothingToCommit,
    /// Changes were committed (and pushed when asked).
    Committed {
        /// Number of changed paths.
        changes: usize,
        /// Whether the branch was pushed.
        pushed: bool,
    },
}

/// Use case for committing the folder that holds a saved collection.
pub struct CommitCollection<G: GitClient> {
    git: G,
}

impl<G: GitClient> CommitCollection<G> {
    /// Creates a new `CommitCollection` use case.
    #[must_use]
    pub const fn new(git: G) -> Self {
        Self { git }
    }

    /// Stages, commits and optionally pushes the collection's directory.
    ///
    /// # Errors
    /// - Returns error if the collection was never saved
    /// - Returns error if any git step fails
    pub async fn execute(
        &self,
        store: &WorkspaceStore,
        collection_id: &str,
        message: &str,
        push: bool,
    ) -> ApplicationResult<CommitOutcome> {
        let repo: PathBuf = store
            .snapshot()
            .collection(collection_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))?
            .path
            .as_deref()
            .and_then(|p| p.parent())
            .map(ToOwned::to_owned)
            .ok_or_else(|| ApplicationError::NotFound(format!("saved file of collection {collection_id}")))?;

        let git_err = |e: crate::ports::GitError| ApplicationError::Git(e.to_string());

        let status = self.git.status(&repo).await.map_err(git_err)?;
        if status.is_clean() {
            tracing::info!(repo = %repo.display(), "nothing to commit");
            return Ok(CommitOutcome::NothingToCommit);
        }

        self.git.add_all(&repo).await.map_err(git_err)?;
        self.git.commit(&repo, message).await.map_err(git_err)?;
        if push {
            self.git.push(&repo).await.map_err(git_err)?;
        }

        tracing::info!(repo = %repo.display(), changes = status.changes.len(), push, "collection committed");
        Ok(CommitOutcome::Committed {
            changes: status.changes.len(),
            pushed: push,
        })
    }
}

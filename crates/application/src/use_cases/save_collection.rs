//! Save collection use case.

use std::path::PathBuf;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{CollectionStore, FileDialog};
use crate::store::WorkspaceStore;

/// Use case for writing a collection to its file.
pub struct SaveCollection<C: CollectionStore, D: FileDialog> {
    collections: C,
    dialog: D,
}

impl<C: CollectionStore, D: FileDialog> SaveCollection<C, D> {
    /// Creates a new `SaveCollection` use case.
    #[must_use]
    pub const fn new(collections: C, dialog: D) -> Self {
        Self {
            collections,
            dialog,
        }
    }

    /// Saves a collection with every workspace environment.
    ///
    /// A collection that was never saved, or `save_as`, asks the dialog for
    /// a path. Returns `None` when the user cancels.
    ///
    /// # Errors
    /// - Returns error if the collection doesn't exist
    /// - Returns error if the file cannot be written
    pub async fn execute(
        &self,
        store: &mut WorkspaceStore,
        collection_id: &str,
        save_as: bool,
    ) -> ApplicationResult<Option<PathBuf>> {
        let file = store.export_collection(collection_id)?;
        let known_path = store
            .snapshot()
            .collection(collection_id)
            .and_then(|c| c.path.clone());

        let path = match known_path {
            Some(path) if !save_as => Some(path),
            other => {
                let suggested = other.map_or_else(
                    || format!("{}.json", file.name),
                    |p| p.display().to_string(),
                );
                self.dialog.save_file(&suggested).await
            }
        };
        let Some(path) = path else {
            tracing::debug!(collection_id, "save cancelled");
            return Ok(None);
        };

        self.collections
            .save(&path, &file)
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;
        store.set_collection_path(collection_id, path.clone())?;
        store
            .console_mut()
            .info(format!("Collection \"{}\" saved", file.name), "Collection");
        tracing::info!(collection_id, path = %path.display(), "collection saved");

        Ok(Some(path))
    }
}

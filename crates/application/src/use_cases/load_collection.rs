//! Load collection use case.

use std::path::PathBuf;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{CollectionStore, FileDialog};
use crate::store::WorkspaceStore;

/// Use case for loading a collection file into the workspace.
pub struct LoadCollection<C: CollectionStore, D: FileDialog> {
    collections: C,
    dialog: D,
}

impl<C: CollectionStore, D: FileDialog> LoadCollection<C, D> {
    /// Creates a new `LoadCollection` use case.
    #[must_use]
    pub const fn new(collections: C, dialog: D) -> Self {
        Self {
            collections,
            dialog,
        }
    }

    /// Loads `path`, or a file picked in the dialog when `path` is `None`.
    ///
    /// Returns the loaded collection id, or `None` when the user cancels.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub async fn execute(
        &self,
        store: &mut WorkspaceStore,
        path: Option<PathBuf>,
    ) -> ApplicationResult<Option<String>> {
        let path = match path {
            Some(path) => path,
            None => match self.dialog.open_file().await {
                Some(path) => path,
                None => return Ok(None),
            },
        };

        let file = self
            .collections
            .load(&path)
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;
        let name = file.name.clone();
        let id = store.load_collection_file(file, Some(path));
        store
            .console_mut()
            .info(format!("Collection \"{name}\" loaded"), "Collection");

        Ok(Some(id))
    }
}

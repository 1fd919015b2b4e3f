//! Collection files on the local file system.

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use courier_application::ports::{CollectionStore, StoreError};
use courier_domain::CollectionFile;
use tokio::fs;

use crate::serialization::{from_json_bytes, to_json_stable};

/// Reads and writes one collection per JSON file using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCollectionStore;

impl JsonCollectionStore {
    /// Creates a new store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CollectionStore for JsonCollectionStore {
    async fn save(&self, path: &Path, file: &CollectionFile) -> Result<(), StoreError> {
        let json = to_json_stable(file).map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, json).await?;

        tracing::debug!(path = %path.display(), collection = %file.id, "Collection saved");
        Ok(())
    }

    async fn load(&self, path: &Path) -> Result<CollectionFile, StoreError> {
        let bytes = fs::read(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(path.to_path_buf())
            } else {
                StoreError::Io(e)
            }
        })?;

        let file: CollectionFile =
            from_json_bytes(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        tracing::debug!(path = %path.display(), collection = %file.id, "Collection loaded");
        Ok(file)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::{Environment, Execution, HttpMethod, Request};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> CollectionFile {
        let request = Request::new("c1", "Get user").with_target(HttpMethod::Get, "{{host}}/users/{id}");
        let execution = Execution::new(&request, "as admin");
        CollectionFile {
            id: "c1".to_string(),
            name: "Users".to_string(),
            project_name: "Default".to_string(),
            requests: vec![request],
            folders: Vec::new(),
            executions: vec![execution],
            environments: vec![Environment::new("dev").with_variable("host", "http://localhost")],
            mock_config: None,
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("users.json");
        let store = JsonCollectionStore::new();

        let file = sample();

        store.save(&path, &file).await.unwrap();
        let loaded = store.load(&path).await.unwrap();

        assert_eq!(loaded, file);
        assert!(std::fs::read_to_string(&path).unwrap().ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let result = JsonCollectionStore::new().load(&path).await;
        assert!(matches!(result, Err(StoreError::NotFound(p)) if p == path));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonCollectionStore::new().load(&path).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use courier_domain::{
    Collection, CollectionFile, Environment, HttpMethod, MockResponse, MockServerConfig, Request,
};
use pretty_assertions::assert_eq;

use super::*;
use crate::ports::{
    CollectionStore, FileDialog, GitClient, GitError, GitStatus, MockServerControl,
    MockServerError, StoreError,
};
use crate::store::WorkspaceStore;

#[derive(Default)]
struct MemoryStore {
    files: Mutex<HashMap<PathBuf, CollectionFile>>,
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn save(&self, path: &Path, file: &CollectionFile) -> Result<(), StoreError> {
        self.files.lock().unwrap().insert(path.to_path_buf(), file.clone());
        Ok(())
    }

    async fn load(&self, path: &Path) -> Result<CollectionFile, StoreError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }
}

#[async_trait]
impl CollectionStore for &MemoryStore {
    async fn save(&self, path: &Path, file: &CollectionFile) -> Result<(), StoreError> {
        (**self).save(path, file).await
    }

    async fn load(&self, path: &Path) -> Result<CollectionFile, StoreError> {
        (**self).load(path).await
    }
}

struct FixedDialog(Option<PathBuf>);

#[async_trait]
impl FileDialog for FixedDialog {
    async fn save_file(&self, _suggested: &str) -> Option<PathBuf> {
        self.0.clone()
    }

    async fn open_file(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

#[derive(Default)]
struct RecordingGit {
    changes: Vec<String>,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl GitClient for RecordingGit {
    async fn status(&self, _repo: &Path) -> Result<GitStatus, GitError> {
        self.calls.lock().unwrap().push("status".to_string());
        Ok(GitStatus {
            branch: Some("main".to_string()),
            changes: self.changes.clone(),
        })
    }

    async fn add_all(&self, _repo: &Path) -> Result<(), GitError> {
        self.calls.lock().unwrap().push("add".to_string());
        Ok(())
    }

    async fn commit(&self, _repo: &Path, message: &str) -> Result<(), GitError> {
        self.calls.lock().unwrap().push(format!("commit {message}"));
        Ok(())
    }

    async fn push(&self, _repo: &Path) -> Result<(), GitError> {
        self.calls.lock().unwrap().push("push".to_string());
        Ok(())
    }
}

#[async_trait]
impl GitClient for &RecordingGit {
    async fn status(&self, repo: &Path) -> Result<GitStatus, GitError> {
        (**self).status(repo).await
    }

    async fn add_all(&self, repo: &Path) -> Result<(), GitError> {
        (**self).add_all(repo).await
    }

    async fn commit(&self, repo: &Path, message: &str) -> Result<(), GitError> {
        (**self).commit(repo, message).await
    }

    async fn push(&self, repo: &Path) -> Result<(), GitError> {
        (**self).push(repo).await
    }
}

#[derive(Default)]
struct FakeMocks {
    running: Mutex<HashMap<String, MockServerConfig>>,
}

#[async_trait]
impl MockServerControl for FakeMocks {
    async fn start(&self, config: MockServerConfig) -> Result<(), MockServerError> {
        let mut running = self.running.lock().unwrap();
        if running.contains_key(&config.id) {
            return Err(MockServerError::AlreadyRunning(config.id));
        }
        running.insert(config.id.clone(), config);
        Ok(())
    }

    async fn stop(&self, id: &str) -> Result<(), MockServerError> {
        self.running
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MockServerError::NotRunning(id.to_string()))
    }

    async fn is_running(&self, id: &str) -> bool {
        self.running.lock().unwrap().contains_key(id)
    }
}

fn workspace() -> (WorkspaceStore, String) {
    let mut store = WorkspaceStore::new();
    let collection = Collection::new("Shop");
    let id = collection.id.clone();
    store.add_collection(collection);

    let mut mocked = Request::new(&id, "List items").with_target(HttpMethod::Get, "https://shop.test/items");
    mocked.mock_response = Some(MockResponse {
        body: "[]".to_string(),
        enabled: true,
        ..MockResponse::default()
    });
    store.add_request(mocked).unwrap();
    store
        .add_request(Request::new(&id, "Create item").with_target(HttpMethod::Post, "/items"))
        .unwrap();
    (store, id)
}

#[tokio::test]
async fn test_save_then_load_round_trips_through_the_store() {
    let (mut store, id) = workspace();
    store.create_environment("dev").unwrap();
    store.set_variable("dev", "host", "shop.test").unwrap();
    let files = MemoryStore::default();
    let path = PathBuf::from("/work/shop.json");

    let saved = SaveCollection::new(&files, FixedDialog(Some(path.clone())))
        .execute(&mut store, &id, false)
        .await
        .unwrap();
    assert_eq!(saved, Some(path.clone()));
    assert_eq!(store.snapshot().collection(&id).unwrap().path, Some(path.clone()));

    let mut fresh = WorkspaceStore::new();
    fresh.create_environment("dev").unwrap();
    fresh.set_variable("dev", "token", "t").unwrap();
    let loaded = LoadCollection::new(&files, FixedDialog(None))
        .execute(&mut fresh, Some(path))
        .await
        .unwrap();

    assert_eq!(loaded, Some(id.clone()));
    assert_eq!(fresh.snapshot().requests_in(&id).count(), 2);
    let dev: &Environment = fresh.snapshot().environment("dev").unwrap();
    assert_eq!(dev.get("host"), Some("shop.test"));
    assert_eq!(dev.get("token"), Some("t"));
}

#[tokio::test]
async fn test_cancelled_dialogs_change_nothing() {
    let (mut store, id) = workspace();
    let files = MemoryStore::default();

    let saved = SaveCollection::new(&files, FixedDialog(None))
        .execute(&mut store, &id, true)
        .await
        .unwrap();
    assert_eq!(saved, None);
    assert!(files.files.lock().unwrap().is_empty());

    let loaded = LoadCollection::new(&files, FixedDialog(None))
        .execute(&mut store, None)
        .await
        .unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn test_load_missing_file_is_a_storage_error() {
    let mut store = WorkspaceStore::new();
    let files = MemoryStore::default();
    let result = LoadCollection::new(&files, FixedDialog(None))
        .execute(&mut store, Some(PathBuf::from("/nope.json")))
        .await;
    assert!(matches!(result, Err(crate::ApplicationError::Storage(_))));
}

#[tokio::test]
async fn test_commit_requires_a_saved_collection() {
    let (mut store, id) = workspace();
    let git = RecordingGit {
        changes: vec!["shop.json".to_string()],
        ..RecordingGit::default()
    };
    let commit = CommitCollection::new(&git);
    assert!(commit.execute(&store, &id, "update", false).await.is_err());

    store.set_collection_path(&id, PathBuf::from("/work/shop.json")).unwrap();
    let outcome = commit.execute(&store, &id, "update", true).await.unwrap();

    assert_eq!(outcome, CommitOutcome::Committed { changes: 1, pushed: true });
    assert_eq!(
        *git.calls.lock().unwrap(),
        vec!["status", "add", "commit update", "push"]
    );
}

#[tokio::test]
async fn test_commit_clean_tree_does_nothing() {
    let (mut store, id) = workspace();
    store.set_collection_path(&id, PathBuf::from("/work/shop.json")).unwrap();
    let git = RecordingGit::default();
    let commit = CommitCollection::new(&git);

    assert_eq!(
        commit.execute(&store, &id, "noop", true).await.unwrap(),
        CommitOutcome::NothingToCommit
    );
    assert_eq!(*git.calls.lock().unwrap(), vec!["status"]);
}

#[tokio::test]
async fn test_mock_server_lifecycle() {
    let (mut store, id) = workspace();
    let mocks = MockServer::new(FakeMocks::default());

    let config = mocks.start(&mut store, &id, Some(4010)).await.unwrap();
    assert_eq!(config.port, 4010);
    assert_eq!(config.routes.len(), 1);
    assert_eq!(config.routes[0].path, "/items");
    assert!(mocks.is_running(&id).await);
    assert!(mocks.start(&mut store, &id, None).await.is_err());

    mocks.stop(&mut store, &id).await.unwrap();
    assert!(!mocks.is_running(&id).await);
    assert!(mocks.stop(&mut store, &id).await.is_err());
}

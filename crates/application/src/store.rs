//! Workspace store
//!
//! The single owner of workspace state. Editors mutate it through the
//! methods below; resolvers and the materializer only ever see the
//! read-only [`Snapshot`] it exposes.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use courier_domain::{
    Collection, CollectionFile, DomainError, Environment, Execution, ExecutionState, Folder,
    GLOBAL_ENVIRONMENT, Request, Snapshot,
};

use crate::console::ConsoleLog;
use crate::error::{ApplicationError, ApplicationResult};
use crate::merge::{ExecutionDraft, apply_draft};
use crate::ports::EnvironmentWrite;
use crate::scope::validate_reparent;

/// What an open tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    /// A request editor
    Request,
    /// An execution editor
    Execution,
    /// A folder editor
    Folder,
}

/// An open editor tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Id of the edited item
    pub id: String,
    /// Editor kind
    pub kind: TabKind,
    /// Title
    pub name: String,
}

/// Workspace state container.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    snapshot: Snapshot,
    tabs: Vec<Tab>,
    active_tab: Option<String>,
    states: HashMap<String, ExecutionState>,
    console: ConsoleLog,
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceStore {
    /// Creates an empty workspace with the `Global` environment active.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot::new(),
            tabs: Vec::new(),
            active_tab: None,
            states: HashMap::new(),
            console: ConsoleLog::default(),
        }
    }

    /// Returns the current read-only view.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    // --- Collections, folders, requests, executions ---

    /// Adds a collection.
    pub fn add_collection(&mut self, collection: Collection) {
        self.snapshot.collections.push(collection);
    }

    /// Adds a folder.
    ///
    /// # Errors
    ///
    /// Fails if its collection is unknown or its parent is not a folder of
    /// the same collection.
    pub fn add_folder(&mut self, folder: Folder) -> ApplicationResult<()> {
        self.require_collection(&folder.collection_id)?;
        self.require_parent(&folder.collection_id, folder.parent_id.as_deref(), &folder.id)?;
        self.snapshot.folders.push(folder);
        Ok(())
    }

    /// Adds a request.
    ///
    /// # Errors
    ///
    /// Fails if its collection is unknown or its parent is not a folder of
    /// the same collection.
    pub fn add_request(&mut self, request: Request) -> ApplicationResult<()> {
        self.require_collection(&request.collection_id)?;
        self.require_parent(&request.collection_id, request.parent_id.as_deref(), &request.id)?;
        self.snapshot.requests.push(request);
        Ok(())
    }

    /// Adds an execution of an existing request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist and
    /// `CollectionMismatch` if the execution claims another collection.
    pub fn add_execution(&mut self, execution: Execution) -> ApplicationResult<()> {
        let request = self
            .snapshot
            .request(&execution.request_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("request {}", execution.request_id)))?;
        if request.collection_id != execution.collection_id {
            return Err(DomainError::CollectionMismatch {
                execution_id: execution.id.clone(),
                expected: request.collection_id.clone(),
                found: execution.collection_id.clone(),
            }
            .into());
        }
        self.snapshot.executions.push(execution);
        Ok(())
    }

    /// Replaces a request with an edited copy.
    ///
    /// The collection and parent are kept from the stored request; use
    /// [`Self::move_item`] to reparent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no request has the same id.
    pub fn update_request(&mut self, mut request: Request) -> ApplicationResult<()> {
        let slot = self
            .snapshot
            .requests
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| ApplicationError::NotFound(format!("request {}", request.id)))?;
        request.collection_id.clone_from(&slot.collection_id);
        request.parent_id.clone_from(&slot.parent_id);
        *slot = request;
        Ok(())
    }

    /// Replaces a folder with an edited copy. The collection and parent cannot
    /// change here.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no folder has the same id.
    pub fn update_folder(&mut self, mut folder: Folder) -> ApplicationResult<()> {
        let slot = self
            .snapshot
            .folders
            .iter_mut()
            .find(|f| f.id == folder.id)
            .ok_or_else(|| ApplicationError::NotFound(format!("folder {}", folder.id)))?;
        folder.collection_id.clone_from(&slot.collection_id);
        folder.parent_id.clone_from(&slot.parent_id);
        *slot = folder;
        Ok(())
    }

    /// Writes an execution editor's state back, storing only real overrides.
    ///
    /// Returns true if the execution changed.
    ///
    /// # Errors
    ///
    /// Fails for an unknown execution or one whose request is gone.
    pub fn apply_execution_draft(
        &mut self,
        execution_id: &str,
        draft: &ExecutionDraft,
    ) -> ApplicationResult<bool> {
        let request_id = self
            .snapshot
            .execution(execution_id)
            .map(|e| e.request_id.clone())
            .ok_or_else(|| ApplicationError::NotFound(format!("execution {execution_id}")))?;
        let request = self
            .snapshot
            .request(&request_id)
            .cloned()
            .ok_or_else(|| ApplicationError::OrphanedExecution {
                execution_id: execution_id.to_string(),
                request_id: request_id.clone(),
            })?;

        let execution = self
            .snapshot
            .executions
            .iter_mut()
            .find(|e| e.id == execution_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("execution {execution_id}")))?;
        Ok(apply_draft(execution, &request, draft))
    }

    /// Moves a request or folder under `new_parent` (`None` for the root).
    ///
    /// # Errors
    ///
    /// Fails when the move would create a folder cycle, cross collections or
    /// target an unknown folder.
    pub fn move_item(&mut self, item_id: &str, new_parent: Option<&str>) -> ApplicationResult<()> {
        validate_reparent(&self.snapshot, item_id, new_parent)?;
        let parent = new_parent.map(str::to_string);

        if let Some(folder) = self.snapshot.folders.iter_mut().find(|f| f.id == item_id) {
            folder.parent_id = parent;
        } else if let Some(request) = self.snapshot.requests.iter_mut().find(|r| r.id == item_id) {
            request.parent_id = parent;
        }
        Ok(())
    }

    /// Deletes a request with its executions, tabs and send states.
    ///
    /// Returns the ids of the removed executions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist.
    pub fn delete_request(&mut self, request_id: &str) -> ApplicationResult<Vec<String>> {
        if self.snapshot.request(request_id).is_none() {
            return Err(ApplicationError::NotFound(format!("request {request_id}")));
        }
        let removed = self.remove_requests(&HashSet::from([request_id.to_string()]));
        Ok(removed)
    }

    /// Deletes an execution with its tab and send state.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the execution does not exist.
    pub fn delete_execution(&mut self, execution_id: &str) -> ApplicationResult<()> {
        let before = self.snapshot.executions.len();
        self.snapshot.executions.retain(|e| e.id != execution_id);
        if self.snapshot.executions.len() == before {
            return Err(ApplicationError::NotFound(format!("execution {execution_id}")));
        }
        self.forget(&[execution_id.to_string()]);
        Ok(())
    }

    /// Deletes a folder and everything beneath it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the folder does not exist.
    pub fn delete_folder(&mut self, folder_id: &str) -> ApplicationResult<()> {
        if self.snapshot.folder(folder_id).is_none() {
            return Err(ApplicationError::NotFound(format!("folder {folder_id}")));
        }

        let mut doomed: HashSet<String> = HashSet::from([folder_id.to_string()]);
        loop {
            let before = doomed.len();
            for folder in &self.snapshot.folders {
                if folder
                    .parent_id
                    .as_ref()
                    .is_some_and(|parent| doomed.contains(parent))
                {
                    doomed.insert(folder.id.clone());
                }
            }
            if doomed.len() == before {
                break;
            }
        }

        let requests: HashSet<String> = self
            .snapshot
            .requests
            .iter()
            .filter(|r| r.parent_id.as_ref().is_some_and(|p| doomed.contains(p)))
            .map(|r| r.id.clone())
            .collect();
        self.remove_requests(&requests);

        self.snapshot.folders.retain(|f| !doomed.contains(&f.id));
        let folders: Vec<String> = doomed.into_iter().collect();
        self.forget(&folders);
        Ok(())
    }

    /// Closes a collection, dropping its folders, requests and executions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the collection does not exist.
    pub fn delete_collection(&mut self, collection_id: &str) -> ApplicationResult<()> {
        self.require_collection(collection_id)?;
        self.drop_collection_items(collection_id);
        self.snapshot.collections.retain(|c| c.id != collection_id);
        Ok(())
    }

    fn remove_requests(&mut self, request_ids: &HashSet<String>) -> Vec<String> {
        let executions: Vec<String> = self
            .snapshot
            .executions
            .iter()
            .filter(|e| request_ids.contains(&e.request_id))
            .map(|e| e.id.clone())
            .collect();

        self.snapshot
            .executions
            .retain(|e| !request_ids.contains(&e.request_id));
        self.snapshot.requests.retain(|r| !request_ids.contains(&r.id));

        let mut forgotten: Vec<String> = request_ids.iter().cloned().collect();
        forgotten.extend(executions.iter().cloned());
        self.forget(&forgotten);

        tracing::debug!(
            requests = request_ids.len(),
            executions = executions.len(),
            "removed requests with their executions"
        );
        executions
    }

    fn drop_collection_items(&mut self, collection_id: &str) {
        let requests: HashSet<String> = self
            .snapshot
            .requests_in(collection_id)
            .map(|r| r.id.clone())
            .collect();
        self.remove_requests(&requests);

        let folders: Vec<String> = self
            .snapshot
            .folders
            .iter()
            .filter(|f| f.collection_id == collection_id)
            .map(|f| f.id.clone())
            .collect();
        self.snapshot.folders.retain(|f| f.collection_id != collection_id);
        self.snapshot
            .executions
            .retain(|e| e.collection_id != collection_id);
        self.forget(&folders);
    }

    /// Closes tabs and clears send states of removed items.
    fn forget(&mut self, ids: &[String]) {
        for id in ids {
            self.close_tab(id);
            self.states.remove(id);
        }
    }

    fn require_collection(&self, collection_id: &str) -> ApplicationResult<()> {
        self.snapshot
            .collection(collection_id)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))
    }

    fn require_parent(
        &self,
        collection_id: &str,
        parent_id: Option<&str>,
        item_id: &str,
    ) -> ApplicationResult<()> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        let parent = self
            .snapshot
            .folder(parent_id)
            .ok_or_else(|| DomainError::InvalidIdentifier(parent_id.to_string()))?;
        if parent.collection_id != collection_id {
            return Err(DomainError::CrossCollectionMove {
                item_id: item_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // --- Persistence ---

    /// Loads a collection file.
    ///
    /// The collection's requests, folders and executions are replaced.
    /// Environments are merged by name: loaded values win on conflicting
    /// keys and other variables are kept.
    pub fn load_collection_file(&mut self, file: CollectionFile, path: Option<PathBuf>) -> String {
        let collection = file.collection(path);
        let collection_id = collection.id.clone();

        if self.snapshot.collection(&collection_id).is_some() {
            self.drop_collection_items(&collection_id);
            self.snapshot.collections.retain(|c| c.id != collection_id);
        }
        self.snapshot.collections.push(collection);

        let mut rewritten = 0_usize;
        let mut claim = |item_collection: &mut String| {
            if *item_collection != collection_id {
                rewritten += 1;
                item_collection.clone_from(&collection_id);
            }
        };
        let mut folders = file.folders;
        let mut requests = file.requests;
        let mut executions = file.executions;
        folders.iter_mut().for_each(|f| claim(&mut f.collection_id));
        requests.iter_mut().for_each(|r| claim(&mut r.collection_id));
        executions.iter_mut().for_each(|e| claim(&mut e.collection_id));
        if rewritten > 0 {
            tracing::warn!(
                collection_id = %collection_id,
                rewritten,
                "file items named another collection, moved into the loaded one"
            );
        }

        self.snapshot.folders.extend(folders);
        self.snapshot.requests.extend(requests);
        self.snapshot.executions.extend(executions);

        for incoming in &file.environments {
            match self
                .snapshot
                .environments
                .iter_mut()
                .find(|e| e.name == incoming.name)
            {
                Some(existing) => existing.merge_from(incoming),
                None => self.snapshot.environments.push(incoming.clone()),
            }
        }

        tracing::info!(
            collection_id = %collection_id,
            environments = file.environments.len(),
            "collection loaded"
        );
        collection_id
    }

    /// Builds the file contents of a collection, with every workspace environment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the collection does not exist.
    pub fn export_collection(&self, collection_id: &str) -> ApplicationResult<CollectionFile> {
        let collection = self
            .snapshot
            .collection(collection_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))?;

        Ok(CollectionFile {
            id: collection.id.clone(),
            name: collection.name.clone(),
            project_name: collection.project_name.clone(),
            requests: self.snapshot.requests_in(collection_id).cloned().collect(),
            folders: self
                .snapshot
                .folders
                .iter()
                .filter(|f| f.collection_id == collection_id)
                .cloned()
                .collect(),
            executions: self
                .snapshot
                .executions
                .iter()
                .filter(|e| e.collection_id == collection_id)
                .cloned()
                .collect(),
            environments: self.snapshot.environments.clone(),
            mock_config: collection.mock_config,
        })
    }

    /// Records where a collection was saved.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the collection does not exist.
    pub fn set_collection_path(&mut self, collection_id: &str, path: PathBuf) -> ApplicationResult<()> {
        let collection = self
            .snapshot
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))?;
        collection.path = Some(path);
        Ok(())
    }

    // --- Environments ---

    /// Creates an empty environment.
    ///
    /// # Errors
    ///
    /// Fails if the name is taken (including `Global`).
    pub fn create_environment(&mut self, name: &str) -> ApplicationResult<()> {
        if name == GLOBAL_ENVIRONMENT {
            return Err(DomainError::ReservedEnvironment(name.to_string()).into());
        }
        if self.snapshot.environment(name).is_some() {
            return Err(DomainError::DuplicateEnvironment(name.to_string()).into());
        }
        self.snapshot.environments.push(Environment::new(name));
        Ok(())
    }

    /// Deletes an environment; if it was active, `Global` becomes active.
    ///
    /// # Errors
    ///
    /// Fails for `Global` or an unknown name.
    pub fn delete_environment(&mut self, name: &str) -> ApplicationResult<()> {
        if name == GLOBAL_ENVIRONMENT {
            return Err(DomainError::ReservedEnvironment(name.to_string()).into());
        }
        if self.snapshot.environment(name).is_none() {
            return Err(ApplicationError::NotFound(format!("environment {name}")));
        }
        self.snapshot.environments.retain(|e| e.name != name);
        if self.snapshot.active_environment.as_deref() == Some(name) {
            self.snapshot.active_environment = Some(GLOBAL_ENVIRONMENT.to_string());
        }
        Ok(())
    }

    /// Selects the active environment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown name.
    pub fn set_active_environment(&mut self, name: &str) -> ApplicationResult<()> {
        if self.snapshot.environment(name).is_none() {
            return Err(ApplicationError::NotFound(format!("environment {name}")));
        }
        self.snapshot.active_environment = Some(name.to_string());
        Ok(())
    }

    /// Sets a variable in an environment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown environment.
    pub fn set_variable(&mut self, environment: &str, key: &str, value: &str) -> ApplicationResult<()> {
        self.environment_mut(environment)?.set(key, value);
        Ok(())
    }

    /// Applies script writes to the active environment, or `Global` when
    /// none is active. Returns the name of the environment written.
    pub fn apply_environment_writes(&mut self, writes: &[EnvironmentWrite]) -> String {
        let target = self
            .snapshot
            .active_environment
            .clone()
            .filter(|name| self.snapshot.environment(name).is_some())
            .unwrap_or_else(|| GLOBAL_ENVIRONMENT.to_string());

        if self.snapshot.environment(&target).is_none() {
            self.snapshot.environments.push(Environment::global());
        }

        if let Ok(env) = self.environment_mut(&target) {
            for write in writes {
                match write {
                    EnvironmentWrite::Set { key, value } => env.set(key.as_str(), value.as_str()),
                    EnvironmentWrite::Unset { key } => {
                        env.remove(key);
                    }
                }
            }
        }
        target
    }

    fn environment_mut(&mut self, name: &str) -> ApplicationResult<&mut Environment> {
        self.snapshot
            .environments
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| ApplicationError::NotFound(format!("environment {name}")))
    }

    // --- Tabs, send state, console ---

    /// Opens (or focuses) a tab.
    pub fn open_tab(&mut self, tab: Tab) {
        if !self.tabs.iter().any(|t| t.id == tab.id) {
            self.tabs.push(tab.clone());
        }
        self.active_tab = Some(tab.id);
    }

    /// Closes a tab.
    pub fn close_tab(&mut self, id: &str) {
        self.tabs.retain(|t| t.id != id);
        if self.active_tab.as_deref() == Some(id) {
            self.active_tab = self.tabs.last().map(|t| t.id.clone());
        }
    }

    /// Returns the open tabs, in opening order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Returns the focused tab id.
    #[must_use]
    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    /// Returns the send state of a request or execution.
    #[must_use]
    pub fn state(&self, item_id: &str) -> ExecutionState {
        self.states.get(item_id).cloned().unwrap_or_default()
    }

    /// Sets the send state of a request or execution.
    pub fn set_state(&mut self, item_id: &str, state: ExecutionState) {
        self.states.insert(item_id.to_string(), state);
    }

    /// Returns the console buffer.
    #[must_use]
    pub const fn console(&self) -> &ConsoleLog {
        &self.console
    }

    /// Returns the console buffer for writing.
    pub const fn console_mut(&mut self) -> &mut ConsoleLog {
        &mut self.console
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::{HttpMethod, ResponseData};
    use pretty_assertions::assert_eq;

    struct Tree {
        store: WorkspaceStore,
        collection_id: String,
        root_id: String,
        child_id: String,
        request_id: String,
        execution_id: String,
    }

    fn tree() -> Tree {
        let mut store = WorkspaceStore::new();
        let collection = Collection::new("API");
        let collection_id = collection.id.clone();
        store.add_collection(collection);

        let root = Folder::new(&collection_id, "Root");
        let child = Folder::new(&collection_id, "Child").with_parent(root.id.clone());
        let request = Request::new(&collection_id, "Ping")
            .with_parent(child.id.clone())
            .with_target(HttpMethod::Get, "/ping");
        let execution = Execution::new(&request, "ping once");

        let ids = (
            root.id.clone(),
            child.id.clone(),
            request.id.clone(),
            execution.id.clone(),
        );
        store.add_folder(root).unwrap();
        store.add_folder(child).unwrap();
        store.add_request(request).unwrap();
        store.add_execution(execution).unwrap();

        Tree {
            store,
            collection_id,
            root_id: ids.0,
            child_id: ids.1,
            request_id: ids.2,
            execution_id: ids.3,
        }
    }

    fn tab(id: &str, kind: TabKind) -> Tab {
        Tab {
            id: id.to_string(),
            kind,
            name: id.to_string(),
        }
    }

    #[test]
    fn test_delete_request_cascades() {
        let mut t = tree();
        t.store.open_tab(tab(&t.request_id, TabKind::Request));
        t.store.open_tab(tab(&t.execution_id, TabKind::Execution));
        t.store.set_state(
            &t.execution_id,
            ExecutionState::success(ResponseData::new(200, Default::default(), "ok")),
        );

        let removed = t.store.delete_request(&t.request_id).unwrap();

        assert_eq!(removed, vec![t.execution_id.clone()]);
        assert!(t.store.snapshot().executions.is_empty());
        assert!(t.store.tabs().is_empty());
        assert_eq!(t.store.active_tab(), None);
        assert!(t.store.state(&t.execution_id).is_idle());
    }

    #[test]
    fn test_delete_folder_removes_subtree() {
        let mut t = tree();
        t.store.delete_folder(&t.root_id).unwrap();

        let snapshot = t.store.snapshot();
        assert!(snapshot.folders.is_empty());
        assert!(snapshot.requests.is_empty());
        assert!(snapshot.executions.is_empty());
        assert_eq!(snapshot.collections.len(), 1);
    }

    #[test]
    fn test_move_item_rejects_cycle() {
        let mut t = tree();
        let err = t.store.move_item(&t.root_id, Some(&t.child_id)).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::FolderCycle { .. })
        ));

        t.store.move_item(&t.request_id, None).unwrap();
        assert_eq!(t.store.snapshot().request(&t.request_id).unwrap().parent_id, None);
    }

    #[test]
    fn test_add_folder_with_unknown_parent_fails() {
        let mut t = tree();
        let orphan = Folder::new(&t.collection_id, "Orphan").with_parent("missing");
        assert!(t.store.add_folder(orphan).is_err());
    }

    #[test]
    fn test_execution_must_share_its_request_collection() {
        let mut t = tree();
        let request = t.store.snapshot().request(&t.request_id).unwrap().clone();
        let mut stray = Execution::new(&request, "stray");
        stray.collection_id = "other-collection".to_string();

        assert!(matches!(
            t.store.add_execution(stray),
            Err(ApplicationError::Domain(DomainError::CollectionMismatch { .. }))
        ));
        assert_eq!(t.store.snapshot().executions.len(), 1);
    }

    #[test]
    fn test_updates_keep_collection_and_parent() {
        let mut t = tree();
        let mut request = t.store.snapshot().request(&t.request_id).unwrap().clone();
        request.name = "Ping twice".to_string();
        request.collection_id = "ghost".to_string();
        request.parent_id = Some("missing-folder".to_string());
        t.store.update_request(request).unwrap();

        let stored = t.store.snapshot().request(&t.request_id).unwrap();
        assert_eq!(stored.name, "Ping twice");
        assert_eq!(stored.collection_id, t.collection_id);
        assert_eq!(stored.parent_id.as_deref(), Some(t.child_id.as_str()));

        let mut folder = t.store.snapshot().folder(&t.child_id).unwrap().clone();
        folder.collection_id = "ghost".to_string();
        folder.parent_id = None;
        t.store.update_folder(folder).unwrap();

        let stored = t.store.snapshot().folder(&t.child_id).unwrap();
        assert_eq!(stored.collection_id, t.collection_id);
        assert_eq!(stored.parent_id.as_deref(), Some(t.root_id.as_str()));
    }

    #[test]
    fn test_url_edit_through_store_keeps_query_params() {
        let mut t = tree();
        let mut request = t.store.snapshot().request(&t.request_id).unwrap().clone();
        request.url = "https://api.test/users?page=1".to_string();
        t.store.update_request(request).unwrap();

        let effective = crate::merge::effective_execution(t.store.snapshot(), &t.execution_id).unwrap();
        let mut draft = ExecutionDraft::from(effective);
        draft.url = "https://api.test/members".to_string();
        assert!(t.store.apply_execution_draft(&t.execution_id, &draft).unwrap());

        let reloaded = crate::merge::effective_execution(t.store.snapshot(), &t.execution_id).unwrap();
        assert_eq!(reloaded.url, "https://api.test/members");
        assert_eq!(reloaded.query_params, vec![courier_domain::KeyValue::new("page", "1")]);
    }

    #[test]
    fn test_load_moves_foreign_items_into_the_loaded_collection() {
        let mut store = WorkspaceStore::new();
        let request = Request::new("elsewhere", "Stray");
        let execution = Execution::new(&request, "stray run");
        let file = CollectionFile {
            id: "c1".to_string(),
            name: "Loaded".to_string(),
            project_name: "Default Project".to_string(),
            requests: vec![request],
            folders: vec![Folder::new("elsewhere", "Stray folder")],
            executions: vec![execution],
            environments: Vec::new(),
            mock_config: None,
        };

        let id = store.load_collection_file(file, None);

        let snapshot = store.snapshot();
        assert_eq!(id, "c1");
        assert!(snapshot.requests.iter().all(|r| r.collection_id == "c1"));
        assert!(snapshot.folders.iter().all(|f| f.collection_id == "c1"));
        assert!(snapshot.executions.iter().all(|e| e.collection_id == "c1"));
        assert_eq!(store.export_collection("c1").unwrap().requests.len(), 1);
    }

    #[test]
    fn test_global_environment_is_reserved() {
        let mut store = WorkspaceStore::new();
        assert!(store.create_environment(GLOBAL_ENVIRONMENT).is_err());
        assert!(store.delete_environment(GLOBAL_ENVIRONMENT).is_err());

        store.create_environment("dev").unwrap();
        assert!(matches!(
            store.create_environment("dev"),
            Err(ApplicationError::Domain(DomainError::DuplicateEnvironment(_)))
        ));

        store.set_active_environment("dev").unwrap();
        store.delete_environment("dev").unwrap();
        assert_eq!(
            store.snapshot().active_environment.as_deref(),
            Some(GLOBAL_ENVIRONMENT)
        );
    }

    #[test]
    fn test_load_merges_environments_by_name() {
        let mut store = WorkspaceStore::new();
        store.create_environment("dev").unwrap();
        store.set_variable("dev", "host", "old").unwrap();
        store.set_variable("dev", "keep", "1").unwrap();

        let file = CollectionFile {
            id: "c1".to_string(),
            name: "Loaded".to_string(),
            project_name: "Default Project".to_string(),
            requests: Vec::new(),
            folders: Vec::new(),
            executions: Vec::new(),
            environments: vec![
                Environment::new("dev").with_variable("host", "new"),
                Environment::new("prod").with_variable("host", "prod"),
            ],
            mock_config: None,
        };
        store.load_collection_file(file, None);

        let dev = store.snapshot().environment("dev").unwrap();
        assert_eq!(dev.get("host"), Some("new"));
        assert_eq!(dev.get("keep"), Some("1"));
        assert!(store.snapshot().environment("prod").is_some());
    }

    #[test]
    fn test_reload_replaces_collection_items() {
        let mut t = tree();
        let mut file = t.store.export_collection(&t.collection_id).unwrap();
        file.requests.clear();
        file.executions.clear();

        t.store
            .load_collection_file(file, Some(PathBuf::from("/tmp/api.json")));

        let snapshot = t.store.snapshot();
        assert_eq!(snapshot.collections.len(), 1);
        assert!(snapshot.requests.is_empty());
        assert!(snapshot.executions.is_empty());
        assert_eq!(snapshot.folders.len(), 2);
        assert_eq!(
            snapshot.collections[0].path,
            Some(PathBuf::from("/tmp/api.json"))
        );
    }

    #[test]
    fn test_environment_writes_fall_back_to_global() {
        let mut store = WorkspaceStore::new();
        let writes = vec![EnvironmentWrite::Set {
            key: "token".to_string(),
            value: "abc".to_string(),
        }];
        assert_eq!(store.apply_environment_writes(&writes), GLOBAL_ENVIRONMENT);
        assert_eq!(store.snapshot().global().unwrap().get("token"), Some("abc"));

        store.create_environment("dev").unwrap();
        store.set_active_environment("dev").unwrap();
        store.apply_environment_writes(&[EnvironmentWrite::Set {
            key: "token".to_string(),
            value: "dev".to_string(),
        }]);
        store.apply_environment_writes(&[EnvironmentWrite::Unset {
            key: "token".to_string(),
        }]);
        assert_eq!(store.snapshot().environment("dev").unwrap().get("token"), None);
        assert_eq!(store.snapshot().global().unwrap().get("token"), Some("abc"));
    }
}

//! Read-only view of the workspace
//!
//! Every resolver, substitution and materialization function takes a
//! `&Snapshot` instead of reaching for shared state.

use crate::collection::{Collection, Execution, Folder, Request};
use crate::environment::{Environment, GLOBAL_ENVIRONMENT};

/// All workspace entities at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Open collections
    pub collections: Vec<Collection>,
    /// Requests of every collection
    pub requests: Vec<Request>,
    /// Folders of every collection
    pub folders: Vec<Folder>,
    /// Executions of every collection
    pub executions: Vec<Execution>,
    /// Workspace environments, `Global` included
    pub environments: Vec<Environment>,
    /// Name of the active environment
    pub active_environment: Option<String>,
}

impl Snapshot {
    /// Creates an empty workspace holding only `Global`, which is also active.
    #[must_use]
    pub fn new() -> Self {
        Self {
            environments: vec![Environment::global()],
            active_environment: Some(GLOBAL_ENVIRONMENT.to_string()),
            ..Self::default()
        }
    }

    /// Finds a collection by id.
    #[must_use]
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Finds a request by id.
    #[must_use]
    pub fn request(&self, id: &str) -> Option<&Request> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Finds a folder by id.
    #[must_use]
    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Finds an execution by id.
    #[must_use]
    pub fn execution(&self, id: &str) -> Option<&Execution> {
        self.executions.iter().find(|e| e.id == id)
    }

    /// Finds an environment by name.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.name == name)
    }

    /// Returns the `Global` environment.
    #[must_use]
    pub fn global(&self) -> Option<&Environment> {
        self.environment(GLOBAL_ENVIRONMENT)
    }

    /// Returns the active environment, if it exists.
    #[must_use]
    pub fn active_environment(&self) -> Option<&Environment> {
        self.active_environment
            .as_deref()
            .and_then(|name| self.environment(name))
    }

    /// Returns the executions of a request.
    pub fn executions_of<'a>(&'a self, request_id: &'a str) -> impl Iterator<Item = &'a Execution> {
        self.executions.iter().filter(move |e| e.request_id == request_id)
    }

    /// Returns the requests of a collection.
    pub fn requests_in<'a>(&'a self, collection_id: &'a str) -> impl Iterator<Item = &'a Request> {
        self.requests
            .iter()
            .filter(move |r| r.collection_id == collection_id)
    }

    /// Returns the direct child folders of `parent_id` (`None` for the root) in a collection.
    pub fn child_folders<'a>(
        &'a self,
        collection_id: &'a str,
        parent_id: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Folder> {
        self.folders.iter().filter(move |f| {
            f.collection_id == collection_id && f.parent_id.as_deref() == parent_id
        })
    }

    /// Returns the collection an item (request, folder or execution) belongs to.
    #[must_use]
    pub fn collection_of(&self, item_id: &str) -> Option<&str> {
        self.request(item_id)
            .map(|r| r.collection_id.as_str())
            .or_else(|| self.folder(item_id).map(|f| f.collection_id.as_str()))
            .or_else(|| self.execution(item_id).map(|e| e.collection_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_has_active_global() {
        let snapshot = Snapshot::new();
        assert_eq!(snapshot.environments.len(), 1);
        assert!(snapshot.active_environment().is_some_and(Environment::is_global));
    }

    #[test]
    fn test_lookups() {
        let mut snapshot = Snapshot::new();
        let folder = Folder::new("c1", "Users");
        let request = Request::new("c1", "List").with_parent(folder.id.clone());
        let execution = Execution::new(&request, "page 2");
        snapshot.folders.push(folder.clone());
        snapshot.requests.push(request.clone());
        snapshot.executions.push(execution.clone());

        assert_eq!(snapshot.collection_of(&execution.id), Some("c1"));
        assert_eq!(snapshot.executions_of(&request.id).count(), 1);
        assert_eq!(
            snapshot.child_folders("c1", None).map(|f| f.id.as_str()).collect::<Vec<_>>(),
            vec![folder.id.as_str()]
        );
        assert!(snapshot.request("missing").is_none());
    }
}

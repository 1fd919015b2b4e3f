//! Scope chain resolution
//!
//! Walks from a request or folder up to the collection root and answers the
//! questions that depend on ancestry: which auth applies, which headers are
//! inherited, which variables a folder sees, and whether a move is legal.
//!
//! Every function here is a pure read of a [`Snapshot`]. A `parent_id` that
//! points at a missing folder ends the walk as if the root had been reached.

use std::collections::{BTreeMap, HashSet};

use courier_domain::{
    AuthConfig, DomainError, DomainResult, Environment, Folder, FolderScope, Request,
    ResolutionContext, Snapshot,
};
use indexmap::IndexMap;

/// One node of a scope chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeNode<'a> {
    /// The request the chain starts from
    Request(&'a Request),
    /// A folder on the chain
    Folder(&'a Folder),
}

impl<'a> ScopeNode<'a> {
    /// Returns the node id.
    #[must_use]
    pub fn id(&self) -> &'a str {
        match self {
            Self::Request(r) => &r.id,
            Self::Folder(f) => &f.id,
        }
    }

    /// Returns the node name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::Request(r) => &r.name,
            Self::Folder(f) => &f.name,
        }
    }

    /// Returns the node's own headers.
    #[must_use]
    pub const fn headers(&self) -> &'a IndexMap<String, String> {
        match self {
            Self::Request(r) => &r.headers,
            Self::Folder(f) => &f.headers,
        }
    }

    /// Returns the node's own auth, if set.
    #[must_use]
    pub const fn auth(&self) -> Option<&'a AuthConfig> {
        match self {
            Self::Request(r) => r.auth.as_ref(),
            Self::Folder(f) => f.auth.as_ref(),
        }
    }

    /// Returns a label such as `Request: Login` or `Folder: Users`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Request(r) => format!("Request: {}", r.name),
            Self::Folder(f) => format!("Folder: {}", f.name),
        }
    }
}

/// The auth that applies to a request and where it was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAuth {
    /// The concrete (never `inherit`) configuration
    pub config: AuthConfig,
    /// Human-readable origin, e.g. `Folder: Admin`
    pub source: String,
    /// Id of the defining node
    pub source_id: String,
}

/// An inherited header and where it was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
    /// Header name
    pub key: String,
    /// Raw (unsubstituted) value
    pub value: String,
    /// Human-readable origin
    pub source: String,
    /// Id of the defining node
    pub source_id: String,
}

/// A variable a folder inherits from its environment or ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritedVariable {
    /// Variable name
    pub key: String,
    /// Value
    pub value: String,
    /// Human-readable origin, `Env: dev` or `Folder: Users`
    pub source: String,
}

/// Returns the folders from `start` upward, nearest first.
///
/// Stops at the root, at a dangling parent pointer, or when a folder is seen
/// twice.
#[must_use]
pub fn folder_chain<'a>(snapshot: &'a Snapshot, start: Option<&str>) -> Vec<&'a Folder> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = start;

    while let Some(id) = current {
        let Some(folder) = snapshot.folder(id) else {
            break;
        };
        if !seen.insert(folder.id.as_str()) {
            tracing::warn!(folder_id = %folder.id, "folder cycle detected, stopping scope walk");
            break;
        }
        chain.push(folder);
        current = folder.parent_id.as_deref();
    }

    chain
}

/// Returns the scope chain of an item, leaf first.
///
/// Requests start with themselves, folders with themselves, and executions
/// start at their request. Unknown ids give an empty chain.
#[must_use]
pub fn scope_chain<'a>(snapshot: &'a Snapshot, item_id: &str) -> Vec<ScopeNode<'a>> {
    let item_id = snapshot
        .execution(item_id)
        .map_or(item_id, |e| e.request_id.as_str());

    if let Some(request) = snapshot.request(item_id) {
        let mut chain = vec![ScopeNode::Request(request)];
        chain.extend(
            folder_chain(snapshot, request.parent_id.as_deref())
                .into_iter()
                .map(ScopeNode::Folder),
        );
        return chain;
    }

    folder_chain(snapshot, Some(item_id))
        .into_iter()
        .map(ScopeNode::Folder)
        .collect()
}

/// Finds the nearest concrete auth on a request's scope chain.
///
/// Returns `None` when every node is unset or `inherit`; callers treat that
/// as "no auth". An explicit `none` is concrete and stops the walk.
#[must_use]
pub fn resolve_auth(snapshot: &Snapshot, request_id: &str) -> Option<ResolvedAuth> {
    scope_chain(snapshot, request_id)
        .into_iter()
        .find_map(|node| {
            node.auth()
                .filter(|auth| !auth.is_inherit())
                .map(|auth| ResolvedAuth {
                    config: auth.clone(),
                    source: node.label(),
                    source_id: node.id().to_string(),
                })
        })
}

fn merge_headers<'a>(nodes: impl DoubleEndedIterator<Item = ScopeNode<'a>>) -> Vec<ResolvedHeader> {
    let mut merged: BTreeMap<String, ResolvedHeader> = BTreeMap::new();
    for node in nodes.rev() {
        for (key, value) in node.headers() {
            merged.insert(
                key.clone(),
                ResolvedHeader {
                    key: key.clone(),
                    value: value.clone(),
                    source: node.label(),
                    source_id: node.id().to_string(),
                },
            );
        }
    }
    merged.into_values().collect()
}

/// Merges the headers of an item's scope chain, nearest definition winning.
///
/// The item's own headers are included. The result is sorted by key.
#[must_use]
pub fn resolve_headers(snapshot: &Snapshot, item_id: &str) -> Vec<ResolvedHeader> {
    merge_headers(scope_chain(snapshot, item_id).into_iter())
}

/// Merges the headers a request inherits from its folders, excluding its own.
#[must_use]
pub fn inherited_headers(snapshot: &Snapshot, request: &Request) -> Vec<ResolvedHeader> {
    merge_headers(
        folder_chain(snapshot, request.parent_id.as_deref())
            .into_iter()
            .map(ScopeNode::Folder),
    )
}

/// Lists the variables visible inside a folder that it does not define itself.
///
/// The active environment comes first, then ancestor folders from the root
/// down to the direct parent, later sources overwriting earlier ones. The
/// result is sorted by key.
#[must_use]
pub fn inherited_variables(
    snapshot: &Snapshot,
    folder_id: &str,
    environment: Option<&Environment>,
) -> Vec<InheritedVariable> {
    let mut merged: BTreeMap<String, InheritedVariable> = BTreeMap::new();

    if let Some(env) = environment {
        for var in &env.variables {
            merged.insert(
                var.key.clone(),
                InheritedVariable {
                    key: var.key.clone(),
                    value: var.value.clone(),
                    source: format!("Env: {}", env.name),
                },
            );
        }
    }

    let parent = snapshot
        .folder(folder_id)
        .and_then(|f| f.parent_id.as_deref());
    for folder in folder_chain(snapshot, parent).into_iter().rev() {
        for (key, value) in &folder.variables {
            merged.insert(
                key.clone(),
                InheritedVariable {
                    key: key.clone(),
                    value: value.clone(),
                    source: format!("Folder: {}", folder.name),
                },
            );
        }
    }

    merged.into_values().collect()
}

/// Builds the variable lookup context for an item.
///
/// Folder scopes come from the item's parent chain (an execution uses its
/// request's chain, a folder includes itself), followed by `environment`
/// (or the snapshot's active one when `None`) and `Global`.
#[must_use]
pub fn resolution_context(
    snapshot: &Snapshot,
    item_id: &str,
    environment: Option<&str>,
) -> ResolutionContext {
    let folders = scope_chain(snapshot, item_id)
        .into_iter()
        .filter_map(|node| match node {
            ScopeNode::Folder(f) => Some(FolderScope {
                id: f.id.clone(),
                name: f.name.clone(),
                variables: f.variables.clone(),
            }),
            ScopeNode::Request(_) => None,
        })
        .collect();

    let active = environment.map_or_else(
        || snapshot.active_environment(),
        |name| snapshot.environment(name),
    );

    ResolutionContext::from_sources(folders, active, snapshot.global())
}

/// Checks that `item_id` may be moved under `new_parent` (`None` for the root).
///
/// # Errors
///
/// - `InvalidIdentifier` if the item or the target folder does not exist
/// - `CrossCollectionMove` if the target belongs to another collection
/// - `FolderCycle` if a folder would end up under itself or a descendant
pub fn validate_reparent(
    snapshot: &Snapshot,
    item_id: &str,
    new_parent: Option<&str>,
) -> DomainResult<()> {
    let moving_folder = snapshot.folder(item_id);
    let collection_id = moving_folder
        .map(|f| f.collection_id.as_str())
        .or_else(|| snapshot.request(item_id).map(|r| r.collection_id.as_str()))
        .ok_or_else(|| DomainError::InvalidIdentifier(item_id.to_string()))?;

    let Some(target_id) = new_parent else {
        return Ok(());
    };

    let target = snapshot
        .folder(target_id)
        .ok_or_else(|| DomainError::InvalidIdentifier(target_id.to_string()))?;

    if target.collection_id != collection_id {
        return Err(DomainError::CrossCollectionMove {
            item_id: item_id.to_string(),
        });
    }

    if moving_folder.is_some()
        && folder_chain(snapshot, Some(target_id))
            .iter()
            .any(|f| f.id == item_id)
    {
        return Err(DomainError::FolderCycle {
            folder_id: item_id.to_string(),
            target_id: target_id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use courier_domain::{Execution, VariableScope};
    use pretty_assertions::assert_eq;

    /// Root -> Mid -> Leaf folders with one request in Leaf.
    struct Tree {
        snapshot: Snapshot,
        root: String,
        mid: String,
        leaf: String,
        request: String,
    }

    fn tree(root: Folder, mid: Folder, leaf: Folder, request: Request) -> Tree {
        let mid = mid.with_parent(root.id.clone());
        let leaf = leaf.with_parent(mid.id.clone());
        let request = request.with_parent(leaf.id.clone());
        let ids = (
            root.id.clone(),
            mid.id.clone(),
            leaf.id.clone(),
            request.id.clone(),
        );

        let mut snapshot = Snapshot::new();
        snapshot.folders = vec![root, mid, leaf];
        snapshot.requests = vec![request];
        Tree {
            snapshot,
            root: ids.0,
            mid: ids.1,
            leaf: ids.2,
            request: ids.3,
        }
    }

    fn header_value(headers: &[ResolvedHeader], key: &str) -> Option<String> {
        headers.iter().find(|h| h.key == key).map(|h| h.value.clone())
    }

    #[test]
    fn test_nearest_header_wins_over_root() {
        let t = tree(
            Folder::new("c1", "Root").with_header("H1", "a"),
            Folder::new("c1", "Mid").with_header("H1", "b"),
            Folder::new("c1", "Leaf"),
            Request::new("c1", "req"),
        );
        let headers = resolve_headers(&t.snapshot, &t.leaf);
        assert_eq!(header_value(&headers, "H1").as_deref(), Some("b"));
        assert_eq!(headers[0].source, "Folder: Mid");
        assert_eq!(headers[0].source_id, t.mid);
    }

    #[test]
    fn test_leaf_header_wins() {
        let t = tree(
            Folder::new("c1", "Root").with_header("H1", "a"),
            Folder::new("c1", "Mid"),
            Folder::new("c1", "Leaf").with_header("H1", "c"),
            Request::new("c1", "req"),
        );
        let headers = resolve_headers(&t.snapshot, &t.request);
        assert_eq!(header_value(&headers, "H1").as_deref(), Some("c"));
    }

    #[test]
    fn test_headers_are_unioned_and_sorted() {
        let t = tree(
            Folder::new("c1", "Root").with_header("Zeta", "1"),
            Folder::new("c1", "Mid").with_header("Alpha", "2"),
            Folder::new("c1", "Leaf"),
            Request::new("c1", "req").with_header("Mid", "3"),
        );
        let keys: Vec<String> = resolve_headers(&t.snapshot, &t.request)
            .into_iter()
            .map(|h| h.key)
            .collect();
        assert_eq!(keys, vec!["Alpha", "Mid", "Zeta"]);

        let request = t.snapshot.request(&t.request).unwrap();
        let inherited: Vec<String> = inherited_headers(&t.snapshot, request)
            .into_iter()
            .map(|h| h.key)
            .collect();
        assert_eq!(inherited, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_auth_short_circuits_to_root() {
        let t = tree(
            Folder::new("c1", "Root").with_auth(AuthConfig::basic("u", "p")),
            Folder::new("c1", "Mid").with_auth(AuthConfig::Inherit),
            Folder::new("c1", "Leaf").with_auth(AuthConfig::Inherit),
            Request::new("c1", "req").with_auth(AuthConfig::Inherit),
        );
        let resolved = resolve_auth(&t.snapshot, &t.request).unwrap();
        assert_eq!(resolved.config, AuthConfig::basic("u", "p"));
        assert_eq!(resolved.source, "Folder: Root");
        assert_eq!(resolved.source_id, t.root);
    }

    #[test]
    fn test_request_auth_beats_folders() {
        let t = tree(
            Folder::new("c1", "Root").with_auth(AuthConfig::basic("u", "p")),
            Folder::new("c1", "Mid"),
            Folder::new("c1", "Leaf"),
            Request::new("c1", "Login").with_auth(AuthConfig::None),
        );
        let resolved = resolve_auth(&t.snapshot, &t.request).unwrap();
        assert_eq!(resolved.config, AuthConfig::None);
        assert_eq!(resolved.source, "Request: Login");
    }

    #[test]
    fn test_no_concrete_auth() {
        let t = tree(
            Folder::new("c1", "Root"),
            Folder::new("c1", "Mid"),
            Folder::new("c1", "Leaf"),
            Request::new("c1", "req"),
        );
        assert!(resolve_auth(&t.snapshot, &t.request).is_none());
    }

    #[test]
    fn test_dangling_parent_is_root() {
        let mut snapshot = Snapshot::new();
        let request = Request::new("c1", "req").with_parent("deleted-folder");
        let id = request.id.clone();
        snapshot.requests.push(request);

        let chain = scope_chain(&snapshot, &id);
        assert_eq!(chain.len(), 1);
        assert!(resolve_headers(&snapshot, &id).is_empty());
    }

    #[test]
    fn test_cycle_in_data_terminates() {
        let mut a = Folder::new("c1", "A");
        let mut b = Folder::new("c1", "B");
        a.parent_id = Some(b.id.clone());
        b.parent_id = Some(a.id.clone());
        let a_id = a.id.clone();
        let mut snapshot = Snapshot::new();
        snapshot.folders = vec![a, b];

        assert_eq!(folder_chain(&snapshot, Some(&a_id)).len(), 2);
    }

    #[test]
    fn test_execution_uses_request_chain() {
        let t = tree(
            Folder::new("c1", "Root").with_variable("X", "1"),
            Folder::new("c1", "Mid"),
            Folder::new("c1", "Leaf"),
            Request::new("c1", "req"),
        );
        let mut snapshot = t.snapshot;
        let execution = Execution::new(snapshot.request(&t.request).unwrap(), "run");
        let exec_id = execution.id.clone();
        snapshot.executions.push(execution);

        let ctx = resolution_context(&snapshot, &exec_id, None);
        let resolved = ctx.resolve("X").unwrap();
        assert_eq!(resolved.value, "1");
        assert_eq!(
            resolved.scope,
            VariableScope::Folder {
                id: t.root,
                name: "Root".to_string()
            }
        );
    }

    #[test]
    fn test_inherited_variables() {
        let t = tree(
            Folder::new("c1", "Root")
                .with_variable("host", "root-host")
                .with_variable("only_root", "r"),
            Folder::new("c1", "Mid").with_variable("host", "mid-host"),
            Folder::new("c1", "Leaf").with_variable("own", "not inherited"),
            Request::new("c1", "req"),
        );
        let env = Environment::new("dev")
            .with_variable("host", "env-host")
            .with_variable("token", "t");

        let vars = inherited_variables(&t.snapshot, &t.leaf, Some(&env));
        let flat: Vec<(&str, &str, &str)> = vars
            .iter()
            .map(|v| (v.key.as_str(), v.value.as_str(), v.source.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("host", "mid-host", "Folder: Mid"),
                ("only_root", "r", "Folder: Root"),
                ("token", "t", "Env: dev"),
            ]
        );
    }

    #[test]
    fn test_reparent_onto_descendant_is_rejected() {
        let t = tree(
            Folder::new("c1", "Root"),
            Folder::new("c1", "Mid"),
            Folder::new("c1", "Leaf"),
            Request::new("c1", "req"),
        );
        let err = validate_reparent(&t.snapshot, &t.root, Some(&t.leaf)).unwrap_err();
        assert_eq!(
            err,
            DomainError::FolderCycle {
                folder_id: t.root.clone(),
                target_id: t.leaf.clone(),
            }
        );
        assert!(validate_reparent(&t.snapshot, &t.mid, Some(&t.mid)).is_err());
    }

    #[test]
    fn test_reparent_valid_moves() {
        let t = tree(
            Folder::new("c1", "Root"),
            Folder::new("c1", "Mid"),
            Folder::new("c1", "Leaf"),
            Request::new("c1", "req"),
        );
        assert!(validate_reparent(&t.snapshot, &t.leaf, Some(&t.root)).is_ok());
        assert!(validate_reparent(&t.snapshot, &t.mid, None).is_ok());
        assert!(validate_reparent(&t.snapshot, &t.request, Some(&t.root)).is_ok());
    }

    #[test]
    fn test_reparent_across_collections_is_rejected() {
        let mut t = tree(
            Folder::new("c1", "Root"),
            Folder::new("c1", "Mid"),
            Folder::new("c1", "Leaf"),
            Request::new("c1", "req"),
        );
        let other = Folder::new("c2", "Elsewhere");
        let other_id = other.id.clone();
        t.snapshot.folders.push(other);

        assert!(matches!(
            validate_reparent(&t.snapshot, &t.request, Some(&other_id)),
            Err(DomainError::CrossCollectionMove { .. })
        ));
        assert!(matches!(
            validate_reparent(&t.snapshot, &t.request, Some("nope")),
            Err(DomainError::InvalidIdentifier(_))
        ));
    }
}

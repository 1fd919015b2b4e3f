//! Folder type

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::auth::AuthConfig;
use crate::id::{Id, generate_id};

/// A folder groups requests and other folders and carries scoped settings.
///
/// Headers and variables defined here apply to everything below the folder
/// unless a closer folder (or the request itself) defines the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique identifier
    pub id: Id,
    /// Owning collection
    pub collection_id: Id,
    /// Display name
    pub name: String,
    /// Parent folder, `None` at the collection root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id>,
    /// Headers inherited by every descendant
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    /// Variables visible to every descendant
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, String>,
    /// Auth inherited by descendants that do not define their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
    /// Tree UI state, kept so files round-trip
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
}

impl Folder {
    /// Creates an empty folder at the root of a collection.
    #[must_use]
    pub fn new(collection_id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            collection_id: collection_id.into(),
            name: name.into(),
            parent_id: None,
            headers: IndexMap::new(),
            variables: IndexMap::new(),
            auth: None,
            collapsed: false,
        }
    }

    /// Places the folder under `parent_id`.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<Id>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Adds a header, replacing any previous value for the key.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Adds a variable, replacing any previous value for the key.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Sets the auth configuration.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_folder_reads_camel_case_file_shape() {
        let json = r#"{
            "id": "f1",
            "collectionId": "c1",
            "name": "Users",
            "parentId": null,
            "headers": {"X-Team": "core"},
            "variables": {"base": "http://localhost"}
        }"#;
        let folder: Folder = serde_json::from_str(json).unwrap();

        assert_eq!(folder.parent_id, None);
        assert_eq!(folder.headers.get("X-Team").map(String::as_str), Some("core"));
        assert_eq!(folder.auth, None);
        assert!(!folder.collapsed);
    }

    #[test]
    fn test_header_last_write_wins() {
        let folder = Folder::new("c1", "f")
            .with_header("Accept", "text/plain")
            .with_header("Accept", "application/json");
        assert_eq!(folder.headers.len(), 1);
        assert_eq!(folder.headers["Accept"], "application/json");
    }
}

//! Collection metadata and its on-disk shape

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::id::{Id, generate_id};
use crate::mock::MockConfig;

use super::{Execution, Folder, Request};

/// Project name used when a file does not carry one.
pub const DEFAULT_PROJECT_NAME: &str = "Default Project";

fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

/// A collection as held in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier
    pub id: Id,
    /// Display name
    pub name: String,
    /// Project (workspace) the collection belongs to
    #[serde(default = "default_project_name")]
    pub project_name: String,
    /// File the collection was last saved to or loaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Mock server settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_config: Option<MockConfig>,
}

impl Collection {
    /// Creates an unsaved collection in the default project.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            project_name: default_project_name(),
            path: None,
            mock_config: None,
        }
    }

    /// Returns the mock settings, defaults when unset.
    #[must_use]
    pub fn mock_config_or_default(&self) -> MockConfig {
        self.mock_config.unwrap_or_default()
    }

    /// Returns the file name suggested when saving for the first time.
    #[must_use]
    pub fn suggested_file_name(&self) -> String {
        format!("{}.json", self.name)
    }
}

/// A point-in-time snapshot of one collection, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionFile {
    /// Collection identifier
    pub id: Id,
    /// Collection name
    pub name: String,
    /// Project name
    #[serde(default = "default_project_name")]
    pub project_name: String,
    /// Requests of the collection
    #[serde(default)]
    pub requests: Vec<Request>,
    /// Folders of the collection
    #[serde(default)]
    pub folders: Vec<Folder>,
    /// Executions of the collection's requests
    #[serde(default)]
    pub executions: Vec<Execution>,
    /// Workspace environments at save time
    #[serde(default)]
    pub environments: Vec<Environment>,
    /// Mock server settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_config: Option<MockConfig>,
}

impl CollectionFile {
    /// Returns the collection metadata, remembering where it was loaded from.
    #[must_use]
    pub fn collection(&self, path: Option<PathBuf>) -> Collection {
        Collection {
            id: self.id.clone(),
            name: self.name.clone(),
            project_name: self.project_name.clone(),
            path,
            mock_config: self.mock_config,
        }
    }
}

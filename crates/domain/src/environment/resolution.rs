//! Resolution context for variable substitution
//!
//! Holds all variable sources for one lookup, in precedence order.

use indexmap::IndexMap;

use crate::id::Id;

use super::variable::Environment;

/// Where a resolved variable came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableScope {
    /// A folder on the item's scope chain
    Folder {
        /// Folder id
        id: Id,
        /// Folder name
        name: String,
    },
    /// The active environment
    Environment(String),
    /// The `Global` environment
    Global,
}

impl VariableScope {
    /// Returns a human-readable label, e.g. `Folder: Users` or `Env: dev`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Folder { name, .. } => format!("Folder: {name}"),
            Self::Environment(name) => format!("Env: {name}"),
            Self::Global => "Global".to_string(),
        }
    }
}

/// A resolved variable with its value and origin scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    /// The variable name (without `{{ }}`)
    pub name: String,
    /// The resolved value
    pub value: String,
    /// The scope from which this value was resolved
    pub scope: VariableScope,
}

/// Variables contributed by one folder of the scope chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderScope {
    /// Folder id
    pub id: Id,
    /// Folder name
    pub name: String,
    /// Folder variables
    pub variables: IndexMap<String, String>,
}

/// Holds all variable sources for resolution.
///
/// Lookup order, first hit wins:
/// 1. Folders, nearest to the item first
/// 2. The active environment
/// 3. The `Global` environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Folder scopes, leaf to root
    pub folders: Vec<FolderScope>,
    /// Active environment, `None` when it is `Global` or missing
    pub environment: Option<Environment>,
    /// The `Global` environment
    pub global: Option<Environment>,
}

impl ResolutionContext {
    /// Creates an empty context that resolves nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from its sources.
    ///
    /// An active environment that is `Global` itself is only consulted once.
    #[must_use]
    pub fn from_sources(
        folders: Vec<FolderScope>,
        environment: Option<&Environment>,
        global: Option<&Environment>,
    ) -> Self {
        Self {
            folders,
            environment: environment.filter(|e| !e.is_global()).cloned(),
            global: global.cloned(),
        }
    }

    /// Resolves a variable name to its value and scope.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ResolvedVariable> {
        let hit = |value: &str, scope: VariableScope| ResolvedVariable {
            name: name.to_string(),
            value: value.to_string(),
            scope,
        };

        for folder in &self.folders {
            if let Some(value) = folder.variables.get(name) {
                return Some(hit(
                    value,
                    VariableScope::Folder {
                        id: folder.id.clone(),
                        name: folder.name.clone(),
                    },
                ));
            }
        }

        if let Some(env) = &self.environment
            && let Some(value) = env.get(name)
        {
            return Some(hit(value, VariableScope::Environment(env.name.clone())));
        }

        self.global
            .as_ref()
            .and_then(|g| g.get(name))
            .map(|value| hit(value, VariableScope::Global))
    }

    /// Resolves a variable name to just its value.
    #[must_use]
    pub fn resolve_value(&self, name: &str) -> Option<String> {
        self.resolve(name).map(|r| r.value)
    }

    /// Returns all variable names across all scopes, sorted.
    #[must_use]
    pub fn all_variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .folders
            .iter()
            .flat_map(|f| f.variables.keys().cloned())
            .chain(
                self.environment
                    .iter()
                    .chain(self.global.iter())
                    .flat_map(|e| e.variables.iter().map(|v| v.key.clone())),
            )
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

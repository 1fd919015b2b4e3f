//! Environment variable types

use serde::{Deserialize, Serialize};

/// Name of the environment that always exists and backs every lookup.
pub const GLOBAL_ENVIRONMENT: &str = "Global";

/// One `key = value` row of an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVariable {
    /// Variable name, unique within its environment
    pub key: String,
    /// Variable value
    pub value: String,
}

impl EnvVariable {
    /// Creates a variable.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A named, ordered set of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique environment name
    pub name: String,
    /// Variables in display order
    #[serde(default)]
    pub variables: Vec<EnvVariable>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Creates the empty `Global` environment.
    #[must_use]
    pub fn global() -> Self {
        Self::new(GLOBAL_ENVIRONMENT)
    }

    /// Returns true if this is the reserved `Global` environment.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.name == GLOBAL_ENVIRONMENT
    }

    /// Sets a variable (builder style).
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Looks up a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.key == key)
            .map(|v| v.value.as_str())
    }

    /// Sets a variable. An existing key keeps its position and takes the new value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.variables.iter_mut().find(|v| v.key == key) {
            existing.value = value;
        } else {
            self.variables.push(EnvVariable { key, value });
        }
    }

    /// Removes a variable, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.variables.iter().position(|v| v.key == key)?;
        Some(self.variables.remove(index).value)
    }

    /// Merges `other` into this environment: every variable of `other` is set,
    /// so its values win on conflicting keys and unknown keys are appended.
    pub fn merge_from(&mut self, other: &Self) {
        for var in &other.variables {
            self.set(var.key.clone(), var.value.clone());
        }
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

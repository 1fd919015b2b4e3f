//! Per-field override values for executions.
//!
//! An execution stores, for each field of its parent request, either nothing
//! (the field follows the parent) or an explicit replacement. `Override<T>`
//! keeps those two cases apart, so an explicitly emptied list is never
//! confused with "not overridden".
//!
//! On disk an inherited field is simply absent; use it together with
//! `#[serde(default, skip_serializing_if = "Override::is_inherited")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Either the parent's value (`Inherited`) or an explicit replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override<T> {
    /// Follow the parent request's value verbatim.
    Inherited,
    /// Replace the parent's value.
    Explicit(T),
}

impl<T> Default for Override<T> {
    fn default() -> Self {
        Self::Inherited
    }
}

impl<T> Override<T> {
    /// Returns true if the field follows its parent.
    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        matches!(self, Self::Inherited)
    }

    /// Returns true if the field carries its own value.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Returns the explicit value, if any.
    #[must_use]
    pub const fn as_explicit(&self) -> Option<&T> {
        match self {
            Self::Inherited => None,
            Self::Explicit(value) => Some(value),
        }
    }

    /// Returns the explicit value, or `inherited` when the field follows its parent.
    #[must_use]
    pub fn resolve<'a>(&'a self, inherited: &'a T) -> &'a T {
        self.as_explicit().unwrap_or(inherited)
    }

    /// Converts into an `Option`, `None` meaning inherited.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Inherited => None,
            Self::Explicit(value) => Some(value),
        }
    }
}

impl<T: PartialEq> Override<T> {
    /// Builds the value to persist after an edit.
    ///
    /// An edit that equals what the field would inherit anyway is stored as
    /// `Inherited`, keeping persisted diffs minimal.
    #[must_use]
    pub fn from_edit(value: T, inherited: &T) -> Self {
        if &value == inherited {
            Self::Inherited
        } else {
            Self::Explicit(value)
        }
    }
}

impl<T> From<Option<T>> for Override<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Inherited, Self::Explicit)
    }
}

impl<T: Serialize> Serialize for Override<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Inherited => serializer.serialize_none(),
            Self::Explicit(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Override<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

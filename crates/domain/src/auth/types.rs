//! Authentication configuration types

use serde::{Deserialize, Serialize};

/// Authentication configuration for a request or folder.
///
/// Serialized as `{"type": "basic", "basic": {...}}`, the same shape the
/// desktop client writes, so collection files round-trip between the two.
/// All string values may contain `{{variables}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication, even if an ancestor defines some.
    None,
    /// Use the nearest ancestor's concrete auth, or none.
    #[default]
    Inherit,
    /// HTTP Basic authentication.
    Basic {
        /// Username and password.
        basic: BasicCredentials,
    },
    /// Bearer token authentication.
    Bearer {
        /// The token.
        bearer: BearerToken,
    },
}

/// Username/password pair for Basic auth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BasicCredentials {
    /// Username (may contain variables)
    pub username: String,
    /// Password (may contain variables)
    pub password: String,
}

/// Token for Bearer auth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BearerToken {
    /// The bearer token (may contain variables like `{{access_token}}`)
    pub token: String,
}

impl AuthConfig {
    /// Creates a Basic auth configuration.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            basic: BasicCredentials {
                username: username.into(),
                password: password.into(),
            },
        }
    }

    /// Creates a Bearer auth configuration.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            bearer: BearerToken {
                token: token.into(),
            },
        }
    }

    /// Returns true if this configuration defers to an ancestor.
    #[must_use]
    pub const fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }

    /// Returns the type tag used in files and source labels.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Inherit => "inherit",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_inherit() {
        assert!(AuthConfig::default().is_inherit());
    }

    #[test]
    fn test_basic_wire_shape() {
        let json = serde_json::to_value(AuthConfig::basic("user", "pass")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "basic",
                "basic": { "username": "user", "password": "pass" }
            })
        );
    }

    #[test]
    fn test_parse_bearer() {
        let auth: AuthConfig =
            serde_json::from_str(r#"{"type":"bearer","bearer":{"token":"{{tok}}"}}"#).unwrap();
        match auth {
            AuthConfig::Bearer { bearer } => assert_eq!(bearer.token, "{{tok}}"),
            other => panic!("Expected Bearer auth, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unit_variants() {
        let none: AuthConfig = serde_json::from_str(r#"{"type":"none"}"#).unwrap();
        let inherit: AuthConfig = serde_json::from_str(r#"{"type":"inherit"}"#).unwrap();
        assert_eq!(none, AuthConfig::None);
        assert_eq!(inherit, AuthConfig::Inherit);
    }
}

//! Request type

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::auth::AuthConfig;
use crate::id::{Id, generate_id};
use crate::mock::MockResponse;
use crate::request::{BodyType, FormField, HttpMethod};
use crate::scripting::ScriptItem;

/// A saved request: the template every execution of it starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique identifier
    pub id: Id,
    /// Owning collection
    pub collection_id: Id,
    /// Display name
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// URL template, may contain `{{variables}}`, `{path}` tokens and a query string
    #[serde(default)]
    pub url: String,
    /// Request-level headers
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    /// Raw body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Declared body type, detected from the body when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<BodyType>,
    /// Form fields for form bodies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_data: Vec<FormField>,
    /// Scripts run before sending
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_scripts: Vec<ScriptItem>,
    /// Scripts run after a response arrives
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_scripts: Vec<ScriptItem>,
    /// Parent folder, `None` at the collection root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id>,
    /// Auth, `None` behaves like `inherit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
    /// Canned response for the collection mock server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_response: Option<MockResponse>,
}

impl Request {
    /// Creates an empty GET request at the root of a collection.
    #[must_use]
    pub fn new(collection_id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            collection_id: collection_id.into(),
            name: name.into(),
            method: HttpMethod::Get,
            url: String::new(),
            headers: IndexMap::new(),
            body: None,
            body_type: None,
            form_data: Vec::new(),
            pre_scripts: Vec::new(),
            post_scripts: Vec::new(),
            parent_id: None,
            auth: None,
            mock_response: None,
        }
    }

    /// Sets method and URL.
    #[must_use]
    pub fn with_target(mut self, method: HttpMethod, url: impl Into<String>) -> Self {
        self.method = method;
        self.url = url.into();
        self
    }

    /// Places the request under `parent_id`.
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

    /// Sets a raw body and its type.
    #[must_use]
    pub fn with_body(mut self, body_type: BodyType, body: impl Into<String>) -> Self {
        self.body_type = Some(body_type);
        self.body = Some(body.into());
        self
    }

    /// Sets the auth configuration.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Returns the body text, empty when unset.
    #[must_use]
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Returns the declared body type, or the one detected from the body.
    #[must_use]
    pub fn effective_body_type(&self) -> BodyType {
        self.body_type
            .unwrap_or_else(|| BodyType::detect(self.body_text()))
    }

    /// Returns the auth configuration, `inherit` when unset.
    #[must_use]
    pub fn auth_or_inherit(&self) -> AuthConfig {
        self.auth.clone().unwrap_or_default()
    }
}

//! Execution type

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::AuthConfig;
use crate::collection::Request;
use crate::id::{Id, generate_id};
use crate::overrides::Override;
use crate::request::{BodyType, FormField, HttpMethod, KeyValue, entries_from_map};
use crate::scripting::ScriptItem;

/// A named, saved run of a request.
///
/// Every field except identity is an [`Override`]: `Inherited` follows the
/// parent request, `Explicit` replaces it. Several executions of the same
/// request are independent override sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    /// Unique identifier
    pub id: Id,
    /// The request this execution runs
    pub request_id: Id,
    /// Owning collection, same as the request's
    pub collection_id: Id,
    /// Display name
    pub name: String,
    /// Method override
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub method: Override<HttpMethod>,
    /// URL override (without the query string)
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub url: Override<String>,
    /// Header list override
    #[serde(
        default,
        skip_serializing_if = "Override::is_inherited",
        deserialize_with = "entries_or_map"
    )]
    pub headers: Override<Vec<KeyValue>>,
    /// Raw body override
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub body: Override<String>,
    /// Body type override
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub body_type: Override<BodyType>,
    /// Form fields override
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub form_data: Override<Vec<FormField>>,
    /// Auth override
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub auth: Override<AuthConfig>,
    /// Pre-script list override
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub pre_scripts: Override<Vec<ScriptItem>>,
    /// Post-script list override
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub post_scripts: Override<Vec<ScriptItem>>,
    /// Query parameter list override
    #[serde(
        default,
        skip_serializing_if = "Override::is_inherited",
        deserialize_with = "entries_or_map"
    )]
    pub query_params: Override<Vec<KeyValue>>,
    /// Path parameter values
    #[serde(default, skip_serializing_if = "Override::is_inherited")]
    pub path_params: Override<IndexMap<String, String>>,
}

impl Execution {
    /// Creates an execution of `request` that overrides nothing.
    #[must_use]
    pub fn new(request: &Request, name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            request_id: request.id.clone(),
            collection_id: request.collection_id.clone(),
            name: name.into(),
            method: Override::Inherited,
            url: Override::Inherited,
            headers: Override::Inherited,
            body: Override::Inherited,
            body_type: Override::Inherited,
            form_data: Override::Inherited,
            auth: Override::Inherited,
            pre_scripts: Override::Inherited,
            post_scripts: Override::Inherited,
            query_params: Override::Inherited,
            path_params: Override::Inherited,
        }
    }

    /// Returns true if no field is overridden.
    #[must_use]
    pub const fn is_pristine(&self) -> bool {
        self.method.is_inherited()
            && self.url.is_inherited()
            && self.headers.is_inherited()
            && self.body.is_inherited()
            && self.body_type.is_inherited()
            && self.form_data.is_inherited()
            && self.auth.is_inherited()
            && self.pre_scripts.is_inherited()
            && self.post_scripts.is_inherited()
            && self.query_params.is_inherited()
            && self.path_params.is_inherited()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntriesRepr {
    List(Vec<KeyValue>),
    Map(IndexMap<String, String>),
}

/// Reads a key/value override written either as a list of entries or as a
/// plain object (older files store execution headers as a map).
fn entries_or_map<'de, D>(deserializer: D) -> Result<Override<Vec<KeyValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<EntriesRepr>::deserialize(deserializer)?;
    Ok(repr
        .map(|r| match r {
            EntriesRepr::List(entries) => entries,
            EntriesRepr::Map(map) => entries_from_map(&map),
        })
        .into())
}

//! Execution override merging
//!
//! Forward direction: the effective value of each field is the execution's
//! override, else the request's value, else the field default.
//!
//! Reverse direction: when an edited execution is written back, a field whose
//! new value equals what it would inherit anyway is stored as `Inherited`.

use std::collections::BTreeSet;

use courier_domain::{
    AuthConfig, BodyType, Execution, FormField, HttpMethod, KeyValue, Override, Request,
    ScriptItem, Snapshot,
};
use indexmap::IndexMap;

use crate::error::{ApplicationError, ApplicationResult};

/// A request (optionally seen through one execution) with every field resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRequest {
    /// The request the values come from
    pub request_id: String,
    /// The execution whose overrides were applied, if any
    pub execution_id: Option<String>,
    /// Owning collection
    pub collection_id: String,
    /// Request or execution name
    pub name: String,
    /// Method
    pub method: HttpMethod,
    /// URL template without its query string
    pub url: String,
    /// Query parameters, in order, duplicates allowed
    pub query_params: Vec<KeyValue>,
    /// Values for `{name}` path tokens
    pub path_params: IndexMap<String, String>,
    /// Request-level headers (folder headers are added at materialization)
    pub headers: Vec<KeyValue>,
    /// Raw body text
    pub body: String,
    /// Body type
    pub body_type: BodyType,
    /// Form fields for form bodies
    pub form_data: Vec<FormField>,
    /// Auth, possibly `inherit`
    pub auth: AuthConfig,
    /// Scripts run before sending
    pub pre_scripts: Vec<ScriptItem>,
    /// Scripts run after the response
    pub post_scripts: Vec<ScriptItem>,
}

/// Splits a URL into its base and its query parameters.
///
/// A URL without `?` has no parameters. A query that cannot be decoded is
/// left in the base untouched.
#[must_use]
pub fn split_url(url: &str) -> (String, Vec<KeyValue>) {
    let Some((base, query)) = url.split_once('?') else {
        return (url.to_string(), Vec::new());
    };

    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => (
            base.to_string(),
            pairs.into_iter().map(|(k, v)| KeyValue::new(k, v)).collect(),
        ),
        Err(err) => {
            tracing::debug!(%err, url, "query string not parsed, keeping URL as-is");
            (url.to_string(), Vec::new())
        }
    }
}

fn from_request(request: &Request) -> EffectiveRequest {
    let (url, query_params) = split_url(&request.url);
    EffectiveRequest {
        request_id: request.id.clone(),
        execution_id: None,
        collection_id: request.collection_id.clone(),
        name: request.name.clone(),
        method: request.method,
        url,
        query_params,
        path_params: IndexMap::new(),
        headers: courier_domain::entries_from_map(&request.headers),
        body: request.body_text().to_string(),
        body_type: request.effective_body_type(),
        form_data: request.form_data.clone(),
        auth: request.auth_or_inherit(),
        pre_scripts: request.pre_scripts.clone(),
        post_scripts: request.post_scripts.clone(),
    }
}

/// Applies an execution's overrides on top of its request.
#[must_use]
pub fn merge_execution(request: &Request, execution: &Execution) -> EffectiveRequest {
    let base = from_request(request);

    // An explicit URL without a query string overrides only the base; query
    // params still come from the request unless overridden themselves.
    let (url, parsed_params) = match &execution.url {
        Override::Explicit(url) if url.contains('?') => split_url(url),
        Override::Explicit(url) => (url.clone(), base.query_params.clone()),
        Override::Inherited => (base.url.clone(), base.query_params.clone()),
    };
    let body = execution.body.resolve(&base.body).clone();
    let body_type = match (&execution.body_type, &request.body_type) {
        (Override::Explicit(t), _) | (Override::Inherited, Some(t)) => *t,
        (Override::Inherited, None) => BodyType::detect(&body),
    };

    EffectiveRequest {
        execution_id: Some(execution.id.clone()),
        name: execution.name.clone(),
        method: *execution.method.resolve(&base.method),
        query_params: execution.query_params.resolve(&parsed_params).clone(),
        url,
        path_params: execution.path_params.resolve(&base.path_params).clone(),
        headers: execution.headers.resolve(&base.headers).clone(),
        body,
        body_type,
        form_data: execution.form_data.resolve(&base.form_data).clone(),
        auth: execution.auth.resolve(&base.auth).clone(),
        pre_scripts: execution.pre_scripts.resolve(&base.pre_scripts).clone(),
        post_scripts: execution.post_scripts.resolve(&base.post_scripts).clone(),
        ..base
    }
}

/// Returns the effective values of a request.
///
/// # Errors
///
/// Returns `NotFound` if the request does not exist.
pub fn effective_request(snapshot: &Snapshot, request_id: &str) -> ApplicationResult<EffectiveRequest> {
    snapshot
        .request(request_id)
        .map(from_request)
        .ok_or_else(|| ApplicationError::NotFound(format!("request {request_id}")))
}

/// Returns the effective values of an execution.
///
/// # Errors
///
/// Returns `NotFound` for an unknown execution and `OrphanedExecution` when
/// its request is gone.
pub fn effective_execution(
    snapshot: &Snapshot,
    execution_id: &str,
) -> ApplicationResult<EffectiveRequest> {
    let execution = snapshot
        .execution(execution_id)
        .ok_or_else(|| ApplicationError::NotFound(format!("execution {execution_id}")))?;
    let request = snapshot
        .request(&execution.request_id)
        .ok_or_else(|| ApplicationError::OrphanedExecution {
            execution_id: execution.id.clone(),
            request_id: execution.request_id.clone(),
        })?;
    Ok(merge_execution(request, execution))
}

/// Returns the effective values of a request or an execution id.
///
/// # Errors
///
/// Returns `NotFound` if the id names neither.
pub fn effective_item(snapshot: &Snapshot, item_id: &str) -> ApplicationResult<EffectiveRequest> {
    if snapshot.execution(item_id).is_some() {
        effective_execution(snapshot, item_id)
    } else {
        effective_request(snapshot, item_id)
    }
}

/// The editable state of an execution editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionDraft {
    /// Execution name
    pub name: String,
    /// Method
    pub method: HttpMethod,
    /// URL without query string
    pub url: String,
    /// Query parameters
    pub query_params: Vec<KeyValue>,
    /// Path parameter values
    pub path_params: IndexMap<String, String>,
    /// Header rows
    pub headers: Vec<KeyValue>,
    /// Body text
    pub body: String,
    /// Body type
    pub body_type: BodyType,
    /// Form fields
    pub form_data: Vec<FormField>,
    /// Auth
    pub auth: AuthConfig,
    /// Pre-scripts
    pub pre_scripts: Vec<ScriptItem>,
    /// Post-scripts
    pub post_scripts: Vec<ScriptItem>,
}

impl From<EffectiveRequest> for ExecutionDraft {
    fn from(effective: EffectiveRequest) -> Self {
        Self {
            name: effective.name,
            method: effective.method,
            url: effective.url,
            query_params: effective.query_params,
            path_params: effective.path_params,
            headers: effective.headers,
            body: effective.body,
            body_type: effective.body_type,
            form_data: effective.form_data,
            auth: effective.auth,
            pre_scripts: effective.pre_scripts,
            post_scripts: effective.post_scripts,
        }
    }
}

/// Returns true if header rows are exactly the parent's header map.
///
/// Same length, every row enabled, and each row's key and value equal to
/// the parent entry at the same position. Anything else makes the whole
/// list an override.
#[must_use]
pub fn headers_match_parent(rows: &[KeyValue], parent: &IndexMap<String, String>) -> bool {
    rows.len() == parent.len()
        && rows
            .iter()
            .zip(parent)
            .all(|(row, (key, value))| row.enabled && &row.key == key && &row.value == value)
}

/// Writes a draft back into `execution`, storing only real overrides.
///
/// Returns true if the execution changed.
pub fn apply_draft(execution: &mut Execution, request: &Request, draft: &ExecutionDraft) -> bool {
    let parent = from_request(request);

    let headers = if headers_match_parent(&draft.headers, &request.headers) {
        Override::Inherited
    } else {
        Override::Explicit(draft.headers.clone())
    };

    let updated = Execution {
        id: execution.id.clone(),
        request_id: execution.request_id.clone(),
        collection_id: execution.collection_id.clone(),
        name: draft.name.clone(),
        method: Override::from_edit(draft.method, &parent.method),
        url: Override::from_edit(draft.url.clone(), &parent.url),
        headers,
        body: Override::from_edit(draft.body.clone(), &parent.body),
        body_type: Override::from_edit(draft.body_type, &parent.body_type),
        form_data: Override::from_edit(draft.form_data.clone(), &parent.form_data),
        auth: Override::from_edit(draft.auth.clone(), &parent.auth),
        pre_scripts: Override::from_edit(draft.pre_scripts.clone(), &parent.pre_scripts),
        post_scripts: Override::from_edit(draft.post_scripts.clone(), &parent.post_scripts),
        query_params: Override::from_edit(draft.query_params.clone(), &parent.query_params),
        path_params: Override::from_edit(draft.path_params.clone(), &parent.path_params),
    };

    if updated == *execution {
        false
    } else {
        *execution = updated;
        true
    }
}

/// Header keys whose value differs from the parent request's value for the same key.
#[must_use]
pub fn overridden_header_keys(rows: &[KeyValue], parent: &IndexMap<String, String>) -> BTreeSet<String> {
    rows.iter()
        .filter(|row| {
            !row.key.is_empty() && parent.get(&row.key).is_some_and(|value| value != &row.value)
        })
        .map(|row| row.key.clone())
        .collect()
}

/// Query keys that have at least one entry with no exact key and value match in the parent URL.
#[must_use]
pub fn overridden_query_keys(params: &[KeyValue], parent_url: &str) -> BTreeSet<String> {
    let (_, parent_params) = split_url(parent_url);
    params
        .iter()
        .filter(|p| {
            !p.key.is_empty()
                && !parent_params
                    .iter()
                    .any(|pp| pp.key == p.key && pp.value == p.value)
        })
        .map(|p| p.key.clone())
        .collect()
}

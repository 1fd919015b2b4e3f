//! Request materialization
//!
//! Turns an [`EffectiveRequest`] into the final method, URL, headers and
//! body. The executor arguments, the raw HTTP preview and the curl command
//! are all rendered from the same [`MaterializedRequest`].

pub mod render;
pub mod scripts;

use base64::Engine;
use courier_domain::{
    AuthConfig, BodyType, FormDataEntry, FormField, HttpMethod, HttpRequestArgs, KeyValue,
    Snapshot,
};
use indexmap::IndexMap;
use url::form_urlencoded;

use crate::merge::EffectiveRequest;
use crate::scope::{inherited_headers, resolution_context, resolve_auth};
use crate::variable_resolver::{VariableResolver, apply_path_params};

pub use render::{curl_command, raw_http, shell_quote};
pub use scripts::{select_post_scripts, select_pre_scripts, should_run};

/// The body handed to the HTTP executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// No body
    Empty,
    /// Serialized text, including form-urlencoded bodies
    Text(String),
    /// Multipart entries; the executor chooses the boundary
    Multipart(Vec<FormDataEntry>),
}

impl RequestBody {
    /// Returns true if nothing is sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A fully substituted, wire-ready request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedRequest {
    /// Method
    pub method: HttpMethod,
    /// Final URL including query string
    pub url: String,
    /// Final headers, in send order
    pub headers: IndexMap<String, String>,
    /// Final body
    pub body: RequestBody,
    /// HTTP/1.1 text preview
    pub raw_http: String,
    /// Equivalent curl command
    pub curl: String,
}

impl MaterializedRequest {
    /// Builds a request and renders its text views.
    #[must_use]
    pub fn assemble(
        method: HttpMethod,
        url: String,
        headers: IndexMap<String, String>,
        body: RequestBody,
    ) -> Self {
        let mut request = Self {
            method,
            url,
            headers,
            body,
            raw_http: String::new(),
            curl: String::new(),
        };
        request.raw_http = raw_http(&request);
        request.curl = curl_command(&request);
        request
    }

    /// Returns the arguments for the HTTP executor.
    #[must_use]
    pub fn to_http_args(&self) -> HttpRequestArgs {
        let (body, form_data) = match &self.body {
            RequestBody::Empty => (None, None),
            RequestBody::Text(text) => (Some(text.clone()), None),
            RequestBody::Multipart(entries) => (None, Some(entries.clone())),
        };
        HttpRequestArgs {
            method: self.method.as_str().to_string(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            body,
            form_data,
        }
    }
}

/// Materializes requests against one snapshot and environment.
#[derive(Debug, Clone, Copy)]
pub struct Materializer<'a> {
    snapshot: &'a Snapshot,
    environment: Option<&'a str>,
}

impl<'a> Materializer<'a> {
    /// Creates a materializer. `None` uses the snapshot's active environment.
    #[must_use]
    pub const fn new(snapshot: &'a Snapshot, environment: Option<&'a str>) -> Self {
        Self {
            snapshot,
            environment,
        }
    }

    /// Returns the variable resolver in scope for `effective`.
    #[must_use]
    pub fn resolver(&self, effective: &EffectiveRequest) -> VariableResolver {
        VariableResolver::new(resolution_context(
            self.snapshot,
            &effective.request_id,
            self.environment,
        ))
    }

    /// Materializes an effective request.
    #[must_use]
    pub fn materialize(&self, effective: &EffectiveRequest) -> MaterializedRequest {
        let resolver = self.resolver(effective);

        let url = build_url(effective, &resolver);
        let body = build_body(effective, &resolver);
        let mut headers = self.build_headers(effective, &resolver);

        if let Some(value) = self.authorization(effective, &resolver) {
            headers.retain(|key, _| !key.eq_ignore_ascii_case("authorization"));
            headers.insert("Authorization".to_string(), value);
        }

        let has_content_type = headers
            .keys()
            .any(|key| key.eq_ignore_ascii_case("content-type"));
        if !has_content_type
            && let Some(content_type) = effective.body_type.content_type()
        {
            headers.insert("Content-Type".to_string(), content_type.to_string());
        }

        tracing::debug!(
            method = %effective.method,
            url = %url,
            headers = headers.len(),
            "materialized request"
        );

        MaterializedRequest::assemble(effective.method, url, headers, body)
    }

    fn build_headers(
        &self,
        effective: &EffectiveRequest,
        resolver: &VariableResolver,
    ) -> IndexMap<String, String> {
        let mut headers = IndexMap::new();

        if let Some(request) = self.snapshot.request(&effective.request_id) {
            for header in inherited_headers(self.snapshot, request) {
                if !header.key.is_empty() && !header.value.is_empty() {
                    headers.insert(header.key, resolver.substitute(&header.value).into_owned());
                }
            }
        }

        for header in sendable(&effective.headers) {
            if !header.value.is_empty() {
                headers.insert(
                    header.key.clone(),
                    resolver.substitute(&header.value).into_owned(),
                );
            }
        }

        headers
    }

    fn authorization(&self, effective: &EffectiveRequest, resolver: &VariableResolver) -> Option<String> {
        let auth = if effective.auth.is_inherit() {
            resolve_auth(self.snapshot, &effective.request_id)?.config
        } else {
            effective.auth.clone()
        };
        authorization_value(&auth, resolver)
    }
}

/// Returns the `Authorization` header value for a concrete auth config.
#[must_use]
pub fn authorization_value(auth: &AuthConfig, resolver: &VariableResolver) -> Option<String> {
    match auth {
        AuthConfig::None | AuthConfig::Inherit => None,
        AuthConfig::Basic { basic } => {
            let credentials = format!(
                "{}:{}",
                resolver.substitute(&basic.username),
                resolver.substitute(&basic.password)
            );
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
            Some(format!("Basic {encoded}"))
        }
        AuthConfig::Bearer { bearer } => Some(format!("Bearer {}", resolver.substitute(&bearer.token))),
    }
}

fn sendable(entries: &[KeyValue]) -> impl Iterator<Item = &KeyValue> {
    entries.iter().filter(|e| e.enabled && !e.key.is_empty())
}

fn sendable_fields(fields: &[FormField]) -> impl Iterator<Item = &FormField> {
    fields.iter().filter(|f| f.enabled && !f.key.is_empty())
}

/// Builds the final URL: path tokens, then query parameters, then variables.
#[must_use]
pub fn build_url(effective: &EffectiveRequest, resolver: &VariableResolver) -> String {
    let base = apply_path_params(&effective.url, &effective.path_params);
    let mut url = resolver.substitute(&base).into_owned();

    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for param in sendable(&effective.query_params) {
        query.append_pair(&resolver.substitute(&param.key), &resolver.substitute(&param.value));
        any = true;
    }

    if any {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query.finish());
    }
    url
}

/// Builds the body for the effective body type.
#[must_use]
pub fn build_body(effective: &EffectiveRequest, resolver: &VariableResolver) -> RequestBody {
    match effective.body_type {
        BodyType::None => RequestBody::Empty,
        BodyType::FormUrlencoded => {
            let mut form = form_urlencoded::Serializer::new(String::new());
            for field in sendable_fields(&effective.form_data) {
                form.append_pair(&field.key, &resolver.substitute(&field.value));
            }
            let encoded = form.finish();
            if encoded.is_empty() {
                RequestBody::Empty
            } else {
                RequestBody::Text(encoded)
            }
        }
        BodyType::Multipart => {
            let entries: Vec<FormDataEntry> = sendable_fields(&effective.form_data)
                .map(|field| FormDataEntry {
                    key: field.key.clone(),
                    value: resolver.substitute(&field.value).into_owned(),
                    entry_type: field.entry_type,
                })
                .collect();
            if entries.is_empty() {
                RequestBody::Empty
            } else {
                RequestBody::Multipart(entries)
            }
        }
        _ if effective.body.is_empty() => RequestBody::Empty,
        _ => RequestBody::Text(resolver.substitute(&effective.body).into_owned()),
    }
}

//! Mock server definitions.
//!
//! A request can carry a canned [`MockResponse`]. When a collection's mock
//! server is started, every request with an enabled mock becomes a
//! [`MockRoute`] keyed by method and path.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::collection::Request;
use crate::id::Id;
use crate::request::HttpMethod;

/// Default port of a collection mock server.
pub const DEFAULT_MOCK_PORT: u16 = 3000;

/// Canned response served for a request while its collection is mocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponse {
    /// Status code to answer with
    #[serde(default = "default_status_code")]
    pub status_code: u16,
    /// Response headers
    #[serde(default)]
    pub headers: IndexMap<String, String>,
    /// Response body
    #[serde(default)]
    pub body: String,
    /// Whether the route is served
    #[serde(default)]
    pub enabled: bool,
}

const fn default_status_code() -> u16 {
    200
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status_code: default_status_code(),
            headers: IndexMap::new(),
            body: String::new(),
            enabled: false,
        }
    }
}

/// Mock server settings of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockConfig {
    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether the server is (meant to be) running
    #[serde(default)]
    pub enabled: bool,
}

const fn default_port() -> u16 {
    DEFAULT_MOCK_PORT
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_MOCK_PORT,
            enabled: false,
        }
    }
}

/// One route served by a running mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockRoute {
    /// Method to match
    pub method: HttpMethod,
    /// Path (optionally with a query string) to match, always starting with `/`
    pub path: String,
    /// Status code to answer with
    pub status_code: u16,
    /// Response headers
    pub headers: IndexMap<String, String>,
    /// Response body
    pub body: String,
}

impl MockRoute {
    /// Builds the route for a request, if its mock is enabled.
    #[must_use]
    pub fn from_request(request: &Request) -> Option<Self> {
        let mock = request.mock_response.as_ref().filter(|m| m.enabled)?;
        Some(Self {
            method: request.method,
            path: mock_path(&request.url),
            status_code: mock.status_code,
            headers: mock.headers.clone(),
            body: mock.body.clone(),
        })
    }

    fn normalized_path(&self) -> String {
        normalize_path(&self.path)
    }

    /// Returns true if the route carries its own query string.
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.path.contains('?')
    }
}

/// Everything needed to start one mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockServerConfig {
    /// Server identity, the collection id
    pub id: Id,
    /// Listening port
    pub port: u16,
    /// Routes in match order
    pub routes: Vec<MockRoute>,
}

impl MockServerConfig {
    /// Collects the enabled mock routes of `requests`.
    pub fn from_requests<'a>(
        id: impl Into<Id>,
        port: u16,
        requests: impl IntoIterator<Item = &'a Request>,
    ) -> Self {
        Self {
            id: id.into(),
            port,
            routes: requests.into_iter().filter_map(MockRoute::from_request).collect(),
        }
    }

    /// Finds the route answering `method` on `path_and_query`.
    ///
    /// An exact match on path and query wins. Otherwise a route whose own path
    /// has no query string matches on the path alone.
    #[must_use]
    pub fn find_route(&self, method: HttpMethod, path_and_query: &str) -> Option<&MockRoute> {
        let path = path_and_query
            .split_once('?')
            .map_or(path_and_query, |(path, _)| path);

        self.routes
            .iter()
            .find(|r| r.method == method && r.normalized_path() == path_and_query)
            .or_else(|| {
                self.routes
                    .iter()
                    .find(|r| !r.has_query() && r.method == method && r.normalized_path() == path)
            })
    }
}

/// Derives the path a mock route listens on from a request URL.
///
/// Absolute URLs contribute their path; anything that does not parse (for
/// example a URL still containing `{{base_url}}`) is used as-is with a
/// leading `/`.
#[must_use]
pub fn mock_path(url: &str) -> String {
    Url::parse(url).map_or_else(|_| normalize_path(url), |u| u.path().to_string())
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn route(method: HttpMethod, path: &str, body: &str) -> MockRoute {
        MockRoute {
            method,
            path: path.to_string(),
            status_code: 200,
            headers: IndexMap::new(),
            body: body.to_string(),
        }
    }

    fn config(routes: Vec<MockRoute>) -> MockServerConfig {
        MockServerConfig {
            id: "c1".to_string(),
            port: DEFAULT_MOCK_PORT,
            routes,
        }
    }

    #[test]
    fn test_mock_path() {
        assert_eq!(mock_path("http://localhost:8080/users/1?x=1"), "/users/1");
        assert_eq!(mock_path("users"), "/users");
        assert_eq!(mock_path("{{base}}/users"), "/{{base}}/users");
    }

    #[test]
    fn test_exact_match_wins_over_generic() {
        let cfg = config(vec![
            route(HttpMethod::Get, "/items", "generic"),
            route(HttpMethod::Get, "/items?page=2", "page two"),
        ]);
        assert_eq!(
            cfg.find_route(HttpMethod::Get, "/items?page=2").unwrap().body,
            "page two"
        );
        assert_eq!(
            cfg.find_route(HttpMethod::Get, "/items?page=3").unwrap().body,
            "generic"
        );
    }

    #[test]
    fn test_route_with_query_is_not_generic() {
        let cfg = config(vec![route(HttpMethod::Get, "items?page=2", "page two")]);
        assert!(cfg.find_route(HttpMethod::Get, "/items").is_none());
        assert!(cfg.find_route(HttpMethod::Get, "/items?page=2").is_some());
    }

    #[test]
    fn test_method_must_match() {
        let cfg = config(vec![route(HttpMethod::Post, "/items", "")]);
        assert!(cfg.find_route(HttpMethod::Get, "/items").is_none());
    }

    #[test]
    fn test_from_requests_skips_disabled_mocks() {
        let mut on = Request::new("c1", "on");
        on.url = "http://api.test/on".to_string();
        on.mock_response = Some(MockResponse {
            enabled: true,
            status_code: 201,
            ..MockResponse::default()
        });
        let mut off = Request::new("c1", "off");
        off.mock_response = Some(MockResponse::default());

        let cfg = MockServerConfig::from_requests("c1", 4000, [&on, &off]);
        assert_eq!(cfg.routes.len(), 1);
        assert_eq!(cfg.routes[0].path, "/on");
        assert_eq!(cfg.routes[0].status_code, 201);
    }
}

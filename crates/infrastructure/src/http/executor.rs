//! HTTP executor implementation using reqwest.
//!
//! Receives the exact arguments produced by the materializer and performs no
//! substitution of its own. Redirects, timeout and `User-Agent` come from
//! [`AppSettings`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use courier_application::ports::{HttpExecutor, HttpExecutorError};
use courier_domain::{AppSettings, HttpRequestArgs, RedirectPolicy, ResponseData};
use indexmap::IndexMap;
use reqwest::{Client, Method, Url, redirect};

use super::multipart::build_form;

/// `HttpExecutor` adapter wrapping a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpExecutor {
    client: Client,
}

impl ReqwestHttpExecutor {
    /// Creates an executor configured from the user settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &AppSettings) -> Result<Self, HttpExecutorError> {
        let policy = match settings.redirect_policy {
            RedirectPolicy::Follow => redirect::Policy::limited(settings.max_redirects),
            RedirectPolicy::None => redirect::Policy::none(),
        };

        let mut builder = Client::builder()
            .user_agent(settings.user_agent.clone())
            .redirect(policy);
        if settings.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        }

        let client = builder
            .build()
            .map_err(|e| HttpExecutorError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Creates an executor around an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn parse_method(name: &str) -> Result<Method, HttpExecutorError> {
        Method::from_bytes(name.trim().to_uppercase().as_bytes())
            .map_err(|_| HttpExecutorError::InvalidRequest(format!("Invalid method: {name}")))
    }

    fn map_error(error: &reqwest::Error) -> HttpExecutorError {
        if error.is_builder() {
            return HttpExecutorError::InvalidRequest(error.to_string());
        }
        if error.is_timeout() {
            return HttpExecutorError::Transport(format!("Request timed out: {error}"));
        }
        if error.is_connect() {
            return HttpExecutorError::Transport(format!("Connection failed: {error}"));
        }
        if error.is_redirect() {
            return HttpExecutorError::Transport(format!("Too many redirects: {error}"));
        }
        HttpExecutorError::Transport(error.to_string())
    }
}

#[async_trait]
impl HttpExecutor for ReqwestHttpExecutor {
    async fn execute(&self, args: HttpRequestArgs) -> Result<ResponseData, HttpExecutorError> {
        let method = Self::parse_method(&args.method)?;
        let url = Url::parse(&args.url)
            .map_err(|e| HttpExecutorError::InvalidRequest(format!("{e}: {}", args.url)))?;

        let multipart = args.form_data.is_some();
        let mut builder = self.client.request(method, url);

        for (key, value) in &args.headers {
            // The multipart boundary has to come from the form itself.
            if multipart && key.eq_ignore_ascii_case("content-type") {
                tracing::debug!(value = %value, "Dropping Content-Type for multipart body");
                continue;
            }
            builder = builder.header(key.as_str(), value.as_str());
        }

        if let Some(entries) = &args.form_data {
            builder = builder.multipart(build_form(entries).await?);
        } else if let Some(body) = args.body {
            builder = builder.body(body);
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();
        let mut headers: IndexMap<String, String> = IndexMap::new();
        for (name, value) in response.headers() {
            let Ok(value) = value.to_str() else {
                continue;
            };
            headers
                .entry(name.to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpExecutorError::Transport(format!("Failed to read body: {e}")))?;
        let elapsed = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::debug!(status, elapsed_ms = elapsed, "Response received");
        Ok(ResponseData::new(status, headers, body).with_time_taken(elapsed))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::Redirect;
    use axum::routing::{any, get};
    use pretty_assertions::assert_eq;

    async fn echo(method: axum::http::Method, headers: HeaderMap, body: String) -> (StatusCode, String) {
        let token = headers
            .get("x-token")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        (StatusCode::CREATED, format!("{method}|{token}|{content_type}|{body}"))
    }

    async fn serve() -> SocketAddr {
        let app = Router::new()
            .route("/echo", any(echo))
            .route("/old", get(|| async { Redirect::temporary("/new") }))
            .route("/new", get(|| async { "moved" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn args(method: &str, url: String) -> HttpRequestArgs {
        HttpRequestArgs {
            method: method.to_string(),
            url,
            headers: IndexMap::new(),
            body: None,
            form_data: None,
        }
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(ReqwestHttpExecutor::parse_method("patch").unwrap(), Method::PATCH);
        assert!(ReqwestHttpExecutor::parse_method("GE T").is_err());
    }

    #[tokio::test]
    async fn test_sends_headers_and_body_verbatim() {
        let addr = serve().await;
        let executor = ReqwestHttpExecutor::new(&AppSettings::default()).unwrap();
        let mut request = args("POST", format!("http://{addr}/echo"));
        request.headers.insert("X-Token".to_string(), "abc".to_string());
        request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        request.body = Some(r#"{"id":1}"#.to_string());

        let response = executor.execute(request).await.unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.body, r#"POST|abc|application/json|{"id":1}"#);
        assert!(response.header("content-length").is_some());
    }

    #[tokio::test]
    async fn test_multipart_replaces_declared_content_type() {
        let addr = serve().await;
        let executor = ReqwestHttpExecutor::new(&AppSettings::default()).unwrap();
        let mut request = args("POST", format!("http://{addr}/echo"));
        request
            .headers
            .insert("Content-Type".to_string(), "multipart/form-data".to_string());
        request.form_data = Some(vec![courier_domain::FormDataEntry {
            key: "name".to_string(),
            value: "Ada".to_string(),
            entry_type: courier_domain::FormEntryType::Text,
        }]);

        let response = executor.execute(request).await.unwrap();

        assert!(response.body.contains("multipart/form-data; boundary="));
        assert!(response.body.contains("Ada"));
    }

    #[tokio::test]
    async fn test_redirect_policy_none_returns_3xx() {
        let addr = serve().await;
        let settings = AppSettings {
            redirect_policy: RedirectPolicy::None,
            ..AppSettings::default()
        };

        let manual = ReqwestHttpExecutor::new(&settings).unwrap();
        let response = manual.execute(args("GET", format!("http://{addr}/old"))).await.unwrap();
        assert_eq!(response.status, 307);

        let following = ReqwestHttpExecutor::new(&AppSettings::default()).unwrap();
        let response = following
            .execute(args("GET", format!("http://{addr}/old")))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "moved");
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_sending() {
        let executor = ReqwestHttpExecutor::new(&AppSettings::default()).unwrap();
        let result = executor.execute(args("GET", "{{host}}/users".to_string())).await;
        assert!(matches!(result, Err(HttpExecutorError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let executor = ReqwestHttpExecutor::new(&AppSettings::default()).unwrap();
        let result = executor.execute(args("GET", format!("http://{addr}/"))).await;
        assert!(matches!(result, Err(HttpExecutorError::Transport(_))));
    }
}

//! axum implementation of the mock server port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use courier_application::ports::{MockServerControl, MockServerError};
use courier_domain::{HttpMethod, MockServerConfig};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, oneshot};

struct RunningServer {
    shutdown: oneshot::Sender<()>,
    addr: SocketAddr,
}

/// Runs mock servers on the current tokio runtime.
#[derive(Default)]
pub struct AxumMockServer {
    servers: Mutex<HashMap<String, RunningServer>>,
}

impl AxumMockServer {
    /// Creates a controller with no running servers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bound address of a running server.
    ///
    /// Useful when the server was started on port `0`.
    pub async fn local_addr(&self, id: &str) -> Option<SocketAddr> {
        self.servers.lock().await.get(id).map(|s| s.addr)
    }
}

#[async_trait]
impl MockServerControl for AxumMockServer {
    async fn start(&self, config: MockServerConfig) -> Result<(), MockServerError> {
        let mut servers = self.servers.lock().await;
        if servers.contains_key(&config.id) {
            return Err(MockServerError::AlreadyRunning(config.id));
        }

        let port = config.port;
        let bind_error = |e: std::io::Error| MockServerError::Bind {
            port,
            message: e.to_string(),
        };
        let listener = TcpListener::bind(("0.0.0.0", port)).await.map_err(bind_error)?;
        let addr = listener.local_addr().map_err(bind_error)?;

        let id = config.id.clone();
        let routes = config.routes.len();
        let app = router(config);
        let (shutdown, rx) = oneshot::channel::<()>();

        let server_id = id.clone();
        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!(id = %server_id, error = %e, "Mock server error");
            }
        });

        tracing::info!(id = %id, %addr, routes, "Mock server started");
        servers.insert(id, RunningServer { shutdown, addr });
        Ok(())
    }

    async fn stop(&self, id: &str) -> Result<(), MockServerError> {
        let server = self
            .servers
            .lock()
            .await
            .remove(id)
            .ok_or_else(|| MockServerError::NotRunning(id.to_string()))?;

        let _ = server.shutdown.send(());
        tracing::info!(id, addr = %server.addr, "Mock server stopped");
        Ok(())
    }

    async fn is_running(&self, id: &str) -> bool {
        self.servers.lock().await.contains_key(id)
    }
}

/// Builds the router answering the routes of `config`.
///
/// Every request goes through one fallback handler that looks the route up
/// by method and path; unmatched requests get `404`.
pub fn router(config: MockServerConfig) -> Router {
    let config = Arc::new(config);
    Router::new().fallback(move |method: Method, uri: Uri| {
        let config = Arc::clone(&config);
        async move { respond(&config, &method, &uri) }
    })
}

fn respond(config: &MockServerConfig, method: &Method, uri: &Uri) -> Response {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());

    let route = method
        .as_str()
        .parse::<HttpMethod>()
        .ok()
        .and_then(|m| config.find_route(m, path_and_query));

    let Some(route) = route else {
        tracing::debug!(%method, path = path_and_query, "No mock route");
        return StatusCode::NOT_FOUND.into_response();
    };
    tracing::debug!(%method, path = path_and_query, route = %route.path, "Mock route hit");

    let mut headers = HeaderMap::new();
    for (key, value) in &route.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }

    let status = StatusCode::from_u16(route.status_code).unwrap_or(StatusCode::OK);
    (status, headers, route.body.clone()).into_response()
}

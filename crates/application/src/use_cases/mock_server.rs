//! Mock server use cases.

use courier_domain::MockServerConfig;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::MockServerControl;
use crate::store::WorkspaceStore;

/// Use case for starting and stopping a collection's mock server.
pub struct MockServer<M: MockServerControl> {
    control: M,
}

impl<M: MockServerControl> MockServer<M> {
    /// Creates a new `MockServer` use case.
    #[must_use]
    pub const fn new(control: M) -> Self {
        Self { control }
    }

    /// Builds the route table of a collection.
    ///
    /// Every request with an enabled mock response becomes a route. `port`
    /// overrides the collection's configured port.
    ///
    /// # Errors
    /// Returns error if the collection doesn't exist.
    pub fn config(
        store: &WorkspaceStore,
        collection_id: &str,
        port: Option<u16>,
    ) -> ApplicationResult<MockServerConfig> {
        let snapshot = store.snapshot();
        let collection = snapshot
            .collection(collection_id)
            .ok_or_else(|| ApplicationError::NotFound(format!("collection {collection_id}")))?;
        let port = port.unwrap_or(collection.mock_config_or_default().port);
        Ok(MockServerConfig::from_requests(
            collection_id,
            port,
            snapshot.requests_in(collection_id),
        ))
    }

    /// Starts the mock server of a collection.
    ///
    /// # Errors
    /// Returns error if the collection doesn't exist or the server cannot start.
    pub async fn start(
        &self,
        store: &mut WorkspaceStore,
        collection_id: &str,
        port: Option<u16>,
    ) -> ApplicationResult<MockServerConfig> {
        let config = Self::config(store, collection_id, port)?;
        self.control
            .start(config.clone())
            .await
            .map_err(|e| ApplicationError::Mock(e.to_string()))?;

        store.console_mut().info(
            format!(
                "Mock server started on port {} with {} routes",
                config.port,
                config.routes.len()
            ),
            "Mock",
        );
        Ok(config)
    }

    /// Stops the mock server of a collection.
    ///
    /// # Errors
    /// Returns error if no server is running for the collection.
    pub async fn stop(&self, store: &mut WorkspaceStore, collection_id: &str) -> ApplicationResult<()> {
        self.control
            .stop(collection_id)
            .await
            .map_err(|e| ApplicationError::Mock(e.to_string()))?;
        store.console_mut().info("Mock server stopped", "Mock");
        Ok(())
    }

    /// Returns true if the collection's server is running.
    pub async fn is_running(&self, collection_id: &str) -> bool {
        self.control.is_running(collection_id).await
    }
}

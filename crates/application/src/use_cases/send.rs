//! Send request use case.
//!
//! `Idle -> Sending -> Success | Failure`. Pre-scripts run before the request
//! is materialized so their environment writes take effect; post-scripts run
//! after the response is recorded.

use std::time::Instant;

use courier_domain::{ExecutionState, ResponseData, ScriptItem};
use indexmap::IndexMap;

use crate::error::ApplicationResult;
use crate::materialize::{MaterializedRequest, Materializer, select_pre_scripts, should_run};
use crate::merge::{EffectiveRequest, effective_item};
use crate::ports::{HttpExecutor, ScriptContext, ScriptHost, ScriptOutcome, ScriptPhase};
use crate::store::WorkspaceStore;

const SCRIPT_SOURCE: &str = "Script";
const REQUEST_SOURCE: &str = "Request";

/// What happened to a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// A send for the same item was already in flight.
    Ignored,
    /// A pre-script failed; nothing was sent.
    Aborted {
        /// The failing script.
        script: String,
        /// The error it reported.
        message: String,
    },
    /// The request went out. `response` is a status-0 stand-in if the
    /// executor failed.
    Completed {
        /// What was sent.
        request: Box<MaterializedRequest>,
        /// What came back.
        response: ResponseData,
    },
}

/// Use case for sending a request or execution.
pub struct SendRequest<H: HttpExecutor, S: ScriptHost> {
    executor: H,
    scripts: S,
}

impl<H: HttpExecutor, S: ScriptHost> SendRequest<H, S> {
    /// Creates a new `SendRequest` use case.
    #[must_use]
    pub const fn new(executor: H, scripts: S) -> Self {
        Self { executor, scripts }
    }

    /// Sends the request or execution `item_id` through the store's active
    /// environment.
    ///
    /// # Errors
    /// Returns an error if the item does not exist or its request is gone.
    /// Script and network failures are recorded in the item state instead.
    pub async fn execute(&self, store: &mut WorkspaceStore, item_id: &str) -> ApplicationResult<SendOutcome> {
        if store.state(item_id).is_sending() {
            tracing::debug!(item_id, "send already in flight, ignoring");
            return Ok(SendOutcome::Ignored);
        }

        let effective = effective_item(store.snapshot(), item_id)?;
        store.set_state(item_id, ExecutionState::sending());
        tracing::info!(item_id, name = %effective.name, "sending request");

        for script in select_pre_scripts(&effective.pre_scripts) {
            let context = script_context(store, &effective, ScriptPhase::PreRequest, None, None);
            store
                .console_mut()
                .info(format!("Executing Pre-Script: {}", script.name), SCRIPT_SOURCE);

            match self.scripts.run(script, &context).await {
                Ok(outcome) => apply_outcome(store, script, outcome),
                Err(err) => {
                    let message = format!("Pre-Script failed: {err}");
                    tracing::warn!(item_id, script = %script.name, %err, "pre-request script failed");
                    store.console_mut().error(
                        format!("Pre-Script \"{}\" failed: {err}", script.name),
                        SCRIPT_SOURCE,
                    );
                    store.set_state(item_id, ExecutionState::failure(message));
                    return Ok(SendOutcome::Aborted {
                        script: script.name.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        let request = Materializer::new(store.snapshot(), None).materialize(&effective);
        let started = Instant::now();
        let result = self.executor.execute(request.to_http_args()).await;
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = match result {
            Ok(response) => {
                let response = if response.time_taken_ms == 0 {
                    response.with_time_taken(elapsed)
                } else {
                    response
                };
                tracing::info!(
                    item_id,
                    status = response.status,
                    time_ms = response.time_taken_ms,
                    "response received"
                );
                store.set_state(item_id, ExecutionState::success(response.clone()));
                response
            }
            Err(err) => {
                tracing::warn!(item_id, %err, "request failed");
                store
                    .console_mut()
                    .error(format!("{} {} failed: {err}", request.method, request.url), REQUEST_SOURCE);
                let state = ExecutionState::failure(err.to_string());
                let response = state.response().cloned().unwrap_or_else(|| ResponseData::failure(&err));
                store.set_state(item_id, state);
                return Ok(SendOutcome::Completed {
                    request: Box::new(request),
                    response,
                });
            }
        };

        for script in effective.post_scripts.iter().filter(|s| s.enabled) {
            if !should_run(script.execute_on_status_codes.as_deref(), response.status) {
                tracing::debug!(
                    script = %script.name,
                    status = response.status,
                    "skipping post-response script"
                );
                continue;
            }

            let context = script_context(
                store,
                &effective,
                ScriptPhase::PostResponse,
                Some(&request),
                Some(&response),
            );
            match self.scripts.run(script, &context).await {
                Ok(outcome) => apply_outcome(store, script, outcome),
                Err(err) => {
                    tracing::warn!(item_id, script = %script.name, %err, "post-response script failed");
                    store.console_mut().error(
                        format!("Post-Script \"{}\" failed: {err}", script.name),
                        REQUEST_SOURCE,
                    );
                }
            }
        }

        Ok(SendOutcome::Completed {
            request: Box::new(request),
            response,
        })
    }
}

fn script_context(
    store: &WorkspaceStore,
    effective: &EffectiveRequest,
    phase: ScriptPhase,
    request: Option<&MaterializedRequest>,
    response: Option<&ResponseData>,
) -> ScriptContext {
    let resolver = Materializer::new(store.snapshot(), None).resolver(effective);
    let context = resolver.context();
    let variables: IndexMap<String, String> = context
        .all_variable_names()
        .into_iter()
        .filter_map(|name| context.resolve_value(&name).map(|value| (name, value)))
        .collect();

    ScriptContext {
        phase,
        environment: store
            .snapshot()
            .active_environment()
            .map_or_else(|| courier_domain::GLOBAL_ENVIRONMENT.to_string(), |e| e.name.clone()),
        variables,
        request: request.map(MaterializedRequest::to_http_args),
        response: response.cloned(),
    }
}

fn apply_outcome(store: &mut WorkspaceStore, script: &ScriptItem, outcome: ScriptOutcome) {
    for line in outcome.logs {
        store.console_mut().info(line, SCRIPT_SOURCE);
    }
    if !outcome.environment_writes.is_empty() {
        let target = store.apply_environment_writes(&outcome.environment_writes);
        tracing::debug!(
            script = %script.name,
            environment = %target,
            writes = outcome.environment_writes.len(),
            "applied script environment writes"
        );
    }
}

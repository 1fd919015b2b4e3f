//! Command implementations.
//!
//! Each command loads one collection file into a fresh workspace, runs a use
//! case and returns what should be printed.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use courier_application::merge::effective_item;
use courier_application::{
    LoadCollection, Materializer, MockServer, SaveCollection, SendOutcome, SendRequest,
    WorkspaceStore,
};
use courier_domain::{AppSettings, Collection, GLOBAL_ENVIRONMENT, LogEntry, LogLevel, ResponseData, Snapshot};
use courier_infrastructure::{AxumMockServer, JsonCollectionStore, ReqwestHttpExecutor, parse_curl};

use crate::adapters::{ArgumentDialog, SkippingScriptHost};
use crate::cli::RenderFormat;

/// What a send produced.
#[derive(Debug, Clone)]
pub struct SendReport {
    /// The response, status `0` if nothing came back
    pub response: ResponseData,
    /// Console lines written during the send
    pub console: Vec<LogEntry>,
}

impl SendReport {
    /// Formats the response as status line, headers, blank line and body.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = if self.response.is_failure() {
            format!("No response ({} ms)\n", self.response.time_taken_ms)
        } else {
            format!("HTTP {} ({} ms)\n", self.response.status, self.response.time_taken_ms)
        };
        for (key, value) in &self.response.headers {
            let _ = writeln!(out, "{key}: {value}");
        }
        out.push('\n');
        out.push_str(&self.response.body);
        out
    }
}

/// Loads `path` into a new workspace and activates an environment.
///
/// `environment` must exist when given; otherwise the settings' default is
/// used if present, and `Global` if not.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the environment is unknown.
pub async fn open(
    path: &Path,
    environment: Option<&str>,
    settings: &AppSettings,
) -> Result<(WorkspaceStore, String)> {
    let mut store = WorkspaceStore::new();
    let collection_id = LoadCollection::new(JsonCollectionStore::new(), ArgumentDialog::default())
        .execute(&mut store, Some(path.to_path_buf()))
        .await
        .with_context(|| format!("Failed to load {}", path.display()))?
        .with_context(|| format!("Nothing loaded from {}", path.display()))?;

    match environment {
        Some(name) => store
            .set_active_environment(name)
            .with_context(|| format!("Unknown environment {name}"))?,
        None => {
            let name = settings.default_environment.as_str();
            if store.set_active_environment(name).is_err() {
                tracing::warn!(environment = name, "default environment missing, using Global");
                store.set_active_environment(GLOBAL_ENVIRONMENT)?;
            }
        }
    }

    Ok((store, collection_id))
}

/// Finds a request or execution of a collection by id, then by name.
///
/// Request names are searched before execution names.
#[must_use]
pub fn find_item(snapshot: &Snapshot, collection_id: &str, key: &str) -> Option<String> {
    let requests = || snapshot.requests_in(collection_id);
    let executions = || {
        snapshot
            .executions
            .iter()
            .filter(move |e| e.collection_id == collection_id)
    };

    requests()
        .find(|r| r.id == key)
        .map(|r| r.id.clone())
        .or_else(|| executions().find(|e| e.id == key).map(|e| e.id.clone()))
        .or_else(|| requests().find(|r| r.name == key).map(|r| r.id.clone()))
        .or_else(|| executions().find(|e| e.name == key).map(|e| e.id.clone()))
}

fn resolve_item(store: &WorkspaceStore, collection_id: &str, key: &str) -> Result<String> {
    find_item(store.snapshot(), collection_id, key)
        .with_context(|| format!("No request or execution named {key}"))
}

/// Renders the final request without sending it.
///
/// # Errors
///
/// Returns an error if the file, environment or item cannot be found.
pub async fn render(
    file: &Path,
    item: &str,
    environment: Option<&str>,
    format: RenderFormat,
    settings: &AppSettings,
) -> Result<String> {
    let (store, collection_id) = open(file, environment, settings).await?;
    let item_id = resolve_item(&store, &collection_id, item)?;

    let effective = effective_item(store.snapshot(), &item_id)?;
    let request = Materializer::new(store.snapshot(), None).materialize(&effective);

    Ok(match format {
        RenderFormat::Http => request.raw_http,
        RenderFormat::Curl => request.curl,
    })
}

/// Sends a request or execution.
///
/// With `save`, the collection is written back so environment changes made
/// by scripts persist.
///
/// # Errors
///
/// Returns an error if the item cannot be found, a pre-request script
/// aborts the send, or the file cannot be saved.
pub async fn send(
    file: &Path,
    item: &str,
    environment: Option<&str>,
    save: bool,
    settings: &AppSettings,
) -> Result<SendReport> {
    let (mut store, collection_id) = open(file, environment, settings).await?;
    let item_id = resolve_item(&store, &collection_id, item)?;

    let executor = ReqwestHttpExecutor::new(settings)?;
    let outcome = SendRequest::new(executor, SkippingScriptHost)
        .execute(&mut store, &item_id)
        .await?;

    let response = match outcome {
        SendOutcome::Completed { response, .. } => response,
        SendOutcome::Aborted { script, message } => {
            bail!("Pre-request script \"{script}\" failed: {message}")
        }
        SendOutcome::Ignored => bail!("A send for {item} is already in flight"),
    };

    if save {
        SaveCollection::new(JsonCollectionStore::new(), ArgumentDialog::new(Some(file.to_path_buf())))
            .execute(&mut store, &collection_id, false)
            .await?;
    }

    Ok(SendReport {
        response,
        console: store.console().entries().cloned().collect(),
    })
}

/// Adds a request parsed from `command` to the collection in `file`.
///
/// A missing file starts a new collection named after the file. Returns the
/// new request id.
///
/// # Errors
///
/// Returns an error if the command cannot be parsed, the folder is unknown,
/// or the file cannot be read or written.
pub async fn import_curl(
    file: &Path,
    command: &str,
    folder: Option<&str>,
    settings: &AppSettings,
) -> Result<String> {
    let parsed = parse_curl(command)?;

    let (mut store, collection_id) = if file.exists() {
        open(file, None, settings).await?
    } else {
        let name = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Imported");
        let mut store = WorkspaceStore::new();
        let collection = Collection::new(name);
        let id = collection.id.clone();
        store.add_collection(collection);
        (store, id)
    };

    let mut request = parsed.into_request(&collection_id);
    if let Some(folder) = folder {
        request = request.with_parent(folder);
    }
    let request_id = request.id.clone();
    tracing::info!(name = %request.name, method = %request.method, "importing curl command");
    store.add_request(request)?;

    SaveCollection::new(JsonCollectionStore::new(), ArgumentDialog::new(Some(file.to_path_buf())))
        .execute(&mut store, &collection_id, false)
        .await?
        .context("Collection was not saved")?;

    Ok(request_id)
}

/// Serves the collection's mock routes until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the port cannot be bound.
pub async fn mock(file: &Path, port: Option<u16>, settings: &AppSettings) -> Result<()> {
    let (mut store, collection_id) = open(file, None, settings).await?;
    let port = port.or_else(|| {
        store
            .snapshot()
            .collection(&collection_id)
            .and_then(|c| c.mock_config)
            .map(|m| m.port)
    });
    let port = port.unwrap_or(settings.default_mock_port);

    let mocks = MockServer::new(AxumMockServer::new());
    let config = mocks.start(&mut store, &collection_id, Some(port)).await?;
    for route in &config.routes {
        tracing::info!(method = %route.method, path = %route.path, status = route.status_code, "mock route");
    }
    if config.routes.is_empty() {
        tracing::warn!("collection has no enabled mock responses, every request will get 404");
    }

    tokio::signal::ctrl_c().await?;
    mocks.stop(&mut store, &collection_id).await?;
    Ok(())
}

/// Formats a console entry as one line.
#[must_use]
pub fn console_line(entry: &LogEntry) -> String {
    let level = match entry.level {
        LogLevel::Info => "INFO",
        LogLevel::Warn => "WARN",
        LogLevel::Error => "ERROR",
    };
    format!("[{level}] {}: {}", entry.source, entry.message)
}

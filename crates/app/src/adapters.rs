//! Port implementations that only make sense for a command line session.

use std::path::PathBuf;

use async_trait::async_trait;
use courier_application::ports::{FileDialog, ScriptContext, ScriptError, ScriptHost, ScriptOutcome};
use courier_domain::ScriptItem;

/// A "dialog" answering with the path given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ArgumentDialog {
    path: Option<PathBuf>,
}

impl ArgumentDialog {
    /// Answers every prompt with `path`, or cancels when `None`.
    #[must_use]
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FileDialog for ArgumentDialog {
    async fn save_file(&self, _suggested: &str) -> Option<PathBuf> {
        self.path.clone()
    }

    async fn open_file(&self) -> Option<PathBuf> {
        self.path.clone()
    }
}

/// Script host for sessions without a script runtime.
///
/// Scripts are reported and skipped; they never fail a send.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkippingScriptHost;

#[async_trait]
impl ScriptHost for SkippingScriptHost {
    async fn run(&self, script: &ScriptItem, context: &ScriptContext) -> Result<ScriptOutcome, ScriptError> {
        tracing::warn!(script = %script.name, phase = ?context.phase, "script not evaluated");
        Ok(ScriptOutcome {
            logs: vec![format!("Script \"{}\" skipped: no script runtime", script.name)],
            ..ScriptOutcome::default()
        })
    }
}

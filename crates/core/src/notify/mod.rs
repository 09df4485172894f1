//! Failure notification channels.
//!
//! When any step of a run fails, the engine invokes the workflow's
//! failure handler exactly once. The delivery channel is a configuration
//! point: the default `log` channel emits a structured log line, and the
//! `command` channel hands the failure to an operator-supplied shell
//! command. No network transport is built in.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tk_protocol::run_models::Run;
use tk_protocol::workflow_models::{FailureConfig, NotifyChannel};
use tokio::process::Command;
use tracing::{error, warn};
use uuid::Uuid;

/// Receives exactly one notification when a run fails.
///
/// Notification is best effort: a notifier must not fail the run further,
/// so `notify` returns nothing and implementations swallow their own
/// errors (logging them).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, run: &Run, error: &str);
}

/// The placeholder channel: one structured log line per failed run.
#[derive(Default)]
pub struct LogNotifier {
    message: Option<String>,
}

impl LogNotifier {
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, run: &Run, err: &str) {
        error!(
            run_id = %run.id,
            workflow = %run.workflow_name,
            message = self.message.as_deref().unwrap_or(""),
            "run failed: {err}"
        );
    }
}

/// Runs an operator-supplied shell command with failure details in the
/// environment (`TK_RUN_ID`, `TK_WORKFLOW`, `TK_ERROR`, `TK_EVENT`).
pub struct CommandNotifier {
    command: String,
    message: Option<String>,
}

impl CommandNotifier {
    pub fn new(command: impl Into<String>, message: Option<String>) -> Self {
        Self {
            command: command.into(),
            message,
        }
    }
}

#[async_trait]
impl Notifier for CommandNotifier {
    async fn notify(&self, run: &Run, err: &str) {
        let event_json = serde_json::to_string(&run.event).unwrap_or_default();

        let status = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env("TK_RUN_ID", run.id.to_string())
            .env("TK_WORKFLOW", &run.workflow_name)
            .env("TK_ERROR", err)
            .env("TK_EVENT", event_json)
            .env("TK_MESSAGE", self.message.as_deref().unwrap_or(""))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                warn!(
                    run_id = %run.id,
                    code = status.code().unwrap_or(-1),
                    "failure notification command exited non-zero"
                );
            }
            Err(e) => {
                warn!(run_id = %run.id, "failed to spawn notification command: {e}");
            }
        }
    }
}

/// Records notifications for assertions in tests.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    calls: Arc<Mutex<Vec<(Uuid, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(run_id, error)` pairs received so far.
    pub fn calls(&self) -> Vec<(Uuid, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, run: &Run, err: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((run.id, err.to_string()));
        }
    }
}

/// Build the notifier a workflow's failure configuration asks for.
///
/// A missing configuration means the default log channel. A `command`
/// channel without a command is rejected at config load time; if one
/// slips through, the log channel is used.
pub fn for_config(config: Option<&FailureConfig>) -> Arc<dyn Notifier> {
    match config {
        None => Arc::new(LogNotifier::default()),
        Some(cfg) => match (cfg.notify, cfg.command.as_ref()) {
            (NotifyChannel::Command, Some(command)) => {
                Arc::new(CommandNotifier::new(command.clone(), cfg.message.clone()))
            }
            _ => Arc::new(LogNotifier::new(cfg.message.clone())),
        },
    }
}

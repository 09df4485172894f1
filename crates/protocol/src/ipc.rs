//! Engine progress events.
//!
//! This module defines the message types the core emits while executing a
//! run. Communication is asynchronous and channel-based: the engine pushes
//! `Event` values into an mpsc channel and the front end (the CLI) renders
//! them as text or JSON lines.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::run_models::RunStatus;

/// Events emitted by the engine while a run executes.
///
/// Uses tagged enum serialization so `--json` output is self-describing:
/// ```json
/// {
///   "type": "stepStarted",
///   "payload": {
///     "run_id": "uuid-here",
///     "step_index": 1,
///     "step_name": "Install dependencies"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A new run has been created for a matching event.
    RunStarted { run_id: Uuid, workflow_name: String },

    /// A run's status has changed.
    RunStatusUpdate {
        run_id: Uuid,
        status: RunStatus,
        step_index: usize,
    },

    /// A step has begun executing.
    StepStarted {
        run_id: Uuid,
        step_index: usize,
        step_name: String,
    },

    /// A step finished successfully.
    StepCompleted {
        run_id: Uuid,
        step_index: usize,
        step_name: String,
    },

    /// A run has produced new log output.
    RunLogChunk { run_id: Uuid, content: String },

    /// A run completed with every step successful.
    RunCompleted { run_id: Uuid },

    /// A run failed; remaining steps were skipped.
    RunError { run_id: Uuid, error: String },
}

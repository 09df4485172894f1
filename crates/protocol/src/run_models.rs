//! Runtime run state models.
//!
//! This module defines the structures for tracking the state of a single
//! triggered workflow execution.

use crate::event_models::TriggerEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a workflow run.
///
/// The status progresses through these states during normal execution:
/// Pending -> Running -> Success
///
/// If any step fails the run terminates as Failed. There are no partial
/// or paused states: a run is strictly linear.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Run has been created but not started yet.
    Pending,

    /// Run is actively executing steps.
    Running,

    /// All steps completed successfully.
    Success,

    /// A step failed; remaining steps were skipped.
    Failed,
}

impl RunStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Success | RunStatus::Failed)
    }
}

/// Runtime state of a single workflow execution.
///
/// Each qualifying trigger event creates a new Run instance with a unique
/// ID. Runs are stateless between invocations: nothing persists beyond the
/// process, and re-firing the same event creates an independent run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Run {
    /// Unique identifier for this run.
    pub id: Uuid,

    /// Name of the workflow being executed.
    pub workflow_name: String,

    /// The event that triggered this run.
    pub event: TriggerEvent,

    /// Current execution status.
    pub status: RunStatus,

    /// Zero-based index of the step currently executing (or the next one).
    pub current_step: usize,

    /// Accumulated log lines from this run.
    pub logs: Vec<String>,

    /// When the run entered the Running state.
    pub started_at: Option<DateTime<Utc>>,

    /// When the run reached a terminal state.
    pub finished_at: Option<DateTime<Utc>>,
}

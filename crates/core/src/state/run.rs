//! Run state machine implementation.
//!
//! Functions for managing the lifecycle of a Run: state transitions,
//! timestamps, and event emission. A run moves Pending -> Running and
//! ends in exactly one of Success or Failed.

use chrono::Utc;
use tk_protocol::event_models::TriggerEvent;
use tk_protocol::ipc::Event;
use tk_protocol::run_models::{Run, RunStatus};
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// Create a new Run with Pending status.
///
/// The run records the workflow it executes and the event that
/// triggered it.
pub fn create_run(workflow_name: String, event: TriggerEvent) -> Run {
    Run {
        id: Uuid::new_v4(),
        workflow_name,
        event,
        status: RunStatus::Pending,
        current_step: 0,
        logs: Vec::new(),
        started_at: None,
        finished_at: None,
    }
}

/// Transition the run to Running, stamp the start time, and emit an
/// event.
pub async fn start_run(run: &mut Run, events_tx: &Sender<Event>) {
    run.status = RunStatus::Running;
    run.started_at = Some(Utc::now());
    let _ = events_tx
        .send(Event::RunStatusUpdate {
            run_id: run.id,
            status: run.status,
            step_index: run.current_step,
        })
        .await;
}

/// Mark the run as succeeded and emit events.
pub async fn complete_run(run: &mut Run, events_tx: &Sender<Event>) {
    run.status = RunStatus::Success;
    run.finished_at = Some(Utc::now());
    let _ = events_tx
        .send(Event::RunStatusUpdate {
            run_id: run.id,
            status: run.status,
            step_index: run.current_step,
        })
        .await;
    let _ = events_tx.send(Event::RunCompleted { run_id: run.id }).await;
}

/// Mark the run as failed and emit the error event.
pub async fn fail_run(run: &mut Run, events_tx: &Sender<Event>, error: String) {
    run.status = RunStatus::Failed;
    run.finished_at = Some(Utc::now());
    let _ = events_tx
        .send(Event::RunStatusUpdate {
            run_id: run.id,
            status: run.status,
            step_index: run.current_step,
        })
        .await;
    let _ = events_tx
        .send(Event::RunError {
            run_id: run.id,
            error,
        })
        .await;
}

/// Append a log line to the run and emit a log chunk event.
pub async fn log_to_run(run: &mut Run, events_tx: &Sender<Event>, message: String) {
    run.logs.push(message.clone());
    let _ = events_tx
        .send(Event::RunLogChunk {
            run_id: run.id,
            content: message,
        })
        .await;
}

/// Move to the next step in the workflow.
pub fn advance_step(run: &mut Run) {
    run.current_step += 1;
}

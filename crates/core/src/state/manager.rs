//! Run manager for coordinating workflow runs.
//!
//! The RunManager is the central registry of runs. It gates submission
//! on trigger matching, spawns the engine in a background task, and
//! keeps a queryable snapshot of every run's state.

use crate::engine::WorkflowEngine;
use crate::state::run::create_run;
use crate::trigger;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tk_protocol::event_models::TriggerEvent;
use tk_protocol::ipc::Event;
use tk_protocol::run_models::Run;
use tk_protocol::workflow_models::Workflow;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error};
use uuid::Uuid;

/// Manages all workflow runs.
pub struct RunManager {
    /// Registry of runs, indexed by their UUID.
    ///
    /// Uses Arc<Mutex<Run>> for thread-safe access across async tasks.
    runs: Arc<Mutex<HashMap<Uuid, Arc<Mutex<Run>>>>>,

    /// The engine that executes workflow steps.
    engine: Arc<WorkflowEngine>,

    /// Channel for sending run events to the frontend.
    events_tx: mpsc::Sender<Event>,
}

impl RunManager {
    /// Create a new RunManager around the given engine.
    pub fn new(engine: WorkflowEngine, events_tx: mpsc::Sender<Event>) -> Self {
        Self {
            runs: Arc::new(Mutex::new(HashMap::new())),
            engine: Arc::new(engine),
            events_tx,
        }
    }

    /// Submit an event against a workflow.
    ///
    /// If the workflow's trigger configuration does not match the event,
    /// no run is created and `None` is returned. Otherwise a Pending run
    /// is registered, execution is spawned in the background, and the
    /// run's id is returned with the task handle.
    pub async fn submit(
        &self,
        workflow: &Workflow,
        event: &TriggerEvent,
        project_dir: &Path,
    ) -> Option<(Uuid, JoinHandle<()>)> {
        if !trigger::matches(&workflow.on, event) {
            debug!(
                workflow = %workflow.name,
                event = %event.kind,
                branch = %event.branch,
                "trigger did not match, skipping"
            );
            return None;
        }

        let run = create_run(workflow.name.clone(), event.clone());
        let run_id = run.id;

        let run_slot = Arc::new(Mutex::new(run.clone()));
        {
            let mut runs = self.runs.lock().await;
            runs.insert(run_id, Arc::clone(&run_slot));
        }

        let engine = Arc::clone(&self.engine);
        let events_tx = self.events_tx.clone();
        let workflow = workflow.clone();
        let project_dir = project_dir.to_path_buf();

        let handle = tokio::spawn(async move {
            match engine.run(&workflow, &project_dir, run, events_tx).await {
                Ok(final_run) => {
                    *run_slot.lock().await = final_run;
                }
                Err(e) => {
                    error!(run_id = %run_id, "run execution fault: {e}");
                }
            }
        });

        Some((run_id, handle))
    }

    /// Get a snapshot of a run's current state.
    pub async fn get_run(&self, run_id: Uuid) -> Option<Run> {
        let runs = self.runs.lock().await;
        if let Some(run_arc) = runs.get(&run_id) {
            let run = run_arc.lock().await;
            Some(run.clone())
        } else {
            None
        }
    }

    /// Get snapshots of all registered runs.
    pub async fn all_runs(&self) -> Vec<Run> {
        let runs = self.runs.lock().await;
        let mut result = Vec::new();

        for run_arc in runs.values() {
            let run = run_arc.lock().await;
            result.push(run.clone());
        }

        result
    }

    /// Number of registered runs.
    pub async fn run_count(&self) -> usize {
        let runs = self.runs.lock().await;
        runs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::{MockStep, StepManager};
    use tk_protocol::run_models::RunStatus;
    use tk_protocol::workflow_models::{BranchFilter, Step, StepAction, TriggerConfig};

    fn test_workflow(name: &str) -> Workflow {
        Workflow {
            name: name.to_string(),
            on: TriggerConfig {
                push: Some(BranchFilter {
                    branches: vec!["main".to_string()],
                }),
                pull_request: None,
            },
            runtime: None,
            steps: vec![Step {
                name: "Build".to_string(),
                action: StepAction::Run {
                    run: "true".to_string(),
                },
            }],
            on_failure: None,
            secrets: HashMap::new(),
        }
    }

    fn test_manager() -> (RunManager, mpsc::Receiver<Event>) {
        let steps = StepManager::new().with_runner("Build", Arc::new(MockStep::success()));
        let engine = WorkflowEngine::new(steps);
        let (tx, rx) = mpsc::channel(100);
        (RunManager::new(engine, tx), rx)
    }

    #[tokio::test]
    async fn test_submit_non_matching_event_creates_no_run() {
        let (manager, _rx) = test_manager();
        let workflow = test_workflow("build");
        let dir = tempfile::tempdir().unwrap();

        let result = manager
            .submit(&workflow, &TriggerEvent::push("develop"), dir.path())
            .await;

        assert!(result.is_none());
        assert_eq!(manager.run_count().await, 0);
    }

    #[tokio::test]
    async fn test_submit_matching_event_runs_to_success() {
        let (manager, _rx) = test_manager();
        let workflow = test_workflow("build");
        let dir = tempfile::tempdir().unwrap();

        let (run_id, handle) = manager
            .submit(&workflow, &TriggerEvent::push("main"), dir.path())
            .await
            .expect("push to main should match");

        handle.await.unwrap();

        let run = manager.get_run(run_id).await.expect("run should exist");
        assert_eq!(run.status, RunStatus::Success);
        assert_eq!(run.workflow_name, "build");
    }

    #[tokio::test]
    async fn test_get_run_unknown_id() {
        let (manager, _rx) = test_manager();
        assert!(manager.get_run(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_all_runs_snapshots() {
        let (manager, _rx) = test_manager();
        let workflow = test_workflow("build");
        let dir = tempfile::tempdir().unwrap();

        let (_, h1) = manager
            .submit(&workflow, &TriggerEvent::push("main"), dir.path())
            .await
            .unwrap();
        let (_, h2) = manager
            .submit(&workflow, &TriggerEvent::push("main"), dir.path())
            .await
            .unwrap();
        h1.await.unwrap();
        h2.await.unwrap();

        let runs = manager.all_runs().await;
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.status == RunStatus::Success));
    }
}

//! Workflow execution engine.
//!
//! The WorkflowEngine executes a workflow's steps sequentially inside a
//! clean per-run working directory, streaming step output into the run
//! log. The first step failure aborts the remaining steps, invokes the
//! failure handler exactly once, and ends the run as Failed.

use crate::notify::{self, Notifier};
use crate::runtime;
use crate::state::run::{advance_step, complete_run, fail_run, log_to_run, start_run};
use crate::steps::{StepContext, StepManager, StepOutput};
use anyhow::{bail, Context};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tk_protocol::ipc::Event;
use tk_protocol::run_models::Run;
use tk_protocol::workflow_models::Workflow;
use tokio::sync::mpsc::Sender;
use tokio_stream::StreamExt;
use tracing::{info, warn};

/// Executes workflows step by step.
pub struct WorkflowEngine {
    steps: StepManager,
    notifier_override: Option<Arc<dyn Notifier>>,
}

impl WorkflowEngine {
    /// Create a new engine with the given step manager.
    pub fn new(steps: StepManager) -> Self {
        Self {
            steps,
            notifier_override: None,
        }
    }

    /// Replace the workflow-configured notifier.
    ///
    /// Used by tests to observe failure notifications.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier_override = Some(notifier);
        self
    }

    /// Execute a workflow and return the final Run state.
    ///
    /// Step failure is a normal outcome: the returned run carries Failed
    /// status and `Ok` is still returned. `Err` is reserved for
    /// infrastructure faults (no steps, no scratch directory) where the
    /// run could not be attempted at all.
    pub async fn run(
        &self,
        workflow: &Workflow,
        project_dir: &Path,
        mut run: Run,
        events_tx: Sender<Event>,
    ) -> anyhow::Result<Run> {
        if workflow.steps.is_empty() {
            bail!("workflow '{}' has no steps", workflow.name);
        }

        let _ = events_tx
            .send(Event::RunStarted {
                run_id: run.id,
                workflow_name: workflow.name.clone(),
            })
            .await;

        start_run(&mut run, &events_tx).await;
        info!(run_id = %run.id, workflow = %workflow.name, "run started");

        // Every run gets a fresh scratch directory, dropped when the run
        // ends. Steps never write into the project itself.
        let scratch = TempDir::new().context("failed to create run working directory")?;

        let interpreter = match &workflow.runtime {
            Some(rt) => match runtime::resolve_interpreter(&rt.python) {
                Ok(path) => Some(path),
                Err(e) => {
                    // Resolution failure surfaces when the setup-runtime
                    // step executes, so it fails the run like any step.
                    warn!(run_id = %run.id, "interpreter resolution: {e}");
                    None
                }
            },
            None => None,
        };

        let ctx = StepContext::new(project_dir, scratch.path()).with_interpreter(interpreter);

        let notifier = self
            .notifier_override
            .clone()
            .unwrap_or_else(|| notify::for_config(workflow.on_failure.as_ref()));

        for (step_index, step) in workflow.steps.iter().enumerate() {
            if step_index > 0 {
                advance_step(&mut run);
            }

            let _ = events_tx
                .send(Event::StepStarted {
                    run_id: run.id,
                    step_index: run.current_step,
                    step_name: step.name.clone(),
                })
                .await;

            let runner = self.steps.resolve(step, workflow);

            if !runner.check_availability().await {
                let msg = format!("step '{}' failed: runner not available", step.name);
                return Ok(self.finish_failed(run, msg, &events_tx, &notifier).await);
            }

            let mut stream = match runner.execute(&ctx).await {
                Ok(stream) => stream,
                Err(e) => {
                    let msg = format!("step '{}' failed: {e}", step.name);
                    return Ok(self.finish_failed(run, msg, &events_tx, &notifier).await);
                }
            };

            let mut failed: Option<String> = None;
            while let Some(output) = stream.next().await {
                match output {
                    Ok(StepOutput::Line(line)) => {
                        log_to_run(&mut run, &events_tx, format!("[{}] {line}", step.name)).await;
                    }
                    Ok(StepOutput::Completed) => break,
                    Err(e) => {
                        failed = Some(format!("step '{}' failed: {e}", step.name));
                        break;
                    }
                }
            }

            if let Some(msg) = failed {
                return Ok(self.finish_failed(run, msg, &events_tx, &notifier).await);
            }

            let _ = events_tx
                .send(Event::StepCompleted {
                    run_id: run.id,
                    step_index: run.current_step,
                    step_name: step.name.clone(),
                })
                .await;
        }

        complete_run(&mut run, &events_tx).await;
        info!(run_id = %run.id, workflow = %workflow.name, "run succeeded");

        Ok(run)
    }

    /// Fail the run and deliver the single failure notification.
    async fn finish_failed(
        &self,
        mut run: Run,
        error: String,
        events_tx: &Sender<Event>,
        notifier: &Arc<dyn Notifier>,
    ) -> Run {
        fail_run(&mut run, events_tx, error.clone()).await;
        notifier.notify(&run, &error).await;
        info!(run_id = %run.id, "run failed: {error}");
        run
    }
}

//! Step manager for resolving workflow steps to runners.
//!
//! The `StepManager` maps a step definition to the runner that executes
//! it: built-in actions get their dedicated runners, `run:` commands get
//! a shell runner. Tests can register overrides by step name to replace
//! any runner with a mock.

use crate::steps::base::StepRunner;
use crate::steps::builtin::{CheckoutStep, SetupRuntimeStep};
use crate::steps::shell::ShellStep;
use std::collections::HashMap;
use std::sync::Arc;
use tk_protocol::workflow_models::{BuiltinAction, Step, StepAction, Workflow};

/// Resolves step definitions to step runners.
#[derive(Default)]
pub struct StepManager {
    overrides: HashMap<String, Arc<dyn StepRunner>>,
}

impl StepManager {
    /// Create a manager with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a runner override for a step name.
    ///
    /// Used by tests to substitute mocks for real subprocess execution.
    pub fn with_runner(mut self, step_name: impl Into<String>, runner: Arc<dyn StepRunner>) -> Self {
        self.overrides.insert(step_name.into(), runner);
        self
    }

    /// Whether an override is registered for the given step name.
    pub fn has_override(&self, step_name: &str) -> bool {
        self.overrides.contains_key(step_name)
    }

    /// Resolve a step definition to its runner.
    ///
    /// The workflow is consulted for context the step itself does not
    /// carry (the runtime selector for `setup-runtime`).
    pub fn resolve(&self, step: &Step, workflow: &Workflow) -> Arc<dyn StepRunner> {
        if let Some(runner) = self.overrides.get(&step.name) {
            return Arc::clone(runner);
        }

        match &step.action {
            StepAction::Uses {
                uses: BuiltinAction::Checkout,
            } => Arc::new(CheckoutStep::new()),
            StepAction::Uses {
                uses: BuiltinAction::SetupRuntime,
            } => {
                let selector = workflow
                    .runtime
                    .as_ref()
                    .map(|r| r.python.clone())
                    .unwrap_or_else(|| "3.x".to_string());
                Arc::new(SetupRuntimeStep::new(selector))
            }
            StepAction::Run { run } => Arc::new(ShellStep::new(run.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::base::{StepContext, StepOutput};
    use crate::steps::mock::MockStep;
    use tk_protocol::workflow_models::TriggerConfig;
    use tokio_stream::StreamExt;

    fn test_workflow(steps: Vec<Step>) -> Workflow {
        Workflow {
            name: "test".to_string(),
            on: TriggerConfig::default(),
            runtime: None,
            steps,
            on_failure: None,
            secrets: HashMap::new(),
        }
    }

    fn run_step(name: &str, command: &str) -> Step {
        Step {
            name: name.to_string(),
            action: StepAction::Run {
                run: command.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_resolve_run_step_executes_command() {
        let manager = StepManager::new();
        let step = run_step("Say hello", "echo hello");
        let workflow = test_workflow(vec![step.clone()]);

        let runner = manager.resolve(&step, &workflow);

        let dir = tempfile::tempdir().unwrap();
        let ctx = StepContext::new(dir.path(), dir.path());
        let stream = runner.execute(&ctx).await.unwrap();
        let outputs: Vec<_> = stream.collect().await;

        assert!(outputs.contains(&Ok(StepOutput::Line("hello".to_string()))));
    }

    #[tokio::test]
    async fn test_resolve_override_wins() {
        let manager =
            StepManager::new().with_runner("Say hello", Arc::new(MockStep::failing()));
        assert!(manager.has_override("Say hello"));

        let step = run_step("Say hello", "echo hello");
        let workflow = test_workflow(vec![step.clone()]);

        let runner = manager.resolve(&step, &workflow);

        let dir = tempfile::tempdir().unwrap();
        let ctx = StepContext::new(dir.path(), dir.path());
        let stream = runner.execute(&ctx).await.unwrap();
        let outputs: Vec<_> = stream.collect().await;

        // MockStep::failing ends with an error, not echo output.
        assert!(outputs.last().map(|o| o.is_err()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_resolve_setup_runtime_uses_workflow_selector() {
        let manager = StepManager::new();
        let step = Step {
            name: "Set up Python".to_string(),
            action: StepAction::Uses {
                uses: BuiltinAction::SetupRuntime,
            },
        };
        let mut workflow = test_workflow(vec![step.clone()]);
        workflow.runtime = Some(tk_protocol::workflow_models::RuntimeConfig {
            python: "3.11".to_string(),
        });

        let runner = manager.resolve(&step, &workflow);

        // Without a resolved interpreter in the context the step fails,
        // naming the workflow's selector.
        let dir = tempfile::tempdir().unwrap();
        let ctx = StepContext::new(dir.path(), dir.path());
        let result = runner.execute(&ctx).await;

        match result {
            Err(crate::steps::base::StepError::NotAvailable(msg)) => {
                assert!(msg.contains("3.11"));
            }
            Err(other) => panic!("Expected NotAvailable, got {other:?}"),
            Ok(_) => panic!("Expected NotAvailable, got a stream"),
        }
    }
}

//! Test fixtures for creating sample configurations and test data.

use std::collections::HashMap;
use tempfile::TempDir;
use tk_protocol::event_models::TriggerEvent;
use tk_protocol::run_models::{Run, RunStatus};
use tk_protocol::workflow_models::{
    BranchFilter, Step, StepAction, TriggerConfig, Workflow,
};
use uuid::Uuid;

/// Create a temporary project directory with .trigger-kit configuration.
///
/// The project carries one workflow triggered by pushes to main, plus a
/// small source file for checkout steps to copy.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project(workflow_yaml: &str) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    std::fs::create_dir_all(root.join(".trigger-kit/workflows"))?;
    std::fs::write(
        root.join(".trigger-kit/config.toml"),
        "default-branch = \"main\"\n",
    )?;
    std::fs::write(
        root.join(".trigger-kit/workflows/test.yaml"),
        workflow_yaml,
    )?;

    std::fs::write(root.join("build.py"), "print('building')\n")?;

    Ok(temp_dir)
}

/// Create a test Workflow triggered by pushes to the given branches.
pub fn create_test_workflow(name: &str, branches: &[&str], steps: Vec<Step>) -> Workflow {
    Workflow {
        name: name.to_string(),
        on: TriggerConfig {
            push: Some(BranchFilter {
                branches: branches.iter().map(|b| b.to_string()).collect(),
            }),
            pull_request: None,
        },
        runtime: None,
        steps,
        on_failure: None,
        secrets: HashMap::new(),
    }
}

/// Create a `run:` step.
pub fn shell_step(name: &str, command: &str) -> Step {
    Step {
        name: name.to_string(),
        action: StepAction::Run {
            run: command.to_string(),
        },
    }
}

/// Create a test Run in the given state.
#[allow(dead_code)]
pub fn create_test_run(workflow_name: &str, status: RunStatus) -> Run {
    Run {
        id: Uuid::new_v4(),
        workflow_name: workflow_name.to_string(),
        event: TriggerEvent::push("main"),
        status,
        current_step: 0,
        logs: Vec::new(),
        started_at: None,
        finished_at: None,
    }
}

//! End-to-end tests running real shell steps through the RunManager.

mod common;

use common::assertions::*;
use common::fixtures::*;
use std::collections::HashMap;
use std::sync::Arc;
use tk_core::engine::WorkflowEngine;
use tk_core::notify::RecordingNotifier;
use tk_core::state::manager::RunManager;
use tk_core::steps::StepManager;
use tk_protocol::event_models::TriggerEvent;
use tk_protocol::run_models::RunStatus;
use tk_protocol::workflow_models::{BuiltinAction, Step, StepAction};
use tokio::sync::mpsc;

fn checkout_step() -> Step {
    Step {
        name: "Checkout source".to_string(),
        action: StepAction::Uses {
            uses: BuiltinAction::Checkout,
        },
    }
}

#[tokio::test]
async fn test_checkout_then_shell_steps_succeed() {
    let project = create_test_project("name: unused\nsteps: []\n").unwrap();

    let workflow = create_test_workflow(
        "build",
        &["main"],
        vec![
            checkout_step(),
            shell_step("Inspect workspace", "cat build.py"),
            shell_step("Announce", "echo done"),
        ],
    );

    let engine = WorkflowEngine::new(StepManager::new());
    let (tx, mut rx) = mpsc::channel(100);
    let manager = RunManager::new(engine, tx);

    let (run_id, handle) = manager
        .submit(&workflow, &TriggerEvent::push("main"), project.path())
        .await
        .expect("push to main should match");
    handle.await.unwrap();

    let run = manager.get_run(run_id).await.unwrap();
    assert_eq!(run.status, RunStatus::Success);
    assert!(run.started_at.is_some());
    assert!(run.finished_at.is_some());

    // The checkout copied build.py into the scratch dir, so the cat
    // step saw the project source.
    assert!(run
        .logs
        .iter()
        .any(|l| l.contains("print('building')")));
    assert!(run.logs.iter().any(|l| l.contains("done")));

    drop(manager);
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    assert!(has_run_started(&events));
    assert!(has_run_completed(&events));
}

#[tokio::test]
async fn test_failing_shell_step_aborts_run_and_notifies_once() {
    let project = create_test_project("name: unused\nsteps: []\n").unwrap();

    let workflow = create_test_workflow(
        "broken-build",
        &["main"],
        vec![
            shell_step("Prepare", "echo preparing"),
            shell_step("Break", "exit 1"),
            shell_step("Never runs", "echo unreachable"),
        ],
    );

    let recorder = RecordingNotifier::new();
    let engine =
        WorkflowEngine::new(StepManager::new()).with_notifier(Arc::new(recorder.clone()));
    let (tx, mut rx) = mpsc::channel(100);
    let manager = RunManager::new(engine, tx);

    let (run_id, handle) = manager
        .submit(&workflow, &TriggerEvent::push("main"), project.path())
        .await
        .unwrap();
    handle.await.unwrap();

    let run = manager.get_run(run_id).await.unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert!(!run.logs.iter().any(|l| l.contains("unreachable")));

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, run_id);
    assert!(calls[0].1.contains("Break"));

    drop(manager);
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    assert_eq!(started_step_names(&events), vec!["Prepare", "Break"]);
    assert!(has_run_error(&events));
    assert!(!has_run_completed(&events));
}

#[tokio::test]
async fn test_pull_request_event_matches_pull_request_trigger() {
    let project = create_test_project("name: unused\nsteps: []\n").unwrap();

    let mut workflow =
        create_test_workflow("pr-check", &[], vec![shell_step("Check", "echo checking")]);
    workflow.on = tk_protocol::workflow_models::TriggerConfig {
        push: None,
        pull_request: Some(tk_protocol::workflow_models::BranchFilter {
            branches: vec!["main".to_string()],
        }),
    };
    workflow.secrets = HashMap::new();

    let engine = WorkflowEngine::new(StepManager::new());
    let (tx, _rx) = mpsc::channel(100);
    let manager = RunManager::new(engine, tx);

    // A push does not match a pull-request-only trigger.
    assert!(manager
        .submit(&workflow, &TriggerEvent::push("main"), project.path())
        .await
        .is_none());

    let (run_id, handle) = manager
        .submit(
            &workflow,
            &TriggerEvent::pull_request("main"),
            project.path(),
        )
        .await
        .expect("pull-request to main should match");
    handle.await.unwrap();

    let run = manager.get_run(run_id).await.unwrap();
    assert_eq!(run.status, RunStatus::Success);
}

#[tokio::test]
async fn test_non_matching_branch_creates_no_run() {
    let project = create_test_project("name: unused\nsteps: []\n").unwrap();

    let workflow =
        create_test_workflow("main-only", &["main"], vec![shell_step("Noop", "true")]);

    let engine = WorkflowEngine::new(StepManager::new());
    let (tx, mut rx) = mpsc::channel(100);
    let manager = RunManager::new(engine, tx);

    let result = manager
        .submit(&workflow, &TriggerEvent::push("feature/wip"), project.path())
        .await;

    assert!(result.is_none());
    assert_eq!(manager.run_count().await, 0);

    // No run means no events of any kind.
    drop(manager);
    assert!(rx.recv().await.is_none());
}

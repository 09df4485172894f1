//! Workflow configuration models for `.trigger-kit/workflows/*.yaml`.
//!
//! This module defines the structure of workflow definition files that
//! declare when a run is triggered and which steps it executes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Branch filter attached to a trigger section.
///
/// An event only matches when its branch is listed here. Comparison is
/// exact string equality.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct BranchFilter {
    /// Branch names that match this trigger.
    pub branches: Vec<String>,
}

/// Declares which events start this workflow.
///
/// Each section is optional; an absent section means the corresponding
/// event kind never triggers the workflow.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TriggerConfig {
    /// Trigger on pushes to one of the listed branches.
    #[serde(default)]
    pub push: Option<BranchFilter>,

    /// Trigger on pull requests targeting one of the listed branches.
    #[serde(default)]
    pub pull_request: Option<BranchFilter>,
}

/// Runtime requirements for a workflow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Python interpreter selector, e.g. `"3.x"` (latest major-3 release
    /// on PATH) or `"3.11"` (that minor series, falling back to `python3`).
    pub python: String,
}

/// Built-in step actions provided by the runner itself.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinAction {
    /// Copy the project source into the run's working directory.
    Checkout,

    /// Resolve the configured interpreter and verify it is usable.
    SetupRuntime,
}

/// What a step does: either a built-in action or a shell command.
///
/// The enum uses `#[serde(untagged)]` so YAML steps read naturally as
/// either `uses: checkout` or `run: pip install -r requirements.txt`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum StepAction {
    /// Invoke a built-in action.
    Uses {
        /// Which built-in to run.
        uses: BuiltinAction,
    },

    /// Run a shell command in the run's working directory.
    ///
    /// A non-zero exit code fails the step; zero succeeds. That is the
    /// entire contract with the invoked command.
    Run {
        /// The command line, executed via `sh -c`.
        run: String,
    },
}

/// A single named unit of work within a workflow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Human-readable step name, used in logs and progress events.
    pub name: String,

    /// The action this step performs.
    #[serde(flatten)]
    pub action: StepAction,
}

/// Notification channel used when a run fails.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyChannel {
    /// Emit a structured log line (the default placeholder channel).
    #[default]
    Log,

    /// Run an operator-supplied shell command.
    Command,
}

/// Failure-handler configuration.
///
/// Invoked exactly once when any normal step fails. The actual delivery
/// channel is a configuration point; no network transport is built in.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FailureConfig {
    /// Where the notification goes.
    #[serde(default)]
    pub notify: NotifyChannel,

    /// Optional message included in the notification.
    #[serde(default)]
    pub message: Option<String>,

    /// Shell command for the `command` channel.
    #[serde(default)]
    pub command: Option<String>,
}

/// A reserved secret slot.
///
/// Secrets are declared in workflow files (e.g. registry credentials) but
/// are currently inert: they are parsed and carried on the workflow and
/// never injected into step environments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SecretRef {
    /// Environment variable the secret would be read from.
    pub env: String,
}

/// Defines a full workflow: trigger, runtime, steps, and failure handling.
///
/// Workflows are defined in `.trigger-kit/workflows/*.yaml` files.
///
/// # Example
///
/// ```yaml
/// name: build-and-deploy
/// on:
///   push:
///     branches: [main]
///   pull-request:
///     branches: [main]
/// runtime:
///   python: "3.x"
/// steps:
///   - name: Checkout source
///     uses: checkout
///   - name: Set up Python
///     uses: setup-runtime
///   - name: Install dependencies
///     run: pip install -r requirements.txt
///   - name: Run build script
///     run: python build.py
/// on-failure:
///   notify: log
///   message: "build-and-deploy failed"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Workflow {
    /// Unique name identifying this workflow.
    pub name: String,

    /// Events that start this workflow.
    pub on: TriggerConfig,

    /// Runtime requirements, if any.
    #[serde(default)]
    pub runtime: Option<RuntimeConfig>,

    /// Ordered list of steps executed by a run.
    pub steps: Vec<Step>,

    /// Failure handler, invoked once when any step fails.
    #[serde(default)]
    pub on_failure: Option<FailureConfig>,

    /// Reserved secret slots. Parsed but never injected.
    #[serde(default)]
    pub secrets: HashMap<String, SecretRef>,
}

//! Trigger event descriptors.
//!
//! A trigger event is the external stimulus that may start a workflow run:
//! a push to a branch or a pull request targeting a branch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of source-control event that can trigger a workflow.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// A commit was pushed to a branch.
    Push,

    /// A pull request was opened or updated against a target branch.
    PullRequest,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Push => write!(f, "push"),
            EventKind::PullRequest => write!(f, "pull-request"),
        }
    }
}

/// A single incoming event, as presented to trigger evaluation.
///
/// For a push event, `branch` is the branch that was pushed to.
/// For a pull-request event, `branch` is the *target* branch of the
/// pull request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    /// What happened.
    pub kind: EventKind,

    /// The branch the event applies to.
    pub branch: String,
}

impl TriggerEvent {
    /// Create a push event for the given branch.
    pub fn push(branch: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Push,
            branch: branch.into(),
        }
    }

    /// Create a pull-request event targeting the given branch.
    pub fn pull_request(branch: impl Into<String>) -> Self {
        Self {
            kind: EventKind::PullRequest,
            branch: branch.into(),
        }
    }
}

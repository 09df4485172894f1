//! Trigger evaluation.
//!
//! Decides whether an incoming event starts a workflow. Non-matching
//! events are a silent no-op: no run is created and no error is raised.

use tk_protocol::event_models::{EventKind, TriggerEvent};
use tk_protocol::workflow_models::TriggerConfig;

/// Returns whether an event should start a workflow with this trigger
/// configuration.
///
/// An event matches when the section for its kind is present and lists
/// the event's branch. Branch comparison is exact string equality.
pub fn matches(on: &TriggerConfig, event: &TriggerEvent) -> bool {
    let filter = match event.kind {
        EventKind::Push => on.push.as_ref(),
        EventKind::PullRequest => on.pull_request.as_ref(),
    };

    filter.is_some_and(|f| f.branches.iter().any(|b| b == &event.branch))
}

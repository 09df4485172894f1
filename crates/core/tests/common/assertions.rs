//! Custom assertion helpers for E2E tests.

use tk_protocol::ipc::Event;
use tk_protocol::run_models::RunStatus;

/// Whether the event sequence contains a RunStarted event.
pub fn has_run_started(events: &[Event]) -> bool {
    events.iter().any(|e| matches!(e, Event::RunStarted { .. }))
}

/// Whether the event sequence contains a RunCompleted event.
pub fn has_run_completed(events: &[Event]) -> bool {
    events.iter().any(|e| matches!(e, Event::RunCompleted { .. }))
}

/// Whether the event sequence contains a RunError event.
pub fn has_run_error(events: &[Event]) -> bool {
    events.iter().any(|e| matches!(e, Event::RunError { .. }))
}

/// Whether the event sequence contains a status update with the given status.
pub fn has_status_update(events: &[Event], status: RunStatus) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            Event::RunStatusUpdate { status: s, .. } if *s == status
        )
    })
}

/// Names of the steps that were started, in order.
pub fn started_step_names(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::StepStarted { step_name, .. } => Some(step_name.clone()),
            _ => None,
        })
        .collect()
}

/// Count log chunk events.
pub fn count_log_chunks(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::RunLogChunk { .. }))
        .count()
}

/// Assert that events start with RunStarted and end in a terminal event.
pub fn assert_event_sequence(events: &[Event]) {
    assert!(!events.is_empty(), "Event sequence is empty");

    assert!(
        matches!(events[0], Event::RunStarted { .. }),
        "First event should be RunStarted, got: {:?}",
        events[0]
    );

    let last = events.last().unwrap();
    assert!(
        matches!(last, Event::RunCompleted { .. } | Event::RunError { .. }),
        "Last event should be RunCompleted or RunError, got: {:?}",
        last
    );
}

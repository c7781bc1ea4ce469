//! Event collection and assertion helpers.

use ap_core::player::WorkflowPlayer;
use ap_protocol::ipc::Event;
use ap_protocol::player_models::StepPhase;
use tokio::sync::mpsc::UnboundedReceiver;

/// Drain every event currently queued on `rx`.
#[allow(dead_code)]
pub fn drain_events(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Step indices in the order they reported completion.
#[allow(dead_code)]
pub fn completion_order(events: &[Event]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::StepStateChanged {
                step_index,
                phase: StepPhase::Complete,
            } => Some(*step_index),
            _ => None,
        })
        .collect()
}

/// Number of `RunCompleted` events in `events`.
#[allow(dead_code)]
pub fn count_run_completed(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::RunCompleted { .. }))
        .count()
}

/// Clock time at which the log entry with `message` was appended.
#[allow(dead_code)]
pub fn logged_at(player: &WorkflowPlayer, message: &str) -> Option<u64> {
    player
        .log()
        .iter()
        .find(|entry| entry.message == message)
        .map(|entry| entry.at)
}

/// Assert that no two steps are active and that every step before the
/// active one is complete.
#[allow(dead_code)]
pub fn assert_step_invariants(player: &WorkflowPlayer) {
    let states = player.step_states();
    let active: Vec<usize> = states
        .iter()
        .enumerate()
        .filter(|(_, phase)| **phase == StepPhase::Active)
        .map(|(i, _)| i)
        .collect();

    assert!(active.len() <= 1, "more than one active step: {states:?}");
    if let Some(&index) = active.first() {
        assert_eq!(player.current_step(), Some(index));
        assert!(
            states[..index].iter().all(|p| *p == StepPhase::Complete),
            "steps before {index} not complete: {states:?}"
        );
        assert!(
            states[index + 1..].iter().all(|p| *p == StepPhase::Pending),
            "steps after {index} not pending: {states:?}"
        );
    }
}

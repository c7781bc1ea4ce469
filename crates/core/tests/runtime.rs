//! Runtime tests.
//!
//! These run the player through [`PlayerRuntime`] on tokio's paused clock,
//! so real-time deadlines are checked without actually waiting.

mod common;

use common::assertions::*;
use common::fixtures::*;
use ap_core::runtime::PlayerRuntime;
use ap_protocol::ipc::{Event, Op};
use ap_protocol::player_models::{PlayerPhase, PlayerSnapshot};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Receive events until a `RunCompleted` arrives, returning them all.
async fn collect_until_completed(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        let done = matches!(event, Event::RunCompleted { .. });
        events.push(event);
        if done {
            break;
        }
    }
    events
}

#[tokio::test(start_paused = true)]
async fn test_full_run_takes_scripted_time() {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (op_tx, op_rx) = mpsc::unbounded_channel();
    let runtime = PlayerRuntime::new(scripted_player(&[2, 2, 2, 2]), events_tx, 1.0).unwrap();
    let handle = tokio::spawn(runtime.run(op_rx));

    let start = Instant::now();
    op_tx.send(Op::Run).unwrap();
    let events = collect_until_completed(&mut events_rx).await;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(9899), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(9950), "elapsed {elapsed:?}");
    assert_eq!(completion_order(&events), vec![0, 1, 2, 3]);

    op_tx.send(Op::Shutdown).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_speed_scales_playback() {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (op_tx, op_rx) = mpsc::unbounded_channel();
    let runtime = PlayerRuntime::new(scripted_player(&[2, 2, 2, 2]), events_tx, 2.0).unwrap();
    let handle = tokio::spawn(runtime.run(op_rx));

    let start = Instant::now();
    op_tx.send(Op::Run).unwrap();
    collect_until_completed(&mut events_rx).await;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(4949), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(5000), "elapsed {elapsed:?}");

    drop(op_tx);
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_event_stream_mirrors_final_snapshot() {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (op_tx, op_rx) = mpsc::unbounded_channel();
    let runtime = PlayerRuntime::new(scripted_player(&[1, 2]), events_tx, 1.0).unwrap();
    let handle = tokio::spawn(runtime.run(op_rx));

    let mut mirror = PlayerSnapshot::default();
    op_tx.send(Op::Run).unwrap();
    for event in collect_until_completed(&mut events_rx).await {
        mirror.apply(&event);
    }
    // Sign-off lands right after RunCompleted.
    op_tx.send(Op::GetSnapshot).unwrap();
    let reported = loop {
        match events_rx.recv().await {
            Some(Event::Snapshot { snapshot }) => break snapshot,
            Some(event) => mirror.apply(&event),
            None => panic!("runtime stopped before replying"),
        }
    };

    assert_eq!(mirror, reported);
    assert_eq!(reported.phase, PlayerPhase::Complete);

    op_tx.send(Op::Shutdown).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_reset_op_cancels_playback() {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (op_tx, op_rx) = mpsc::unbounded_channel();
    let runtime = PlayerRuntime::new(scripted_player(&[2, 2, 2, 2]), events_tx, 1.0).unwrap();
    let handle = tokio::spawn(runtime.run(op_rx));

    op_tx.send(Op::Run).unwrap();
    tokio::time::sleep(Duration::from_millis(3000)).await;
    op_tx.send(Op::Reset).unwrap();
    tokio::time::sleep(Duration::from_secs(60)).await;
    op_tx.send(Op::Shutdown).unwrap();
    handle.await.unwrap().unwrap();

    let events = drain_events(&mut events_rx);
    let reset_at = events
        .iter()
        .rposition(|event| matches!(event, Event::PlayerReset { .. }))
        .expect("reset was published");
    assert!(
        !events[reset_at..]
            .iter()
            .any(|event| matches!(event, Event::LogAppended { .. })),
        "log grew after reset"
    );
    assert_eq!(count_run_completed(&events), 0);
    assert_eq!(completion_order(&events), vec![0]);
}

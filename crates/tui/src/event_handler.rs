//! Event handling for the TUI.
//!
//! This module provides functions for handling:
//! - Player events (from the ap-core runtime)
//! - Keyboard events (user input)

use crate::event::EventStatus;
use crate::widgets::LogView;
use ap_protocol::{Event, Op, PlayerSnapshot};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

/// Fold a player event into the local snapshot.
///
/// A reset or a fresh snapshot puts the log view back into follow mode.
pub fn handle_core_event(snapshot: &mut PlayerSnapshot, log_view: &mut LogView, event: Event) {
    if matches!(event, Event::PlayerReset { .. } | Event::Snapshot { .. }) {
        log_view.follow = true;
    }
    snapshot.apply(&event);
}

/// Handle a keyboard event from the user.
///
/// Returns `true` if the application should exit, `false` otherwise.
pub fn handle_keyboard_event(
    key_event: KeyEvent,
    snapshot: &PlayerSnapshot,
    log_view: &mut LogView,
    op_tx: &UnboundedSender<Op>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if log_view.handle_key_event(key_event, snapshot.log.len()) == EventStatus::Consumed {
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            return true;
        }
        KeyCode::Char('r') | KeyCode::Enter => {
            if snapshot.trigger.enabled {
                let _ = op_tx.send(Op::Run);
            }
        }
        KeyCode::Char('x') => {
            let _ = op_tx.send(Op::Reset);
        }
        _ => {}
    }

    false
}

//! Event handling types for the TUI.

/// Status of a key event after a widget has seen it.
///
/// Widgets return this from their `handle_key_event` methods so the app
/// knows whether to try its own bindings next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The widget handled the event.
    Consumed,
    /// The widget ignored the event; pass it on.
    NotConsumed,
}

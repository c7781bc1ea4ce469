//! Inter-process communication protocol.
//!
//! This module defines the message types exchanged between a host (TUI,
//! CLI, or a web page through the generated TypeScript bindings) and the
//! player runtime.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from the host to the runtime
//! - `Event`: State changes published by the player
//!
//! Applying every `Event` in order to a [`PlayerSnapshot`] reproduces the
//! player's state exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::player_models::{LogEntry, PlayerSnapshot, StepPhase, TriggerState};

/// Operations sent from a host to the player runtime.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// { "type": "run" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
#[ts(export)]
pub enum Op {
    /// Start a run. Ignored while a run is in progress.
    Run,

    /// Cancel any pending playback and return to idle.
    Reset,

    /// Ask for a full [`Event::Snapshot`].
    GetSnapshot,

    /// Stop the runtime. Pending timers are cancelled.
    Shutdown,
}

/// Events published by the player.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "stepStateChanged",
///   "payload": { "step_index": 1, "phase": "ACTIVE" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
#[ts(export)]
pub enum Event {
    /// The player was reset: idle phase, all steps pending, log holding
    /// only `standby`.
    PlayerReset {
        status_text: String,
        /// New trigger state, or `None` when the reset left it untouched.
        trigger: Option<TriggerState>,
        standby: LogEntry,
    },

    /// A run has started.
    RunStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        workflow_name: String,
        started_at: DateTime<Utc>,
    },

    /// The run trigger changed (enabled flag or label).
    TriggerChanged { trigger: TriggerState },

    /// The status line changed.
    StatusChanged { text: String },

    /// A step changed phase.
    StepStateChanged { step_index: usize, phase: StepPhase },

    /// A log entry was appended.
    ///
    /// The first entry after a reset replaces the standby placeholder.
    LogAppended { entry: LogEntry },

    /// The run finished every step.
    RunCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// Full state, sent on runtime start and in reply to [`Op::GetSnapshot`].
    Snapshot { snapshot: PlayerSnapshot },
}

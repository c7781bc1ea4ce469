//! Runtime player state models.
//!
//! [`PlayerSnapshot`] is the observable state of one workflow player. The
//! player keeps its own copy up to date by applying the same [`Event`]s it
//! publishes, so any host that applies the event stream to a snapshot
//! holds an exact mirror.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::ipc::Event;
use crate::workflow_models::Workflow;

/// Lifecycle phase of a player.
///
/// Idle -> Running -> Complete, and back to Idle on every reset.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerPhase {
    #[default]
    Idle,
    Running,
    Complete,
}

/// Phase of a single step within the current run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepPhase {
    #[default]
    Pending,
    Active,
    Complete,
}

impl StepPhase {
    /// Label shown by per-step displays.
    pub fn label(self) -> &'static str {
        match self {
            StepPhase::Pending => "Queued",
            StepPhase::Active => "Running",
            StepPhase::Complete => "Complete",
        }
    }
}

/// What produced a log entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogKind {
    /// Placeholder shown while nothing has been logged since the last reset.
    Standby,
    /// A line spoken by the scripted agent.
    Agent,
    /// A step completion line.
    Success,
}

/// One line of the player log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,

    /// Player clock time at which the entry was appended.
    pub at: u64,
}

impl LogEntry {
    pub fn new(kind: LogKind, message: impl Into<String>, at: u64) -> Self {
        Self {
            kind,
            message: message.into(),
            at,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LogKind::Standby => write!(f, "{}", self.message),
            LogKind::Agent => write!(f, "Agent: {}", self.message),
            LogKind::Success => write!(f, "✔ {}", self.message),
        }
    }
}

/// State of the run trigger (the "Run Demo" button).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
pub struct TriggerState {
    pub enabled: bool,
    pub label: String,
}

/// Observable state of a workflow player.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
#[ts(export)]
pub struct PlayerSnapshot {
    pub workflow_name: String,

    /// Display titles of the workflow's steps, in order.
    pub step_titles: Vec<String>,

    pub phase: PlayerPhase,

    /// Index of the active step; `None` while no step is running.
    pub current_step: Option<usize>,

    /// One phase per step, same length as `step_titles`.
    pub step_states: Vec<StepPhase>,

    pub status_text: String,

    pub trigger: TriggerState,

    /// Entries logged since the last reset.
    pub log: Vec<LogEntry>,

    /// Identifier of the current or last finished run.
    #[ts(type = "string | null")]
    pub run_id: Option<Uuid>,

    /// Wall-clock start of the current or last finished run.
    pub started_at: Option<DateTime<Utc>>,
}

impl PlayerSnapshot {
    /// An empty, idle snapshot shaped for `workflow`.
    ///
    /// Status, trigger and log are filled in by the first reset.
    pub fn for_workflow(workflow: &Workflow) -> Self {
        Self {
            workflow_name: workflow.name.clone(),
            step_titles: workflow.step_titles(),
            step_states: vec![StepPhase::Pending; workflow.steps.len()],
            ..Self::default()
        }
    }

    /// Whether the log holds only the standby placeholder.
    pub fn is_standing_by(&self) -> bool {
        matches!(self.log.as_slice(), [entry] if entry.kind == LogKind::Standby)
    }

    /// Number of steps that have completed in the current run.
    pub fn completed_steps(&self) -> usize {
        self.step_states
            .iter()
            .filter(|phase| **phase == StepPhase::Complete)
            .count()
    }

    /// Fold one event into the snapshot.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::PlayerReset {
                status_text,
                trigger,
                standby,
            } => {
                self.phase = PlayerPhase::Idle;
                self.current_step = None;
                self.step_states = vec![StepPhase::Pending; self.step_titles.len()];
                self.status_text = status_text.clone();
                if let Some(trigger) = trigger {
                    self.trigger = trigger.clone();
                }
                self.log = vec![standby.clone()];
                self.run_id = None;
                self.started_at = None;
            }
            Event::RunStarted {
                run_id, started_at, ..
            } => {
                self.phase = PlayerPhase::Running;
                self.run_id = Some(*run_id);
                self.started_at = Some(*started_at);
            }
            Event::TriggerChanged { trigger } => {
                self.trigger = trigger.clone();
            }
            Event::StatusChanged { text } => {
                self.status_text = text.clone();
            }
            Event::StepStateChanged { step_index, phase } => {
                if let Some(state) = self.step_states.get_mut(*step_index) {
                    *state = *phase;
                }
                if *phase == StepPhase::Active {
                    self.current_step = Some(*step_index);
                }
            }
            Event::LogAppended { entry } => {
                if self.is_standing_by() {
                    self.log.clear();
                }
                self.log.push(entry.clone());
            }
            Event::RunCompleted { .. } => {
                self.phase = PlayerPhase::Complete;
                self.current_step = None;
            }
            Event::Snapshot { snapshot } => {
                *self = snapshot.clone();
            }
        }
    }
}

//! Scripted workflow player.
//!
//! [`WorkflowPlayer`] plays a [`Workflow`] on a virtual clock: a lead delay,
//! then each step in turn posts its log lines at even spacing, settles, and
//! completes, and a final delay later the run finishes. Every state change
//! is published as an [`Event`] and folded into the player's own
//! [`PlayerSnapshot`].
//!
//! The player owns all of its pending timers. [`WorkflowPlayer::reset`]
//! drops them in one step, so nothing scheduled before a reset can fire
//! after it.

pub mod error;
pub mod timer;

use ap_protocol::{
    Event, GlobalConfig, LabelsConfig, LogEntry, LogKind, PlayerPhase, PlayerSnapshot, StepPhase,
    TimingConfig, TriggerState, Workflow,
};
use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

pub use error::{PlayerError, PlayerResult};
pub use timer::TimerQueue;

/// Timing and copy used by a player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSettings {
    pub timing: TimingConfig,
    pub labels: LabelsConfig,
}

impl From<&GlobalConfig> for PlayerSettings {
    fn from(config: &GlobalConfig) -> Self {
        Self {
            timing: config.timing.clone(),
            labels: config.labels.clone(),
        }
    }
}

/// Options for [`WorkflowPlayer::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetOptions {
    /// Leave the trigger's enabled flag and label as they are.
    pub preserve_trigger: bool,

    /// Status text to show instead of the idle label.
    pub status_text: Option<String>,
}

/// Work scheduled on the player's timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    StartStep(usize),
    PostLog { step: usize, line: usize },
    CompleteStep(usize),
    Finish,
}

/// Plays one scripted workflow.
pub struct WorkflowPlayer {
    workflow: Workflow,
    settings: PlayerSettings,
    state: PlayerSnapshot,
    timers: TimerQueue<Action>,
    events_tx: Option<UnboundedSender<Event>>,
}

impl WorkflowPlayer {
    /// Build an idle player for `workflow`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::EmptyWorkflow`] if the workflow has no steps.
    pub fn new(workflow: Workflow, settings: PlayerSettings) -> PlayerResult<Self> {
        if workflow.steps.is_empty() {
            return Err(PlayerError::EmptyWorkflow(workflow.name));
        }

        let mut player = Self {
            state: PlayerSnapshot::for_workflow(&workflow),
            workflow,
            settings,
            timers: TimerQueue::new(),
            events_tx: None,
        };
        player.reset(ResetOptions::default());
        Ok(player)
    }

    /// Publish every subsequent state change on `events_tx`.
    pub fn with_events(mut self, events_tx: UnboundedSender<Event>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Current observable state.
    pub fn snapshot(&self) -> &PlayerSnapshot {
        &self.state
    }

    pub fn phase(&self) -> PlayerPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == PlayerPhase::Running
    }

    pub fn current_step(&self) -> Option<usize> {
        self.state.current_step
    }

    pub fn step_states(&self) -> &[StepPhase] {
        &self.state.step_states
    }

    pub fn status_text(&self) -> &str {
        &self.state.status_text
    }

    pub fn trigger(&self) -> &TriggerState {
        &self.state.trigger
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.state.log
    }

    /// Number of timers still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Player clock.
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Clock value at which the next timer fires, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Cancel all pending playback and return to idle.
    ///
    /// Safe in every phase and idempotent.
    pub fn reset(&mut self, options: ResetOptions) {
        let cancelled = self.timers.clear();

        let trigger = (!options.preserve_trigger).then(|| TriggerState {
            enabled: true,
            label: self.settings.labels.run.clone(),
        });
        let status_text = options
            .status_text
            .unwrap_or_else(|| self.settings.labels.idle_status.clone());
        let standby = LogEntry::new(
            LogKind::Standby,
            self.settings.labels.standby_message.clone(),
            self.timers.now(),
        );

        self.emit(Event::PlayerReset {
            status_text,
            trigger,
            standby,
        });
        debug!(workflow = %self.workflow.name, cancelled, "player reset");
    }

    /// Start playback from the first step.
    ///
    /// Returns `false`, changing nothing, if a run is already in progress.
    pub fn run(&mut self) -> bool {
        if self.is_running() {
            debug!(workflow = %self.workflow.name, "run ignored, already running");
            return false;
        }

        self.reset(ResetOptions {
            preserve_trigger: true,
            status_text: Some(self.settings.labels.preparing_status.clone()),
        });

        let run_id = Uuid::new_v4();
        self.emit(Event::RunStarted {
            run_id,
            workflow_name: self.workflow.name.clone(),
            started_at: Utc::now(),
        });
        self.emit(Event::TriggerChanged {
            trigger: TriggerState {
                enabled: false,
                label: self.settings.labels.running.clone(),
            },
        });
        self.append_log(LogKind::Agent, self.workflow.intro.clone());
        self.timers
            .schedule(self.settings.timing.lead_ms, Action::StartStep(0));

        info!(
            %run_id,
            workflow = %self.workflow.name,
            steps = self.workflow.steps.len(),
            "run started"
        );
        true
    }

    /// Fire every timer due at or before `target`, then move the clock there.
    ///
    /// Timers scheduled by a firing callback also fire if they fall within
    /// `target`. Returns the number of timers fired.
    pub fn advance_to(&mut self, target: u64) -> usize {
        let mut fired = 0;
        while let Some((due, action)) = self.timers.pop_due(target) {
            trace!(due, ?action, "timer fired");
            self.fire(action);
            fired += 1;
        }
        debug_assert!(
            !self.is_running() || !self.timers.is_empty(),
            "running with nothing scheduled"
        );
        self.timers.set_now(target);
        fired
    }

    pub fn advance_by(&mut self, delta: u64) -> usize {
        self.advance_to(self.now().saturating_add(delta))
    }

    /// Fire timers until none are pending.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.timers.next_deadline() {
            fired += self.advance_to(deadline);
        }
        fired
    }

    fn fire(&mut self, action: Action) {
        match action {
            Action::StartStep(index) => self.run_step(index),
            Action::PostLog { step, line } => {
                let message = self
                    .workflow
                    .steps
                    .get(step)
                    .and_then(|s| s.logs.get(line))
                    .cloned();
                if let Some(message) = message {
                    self.append_log(LogKind::Agent, message);
                }
            }
            Action::CompleteStep(index) => self.complete_step(index),
            Action::Finish => self.finish(),
        }
    }

    fn run_step(&mut self, index: usize) {
        let Some(step) = self.workflow.steps.get(index) else {
            self.timers
                .schedule(self.settings.timing.finish_delay_ms, Action::Finish);
            return;
        };
        let status = step.status.clone();
        let log_count = step.logs.len();

        debug_assert!(
            !self.state.step_states.contains(&StepPhase::Active),
            "step {index} started while another step is active"
        );
        debug_assert!(
            self.state.step_states[..index]
                .iter()
                .all(|phase| *phase == StepPhase::Complete),
            "step {index} started before its predecessors completed"
        );

        self.emit(Event::StepStateChanged {
            step_index: index,
            phase: StepPhase::Active,
        });
        self.emit(Event::StatusChanged { text: status });

        let spacing = self.settings.timing.log_spacing_ms;
        for line in 0..log_count {
            self.timers
                .schedule(line as u64 * spacing, Action::PostLog { step: index, line });
        }
        let last_log = log_count.saturating_sub(1) as u64 * spacing;
        self.timers.schedule(
            last_log + self.settings.timing.settle_ms,
            Action::CompleteStep(index),
        );

        debug!(step = index, logs = log_count, at = self.now(), "step started");
    }

    fn complete_step(&mut self, index: usize) {
        let Some(completion) = self
            .workflow
            .steps
            .get(index)
            .map(|step| step.completion.clone())
        else {
            return;
        };

        self.emit(Event::StepStateChanged {
            step_index: index,
            phase: StepPhase::Complete,
        });
        self.append_log(LogKind::Success, completion);
        debug!(step = index, at = self.now(), "step complete");

        self.run_step(index + 1);
    }

    fn finish(&mut self) {
        let Some(run_id) = self.state.run_id else {
            warn!(workflow = %self.workflow.name, "finish fired without an active run");
            return;
        };

        self.emit(Event::RunCompleted { run_id });
        self.emit(Event::TriggerChanged {
            trigger: TriggerState {
                enabled: true,
                label: self.settings.labels.run_again.clone(),
            },
        });
        self.emit(Event::StatusChanged {
            text: self.settings.labels.completed_status.clone(),
        });
        self.append_log(LogKind::Agent, self.workflow.sign_off.clone());

        info!(%run_id, workflow = %self.workflow.name, at = self.now(), "run complete");
    }

    fn append_log(&mut self, kind: LogKind, message: String) {
        let entry = LogEntry::new(kind, message, self.timers.now());
        self.emit(Event::LogAppended { entry });
    }

    fn emit(&mut self, event: Event) {
        self.state.apply(&event);
        if let Some(events_tx) = &self.events_tx {
            let _ = events_tx.send(event);
        }
    }
}

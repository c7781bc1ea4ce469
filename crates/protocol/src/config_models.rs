//! Global configuration models for `.agent-playback/config.toml`.
//!
//! Every key is optional. A missing file, table or key falls back to the
//! defaults defined here, which reproduce the stock demo timing and copy.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Delay before the first step starts, after `run()`.
pub const DEFAULT_LEAD_MS: u64 = 600;
/// Spacing between consecutive log lines within a step.
pub const DEFAULT_LOG_SPACING_MS: u64 = 900;
/// Pause after a step's last log line before the step completes.
pub const DEFAULT_SETTLE_MS: u64 = 1200;
/// Pause after the last step completes before the run finishes.
pub const DEFAULT_FINISH_DELAY_MS: u64 = 900;
/// Built-in workflow played when `default-workflow` is not set.
pub const DEFAULT_WORKFLOW: &str = "incident-response";

/// Represents global settings from `.agent-playback/config.toml`.
///
/// # Example
///
/// ```toml
/// default-workflow = "incident-response"
///
/// [timing]
/// lead-ms = 600
/// speed = 2.0
///
/// [labels]
/// run = "Run Demo"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub struct GlobalConfig {
    /// Workflow played when none is named explicitly. Unset means
    /// [`DEFAULT_WORKFLOW`] if loaded, else the first workflow.
    #[serde(default)]
    pub default_workflow: Option<String>,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub labels: LabelsConfig,
}

/// Playback timing, in player clock units (milliseconds at speed 1.0).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case", default)]
pub struct TimingConfig {
    pub lead_ms: u64,
    pub log_spacing_ms: u64,
    pub settle_ms: u64,
    pub finish_delay_ms: u64,

    /// Real-time playback multiplier used by the runtime.
    ///
    /// `2.0` plays twice as fast. Only affects wall-clock pacing, never the
    /// relative order or the player clock values.
    pub speed: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            lead_ms: DEFAULT_LEAD_MS,
            log_spacing_ms: DEFAULT_LOG_SPACING_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            finish_delay_ms: DEFAULT_FINISH_DELAY_MS,
            speed: 1.0,
        }
    }
}

/// User-facing copy for status text, the standby log line and the trigger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case", default)]
pub struct LabelsConfig {
    /// Status text after a plain reset.
    pub idle_status: String,
    /// Status text between `run()` and the first step.
    pub preparing_status: String,
    /// Status text once the run has finished.
    pub completed_status: String,
    /// Placeholder log line shown while nothing has been logged.
    pub standby_message: String,
    /// Trigger label when idle.
    pub run: String,
    /// Trigger label while running.
    pub running: String,
    /// Trigger label after a completed run.
    pub run_again: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            idle_status: "Idle — awaiting task".to_string(),
            preparing_status: "Preparing playbook…".to_string(),
            completed_status: "Completed — ready for human approval".to_string(),
            standby_message: "Agent standing by. Press “Run Demo” to simulate the workflow."
                .to_string(),
            run: "Run Demo".to_string(),
            running: "Running…".to_string(),
            run_again: "Run Again".to_string(),
        }
    }
}

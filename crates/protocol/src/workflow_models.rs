//! Workflow definition models for `.agent-playback/workflows/*.yaml`.
//!
//! A workflow is the fixed script the player walks through: an ordered list
//! of steps, each with a status line, a few timed log lines and a
//! completion line.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single scripted step.
///
/// While the step is active the player shows `status`, posts each entry of
/// `logs` at evenly spaced offsets from the step start, and finally posts
/// `completion` with a success marker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct Step {
    /// Short label for per-step displays.
    ///
    /// Falls back to `status` when empty; see [`Step::display_title`].
    #[serde(default)]
    pub title: String,

    /// Status text shown while this step is active.
    pub status: String,

    /// Log lines posted while the step runs, in order.
    #[serde(default)]
    pub logs: Vec<String>,

    /// Line posted when the step finishes.
    pub completion: String,
}

impl Step {
    /// The label to show for this step in step lists.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.status
        } else {
            &self.title
        }
    }
}

/// A complete scripted workflow.
///
/// # Example
///
/// ```yaml
/// name: incident-response
/// description: Checkout latency incident, end to end
/// intro: Loading guardrails and scoping the incident.
/// sign-off: Deployment complete. Awaiting human sign-off to close the incident.
/// steps:
///   - title: Assess
///     status: Assessing service health…
///     logs:
///       - Querying Grafana for checkout latency and error rate.
///       - Pulling Loki logs for checkout-api pods.
///     completion: Health snapshot captured. Bottleneck isolated to config drift.
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub struct Workflow {
    /// Unique name identifying this workflow.
    pub name: String,

    /// Human-readable summary.
    #[serde(default)]
    pub description: String,

    /// First agent line posted when a run starts.
    #[serde(default = "default_intro")]
    pub intro: String,

    /// Last agent line posted when the run finishes.
    #[serde(default = "default_sign_off")]
    pub sign_off: String,

    /// Ordered steps. Must not be empty.
    pub steps: Vec<Step>,
}

fn default_intro() -> String {
    "Loading guardrails and scoping the task.".to_string()
}

fn default_sign_off() -> String {
    "Workflow complete. Awaiting human sign-off.".to_string()
}

impl Workflow {
    /// Titles of all steps, in order.
    pub fn step_titles(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| step.display_title().to_string())
            .collect()
    }
}

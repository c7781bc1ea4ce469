//! Test fixtures for creating sample workflows and projects.

use ap_core::player::{PlayerSettings, WorkflowPlayer};
use ap_protocol::workflow_models::{Step, Workflow};
use tempfile::TempDir;

/// Build a workflow whose step `i` posts `logs_per_step[i]` log lines.
///
/// Messages are predictable: `"step {i} log {j}"` and `"step {i} done"`.
#[allow(dead_code)]
pub fn scripted_workflow(logs_per_step: &[usize]) -> Workflow {
    Workflow {
        name: "scripted".to_string(),
        description: "Generated for tests".to_string(),
        intro: "Starting scripted run.".to_string(),
        sign_off: "Scripted run finished.".to_string(),
        steps: logs_per_step
            .iter()
            .enumerate()
            .map(|(i, &logs)| Step {
                title: format!("Step {i}"),
                status: format!("Working on step {i}"),
                logs: (0..logs).map(|j| format!("step {i} log {j}")).collect(),
                completion: format!("step {i} done"),
            })
            .collect(),
    }
}

/// Idle player with default timing for [`scripted_workflow`].
#[allow(dead_code)]
pub fn scripted_player(logs_per_step: &[usize]) -> WorkflowPlayer {
    WorkflowPlayer::new(scripted_workflow(logs_per_step), PlayerSettings::default())
        .expect("scripted workflow has steps")
}

/// Create a temporary project with a `.agent-playback/` directory holding
/// a fast-timing config and one two-step workflow.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let ap_dir = temp_dir.path().join(".agent-playback");
    std::fs::create_dir_all(ap_dir.join("workflows"))?;

    let config_toml = r#"
default-workflow = "quick-check"

[timing]
lead-ms = 10
log-spacing-ms = 20
settle-ms = 30
finish-delay-ms = 40
"#;
    std::fs::write(ap_dir.join("config.toml"), config_toml)?;

    let workflow_yaml = r#"
name: quick-check
description: Two short steps
intro: Checking quickly.
sign-off: Quick check done.
steps:
  - title: Look
    status: Looking around…
    logs:
      - Nothing on fire.
    completion: Looked.
  - title: Report
    status: Writing it up…
    logs:
      - Drafting summary.
      - Sending summary.
    completion: Reported.
"#;
    std::fs::write(ap_dir.join("workflows/quick-check.yaml"), workflow_yaml)?;

    Ok(temp_dir)
}

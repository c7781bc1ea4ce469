use ap_protocol::*;
use serde_json;
use serde_yaml;

#[test]
fn test_workflow_deserialization_from_yaml() {
    let yaml_str = r#"
name: incident-response
description: Checkout latency incident
intro: Loading guardrails and scoping the incident.
sign-off: Deployment complete.
steps:
  - title: Assess
    status: "Assessing service health…"
    logs:
      - Querying Grafana for checkout latency and error rate.
      - Pulling Loki logs for checkout-api pods.
    completion: Health snapshot captured.
  - status: "Drafting remediation plan…"
    logs:
      - Proposing config hotfix.
    completion: Playbook ready.
"#;

    let workflow: Workflow =
        serde_yaml::from_str(yaml_str).expect("Failed to deserialize Workflow");

    assert_eq!(workflow.name, "incident-response");
    assert_eq!(workflow.intro, "Loading guardrails and scoping the incident.");
    assert_eq!(workflow.sign_off, "Deployment complete.");
    assert_eq!(workflow.steps.len(), 2);
    assert_eq!(workflow.steps[0].logs.len(), 2);
    assert_eq!(workflow.steps[1].logs.len(), 1);
    assert_eq!(
        workflow.step_titles(),
        vec!["Assess".to_string(), "Drafting remediation plan…".to_string()]
    );
}

#[test]
fn test_workflow_optional_fields_default() {
    let yaml_str = r#"
name: bare
steps:
  - status: Working
    completion: Done
"#;

    let workflow: Workflow = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");

    assert!(workflow.description.is_empty());
    assert!(!workflow.intro.is_empty());
    assert!(!workflow.sign_off.is_empty());
    assert!(workflow.steps[0].logs.is_empty());
    assert!(workflow.steps[0].title.is_empty());
}

#[test]
fn test_workflow_missing_steps_is_rejected() {
    let result: Result<Workflow, _> = serde_yaml::from_str("name: no-steps\n");
    assert!(result.is_err());
}

#[test]
fn test_player_phase_serialization() {
    let json = serde_json::to_value(PlayerPhase::Running).expect("Failed to serialize");
    assert_eq!(json, "RUNNING");

    let json = serde_json::to_value(StepPhase::Active).expect("Failed to serialize");
    assert_eq!(json, "ACTIVE");

    let deserialized: PlayerPhase =
        serde_json::from_value(serde_json::json!("COMPLETE")).expect("Failed to deserialize");
    assert_eq!(deserialized, PlayerPhase::Complete);
}

#[test]
fn test_global_config_from_partial_toml() {
    let config: GlobalConfig = toml::from_str(
        r#"
default-workflow = "quick-check"

[timing]
speed = 4.0

[labels]
run = "Play"
"#,
    )
    .expect("Failed to parse config");

    assert_eq!(config.default_workflow.as_deref(), Some("quick-check"));
    assert_eq!(config.timing.speed, 4.0);
    assert_eq!(config.timing.lead_ms, DEFAULT_LEAD_MS);
    assert_eq!(config.timing.log_spacing_ms, DEFAULT_LOG_SPACING_MS);
    assert_eq!(config.timing.settle_ms, DEFAULT_SETTLE_MS);
    assert_eq!(config.timing.finish_delay_ms, DEFAULT_FINISH_DELAY_MS);
    assert_eq!(config.labels.run, "Play");
    assert_eq!(config.labels.run_again, "Run Again");
}

#[test]
fn test_global_config_empty_toml_is_default() {
    let config: GlobalConfig = toml::from_str("").expect("Failed to parse empty config");
    assert_eq!(config, GlobalConfig::default());
}

#[test]
fn test_op_enum_serialization() {
    let json = serde_json::to_value(Op::Run).expect("Failed to serialize Op");
    assert_eq!(json["type"], "run");

    let json = serde_json::to_value(Op::GetSnapshot).expect("Failed to serialize Op");
    assert_eq!(json["type"], "getSnapshot");

    let deserialized: Op = serde_json::from_value(serde_json::json!({ "type": "reset" }))
        .expect("Failed to deserialize Op");
    assert_eq!(deserialized, Op::Reset);
}

#[test]
fn test_event_enum_serialization() {
    let event = Event::StepStateChanged {
        step_index: 1,
        phase: StepPhase::Active,
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize Event");
    assert_eq!(json["type"], "stepStateChanged");
    assert_eq!(json["payload"]["step_index"], 1);
    assert_eq!(json["payload"]["phase"], "ACTIVE");

    let appended = Event::LogAppended {
        entry: LogEntry::new(LogKind::Success, "Playbook ready.", 4800),
    };
    let json = serde_json::to_value(&appended).expect("Failed to serialize Event");
    assert_eq!(json["type"], "logAppended");
    assert_eq!(json["payload"]["entry"]["kind"], "SUCCESS");
    assert_eq!(json["payload"]["entry"]["at"], 4800);

    let back: Event = serde_json::from_value(json).expect("Failed to deserialize Event");
    assert_eq!(back, appended);
}

#[test]
fn test_snapshot_mirrors_event_stream() {
    let workflow: Workflow = serde_yaml::from_str(
        r#"
name: mirror
steps:
  - status: One
    logs: [a]
    completion: one done
  - status: Two
    completion: two done
"#,
    )
    .expect("Failed to deserialize");

    let run_id = uuid::Uuid::new_v4();
    let events = vec![
        Event::PlayerReset {
            status_text: "Preparing".to_string(),
            trigger: None,
            standby: LogEntry::new(LogKind::Standby, "standing by", 0),
        },
        Event::RunStarted {
            run_id,
            workflow_name: "mirror".to_string(),
            started_at: chrono::Utc::now(),
        },
        Event::LogAppended {
            entry: LogEntry::new(LogKind::Agent, "intro", 0),
        },
        Event::StepStateChanged {
            step_index: 0,
            phase: StepPhase::Active,
        },
        Event::StatusChanged {
            text: "One".to_string(),
        },
        Event::LogAppended {
            entry: LogEntry::new(LogKind::Agent, "a", 600),
        },
        Event::StepStateChanged {
            step_index: 0,
            phase: StepPhase::Complete,
        },
        Event::LogAppended {
            entry: LogEntry::new(LogKind::Success, "one done", 1800),
        },
        Event::StepStateChanged {
            step_index: 1,
            phase: StepPhase::Active,
        },
    ];

    let mut snapshot = PlayerSnapshot::for_workflow(&workflow);
    for event in &events {
        snapshot.apply(event);
    }

    assert_eq!(snapshot.phase, PlayerPhase::Running);
    assert_eq!(snapshot.run_id, Some(run_id));
    assert_eq!(snapshot.current_step, Some(1));
    assert_eq!(
        snapshot.step_states,
        vec![StepPhase::Complete, StepPhase::Active]
    );
    assert_eq!(snapshot.status_text, "One");
    assert_eq!(snapshot.log.len(), 3);

    snapshot.apply(&Event::RunCompleted { run_id });
    assert_eq!(snapshot.phase, PlayerPhase::Complete);
    assert_eq!(snapshot.current_step, None);

    let replacement = PlayerSnapshot::for_workflow(&workflow);
    snapshot.apply(&Event::Snapshot {
        snapshot: replacement.clone(),
    });
    assert_eq!(snapshot, replacement);
}

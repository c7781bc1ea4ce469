//! Configuration models that aggregate all settings.
//!
//! [`AppConfig`] combines global settings and workflow definitions into a
//! single configuration object and knows how to pick the workflow to play.

use crate::config::error::{ConfigError, ConfigResult};
use crate::player::PlayerSettings;
use ap_protocol::config_models::{GlobalConfig, DEFAULT_WORKFLOW};
use ap_protocol::workflow_models::Workflow;

/// Unified application configuration loaded from `.agent-playback/`.
///
/// # Example
///
/// ```rust,no_run
/// use ap_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// let workflow = config.select_workflow(None)?;
/// println!("Playing {} ({} steps)", workflow.name, workflow.steps.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// Workflow definitions, from `workflows/*.yaml` or the built-in set.
    pub workflows: Vec<Workflow>,
}

impl AppConfig {
    /// Find a workflow by name.
    pub fn find_workflow(&self, name: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|workflow| workflow.name == name)
    }

    /// Names of all loaded workflows.
    pub fn workflow_names(&self) -> Vec<&str> {
        self.workflows.iter().map(|w| w.name.as_str()).collect()
    }

    /// Pick the workflow to play.
    ///
    /// Uses `name` when given, else `default-workflow` from config.toml,
    /// else the built-in `incident-response` if loaded, else the first
    /// loaded workflow.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WorkflowNotFound`] if the requested name does
    /// not exist or nothing was loaded at all.
    pub fn select_workflow(&self, name: Option<&str>) -> ConfigResult<&Workflow> {
        let requested = name.or(self.global.default_workflow.as_deref());

        let selected = match requested {
            Some(name) => self.find_workflow(name),
            None => self
                .find_workflow(DEFAULT_WORKFLOW)
                .or_else(|| self.workflows.first()),
        };

        selected.ok_or_else(|| ConfigError::WorkflowNotFound {
            name: requested.unwrap_or("<default>").to_string(),
            available: self.workflow_names().join(", "),
        })
    }

    /// Player timing and copy derived from the global settings.
    pub fn player_settings(&self) -> PlayerSettings {
        PlayerSettings::from(&self.global)
    }
}

//! Configuration file loader for the `.agent-playback/` directory structure.
//!
//! This module loads and validates:
//! - `config.toml`: Global settings (timing, labels, default workflow)
//! - `workflows/*.yaml` / `*.yml`: Workflow definitions
//!
//! When the project has no workflows of its own, the workflows embedded
//! from `templates/workflows/` are used instead.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use crate::init::templates::{get_template, list_templates};
use ap_protocol::config_models::GlobalConfig;
use ap_protocol::workflow_models::Workflow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".agent-playback";

/// Loads all configuration from the `.agent-playback/` directory under `root`.
///
/// A missing directory, `config.toml` or `workflows/` folder is not an
/// error: defaults and the built-in workflows fill the gaps.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid TOML or YAML syntax
/// - A workflow is invalid (no name, no steps, duplicate name)
/// - Timing values are invalid (non-positive speed)
///
/// # Example
///
/// ```rust,no_run
/// use ap_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} workflows", config.workflows.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let ap_dir = root.join(CONFIG_DIR);

    if !ap_dir.exists() {
        debug!(dir = %ap_dir.display(), "no config directory, using built-in workflows");
        return Ok(AppConfig {
            global: GlobalConfig::default(),
            workflows: builtin_workflows()?,
        });
    }

    let global = load_global_config(&ap_dir)?;

    let mut workflows = load_workflows(&ap_dir)?;
    if workflows.is_empty() {
        workflows = builtin_workflows()?;
    }

    debug!(
        dir = %ap_dir.display(),
        workflows = workflows.len(),
        "loaded configuration"
    );
    Ok(AppConfig { global, workflows })
}

/// Parses the workflows embedded from `templates/workflows/`.
pub fn builtin_workflows() -> ConfigResult<Vec<Workflow>> {
    let mut workflows = Vec::new();
    let mut seen = HashSet::new();

    for template_path in list_templates("workflows/") {
        let path = PathBuf::from("templates").join(&template_path);
        let content = get_template(&template_path).ok_or_else(|| ConfigError::InvalidConfig {
            path: path.clone(),
            reason: "embedded template disappeared".to_string(),
        })?;
        let workflow = parse_workflow(&path, &content)?;
        validate_workflow(&path, &workflow, &mut seen)?;
        workflows.push(workflow);
    }

    Ok(workflows)
}

/// Loads global configuration from `config.toml`.
fn load_global_config(ap_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = ap_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    let speed = config.timing.speed;
    if !speed.is_finite() || speed <= 0.0 {
        return Err(ConfigError::InvalidConfig {
            path: config_path,
            reason: format!("timing.speed must be a positive number, got {speed}"),
        });
    }

    Ok(config)
}

/// Loads all workflow definitions from `workflows/*.yaml` and `*.yml`.
fn load_workflows(ap_dir: &Path) -> ConfigResult<Vec<Workflow>> {
    let workflows_dir = ap_dir.join("workflows");

    if !workflows_dir.exists() {
        return Ok(Vec::new());
    }

    let mut workflows = Vec::new();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(&workflows_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: workflows_dir.clone(),
            source,
        })?;

        let path = entry.path();

        let ext = path.extension().and_then(|s| s.to_str());
        if ext != Some("yaml") && ext != Some("yml") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let workflow = parse_workflow(path, &content)?;
        validate_workflow(path, &workflow, &mut seen)?;
        workflows.push(workflow);
    }

    Ok(workflows)
}

fn parse_workflow(path: &Path, content: &str) -> ConfigResult<Workflow> {
    serde_yaml::from_str(content).map_err(|source| ConfigError::YamlParse {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_workflow(
    path: &Path,
    workflow: &Workflow,
    seen: &mut HashSet<String>,
) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::InvalidConfig {
        path: path.to_path_buf(),
        reason,
    };

    if workflow.name.trim().is_empty() {
        return Err(invalid("workflow name must not be empty".to_string()));
    }
    if workflow.steps.is_empty() {
        return Err(invalid(format!(
            "workflow '{}' must have at least one step",
            workflow.name
        )));
    }
    if !seen.insert(workflow.name.clone()) {
        return Err(invalid(format!(
            "workflow '{}' is defined more than once",
            workflow.name
        )));
    }

    Ok(())
}

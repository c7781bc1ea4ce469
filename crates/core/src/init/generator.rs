//! Directory structure and file generation for `.agent-playback` initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::loader::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Workflow written in minimal mode.
const MINIMAL_WORKFLOW: &str = "workflows/incident-response.yaml";

/// Options for initializing a .agent-playback directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where .agent-playback will be created.
    pub target_dir: PathBuf,

    /// Overwrite existing .agent-playback directory if it exists.
    pub force: bool,

    /// Write only config.toml and the incident-response workflow.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a `.agent-playback` directory structure from the embedded templates.
///
/// ```text
/// .agent-playback/
/// ├── config.toml
/// └── workflows/
///     ├── incident-response.yaml
///     └── dependency-audit.yaml (unless minimal)
/// ```
///
/// Returns the paths written, relative to the `.agent-playback` directory.
///
/// # Errors
///
/// - [`InitError::DirectoryExists`] if the directory exists and `force` is off
/// - [`InitError::TemplateNotFound`] if an embedded template is missing
/// - I/O variants if the file system refuses a write
pub async fn generate_structure(options: InitOptions) -> InitResult<Vec<String>> {
    let ap_dir = options.target_dir.join(CONFIG_DIR);

    if ap_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(ap_dir));
    }

    fs::create_dir_all(ap_dir.join("workflows")).map_err(|source| InitError::DirectoryCreate {
        path: ap_dir.join("workflows"),
        source,
    })?;

    let mut written = vec!["config.toml".to_string()];
    if options.minimal {
        written.push(MINIMAL_WORKFLOW.to_string());
    } else {
        written.extend(list_templates("workflows/"));
    }

    for template_path in &written {
        write_template_file(&ap_dir, template_path)?;
    }

    debug!(dir = %ap_dir.display(), files = written.len(), "initialized config directory");
    Ok(written)
}

fn write_template_file(ap_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = ap_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })?;

    Ok(())
}

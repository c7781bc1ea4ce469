//! Embedded template files for `.agent-playback` initialization.
//!
//! This module uses `rust-embed` to embed template files from the project root
//! `templates/` directory into the binary at compile time. The same files back
//! `init` and the built-in workflows used when no project config exists.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// The path is calculated relative to the crate root:
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = project root `templates/`
///
/// During development with the `debug-embed` feature, files are read from the
/// filesystem at runtime, allowing for quick iteration without recompilation.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Arguments
/// * `path` - Relative path from templates root (e.g., "config.toml",
///   "workflows/incident-response.yaml")
///
/// # Example
/// ```
/// use ap_core::init::templates::get_template;
///
/// let config = get_template("config.toml").expect("config.toml should exist");
/// assert!(config.contains("[timing]"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files under `prefix`, sorted by path.
///
/// # Example
/// ```
/// use ap_core::init::templates::list_templates;
///
/// let workflows = list_templates("workflows/");
/// assert!(workflows.contains(&"workflows/incident-response.yaml".to_string()));
/// ```
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}

//! Main entry point for the ap-tui binary.
//!
//! Plays the configured default workflow of the current directory.

use anyhow::Result;
use ap_core::config::loader::load_config;
use ap_core::logging::{init_logging, LoggingConfig};
use ap_tui::run_app;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logging(LoggingConfig::for_tui(Level::WARN));

    let config = load_config(&std::env::current_dir()?).await?;
    run_app(config, None).await
}

//! Tracing subscriber setup shared by the binaries.

use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

// Binary crates log under their bin name, so `agent_playback` is listed too.
const LOG_TARGETS: [&str; 4] = ["ap_core", "ap_tui", "ap_cli", "agent_playback"];

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for agent-playback crates (default: WARN)
    pub level: Level,
    /// Write to stderr. Disabled while a TUI owns the terminal.
    pub console: bool,
    /// Colorize console output (default: true)
    pub colorize: bool,
    /// Directory for a daily rolling log file. `None` disables file output.
    pub log_dir: Option<PathBuf>,
    /// Log file name prefix (default: "agent-playback")
    pub log_file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            console: true,
            colorize: true,
            log_dir: None,
            log_file_name: "agent-playback".to_string(),
        }
    }
}

impl LoggingConfig {
    /// File-only logging under the temp directory, for when a TUI owns the
    /// terminal.
    pub fn for_tui(level: Level) -> Self {
        Self {
            level,
            console: false,
            log_dir: Some(std::env::temp_dir().join("agent-playback")),
            ..Self::default()
        }
    }
}

/// Keeps the file appender worker alive. Hold it until the program exits.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Filter directive for our crates at `level`, e.g. `ap_core=info,ap_tui=info`.
fn filter_directives(level: Level) -> String {
    let level = level.to_string().to_lowercase();
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `config.level` when set. Calling this twice is
/// harmless: the second subscriber is ignored.
pub fn init_logging(config: LoggingConfig) -> LogGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config.level)));

    let time_format = "%Y-%m-%d %H:%M:%S".to_string();
    let mut layers = Vec::new();

    if config.console {
        let console_layer = tracing_subscriber::fmt::layer()
            .with_ansi(config.colorize)
            .with_target(true)
            .with_timer(ChronoUtc::new(time_format.clone()))
            .with_writer(std::io::stderr)
            .boxed();
        layers.push(console_layer);
    }

    let mut file_guard = None;
    if let Some(log_dir) = &config.log_dir {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            let dir = log_dir.display();
            eprintln!("Failed to create log directory {dir}: {e}");
        } else {
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, log_dir, &config.log_file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            file_guard = Some(guard);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::new(time_format))
                .with_writer(non_blocking)
                .boxed();
            layers.push(file_layer);
        }
    }

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init();

    LogGuard {
        _file_guard: file_guard,
    }
}

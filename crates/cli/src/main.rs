//! `agent-playback` command-line entry point.
//!
//! Without a subcommand the interactive player screen is launched.

mod output;

use ap_core::config::loader::load_config;
use ap_core::init::{generate_structure, InitOptions};
use ap_core::logging::{init_logging, LoggingConfig};
use ap_core::player::WorkflowPlayer;
use ap_core::runtime::PlayerRuntime;
use ap_protocol::{Event, Op};
use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Result, WrapErr};
use colored::Colorize;
use output::EventPrinter;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::unbounded_channel;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "agent-playback", about = "Scripted agent workflow player")]
#[command(version)]
struct Cli {
    /// Project directory containing `.agent-playback/`
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive player (default)
    Tui {
        /// Workflow to play instead of the configured default
        #[arg(short, long)]
        workflow: Option<String>,
    },

    /// Play a workflow headlessly, printing events as they happen
    Play(PlayArgs),

    /// List available workflows
    List,

    /// Create a `.agent-playback/` directory from the built-in templates
    Init {
        /// Overwrite an existing `.agent-playback/` directory
        #[arg(long)]
        force: bool,

        /// Write only config.toml and the incident-response workflow
        #[arg(long)]
        minimal: bool,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Workflow to play instead of the configured default
    #[arg(short, long)]
    workflow: Option<String>,

    /// Drive the clock to completion without waiting
    #[arg(long)]
    instant: bool,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,

    /// Playback speed multiplier, overriding `timing.speed`
    #[arg(long)]
    speed: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Tui { workflow: None });
    let tui_mode = matches!(command, Commands::Tui { .. });

    let level = Level::from(cli.log_level);
    let _log_guard = init_logging(if tui_mode {
        LoggingConfig::for_tui(level)
    } else {
        LoggingConfig {
            level,
            ..LoggingConfig::default()
        }
    });

    match command {
        Commands::Tui { workflow } => {
            let config = load_config(&cli.root).await?;
            ap_tui::run_app(config, workflow.as_deref())
                .await
                .map_err(|e| eyre!(e))
        }
        Commands::Play(args) => play(&cli.root, args).await,
        Commands::List => list(&cli.root).await,
        Commands::Init { force, minimal } => init(&cli.root, force, minimal).await,
    }
}

async fn play(root: &Path, args: PlayArgs) -> Result<()> {
    let config = load_config(root).await?;
    let workflow = config.select_workflow(args.workflow.as_deref())?.clone();
    let printer = if args.json {
        EventPrinter::Json
    } else {
        EventPrinter::Human {
            step_titles: workflow.step_titles(),
        }
    };
    let player = WorkflowPlayer::new(workflow, config.player_settings())?;
    let (event_tx, mut event_rx) = unbounded_channel();
    let mut stdout = std::io::stdout().lock();

    if args.instant {
        let mut player = player.with_events(event_tx);
        player.run();
        let fired = player.run_until_idle();
        debug!(fired, at = player.now(), "instant playback finished");
        drop(player);

        while let Some(event) = event_rx.recv().await {
            printer.print(&mut stdout, &event)?;
        }
        return Ok(());
    }

    let speed = args.speed.unwrap_or(config.global.timing.speed);
    let runtime = PlayerRuntime::new(player, event_tx, speed).map_err(|e| eyre!(e))?;
    let (op_tx, op_rx) = unbounded_channel();
    let runtime_handle = tokio::spawn(runtime.run(op_rx));
    op_tx
        .send(Op::Run)
        .map_err(|_| eyre!("player runtime stopped before the run started"))?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    loop {
        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else {
                    break;
                };
                if matches!(event, Event::Snapshot { .. }) && !args.json {
                    continue;
                }
                if matches!(event, Event::RunCompleted { .. }) {
                    let _ = op_tx.send(Op::Shutdown);
                }
                printer.print(&mut stdout, &event)?;
                stdout.flush()?;
            }
            _ = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                let _ = op_tx.send(Op::Shutdown);
            }
        }
    }

    runtime_handle
        .await
        .wrap_err("player runtime panicked")?
        .map_err(|e| eyre!(e))?;
    if interrupted {
        return Err(eyre!("playback interrupted"));
    }
    Ok(())
}

async fn list(root: &Path) -> Result<()> {
    let config = load_config(root).await?;
    let default = config.select_workflow(None).ok().map(|w| w.name.clone());

    for workflow in &config.workflows {
        let marker = if Some(&workflow.name) == default.as_ref() {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{marker} {} {:>2} steps  {}",
            format!("{:<24}", workflow.name).bold(),
            workflow.steps.len(),
            workflow.description.dimmed()
        );
    }
    Ok(())
}

async fn init(root: &Path, force: bool, minimal: bool) -> Result<()> {
    let written = generate_structure(InitOptions {
        target_dir: root.to_path_buf(),
        force,
        minimal,
    })
    .await?;

    println!(
        "{} {}",
        "Initialized".green().bold(),
        root.join(ap_core::config::loader::CONFIG_DIR).display()
    );
    for path in written {
        println!("  {path}");
    }
    Ok(())
}

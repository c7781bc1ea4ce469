//! # ap-tui
//!
//! Terminal User Interface for agent-playback.
//!
//! This crate provides the interactive player screen. It drives an
//! `ap-core` [`PlayerRuntime`] over channels using the `Op` and `Event`
//! protocol defined in `ap-protocol`.

pub mod app;
pub mod event;
pub mod event_handler;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use anyhow::Result;
use ap_core::config::models::AppConfig;
use ap_core::player::WorkflowPlayer;
use ap_core::runtime::PlayerRuntime;
use ap_protocol::Op;
use tokio::sync::mpsc::unbounded_channel;

/// Run the player screen for `workflow` (or the configured default) until
/// the user quits.
pub async fn run_app(config: AppConfig, workflow: Option<&str>) -> Result<()> {
    let workflow = config.select_workflow(workflow)?.clone();
    let player = WorkflowPlayer::new(workflow, config.player_settings())?;

    let (op_tx, op_rx) = unbounded_channel();
    let (event_tx, event_rx) = unbounded_channel();
    let runtime = PlayerRuntime::new(player, event_tx, config.global.timing.speed)?;
    let runtime_handle = tokio::spawn(runtime.run(op_rx));

    let mut tui = Tui::init()?;
    let mut app = App::new(op_tx.clone(), event_rx);
    let result = app.run(&mut tui).await;
    tui.restore()?;

    let _ = op_tx.send(Op::Shutdown);
    runtime_handle.await??;
    result
}

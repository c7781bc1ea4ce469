//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that mirrors the player state
//! and the event loop using `tokio::select!`.

use anyhow::Result;
use ap_protocol::{Event, Op, PlayerPhase, PlayerSnapshot};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;

use crate::event_handler;
use crate::tui::{Tui, TuiEvent};
use crate::widgets::{render_steps, LogView};

const KEY_HINTS: &str = " r/Enter run · x reset · ↑↓ PgUp PgDn scroll · End follow · q quit";

/// Main TUI application state.
pub struct App {
    /// Mirror of the player state, kept current from the event stream.
    pub snapshot: PlayerSnapshot,
    /// Scroll state of the log panel.
    pub log_view: LogView,
    /// Channel to send operations to the runtime.
    pub op_tx: UnboundedSender<Op>,
    /// Channel to receive events from the runtime.
    pub event_rx: UnboundedReceiver<Event>,
    /// Flag to indicate if the application should exit.
    pub should_exit: bool,
}

impl App {
    /// Create a new App with communication channels.
    pub fn new(op_tx: UnboundedSender<Op>, event_rx: UnboundedReceiver<Event>) -> Self {
        Self {
            snapshot: PlayerSnapshot::default(),
            log_view: LogView::new(),
            op_tx,
            event_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Redraws after every batch of player events and every key press.
    /// Stops on a quit key or when the runtime goes away.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();
        tui.draw(|frame| self.render(frame))?;

        while !self.should_exit {
            select! {
                event = self.event_rx.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    self.handle_core_event(event);
                    while let Ok(event) = self.event_rx.try_recv() {
                        self.handle_core_event(event);
                    }
                }
                Some(tui_event) = tui_events.next() => {
                    if let TuiEvent::Key(key_event) = tui_event {
                        self.handle_key_event(key_event);
                    }
                }
            }

            if !self.should_exit {
                tui.draw(|frame| self.render(frame))?;
            }
        }

        Ok(())
    }

    /// Handle events from the player runtime.
    fn handle_core_event(&mut self, event: Event) {
        event_handler::handle_core_event(&mut self.snapshot, &mut self.log_view, event);
    }

    /// Handle keyboard events.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        self.should_exit = event_handler::handle_keyboard_event(
            key_event,
            &self.snapshot,
            &mut self.log_view,
            &self.op_tx,
        );
    }

    /// Render the TUI.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Header
                Constraint::Min(5),    // Steps + log
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);
        render_steps(frame, body[0], &self.snapshot);
        self.log_view.render(frame, body[1], &self.snapshot.log);

        let hints = Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, chunks[2]);
    }

    /// Render workflow name, phase, status line and the run trigger.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let (phase_label, phase_color) = match self.snapshot.phase {
            PlayerPhase::Idle => ("IDLE", Color::Gray),
            PlayerPhase::Running => ("RUNNING", Color::Yellow),
            PlayerPhase::Complete => ("COMPLETE", Color::Green),
        };

        let trigger_style = if self.snapshot.trigger.enabled {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Workflow: ", Style::default().fg(Color::Cyan)),
                Span::raw(self.snapshot.workflow_name.clone()),
                Span::raw("   "),
                Span::styled(
                    phase_label,
                    Style::default()
                        .fg(phase_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Status: ", Style::default().fg(Color::Cyan)),
                Span::raw(self.snapshot.status_text.clone()),
            ]),
            Line::from(Span::styled(
                format!("[ {} ]", self.snapshot.trigger.label),
                trigger_style,
            )),
        ];

        let header = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("agent-playback"),
        );
        frame.render_widget(header, area);
    }
}

//! Terminal setup and input streaming.
//!
//! [`Tui`] owns the ratatui terminal. It switches the terminal into raw
//! mode on the alternate screen and restores it on drop or panic.

use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::pin::Pin;
use tokio_stream::{Stream, StreamExt};

/// Type alias for the terminal backend we're using.
pub type TerminalBackend = CrosstermBackend<Stdout>;

/// Input events the app reacts to.
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    /// The terminal was resized and needs a redraw.
    Resize,
}

/// Main TUI wrapper.
pub struct Tui {
    terminal: Terminal<TerminalBackend>,
}

impl Tui {
    /// Enter raw mode on the alternate screen.
    pub fn init() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;
        set_panic_hook();

        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    /// Restore the terminal to its original state.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Stream of key presses and resizes from the terminal.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        let mut crossterm_events = crossterm::event::EventStream::new();

        let event_stream = async_stream::stream! {
            while let Some(event) = crossterm_events.next().await {
                match event {
                    Ok(Event::Key(key_event)) => yield TuiEvent::Key(key_event),
                    Ok(Event::Resize(_, _)) => yield TuiEvent::Resize,
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        };

        Box::pin(event_stream)
    }

    /// Draw the UI with the provided function.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Set a panic hook that restores the terminal before panicking.
fn set_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

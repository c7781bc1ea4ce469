//! Line-oriented rendering of player events for headless playback.

use ap_protocol::{Event, LogEntry, LogKind, StepPhase};
use colored::Colorize;
use std::io::Write;

/// How `play` prints the event stream.
pub enum EventPrinter {
    /// One JSON object per event.
    Json,
    /// Colored, human-readable lines.
    Human { step_titles: Vec<String> },
}

impl EventPrinter {
    pub fn print(&self, out: &mut impl Write, event: &Event) -> std::io::Result<()> {
        match self {
            EventPrinter::Json => {
                let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
                writeln!(out, "{line}")
            }
            EventPrinter::Human { step_titles } => match human_line(step_titles, event) {
                Some(line) => writeln!(out, "{line}"),
                None => Ok(()),
            },
        }
    }
}

fn human_line(step_titles: &[String], event: &Event) -> Option<String> {
    match event {
        Event::RunStarted { workflow_name, .. } => {
            Some(format!("{} {}", "▶".cyan().bold(), workflow_name.bold()))
        }
        Event::StepStateChanged {
            step_index,
            phase: StepPhase::Active,
        } => {
            let title = step_titles.get(*step_index).map(String::as_str).unwrap_or("");
            Some(format!(
                "{}",
                format!("── Step {}/{}: {title}", step_index + 1, step_titles.len()).bold()
            ))
        }
        Event::StatusChanged { text } => Some(format!("   {}", text.dimmed())),
        Event::LogAppended { entry } => Some(log_line(entry)),
        _ => None,
    }
}

fn log_line(entry: &LogEntry) -> String {
    let at = format!("[{:>6}ms]", entry.at).dimmed();
    match entry.kind {
        LogKind::Standby => format!("{at} {}", entry.message.dimmed()),
        LogKind::Agent => format!("{at} {} {}", "Agent:".cyan(), entry.message),
        LogKind::Success => format!("{at} {}", entry.to_string().green()),
    }
}

//! Step table showing every step of the workflow and its phase.

use ap_protocol::{PlayerSnapshot, StepPhase};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

fn phase_style(phase: StepPhase) -> Style {
    match phase {
        StepPhase::Pending => Style::default().fg(Color::DarkGray),
        StepPhase::Active => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        StepPhase::Complete => Style::default().fg(Color::Green),
    }
}

/// Renders the workflow steps as a table, highlighting the active step.
pub fn render_steps(frame: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let rows: Vec<Row> = snapshot
        .step_titles
        .iter()
        .zip(&snapshot.step_states)
        .enumerate()
        .map(|(i, (title, phase))| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(title.clone()),
                Cell::from(phase.label()).style(phase_style(*phase)),
            ])
        })
        .collect();

    let header = Row::new(vec![Cell::from("#"), Cell::from("Step"), Cell::from("State")])
        .style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        );

    let widths = [
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(10),
    ];

    let title = format!(
        "Steps {}/{}",
        snapshot.completed_steps(),
        snapshot.step_titles.len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default();
    table_state.select(snapshot.current_step.filter(|i| {
        snapshot.step_states.get(*i) == Some(&StepPhase::Active)
    }));

    frame.render_stateful_widget(table, area, &mut table_state);
}

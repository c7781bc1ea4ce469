//! Scrollable view of the player log.
//!
//! The view follows the newest entry until the user scrolls up, and picks
//! following back up once they scroll to the bottom again (or press End).

use crate::event::EventStatus;
use ap_protocol::{LogEntry, LogKind};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Log panel state.
#[derive(Debug)]
pub struct LogView {
    /// Lines scrolled from the top. Ignored while following.
    pub scroll_offset: usize,
    /// Stick to the newest entry.
    pub follow: bool,
    /// Inner height of the panel at the last render.
    viewport_height: usize,
}

impl LogView {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            follow: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self, total_lines: usize) -> usize {
        total_lines.saturating_sub(self.viewport_height)
    }

    /// Offset actually used for drawing `total_lines` lines.
    pub fn effective_offset(&self, total_lines: usize) -> usize {
        let max = self.max_offset(total_lines);
        if self.follow {
            max
        } else {
            self.scroll_offset.min(max)
        }
    }

    /// Render `entries` into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, entries: &[LogEntry]) {
        self.viewport_height = area.height.saturating_sub(2) as usize;

        let title = if self.follow { "Log" } else { "Log (scrolled)" };
        let block = Block::default().borders(Borders::ALL).title(title);

        let lines: Vec<Line> = entries.iter().map(entry_line).collect();
        let offset = self.effective_offset(lines.len());
        let total_lines = lines.len();

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((offset as u16, 0));
        frame.render_widget(paragraph, area);

        if total_lines > self.viewport_height {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(total_lines)
                .viewport_content_length(self.viewport_height)
                .position(offset);

            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    /// Handle scrolling keys for a log of `total_lines` lines.
    pub fn handle_key_event(&mut self, key_event: KeyEvent, total_lines: usize) -> EventStatus {
        let page = self.viewport_height.max(1);
        let current = self.effective_offset(total_lines);
        let max = self.max_offset(total_lines);

        let target = match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => current.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (current + 1).min(max),
            KeyCode::PageUp => current.saturating_sub(page),
            KeyCode::PageDown => (current + page).min(max),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End | KeyCode::Char('G') => max,
            _ => return EventStatus::NotConsumed,
        };

        self.scroll_offset = target;
        self.follow = target >= max;
        EventStatus::Consumed
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}

fn entry_line(entry: &LogEntry) -> Line<'static> {
    match entry.kind {
        LogKind::Standby => Line::from(Span::styled(
            entry.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        LogKind::Agent => Line::from(vec![
            Span::styled("Agent: ", Style::default().fg(Color::Cyan)),
            Span::raw(entry.message.clone()),
        ]),
        LogKind::Success => Line::from(Span::styled(
            entry.to_string(),
            Style::default().fg(Color::Green),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn create_test_entries(count: usize) -> Vec<LogEntry> {
        (0..count)
            .map(|i| LogEntry::new(LogKind::Agent, format!("Line {i}"), i as u64))
            .collect()
    }

    fn render(view: &mut LogView, entries: &[LogEntry], height: u16) -> String {
        let backend = TestBackend::new(60, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area(), entries))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_entry_prefixes() {
        let mut view = LogView::new();
        let entries = vec![
            LogEntry::new(LogKind::Agent, "Checking dashboards.", 0),
            LogEntry::new(LogKind::Success, "Dashboards green.", 10),
        ];

        let content = render(&mut view, &entries, 10);

        assert!(content.contains("Agent: Checking dashboards."));
        assert!(content.contains("✔ Dashboards green."));
    }

    #[test]
    fn test_follows_newest_entry() {
        let mut view = LogView::new();
        let entries = create_test_entries(20);

        // 8 rows high leaves 6 visible lines.
        let content = render(&mut view, &entries, 8);

        assert!(content.contains("Line 19"));
        assert!(content.contains("Line 14"));
        assert!(!content.contains("Line 13"));
    }

    #[test]
    fn test_scrolling_up_stops_following() {
        let mut view = LogView::new();
        let entries = create_test_entries(20);
        render(&mut view, &entries, 8);

        let status = view.handle_key_event(KeyEvent::from(KeyCode::Up), entries.len());

        assert_eq!(status, EventStatus::Consumed);
        assert!(!view.follow);
        assert_eq!(view.scroll_offset, 13);

        let more = create_test_entries(25);
        let content = render(&mut view, &more, 8);
        assert!(content.contains("Line 13"));
        assert!(!content.contains("Line 24"));
    }

    #[test]
    fn test_end_resumes_following() {
        let mut view = LogView::new();
        let entries = create_test_entries(20);
        render(&mut view, &entries, 8);
        view.handle_key_event(KeyEvent::from(KeyCode::Home), entries.len());
        assert_eq!(view.effective_offset(entries.len()), 0);

        view.handle_key_event(KeyEvent::from(KeyCode::End), entries.len());

        assert!(view.follow);
        assert_eq!(view.effective_offset(30), 24);
    }

    #[test]
    fn test_scrolling_down_to_bottom_resumes_following() {
        let mut view = LogView::new();
        let entries = create_test_entries(10);
        render(&mut view, &entries, 8);
        view.handle_key_event(KeyEvent::from(KeyCode::Up), entries.len());
        assert!(!view.follow);

        view.handle_key_event(KeyEvent::from(KeyCode::Down), entries.len());

        assert!(view.follow);
    }

    #[test]
    fn test_page_keys() {
        let mut view = LogView::new();
        let entries = create_test_entries(40);
        render(&mut view, &entries, 12);

        view.handle_key_event(KeyEvent::from(KeyCode::PageUp), entries.len());
        assert_eq!(view.scroll_offset, 20);

        view.handle_key_event(KeyEvent::from(KeyCode::PageUp), entries.len());
        view.handle_key_event(KeyEvent::from(KeyCode::PageUp), entries.len());
        assert_eq!(view.scroll_offset, 0);

        view.handle_key_event(KeyEvent::from(KeyCode::PageDown), entries.len());
        assert_eq!(view.scroll_offset, 10);
    }

    #[test]
    fn test_other_keys_not_consumed() {
        let mut view = LogView::new();

        let status = view.handle_key_event(KeyEvent::from(KeyCode::Char('r')), 5);

        assert_eq!(status, EventStatus::NotConsumed);
        assert!(view.follow);
    }
}

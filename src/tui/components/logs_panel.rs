//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer: fetch starts, stale results
//! being dropped, failures. The panel never takes focus; it follows the newest
//! entry and receives the entries each frame instead of owning them.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    scroll: ScrollState,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
        let viewport = area.height.saturating_sub(2) as usize;
        self.scroll.update_dimensions(entries.len(), viewport);

        let line_width = area.width.saturating_sub(3) as usize;
        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(truncate_to_width(&format_log_entry(entry), line_width))
                    .style(log_level_style(&entry.level, theme))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.panel_logs))
                .title(format!(" Logs ({}) ", entries.len())),
        );
        f.render_widget(list, area);

        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal);
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.discount),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: chrono::Utc::now(),
            level: LogLevel::Info,
            target: "loga::fetch".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_follows_newest_entry() {
        let entries: Vec<LogEntry> = (1..=10).map(|i| entry(&format!("page {}", i))).collect();
        let mut panel = LogsPanel::new();
        let theme = Theme::loga();

        // 3 entry lines visible
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                panel.render(f, area, &entries, &theme)
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("page 10"));
        assert!(!text.contains("page 7 "));
        assert_eq!(panel.scroll.visible_range(), (7, 10));
    }
}

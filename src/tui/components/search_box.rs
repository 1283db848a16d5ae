//! Search box component
//!
//! Holds the text being typed. Every edit emits `Intent::SetSearch` with the
//! full text, so each keystroke starts a new filter epoch and any fetch still
//! in flight for the previous text is discarded when it lands.

use crate::storefront::Intent;
use crate::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crate::util::truncate_to_width;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PLACEHOLDER: &str = "Search suits, dresses, accessories...";

#[derive(Debug, Default)]
pub struct SearchBox {
    text: String,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Forget the typed text without emitting (used by full reset)
    pub fn clear(&mut self) {
        self.text.clear();
    }

    fn emit(&self) -> Handled {
        Handled::Emit(Intent::SetSearch(self.text.clone()))
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let inner_width = area.width.saturating_sub(4) as usize;

        let content = if self.text.is_empty() && !focused {
            Line::from(Span::styled(
                truncate_to_width(PLACEHOLDER, inner_width),
                Style::default().fg(theme.muted),
            ))
        } else {
            // Keep the tail visible while typing past the box width
            let shown = tail_to_width(&self.text, inner_width.saturating_sub(1));
            let mut spans = vec![Span::styled(shown, Style::default().fg(theme.foreground))];
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
            }
            Line::from(spans)
        };

        let border = theme.panel_border(crate::tui::scroll::FocusablePanel::Search, focused);
        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border))
                .title(" / Search "),
        );
        f.render_widget(paragraph, area);
    }
}

/// The rightmost part of `s` that fits in `cols` columns
fn tail_to_width(s: &str, cols: usize) -> String {
    if s.width() <= cols {
        return s.to_string();
    }
    let mut start = 0;
    for (idx, _) in s.char_indices() {
        if s[idx..].width() <= cols {
            start = idx;
            break;
        }
    }
    s[start..].to_string()
}

impl Interactive for SearchBox {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.text.is_empty() {
                    return Handled::Yes;
                }
                self.text.clear();
                self.emit()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push(c);
                self.emit()
            }
            KeyCode::Backspace => {
                if self.text.pop().is_some() {
                    self.emit()
                } else {
                    Handled::Yes
                }
            }
            KeyCode::Esc => {
                if self.text.is_empty() {
                    Handled::No // Nothing to clear, let App move focus
                } else {
                    self.text.clear();
                    self.emit()
                }
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> &'static str {
        "type:filter  Bksp:delete  Esc:clear  Tab:next"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_each_keystroke_emits_full_text() {
        let mut search = SearchBox::new();
        assert_eq!(
            search.handle_key(press(KeyCode::Char('c'))),
            Handled::Emit(Intent::SetSearch("c".to_string()))
        );
        search.handle_key(press(KeyCode::Char('o')));
        assert_eq!(
            search.handle_key(press(KeyCode::Char('a'))),
            Handled::Emit(Intent::SetSearch("coa".to_string()))
        );
        assert_eq!(
            search.handle_key(press(KeyCode::Backspace)),
            Handled::Emit(Intent::SetSearch("co".to_string()))
        );
    }

    #[test]
    fn test_escape_clears_then_bubbles() {
        let mut search = SearchBox::new();
        search.handle_key(press(KeyCode::Char('x')));
        assert_eq!(
            search.handle_key(press(KeyCode::Esc)),
            Handled::Emit(Intent::SetSearch(String::new()))
        );
        assert_eq!(search.handle_key(press(KeyCode::Esc)), Handled::No);
    }

    #[test]
    fn test_backspace_on_empty_does_not_emit() {
        let mut search = SearchBox::new();
        assert_eq!(search.handle_key(press(KeyCode::Backspace)), Handled::Yes);
    }

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("winter coat", 4), "coat");
        assert_eq!(tail_to_width("coat", 10), "coat");
    }
}

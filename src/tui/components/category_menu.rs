//! Category menu component
//!
//! Checkbox list over the fixed menu labels. The menu owns only its cursor;
//! which labels are checked is read from the storefront's filter at render
//! time, so a full reset shows up without the menu being told.

use crate::catalog::CATEGORIES;
use crate::filter::FilterState;
use crate::storefront::Intent;
use crate::theme::Theme;
use crate::tui::scroll::FocusablePanel;
use crate::tui::traits::{Handled, Interactive};
use crate::util::truncate_to_width;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

#[derive(Debug, Default)]
pub struct CategoryMenu {
    cursor: usize,
}

impl CategoryMenu {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Label under the cursor
    pub fn current(&self) -> &'static str {
        CATEGORIES[self.cursor]
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        filter: &FilterState,
        theme: &Theme,
        focused: bool,
    ) {
        let label_width = area.width.saturating_sub(6) as usize;

        let items: Vec<ListItem> = CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let checked = filter.is_selected(label);
                let mark = if checked { "[x]" } else { "[ ]" };
                let text = format!("{} {}", mark, truncate_to_width(label, label_width));

                let style = if focused && i == self.cursor {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else if checked {
                    Style::default().fg(theme.accent)
                } else {
                    Style::default().fg(theme.foreground)
                };
                ListItem::new(text).style(style)
            })
            .collect();

        let selected = filter.selected_categories().len();
        let title = if selected == 0 {
            " Categories ".to_string()
        } else {
            format!(" Categories ({}) ", selected)
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(
                    Style::default().fg(theme.panel_border(FocusablePanel::Categories, focused)),
                )
                .title(title),
        );
        f.render_widget(list, area);
    }
}

impl Interactive for CategoryMenu {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(CATEGORIES.len() - 1);
                Handled::Yes
            }
            KeyCode::Home => {
                self.cursor = 0;
                Handled::Yes
            }
            KeyCode::End => {
                self.cursor = CATEGORIES.len() - 1;
                Handled::Yes
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                Handled::Emit(Intent::ToggleCategory(self.current().to_string()))
            }
            KeyCode::Char('c') => Handled::Emit(Intent::ClearCategories),
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:move  Space:toggle  c:clear all"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut menu = CategoryMenu::new();
        menu.handle_key(press(KeyCode::Up));
        assert_eq!(menu.cursor(), 0);

        for _ in 0..20 {
            menu.handle_key(press(KeyCode::Down));
        }
        assert_eq!(menu.cursor(), CATEGORIES.len() - 1);
    }

    #[test]
    fn test_space_toggles_label_under_cursor() {
        let mut menu = CategoryMenu::new();
        menu.handle_key(press(KeyCode::Down));
        assert_eq!(
            menu.handle_key(press(KeyCode::Char(' '))),
            Handled::Emit(Intent::ToggleCategory("Dresses".to_string()))
        );
    }

    #[test]
    fn test_clear_all() {
        let mut menu = CategoryMenu::new();
        assert_eq!(
            menu.handle_key(press(KeyCode::Char('c'))),
            Handled::Emit(Intent::ClearCategories)
        );
    }
}

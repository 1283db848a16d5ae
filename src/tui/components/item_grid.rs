//! Item grid component
//!
//! Product cards laid out in rows of `columns` cards, followed by one extra
//! row: the scroll marker. Scrolling counts whole card rows, so the marker is
//! visible exactly when its row index falls inside the visible range. The grid
//! records that after every render; the App reports it to the scroll sentinel.
//!
//! ```text
//! ┌ Products ────────────────────────────────────┐
//! │ ╭──────────────╮ ╭──────────────╮ ╭────────╮ │  row 0
//! │ │ Evening Gown │ │ ...          │ │ ...    │ │
//! │ ╰──────────────╯ ╰──────────────╯ ╰────────╯ │
//! │ ...                                          │  row n-1
//! │              ⠋ Loading more...               │  marker row
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Empty, loading and failed first pages replace the grid with a full-panel
//! message; no marker is shown in those states.

use super::formatters::{format_price, price_label};
use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::catalog::{Product, ProductId};
use crate::loader::LoaderView;
use crate::sentinel::MarkerId;
use crate::storefront::Intent;
use crate::theme::Theme;
use crate::tui::scroll::{FocusablePanel, ScrollState};
use crate::tui::traits::{Handled, Interactive, Scrollable};
use crate::util::truncate_to_width;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Terminal lines per card row (border, name, category, price, border)
pub const CARD_HEIGHT: u16 = 5;

pub struct ItemGrid {
    /// Scroll over card rows plus the marker row
    scroll: ScrollState,
    /// Index of the selected product
    selected: usize,
    /// Ids of the loaded products, in display order
    ids: Vec<ProductId>,
    /// Cards per row from the last render
    columns: usize,
    /// Marker for the epoch currently displayed
    marker: MarkerId,
    /// Whether the marker row was inside the viewport on the last render
    marker_visible: bool,
}

impl ItemGrid {
    pub fn new(marker: MarkerId) -> Self {
        Self {
            scroll: ScrollState::manual(),
            selected: 0,
            ids: Vec::new(),
            columns: 1,
            marker,
            marker_visible: false,
        }
    }

    /// Start over for a new filter epoch
    pub fn reset(&mut self, marker: MarkerId) {
        self.scroll.reset();
        self.selected = 0;
        self.ids.clear();
        self.marker = marker;
        self.marker_visible = false;
    }

    /// Mirror the loaded products (call after the item list changes)
    pub fn sync_items(&mut self, items: &[Product]) {
        self.ids = items.iter().map(|p| p.id).collect();
        if self.selected >= self.ids.len() {
            self.selected = self.ids.len().saturating_sub(1);
        }
    }

    pub fn marker(&self) -> MarkerId {
        self.marker
    }

    pub fn marker_visible(&self) -> bool {
        self.marker_visible
    }

    pub fn selected_id(&self) -> Option<ProductId> {
        self.ids.get(self.selected).copied()
    }

    /// Number of card rows (excluding the marker row)
    fn card_rows(&self) -> usize {
        self.ids.len().div_ceil(self.columns.max(1))
    }

    fn marker_row(&self) -> usize {
        self.card_rows()
    }

    fn row_of(&self, index: usize) -> usize {
        index / self.columns.max(1)
    }

    fn select(&mut self, index: usize) {
        if self.ids.is_empty() {
            return;
        }
        self.selected = index.min(self.ids.len() - 1);
        let row = self.row_of(self.selected);
        self.scroll.scroll_to_include(row);
    }

    fn select_down(&mut self) {
        if self.ids.is_empty() {
            self.scroll.scroll_down();
            return;
        }
        let target = self.selected + self.columns;
        if target < self.ids.len() {
            self.select(target);
        } else if self.row_of(self.selected) + 1 < self.card_rows() {
            // Partial last row below: land on its last card
            self.select(self.ids.len() - 1);
        } else {
            // Already on the last row: bring the marker into view
            let marker_row = self.marker_row();
            self.scroll.scroll_to_include(marker_row);
        }
    }

    fn select_up(&mut self) {
        if self.selected >= self.columns {
            self.select(self.selected - self.columns);
        } else {
            self.scroll.scroll_up();
        }
    }

    fn page_rows(&self) -> usize {
        self.scroll.viewport().max(1)
    }

    /// Render the grid for `view` and record marker visibility
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        view: &LoaderView<'_>,
        theme: &Theme,
        focused: bool,
        columns: usize,
        spinner: char,
    ) {
        let title = if view.items.is_empty() {
            " Products ".to_string()
        } else {
            format!(" Products ({}) ", view.items.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(FocusablePanel::Grid, focused)))
            .title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.columns = columns.max(1);

        if view.items.is_empty() {
            if let Some(message) = empty_state_message(view, spinner, theme) {
                self.marker_visible = false;
                self.scroll.update_dimensions(0, 0);
                let y = inner.y + inner.height.saturating_sub(message.height() as u16) / 2;
                let message_area = Rect::new(inner.x, y, inner.width, inner.height - (y - inner.y));
                f.render_widget(
                    Paragraph::new(message)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    message_area,
                );
                return;
            }
        }

        let viewport_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
        self.scroll
            .update_dimensions(self.card_rows() + 1, viewport_rows);

        let (start, end) = self.scroll.visible_range();
        self.marker_visible = (start..end).contains(&self.marker_row());

        for (slot, row) in (start..end).enumerate() {
            let y = inner.y + slot as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(inner.bottom().saturating_sub(y));
            let row_area = Rect::new(inner.x, y, inner.width, height);

            if row == self.marker_row() {
                let footer = footer_line(view, spinner, theme);
                let footer_area = Rect::new(row_area.x, row_area.y + 1, row_area.width, 1);
                f.render_widget(
                    Paragraph::new(footer).alignment(Alignment::Center),
                    footer_area.intersection(inner),
                );
                continue;
            }

            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, self.columns as u32); self.columns])
                .split(row_area);

            for (col, cell) in cells.iter().enumerate() {
                let index = row * self.columns + col;
                if let Some(product) = view.items.get(index) {
                    let selected = focused && index == self.selected;
                    render_card(f, *cell, product, theme, selected);
                }
            }
        }

        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Arrows);
    }
}

/// Full-panel message for the states without any cards
fn empty_state_message(
    view: &LoaderView<'_>,
    spinner: char,
    theme: &Theme,
) -> Option<ratatui::text::Text<'static>> {
    let muted = Style::default().fg(theme.muted);

    if let Some(error) = view.last_error {
        return Some(ratatui::text::Text::from(vec![
            Line::from(Span::styled(
                "Could not load products",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(error.to_string(), muted)),
            Line::raw(""),
            Line::from(Span::styled("Press r to retry", Style::default().fg(theme.accent))),
        ]));
    }
    if view.is_loading {
        return Some(ratatui::text::Text::from(Line::from(Span::styled(
            format!("{} Loading products...", spinner),
            Style::default().fg(theme.accent),
        ))));
    }
    if view.is_empty_result() {
        return Some(ratatui::text::Text::from(vec![
            Line::from(Span::styled(
                "No results",
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Nothing matches the selected categories and search.",
                muted,
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Press R to reset all filters",
                Style::default().fg(theme.accent),
            )),
        ]));
    }
    None
}

/// Content of the marker row
fn footer_line(view: &LoaderView<'_>, spinner: char, theme: &Theme) -> Line<'static> {
    if view.is_loading {
        Line::from(Span::styled(
            format!("{} Loading more...", spinner),
            Style::default().fg(theme.accent),
        ))
    } else if let Some(error) = view.last_error {
        Line::from(vec![
            Span::styled(format!("{}  ", error), Style::default().fg(theme.error)),
            Span::styled("r:retry", Style::default().fg(theme.accent)),
        ])
    } else if !view.has_more {
        Line::from(Span::styled(
            format!("End of results · {} products", view.items.len()),
            Style::default().fg(theme.muted),
        ))
    } else {
        Line::from(Span::styled(
            "↓ more products",
            Style::default().fg(theme.muted),
        ))
    }
}

fn render_card(f: &mut Frame, area: Rect, product: &Product, theme: &Theme, selected: bool) {
    let text_width = area.width.saturating_sub(2) as usize;

    let border_style = if selected {
        Style::default()
            .fg(theme.selection)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };
    let name_style = if selected {
        Style::default()
            .fg(theme.selection_fg)
            .bg(theme.selection)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD)
    };

    let price_line = match product.discount_percent {
        Some(percent) if percent > 0 => Line::from(vec![
            Span::styled(
                truncate_to_width(&format_price(product.final_price()), text_width),
                Style::default().fg(theme.price),
            ),
            Span::styled(format!(" -{}%", percent), Style::default().fg(theme.discount)),
        ]),
        _ => Line::from(Span::styled(
            truncate_to_width(&price_label(product), text_width),
            Style::default().fg(theme.price),
        )),
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&product.name, text_width),
            name_style,
        )),
        Line::from(Span::styled(
            truncate_to_width(&product.category, text_width),
            Style::default().fg(theme.muted),
        )),
        price_line,
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(border_style),
    );
    f.render_widget(card, area);
}

impl Scrollable for ItemGrid {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for ItemGrid {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_down();
                Handled::Yes
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_up();
                Handled::Yes
            }
            KeyCode::Right => {
                self.select(self.selected + 1);
                Handled::Yes
            }
            KeyCode::Left => {
                self.select(self.selected.saturating_sub(1));
                Handled::Yes
            }
            KeyCode::PageDown => {
                let step = self.page_rows() * self.columns;
                self.page_down();
                self.select(self.selected + step);
                Handled::Yes
            }
            KeyCode::PageUp => {
                let step = self.page_rows() * self.columns;
                self.page_up();
                self.select(self.selected.saturating_sub(step));
                Handled::Yes
            }
            KeyCode::Home => {
                self.scroll_to_top();
                self.select(0);
                Handled::Yes
            }
            KeyCode::End => {
                if !self.ids.is_empty() {
                    self.selected = self.ids.len() - 1;
                }
                self.scroll_to_bottom();
                Handled::Yes
            }
            KeyCode::Char('a') => match self.selected_id() {
                Some(id) => Handled::Emit(Intent::AddToCart(id)),
                None => Handled::Yes,
            },
            KeyCode::Char('b') => match self.selected_id() {
                Some(id) => Handled::Emit(Intent::BuyNow(id)),
                None => Handled::Yes,
            },
            KeyCode::Char('r') => Handled::Emit(Intent::Retry),
            KeyCode::Char('R') => Handled::Emit(Intent::ResetAll),
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓←→:browse  Enter:details  a:add to cart  b:buy  r:retry  R:reset"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalog;
    use crate::loader::{Epoch, FetchError};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn marker() -> MarkerId {
        MarkerId::for_epoch(Epoch::default().next())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(grid: &mut ItemGrid, view: &LoaderView<'_>, width: u16, height: u16) -> String {
        let theme = Theme::loga();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                grid.render(f, area, view, &theme, true, 3, '*')
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_renders_cards_and_marker_when_everything_fits() {
        let catalog = MockCatalog::new();
        let items = &catalog.products()[..8];
        let view = LoaderView {
            items,
            is_loading: false,
            has_more: true,
            last_error: None,
        };

        let mut grid = ItemGrid::new(marker());
        grid.sync_items(items);
        let text = draw(&mut grid, &view, 100, 30);

        assert!(text.contains("Premium Business Suit"));
        assert!(text.contains("Formal Trousers"));
        assert!(text.contains("8,999.00 ETB"));
        assert!(text.contains("more products"));
        assert!(grid.marker_visible());
    }

    #[test]
    fn test_marker_hidden_until_scrolled_into_view() {
        let catalog = MockCatalog::new();
        let items = &catalog.products()[..8];
        let view = LoaderView {
            items,
            is_loading: false,
            has_more: true,
            last_error: None,
        };

        // 12 lines: 10 inner lines, two card rows of three visible
        let mut grid = ItemGrid::new(marker());
        grid.sync_items(items);
        draw(&mut grid, &view, 100, 12);
        assert!(!grid.marker_visible());

        grid.handle_key(press(KeyCode::End));
        draw(&mut grid, &view, 100, 12);
        assert!(grid.marker_visible());
        assert_eq!(grid.selected_id(), Some(ProductId(8)));
    }

    #[test]
    fn test_down_on_last_row_reveals_marker() {
        let catalog = MockCatalog::new();
        let items = &catalog.products()[..6];
        let view = LoaderView {
            items,
            is_loading: false,
            has_more: true,
            last_error: None,
        };

        let mut grid = ItemGrid::new(marker());
        grid.sync_items(items);
        draw(&mut grid, &view, 100, 12);
        assert!(!grid.marker_visible());

        grid.handle_key(press(KeyCode::Down)); // row 1
        grid.handle_key(press(KeyCode::Down)); // last row, scrolls to marker
        draw(&mut grid, &view, 100, 12);
        assert!(grid.marker_visible());
    }

    #[test]
    fn test_loading_view() {
        let view = LoaderView {
            items: &[],
            is_loading: true,
            has_more: true,
            last_error: None,
        };
        let mut grid = ItemGrid::new(marker());
        let text = draw(&mut grid, &view, 80, 20);
        assert!(text.contains("Loading products..."));
        assert!(!grid.marker_visible());
    }

    #[test]
    fn test_no_results_view_offers_reset() {
        let view = LoaderView {
            items: &[],
            is_loading: false,
            has_more: false,
            last_error: None,
        };
        let mut grid = ItemGrid::new(marker());
        let text = draw(&mut grid, &view, 80, 20);
        assert!(text.contains("No results"));
        assert!(text.contains("Press R to reset all filters"));
        assert!(!grid.marker_visible());
    }

    #[test]
    fn test_error_view_offers_retry() {
        let error = FetchError::FetchFailed("catalog.json missing".to_string());
        let view = LoaderView {
            items: &[],
            is_loading: false,
            has_more: true,
            last_error: Some(&error),
        };
        let mut grid = ItemGrid::new(marker());
        let text = draw(&mut grid, &view, 80, 20);
        assert!(text.contains("Could not load products"));
        assert!(text.contains("Press r to retry"));
    }

    #[test]
    fn test_end_of_results_footer() {
        let catalog = MockCatalog::new();
        let items = catalog.products();
        let view = LoaderView {
            items,
            is_loading: false,
            has_more: false,
            last_error: None,
        };
        let mut grid = ItemGrid::new(marker());
        grid.sync_items(items);
        let text = draw(&mut grid, &view, 100, 40);
        assert!(text.contains("End of results · 16 products"));
    }

    #[test]
    fn test_cart_keys_emit_selected_product() {
        let catalog = MockCatalog::new();
        let mut grid = ItemGrid::new(marker());
        grid.sync_items(&catalog.products()[..8]);

        grid.handle_key(press(KeyCode::Right));
        assert_eq!(
            grid.handle_key(press(KeyCode::Char('a'))),
            Handled::Emit(Intent::AddToCart(ProductId(2)))
        );
        assert_eq!(
            grid.handle_key(press(KeyCode::Char('R'))),
            Handled::Emit(Intent::ResetAll)
        );
    }

    #[test]
    fn test_reset_clears_selection_and_marker() {
        let catalog = MockCatalog::new();
        let mut grid = ItemGrid::new(marker());
        grid.sync_items(&catalog.products()[..8]);
        grid.handle_key(press(KeyCode::Right));

        let next = MarkerId::for_epoch(Epoch::default().next().next());
        grid.reset(next);
        assert_eq!(grid.marker(), next);
        assert_eq!(grid.selected_id(), None);
        assert!(!grid.marker_visible());
    }
}

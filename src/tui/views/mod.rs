// Views module - screen-level rendering logic
//
// One storefront screen:
//
// ┌ header: brand │ search │ cart │ sign in ┐
// ├ categories ┬ product grid ──────────────┤
// │            │                            │
// ├ logs ──────┴────────────────────────────┤
// └ status bar ─────────────────────────────┘
//
// Modals and toasts are drawn on top.

mod modal;

use super::app::App;
use super::layout::Breakpoint;
use super::scroll::FocusablePanel;
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

const HEADER_HEIGHT: u16 = 3;
const LOGS_HEIGHT: u16 = 6;
const STATUS_HEIGHT: u16 = 2;
/// Room for at least one card row inside the grid border
const CARD_ROWS_MIN: u16 = components::item_grid::CARD_HEIGHT + 2;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Apply theme background to entire frame (None keeps the terminal's own)
    let bg_block =
        Block::default().style(Style::default().bg(app.theme.background.unwrap_or(Color::Reset)));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(CARD_ROWS_MIN),
            Constraint::Length(LOGS_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(f.area());

    components::render_header(f, chunks[0], app);

    let bp = Breakpoint::from_width(f.area().width);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(bp.menu_width()), Constraint::Min(20)])
        .split(chunks[1]);

    app.menu.render(
        f,
        body[0],
        app.storefront.filter(),
        &app.theme,
        app.is_focused(FocusablePanel::Categories),
    );

    let focused = app.is_focused(FocusablePanel::Grid);
    let spinner = app.spinner_char();
    let view = app.storefront.view();
    app.grid.render(
        f,
        body[1],
        &view,
        &app.theme,
        focused,
        bp.grid_columns(),
        spinner,
    );

    let entries = app.log_buffer.get_all();
    app.logs_panel.render(f, chunks[2], &entries, &app.theme);

    components::render_status(f, chunks[3], app);

    if let Some(ref modal) = app.modal {
        modal::render(f, modal, app);
    }

    // Toast goes on top of the modal too
    if let Some(ref toast) = app.toast {
        let area = f.area();
        toast.render(f, area, &app.theme);
    }

    app.clear_expired_toast();
}

// Header component
//
// Brand, search box, cart counter and the sign-in entry point, left to right.

use crate::tui::app::App;
use crate::tui::scroll::FocusablePanel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BRAND_WIDTH: u16 = 10;
const CART_WIDTH: u16 = 14;
const SIGN_IN_WIDTH: u16 = 15;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BRAND_WIDTH),
            Constraint::Min(10),
            Constraint::Length(CART_WIDTH),
            Constraint::Length(SIGN_IN_WIDTH),
        ])
        .split(area);

    let brand = Paragraph::new(Line::from(Span::styled(
        "Loga",
        Style::default()
            .fg(theme.brand)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.brand)),
    );
    f.render_widget(brand, chunks[0]);

    app.search.render(
        f,
        chunks[1],
        theme,
        app.is_focused(FocusablePanel::Search),
    );

    let count = app.storefront.cart_count();
    let cart_style = if count > 0 {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.foreground)
    };
    let cart = Paragraph::new(Line::from(Span::styled(
        format!("Cart ({})", count),
        cart_style,
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(cart, chunks[2]);

    let sign_in = Paragraph::new(Line::from(vec![
        Span::styled("i", Style::default().fg(theme.accent)),
        Span::styled(" Sign in", Style::default().fg(theme.foreground)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title_top(Line::from(" ? ").right_aligned()),
    );
    f.render_widget(sign_in, chunks[3]);
}

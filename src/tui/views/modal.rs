// Modal overlay rendering
//
// Modals are rendered on top of the main content:
// - Help modal: keyboard shortcuts and current config
// - Product modal: one product in full, with cart actions

use crate::catalog::{Product, ProductId};
use crate::tui::app::App;
use crate::tui::components::formatters::format_price;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Product(id) => render_product(f, app, *id),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn modal_background(app: &App) -> Style {
    Style::default().bg(app.theme.background.unwrap_or(Color::Reset))
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.accent);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(app.theme.border);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Navigation", header_style)),
        kb("Tab", "Next panel"),
        kb("Shift+Tab", "Previous panel"),
        kb("/", "Search"),
        kb("↑↓←→, j/k", "Move"),
        kb("PgUp/PgDn", "Page"),
        kb("Home/End", "First / last product"),
        Line::raw(""),
        Line::from(Span::styled("  Filters", header_style)),
        kb("Space", "Toggle category"),
        kb("c", "Clear categories"),
        kb("R", "Reset all filters"),
        Line::raw(""),
        Line::from(Span::styled("  Products", header_style)),
        kb("Enter", "Product details"),
        kb("a", "Add to cart"),
        kb("b", "Buy now"),
        kb("r", "Retry failed page"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("i", "Sign in"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(Span::styled(
            "  ──────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(&app.theme.name, key_style),
            Span::styled("  |  Page size: ", desc_style),
            Span::styled(app.storefront.loader().page_size().to_string(), key_style),
        ]),
    ]);

    let area = centered_rect(44, 30, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content).style(modal_background(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.highlight))
            .border_type(app.theme.border_type)
            .title(" Help ")
            .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
    );

    f.render_widget(paragraph, area);
}

fn render_product(f: &mut Frame, app: &App, id: ProductId) {
    // Product left the list (filter changed underneath): nothing to show
    let Some(product) = app.storefront.product(id) else {
        return;
    };

    let frame_area = f.area();
    let width = ((u32::from(frame_area.width) * 60 / 100) as u16).max(40);
    let area = centered_rect(width, 13, frame_area);
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(product_lines(product, app))
        .style(modal_background(app))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.panel_grid))
                .title(format!(" Product {} ", product.id))
                .title_bottom(Line::from(" a:add to cart  b:buy now  Esc:close ").centered()),
        );
    f.render_widget(paragraph, area);
}

fn product_lines<'a>(product: &'a Product, app: &App) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let label = Style::default().fg(theme.muted);

    let mut price = vec![Span::styled(
        format_price(product.final_price()),
        Style::default()
            .fg(theme.price)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(percent) = product.discount_percent.filter(|p| *p > 0) {
        price.push(Span::raw("  "));
        price.push(Span::styled(
            format_price(product.price),
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::CROSSED_OUT),
        ));
        price.push(Span::styled(
            format!("  -{}%", percent),
            Style::default().fg(theme.discount),
        ));
    }

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {}", product.name),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Category  ", label),
            Span::styled(product.category.as_str(), Style::default().fg(theme.foreground)),
        ]),
        Line::from([vec![Span::styled("  Price     ", label)], price].concat()),
    ];
    if let Some(image) = &product.image {
        lines.push(Line::from(vec![
            Span::styled("  Image     ", label),
            Span::styled(image.as_str(), Style::default().fg(theme.muted)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!("  In cart: {}", app.storefront.cart_count()),
        Style::default().fg(theme.accent),
    )));
    lines
}

#[cfg(test)]
mod tests {
    use crate::catalog::{MockCatalog, ProductId};
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::tui::app::App;
    use crate::tui::modal::Modal;
    use crate::tui::views;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_product_modal_on_very_wide_terminal() {
        let config = Config {
            fetch_delay: Duration::ZERO,
            ..Config::default()
        };
        let (mut app, mut channels) =
            App::new(&config, LogBuffer::new(), Arc::new(MockCatalog::new()));
        app.mount();
        let outcome = channels.outcomes.recv().await.unwrap();
        app.apply_outcome(outcome);
        app.modal = Some(Modal::product(ProductId(1)));

        let mut terminal = Terminal::new(TestBackend::new(1200, 40)).unwrap();
        terminal.draw(|f| views::draw(f, &mut app)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Premium Business Suit"));
    }
}

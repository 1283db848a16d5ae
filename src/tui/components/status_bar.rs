// Status bar component
//
// Left: key hints for the focused panel. Right: what the loader is doing
// (epoch, items, page, loading or exhausted) and the active filter.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let loader = app.storefront.loader();

    let state = if loader.is_loading() {
        format!("{} loading", app.spinner_char())
    } else if loader.last_error().is_some() {
        "failed".to_string()
    } else if !loader.has_more() {
        "all loaded".to_string()
    } else {
        "idle".to_string()
    };

    let loader_info = format!(
        "{} │ {} items │ page {} │ {}",
        loader.epoch(),
        loader.items().len(),
        loader.page(),
        state
    );

    let right = if bp.at_least(Breakpoint::Wide) {
        format!("{} │ {} ", loader_info, app.storefront.filter())
    } else {
        format!("{} ", loader_info)
    };

    let hint = if bp.at_least(Breakpoint::Normal) {
        format!(" {}", app.focus_hint())
    } else {
        " ?:help".to_string()
    };

    let pad = (area.width as usize).saturating_sub(
        unicode_width::UnicodeWidthStr::width(hint.as_str())
            + unicode_width::UnicodeWidthStr::width(right.as_str()),
    );

    let line = Line::from(vec![
        Span::styled(hint, Style::default().fg(app.theme.muted)),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, Style::default().fg(app.theme.status_bar)),
    ]);

    let status = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

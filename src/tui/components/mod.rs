// Components module - reusable UI building blocks
//
// Shell components are rendered in every frame:
// - Header: brand, search box, cart counter, sign in
// - Category menu and item grid: the storefront body
// - Logs panel: tail of the log buffer
// - Status bar: key hints and loader state
//
// Panels that take focus implement `Interactive` and emit intents; they never
// touch the storefront directly.

pub mod category_menu;
pub mod formatters;
pub mod header;
pub mod item_grid;
pub mod logs_panel;
pub mod scrollbar;
pub mod search_box;
pub mod status_bar;
pub mod toast;

pub use category_menu::CategoryMenu;
pub use item_grid::ItemGrid;
pub use logs_panel::LogsPanel;
pub use search_box::SearchBox;
pub use toast::Toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the header (convenience wrapper)
pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    header::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}
